//! Error and pagination mapping for GitHub responses

use purge_runs_core::PurgeError;

/// Maps an octocrab error, keeping the HTTP status when GitHub sent one
pub(crate) fn map_octocrab_error(err: octocrab::Error, context: &str) -> PurgeError {
    match &err {
        octocrab::Error::GitHub { source, .. } => PurgeError::from_status(
            source.status_code.as_u16(),
            format!("{context}: {}", source.message),
        ),
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
            PurgeError::SerializationError(format!("{context}: {err}"))
        }
        _ => PurgeError::NetworkError(format!("{context}: {err}")),
    }
}

/// Next page to request, `None` when this page was the last one
pub(crate) fn next_page(page: u32, per_page: u8, fetched: usize, total_count: u64) -> Option<u32> {
    let seen = u64::from(page) * u64::from(per_page);
    (fetched >= usize::from(per_page) && seen < total_count).then_some(page + 1)
}

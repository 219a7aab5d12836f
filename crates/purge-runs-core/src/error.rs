use thiserror::Error;

/// Errors raised while configuring, listing or deleting workflow runs
#[derive(Error, Debug)]
pub enum PurgeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Workflow run not found: {0}")]
    RunNotFound(String),

    #[error("Incomplete listing: {0}")]
    IncompleteListing(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PurgeResult<T> = Result<T, PurgeError>;

impl From<serde_json::Error> for PurgeError {
    fn from(err: serde_json::Error) -> Self {
        PurgeError::SerializationError(err.to_string())
    }
}

impl PurgeError {
    /// Builds the error matching an HTTP status returned by the API
    pub fn from_status(status: u16, context: impl Into<String>) -> Self {
        let context = context.into();
        match status {
            401 => PurgeError::AuthenticationFailed(context),
            403 => PurgeError::PermissionDenied(context),
            404 => PurgeError::RunNotFound(context),
            _ => PurgeError::ApiError(format!("{context} (HTTP {status})")),
        }
    }
}

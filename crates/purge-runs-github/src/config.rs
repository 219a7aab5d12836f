//! Configuration for the GitHub backend

use purge_runs_core::{
    PurgeError,
    PurgeResult,
};
use secrecy::{
    ExposeSecret,
    SecretString,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://github.com";
pub(crate) const DEFAULT_PER_PAGE: u8 = 100;

/// Token and endpoint used to reach GitHub or a GitHub Enterprise server
#[derive(Debug)]
pub struct GitHubConfig {
    pub token: SecretString,
    pub base_url: String,
    pub per_page: u8,
}

impl GitHubConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Page size used while listing, clamped to what the API accepts (1..=100)
    pub fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page.clamp(1, DEFAULT_PER_PAGE);
        self
    }

    pub(crate) fn validate(&self) -> PurgeResult<()> {
        if self.token.expose_secret().trim().is_empty() {
            return Err(PurgeError::InvalidConfig(
                "GitHub token is empty. Set GITHUB_TOKEN or GH_TOKEN.".to_string(),
            ));
        }
        if self.per_page == 0 {
            return Err(PurgeError::InvalidConfig(
                "per_page must be between 1 and 100".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn api_url(&self) -> String {
        build_api_url(&normalize_base_url(&self.base_url))
    }
}

/// Trims the configured base URL, defaulting to GitHub.com when blank
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.trim_end_matches('/').to_string()
    }
}

/// Builds the REST API root from the base URL
pub(crate) fn build_api_url(base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');

    // GitHub Enterprise serves the API under /api/v3, GitHub.com under api.github.com
    if base_url.contains("api.github.com") || base_url.ends_with("/api/v3") {
        base_url.to_string()
    } else if base_url.contains("github.com") {
        "https://api.github.com".to_string()
    } else {
        format!("{base_url}/api/v3")
    }
}

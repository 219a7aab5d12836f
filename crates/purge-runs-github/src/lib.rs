//! GitHub Actions backend for purge-runs
//!
//! - `client` - `GitHubClient`, the `WorkflowRunsApi` implementation
//! - `config` - token and API endpoint settings
//! - `types` - the slice of the REST payloads this crate reads
//! - `mapper` - octocrab error mapping and paging

mod client;
mod config;
mod mapper;
mod types;

pub use client::GitHubClient;
pub use config::GitHubConfig;

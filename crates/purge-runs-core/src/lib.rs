//! Core of purge-runs: deletes every workflow run of a repository.
//!
//! The crate is organized into:
//! - `api` - the `WorkflowRunsApi` trait the remote service is reached through
//! - `purger` - `RunPurger`, which lists every run and deletes them in order
//! - `types` - repository/run identifiers and the purge report
//! - `options` - per-invocation options
//! - `logging` - tracing subscriber setup shared by binaries

pub mod api;
pub mod error;
pub mod logging;
pub mod options;
pub mod purger;
pub mod types;

pub use api::WorkflowRunsApi;
pub use error::{
    PurgeError,
    PurgeResult,
};
pub use options::PurgeOptions;
pub use purger::RunPurger;
pub use types::{
    DeleteOutcome,
    ExitPolicy,
    PurgeReport,
    PurgeStatus,
    RepositoryId,
    RunId,
    RunOrder,
    RunPage,
};

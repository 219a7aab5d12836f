use async_trait::async_trait;

use crate::error::PurgeResult;
use crate::types::{
    RepositoryId,
    RunId,
    RunPage,
};

/// Remote service holding the workflow runs of a repository
///
/// Authentication, transport timeouts and rate limiting belong to the
/// implementation; the purger only lists and deletes.
#[async_trait]
pub trait WorkflowRunsApi: Send + Sync {
    /// Fetch one page (1-based) of the repository's workflow runs
    async fn list_runs_page(&self, repo: &RepositoryId, page: u32) -> PurgeResult<RunPage>;

    /// Delete a single workflow run
    async fn delete_run(&self, repo: &RepositoryId, run_id: RunId) -> PurgeResult<()>;
}

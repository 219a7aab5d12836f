use async_trait::async_trait;
use octocrab::Octocrab;
use purge_runs_core::{
    PurgeError,
    PurgeResult,
    RepositoryId,
    RunId,
    RunPage,
    WorkflowRunsApi,
};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::config::GitHubConfig;
use crate::mapper;
use crate::types::{
    ListRunsParams,
    WorkflowRunsResponse,
};

/// Lists and deletes workflow runs through a single authenticated octocrab
/// instance.
///
/// A rustls crypto provider must be installed before `new` is called.
pub struct GitHubClient {
    octocrab: Octocrab,
    per_page: u8,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> PurgeResult<Self> {
        config.validate()?;

        let api_url = config.api_url();
        debug!("Using GitHub API at {api_url}");

        let octocrab = Octocrab::builder()
            .personal_token(config.token.expose_secret().to_string())
            .base_uri(api_url)
            .map_err(|e| PurgeError::InvalidConfig(format!("Invalid GitHub API URL: {e}")))?
            .build()
            .map_err(|e| {
                PurgeError::InvalidConfig(format!("Failed to build GitHub client: {e}"))
            })?;

        Ok(Self {
            octocrab,
            per_page: config.per_page,
        })
    }
}

fn runs_route(repo: &RepositoryId) -> String {
    format!("/repos/{}/{}/actions/runs", repo.owner, repo.name)
}

fn run_route(repo: &RepositoryId, run_id: RunId) -> String {
    format!("{}/{run_id}", runs_route(repo))
}

#[async_trait]
impl WorkflowRunsApi for GitHubClient {
    async fn list_runs_page(&self, repo: &RepositoryId, page: u32) -> PurgeResult<RunPage> {
        let route = runs_route(repo);
        let params = ListRunsParams {
            per_page: self.per_page,
            page,
        };

        let response: WorkflowRunsResponse = self
            .octocrab
            .get(route, Some(&params))
            .await
            .map_err(|e| {
                mapper::map_octocrab_error(e, &format!("Failed to list workflow runs for {repo}"))
            })?;

        let run_ids: Vec<RunId> = response
            .workflow_runs
            .into_iter()
            .map(|run| RunId(run.id))
            .collect();

        debug!(
            "Page {page} for {repo}: {} runs of {}",
            run_ids.len(),
            response.total_count
        );

        Ok(RunPage {
            next_page: mapper::next_page(
                page,
                self.per_page,
                run_ids.len(),
                response.total_count,
            ),
            total_count: Some(response.total_count),
            run_ids,
        })
    }

    async fn delete_run(&self, repo: &RepositoryId, run_id: RunId) -> PurgeResult<()> {
        let context = format!("Failed to delete run {run_id} in {repo}");

        // GitHub answers 204 with an empty body, so the raw response is inspected
        let response = self
            .octocrab
            ._delete(run_route(repo, run_id), None::<&()>)
            .await
            .map_err(|e| mapper::map_octocrab_error(e, &context))?;

        let status = response.status();
        if status.is_success() {
            debug!("Run {run_id} deleted from {repo}");
            return Ok(());
        }

        let message = match octocrab::map_github_error(response).await {
            Err(octocrab::Error::GitHub { source, .. }) => source.message,
            _ => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };

        Err(PurgeError::from_status(
            status.as_u16(),
            format!("{context}: {message}"),
        ))
    }
}

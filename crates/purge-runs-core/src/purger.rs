use tracing::{
    debug,
    info,
    warn,
};

use crate::api::WorkflowRunsApi;
use crate::error::{
    PurgeError,
    PurgeResult,
};
use crate::options::PurgeOptions;
use crate::types::{
    DeleteOutcome,
    PurgeReport,
    RunId,
};

/// Lists every workflow run of a repository, then deletes them one by one
pub struct RunPurger<A> {
    api: A,
    options: PurgeOptions,
}

impl<A: WorkflowRunsApi> RunPurger<A> {
    /// Upper bound on pages fetched while listing. Reaching it fails the
    /// listing instead of deleting a partial one.
    pub const MAX_PAGES: u32 = 10_000;

    pub fn new(api: A, options: PurgeOptions) -> Self {
        Self { api, options }
    }

    /// Collects the IDs of every run across all pages, in service order
    pub async fn list_run_ids(&self) -> PurgeResult<Vec<RunId>> {
        let repo = &self.options.repository;
        let mut ids = Vec::new();
        let mut page = 1u32;

        loop {
            let result = self.api.list_runs_page(repo, page).await?;
            let fetched = result.run_ids.len();
            debug!(
                "Fetched page {page} of runs for {repo}: {fetched} runs (total reported: {:?})",
                result.total_count
            );

            ids.extend(result.run_ids);

            match result.next_page {
                Some(_) if fetched == 0 => break,
                None => break,
                Some(next) if next <= page => {
                    return Err(PurgeError::IncompleteListing(format!(
                        "service returned next page {next} after page {page} for {repo}"
                    )));
                }
                Some(_) if page >= Self::MAX_PAGES => {
                    return Err(PurgeError::IncompleteListing(format!(
                        "more than {} pages of runs for {repo}",
                        Self::MAX_PAGES
                    )));
                }
                Some(next) => page = next,
            }
        }

        Ok(ids)
    }

    /// Lists all runs, then deletes each one sequentially in the configured
    /// order. Failed deletes are recorded and never stop the loop.
    pub async fn purge(&self) -> PurgeResult<PurgeReport> {
        self.options.validate()?;

        let repo = &self.options.repository;
        info!("Listing workflow runs for {repo}");

        let listed = self.options.order.apply(self.list_run_ids().await?);
        info!("Found {} workflow runs in {repo}", listed.len());

        let mut outcomes = Vec::with_capacity(if self.options.dry_run { 0 } else { listed.len() });

        if self.options.dry_run {
            info!("Dry run: skipping deletion of {} runs", listed.len());
        } else {
            for &run_id in &listed {
                debug!("Deleting run {run_id} in {repo}");

                let error = match self.api.delete_run(repo, run_id).await {
                    Ok(()) => None,
                    Err(e) => {
                        warn!("Failed to delete run {run_id} in {repo}: {e}");
                        Some(e.to_string())
                    }
                };

                outcomes.push(DeleteOutcome { run_id, error });
            }
        }

        let report = PurgeReport {
            repository: repo.to_string(),
            dry_run: self.options.dry_run,
            order: self.options.order,
            listed,
            outcomes,
        };

        info!(
            "Purge of {repo} finished: found {}, deleted {}, failed {}",
            report.found(),
            report.deleted(),
            report.failed()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::types::{
        ExitPolicy,
        PurgeStatus,
        RepositoryId,
        RunOrder,
        RunPage,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        List(String, u32),
        Delete(String, u64),
    }

    /// In-memory service: serves fixed pages and records every call
    #[derive(Default)]
    struct FakeApi {
        pages: Vec<Vec<u64>>,
        failing: HashSet<u64>,
        list_error: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeApi {
        fn with_pages(pages: Vec<Vec<u64>>) -> Self {
            Self {
                pages,
                ..Default::default()
            }
        }

        fn failing_on(mut self, id: u64) -> Self {
            self.failing.insert(id);
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn deleted(&self) -> Vec<u64> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Delete(_, id) => Some(id),
                    Call::List(..) => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl WorkflowRunsApi for FakeApi {
        async fn list_runs_page(&self, repo: &RepositoryId, page: u32) -> PurgeResult<RunPage> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::List(repo.to_string(), page));

            if self.list_error {
                return Err(PurgeError::NetworkError("connection reset".to_string()));
            }

            let index = page as usize - 1;
            let run_ids = self
                .pages
                .get(index)
                .map(|ids| ids.iter().copied().map(RunId).collect())
                .unwrap_or_default();
            let next_page = (index + 1 < self.pages.len()).then_some(page + 1);
            let total = self.pages.iter().map(Vec::len).sum::<usize>() as u64;

            Ok(RunPage {
                run_ids,
                next_page,
                total_count: Some(total),
            })
        }

        async fn delete_run(&self, repo: &RepositoryId, run_id: RunId) -> PurgeResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Delete(repo.to_string(), run_id.0));

            if self.failing.contains(&run_id.0) {
                Err(PurgeError::PermissionDenied(format!("cannot delete {run_id}")))
            } else {
                Ok(())
            }
        }
    }

    fn options() -> PurgeOptions {
        PurgeOptions::new(RepositoryId::new("acme", "widgets").unwrap())
    }

    #[tokio::test]
    async fn test_deletes_every_listed_run_once() {
        let api = FakeApi::with_pages(vec![vec![10, 11, 12, 13]]);
        let purger = RunPurger::new(api, options());

        let report = purger.purge().await.unwrap();

        assert_eq!(purger.api.deleted(), vec![10, 11, 12, 13]);
        assert!(purger
            .api
            .calls()
            .iter()
            .all(|c| matches!(c, Call::List(r, _) | Call::Delete(r, _) if r == "acme/widgets")));
        assert_eq!(report.found(), 4);
        assert_eq!(report.deleted(), 4);
        assert_eq!(report.failed(), 0);
        assert!(report.status(ExitPolicy::Aggregate).is_success());
    }

    #[tokio::test]
    async fn test_empty_listing_deletes_nothing() {
        let api = FakeApi::with_pages(vec![vec![]]);
        let purger = RunPurger::new(api, options());

        let report = purger.purge().await.unwrap();

        assert!(purger.api.deleted().is_empty());
        assert_eq!(report.found(), 0);
        assert!(report.status(ExitPolicy::Aggregate).is_success());
        assert!(report.status(ExitPolicy::LastCall).is_success());
    }

    #[tokio::test]
    async fn test_deletes_follow_listing_order() {
        let api = FakeApi::with_pages(vec![vec![501, 203, 9]]);
        let purger = RunPurger::new(api, options());

        purger.purge().await.unwrap();

        assert_eq!(purger.api.deleted(), vec![501, 203, 9]);
    }

    #[tokio::test]
    async fn test_pagination_collects_all_before_deleting() {
        let api = FakeApi::with_pages(vec![vec![1, 2], vec![3, 4], vec![5]]);
        let purger = RunPurger::new(api, options());

        let report = purger.purge().await.unwrap();

        assert_eq!(
            report.listed,
            vec![RunId(1), RunId(2), RunId(3), RunId(4), RunId(5)]
        );

        let calls = purger.api.calls();
        let repo = "acme/widgets".to_string();
        assert_eq!(
            calls[..3],
            [
                Call::List(repo.clone(), 1),
                Call::List(repo.clone(), 2),
                Call::List(repo.clone(), 3),
            ]
        );
        assert_eq!(purger.api.deleted(), vec![1, 2, 3, 4, 5]);
        assert_eq!(calls.len(), 8);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_going_and_last_call_policy_ignores_it() {
        let api = FakeApi::with_pages(vec![vec![501, 203, 9]]).failing_on(203);
        let purger = RunPurger::new(api, options());

        let report = purger.purge().await.unwrap();

        assert_eq!(purger.api.deleted(), vec![501, 203, 9]);
        assert_eq!(report.deleted(), 2);
        assert_eq!(report.failed_ids(), vec![RunId(203)]);
        assert_eq!(report.last_outcome().map(|o| o.run_id), Some(RunId(9)));

        // Legacy semantics: only the final delete decides the status
        assert_eq!(report.status(ExitPolicy::LastCall), PurgeStatus::Success);
        assert_eq!(report.status(ExitPolicy::Aggregate), PurgeStatus::Failed);
    }

    #[tokio::test]
    async fn test_failure_on_last_delete_fails_last_call_policy() {
        let api = FakeApi::with_pages(vec![vec![501, 203, 9]]).failing_on(9);
        let purger = RunPurger::new(api, options());

        let report = purger.purge().await.unwrap();

        assert_eq!(report.status(ExitPolicy::LastCall), PurgeStatus::Failed);
    }

    #[tokio::test]
    async fn test_second_run_on_empty_repository_is_noop() {
        let first = RunPurger::new(FakeApi::with_pages(vec![vec![1, 2, 3]]), options());
        first.purge().await.unwrap();
        assert_eq!(first.api.deleted().len(), 3);

        let second = RunPurger::new(FakeApi::with_pages(Vec::new()), options());
        let report = second.purge().await.unwrap();

        assert!(second.api.deleted().is_empty());
        assert_eq!(report.found(), 0);
    }

    #[tokio::test]
    async fn test_listing_error_deletes_nothing() {
        let api = FakeApi {
            pages: vec![vec![1, 2]],
            list_error: true,
            ..Default::default()
        };
        let purger = RunPurger::new(api, options());

        let result = purger.purge().await;

        assert!(matches!(result, Err(PurgeError::NetworkError(_))));
        assert!(purger.api.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_lists_without_deleting() {
        let api = FakeApi::with_pages(vec![vec![1, 2], vec![3]]);
        let purger = RunPurger::new(api, options().with_dry_run(true));

        let report = purger.purge().await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.found(), 3);
        assert!(report.outcomes.is_empty());
        assert!(purger.api.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_reversed_order_deletes_oldest_first() {
        let api = FakeApi::with_pages(vec![vec![501, 203], vec![9]]);
        let purger = RunPurger::new(api, options().with_order(RunOrder::Reversed));

        purger.purge().await.unwrap();

        assert_eq!(purger.api.deleted(), vec![9, 203, 501]);
    }

    #[tokio::test]
    async fn test_blank_repository_is_rejected_before_any_call() {
        let api = FakeApi::with_pages(vec![vec![1]]);
        let options = PurgeOptions::new(RepositoryId {
            owner: String::new(),
            name: "widgets".to_string(),
        });
        let purger = RunPurger::new(api, options);

        let result = purger.purge().await;

        assert!(matches!(result, Err(PurgeError::InvalidConfig(_))));
        assert!(purger.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_listing_stops_on_empty_page_even_with_next() {
        struct EndlessApi;

        #[async_trait]
        impl WorkflowRunsApi for EndlessApi {
            async fn list_runs_page(
                &self, _repo: &RepositoryId, page: u32,
            ) -> PurgeResult<RunPage> {
                let run_ids = if page == 1 { vec![RunId(42)] } else { Vec::new() };
                Ok(RunPage {
                    run_ids,
                    next_page: Some(page + 1),
                    total_count: None,
                })
            }

            async fn delete_run(&self, _repo: &RepositoryId, _run_id: RunId) -> PurgeResult<()> {
                Ok(())
            }
        }

        let purger = RunPurger::new(EndlessApi, options());
        assert_eq!(purger.list_run_ids().await.unwrap(), vec![RunId(42)]);
    }

    /// Serves a single-run page forever, always pointing at `page + step`
    struct UnboundedApi {
        step: u32,
        list_calls: Mutex<u32>,
    }

    impl UnboundedApi {
        fn new(step: u32) -> Self {
            Self {
                step,
                list_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl WorkflowRunsApi for UnboundedApi {
        async fn list_runs_page(&self, _repo: &RepositoryId, page: u32) -> PurgeResult<RunPage> {
            *self.list_calls.lock().unwrap() += 1;
            Ok(RunPage {
                run_ids: vec![RunId(u64::from(page))],
                next_page: Some(page + self.step),
                total_count: None,
            })
        }

        async fn delete_run(&self, _repo: &RepositoryId, run_id: RunId) -> PurgeResult<()> {
            panic!("run {run_id} deleted from an incomplete listing");
        }
    }

    #[tokio::test]
    async fn test_page_limit_fails_purge_without_deleting() {
        let purger = RunPurger::new(UnboundedApi::new(1), options());

        let result = purger.purge().await;

        assert!(matches!(result, Err(PurgeError::IncompleteListing(_))));
        assert_eq!(
            *purger.api.list_calls.lock().unwrap(),
            RunPurger::<UnboundedApi>::MAX_PAGES
        );
    }

    #[tokio::test]
    async fn test_next_page_that_does_not_advance_is_rejected() {
        let purger = RunPurger::new(UnboundedApi::new(0), options());

        let result = purger.list_run_ids().await;

        assert!(matches!(result, Err(PurgeError::IncompleteListing(_))));
        assert_eq!(*purger.api.list_calls.lock().unwrap(), 1);
    }
}

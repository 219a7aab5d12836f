//! REST payloads read by this crate
//!
//! Only the fields the purger needs are modelled; everything else in the
//! run objects is ignored.

use serde::{
    Deserialize,
    Serialize,
};

/// Body of `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Deserialize)]
pub(crate) struct WorkflowRunsResponse {
    pub total_count: u64,
    #[serde(default)]
    pub workflow_runs: Vec<RunSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunSummary {
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListRunsParams {
    pub per_page: u8,
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_response_ignores_extra_fields() {
        let body = serde_json::json!({
            "total_count": 2,
            "workflow_runs": [
                { "id": 501, "name": "CI", "status": "completed", "head_commit": null },
                { "id": 203 }
            ]
        });

        let response: WorkflowRunsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.total_count, 2);
        let ids: Vec<u64> = response.workflow_runs.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![501, 203]);
    }
}

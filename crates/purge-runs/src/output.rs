use purge_runs_core::{
    ExitPolicy,
    PurgeReport,
    PurgeStatus,
    RunId,
};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a PurgeReport,
    found: usize,
    deleted: usize,
    failed: usize,
    status: PurgeStatus,
}

pub fn render_json(report: &PurgeReport, policy: ExitPolicy) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        report,
        found: report.found(),
        deleted: report.deleted(),
        failed: report.failed(),
        status: report.status(policy),
    })
}

pub fn render_summary(report: &PurgeReport) -> String {
    if report.dry_run {
        let mut summary = format!(
            "{}: found {} workflow runs (dry run, nothing deleted)",
            report.repository,
            report.found()
        );
        if !report.listed.is_empty() {
            summary.push_str(&format!("\nwould delete: {}", join_ids(&report.listed)));
        }
        return summary;
    }

    let mut summary = format!(
        "{}: found {} workflow runs, deleted {}, failed {}",
        report.repository,
        report.found(),
        report.deleted(),
        report.failed()
    );

    let failed = report.failed_ids();
    if !failed.is_empty() {
        summary.push_str(&format!("\nfailed run IDs: {}", join_ids(&failed)));
    }
    summary
}

fn join_ids(ids: &[RunId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

mod cli;
mod output;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use purge_runs_core::{
    logging,
    PurgeError,
    PurgeOptions,
    RunPurger,
};
use purge_runs_github::{
    GitHubClient,
    GitHubConfig,
};

use crate::cli::Cli;

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Already installed is fine; anything else surfaces when the clients are built
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    if cli.verbose {
        logging::init_verbose();
    } else {
        logging::init();
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let repository = cli.repository()?;
    let token = cli::token_from_env()?;

    let config = GitHubConfig::new(token)
        .with_base_url(&cli.base_url)
        .with_per_page(cli.per_page);
    let client = GitHubClient::new(config).context("Failed to set up GitHub client")?;

    let options = PurgeOptions::new(repository)
        .with_order(cli.order.into())
        .with_dry_run(cli.dry_run);

    tracing::info!(
        "Purging workflow runs of {} (order: {:?}, dry run: {})",
        options.repository,
        options.order,
        options.dry_run
    );

    let report = RunPurger::new(client, options)
        .purge()
        .await
        .context("Failed to purge workflow runs")?;

    let policy = cli.exit_policy.into();
    if cli.json {
        println!("{}", output::render_json(&report, policy)?);
    } else {
        println!("{}", output::render_summary(&report));
    }

    if report.status(policy).is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAILURE))
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PurgeError>() {
        Some(PurgeError::InvalidConfig(_)) => EXIT_CONFIG,
        _ => EXIT_FAILURE,
    }
}

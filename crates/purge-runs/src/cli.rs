use clap::{
    Parser,
    ValueEnum,
};
use purge_runs_core::{
    ExitPolicy,
    PurgeError,
    PurgeResult,
    RepositoryId,
    RunOrder,
};

/// Token variables checked in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Delete every GitHub Actions workflow run of a repository.
///
/// All runs are listed first, then deleted one at a time. This cannot be
/// undone. Authentication is read from GITHUB_TOKEN (or GH_TOKEN).
#[derive(Debug, Parser)]
#[command(name = "purge-runs", version)]
pub struct Cli {
    /// Organization or user owning the repository
    #[arg(long, env = "PURGE_RUNS_ORG")]
    pub org: Option<String>,

    /// Repository name, or `owner/name` when --org is omitted
    #[arg(long, env = "PURGE_RUNS_REPO")]
    pub repo: String,

    /// Deletion order
    #[arg(long, value_enum, default_value_t = OrderArg::Listed)]
    pub order: OrderArg,

    /// List the runs that would be deleted without deleting them
    #[arg(long)]
    pub dry_run: bool,

    /// How the exit status is derived from the individual deletes
    #[arg(long, value_enum, default_value_t = ExitPolicyArg::Aggregate)]
    pub exit_policy: ExitPolicyArg,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// GitHub or GitHub Enterprise base URL
    #[arg(long, env = "GITHUB_BASE_URL", default_value = "https://github.com")]
    pub base_url: String,

    /// Runs requested per listing page
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub per_page: u8,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// As returned by GitHub (newest first)
    Listed,
    /// Oldest run first
    OldestFirst,
}

impl From<OrderArg> for RunOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Listed => RunOrder::Listed,
            OrderArg::OldestFirst => RunOrder::Reversed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExitPolicyArg {
    /// Fail when any delete failed
    Aggregate,
    /// Only the last delete decides the exit status
    LastCall,
}

impl From<ExitPolicyArg> for ExitPolicy {
    fn from(arg: ExitPolicyArg) -> Self {
        match arg {
            ExitPolicyArg::Aggregate => ExitPolicy::Aggregate,
            ExitPolicyArg::LastCall => ExitPolicy::LastCall,
        }
    }
}

impl Cli {
    pub fn repository(&self) -> PurgeResult<RepositoryId> {
        match &self.org {
            Some(org) => RepositoryId::new(org, &self.repo),
            None => self.repo.parse(),
        }
    }
}

/// Reads the API token from the environment
pub fn token_from_env() -> PurgeResult<String> {
    token_from(|name| std::env::var(name).ok())
}

fn token_from(lookup: impl Fn(&str) -> Option<String>) -> PurgeResult<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            PurgeError::InvalidConfig(format!(
                "No GitHub token found. Set {}.",
                TOKEN_ENV_VARS.join(" or ")
            ))
        })
}

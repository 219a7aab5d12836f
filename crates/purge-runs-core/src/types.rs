use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    PurgeError,
    PurgeResult,
};

/// An `owner/name` pair identifying the repository whose runs are purged
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> PurgeResult<Self> {
        let owner = owner.into().trim().to_string();
        let name = name.into().trim().to_string();

        if owner.is_empty() {
            return Err(PurgeError::InvalidConfig(
                "Organization (repository owner) must not be empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(PurgeError::InvalidConfig(
                "Repository name must not be empty".to_string(),
            ));
        }
        if owner.contains('/') || name.contains('/') {
            return Err(PurgeError::InvalidConfig(format!(
                "Invalid repository: {owner}/{name}"
            )));
        }

        Ok(Self { owner, name })
    }
}

impl FromStr for RepositoryId {
    type Err = PurgeError;

    /// Parses the `owner/name` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => Err(PurgeError::InvalidConfig(format!(
                "Invalid repository format: {s} (expected owner/name)"
            ))),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Identifier of a workflow run, owned by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of a workflow run listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPage {
    pub run_ids: Vec<RunId>,
    /// Page to request next, `None` once the listing is exhausted
    pub next_page: Option<u32>,
    pub total_count: Option<u64>,
}

/// Order in which listed runs are deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunOrder {
    /// Exactly as returned by the service (newest first on GitHub)
    #[default]
    Listed,
    /// Reverse of the listing, i.e. oldest first
    Reversed,
}

impl RunOrder {
    pub fn apply(self, mut ids: Vec<RunId>) -> Vec<RunId> {
        if self == RunOrder::Reversed {
            ids.reverse();
        }
        ids
    }
}

/// How a purge report is turned into an overall status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Failure when any delete failed
    #[default]
    Aggregate,
    /// Only the outcome of the final delete counts
    LastCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeStatus {
    Success,
    Failed,
}

impl PurgeStatus {
    pub fn is_success(self) -> bool {
        self == PurgeStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub run_id: RunId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of one purge invocation
#[derive(Debug, Clone, Serialize)]
pub struct PurgeReport {
    pub repository: String,
    pub dry_run: bool,
    pub order: RunOrder,
    /// Run IDs in the order they were (or would have been) deleted
    pub listed: Vec<RunId>,
    pub outcomes: Vec<DeleteOutcome>,
}

impl PurgeReport {
    pub fn found(&self) -> usize {
        self.listed.len()
    }

    pub fn deleted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.deleted()
    }

    pub fn failed_ids(&self) -> Vec<RunId> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| o.run_id)
            .collect()
    }

    pub fn last_outcome(&self) -> Option<&DeleteOutcome> {
        self.outcomes.last()
    }

    pub fn status(&self, policy: ExitPolicy) -> PurgeStatus {
        let ok = match policy {
            ExitPolicy::Aggregate => self.failed() == 0,
            ExitPolicy::LastCall => self.last_outcome().map_or(true, |o| o.succeeded()),
        };

        if ok {
            PurgeStatus::Success
        } else {
            PurgeStatus::Failed
        }
    }
}

//! Options for a single purge invocation

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::PurgeResult;
use crate::types::{
    RepositoryId,
    RunOrder,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeOptions {
    pub repository: RepositoryId,
    #[serde(default)]
    pub order: RunOrder,
    /// List and report without issuing any delete
    #[serde(default)]
    pub dry_run: bool,
}

impl PurgeOptions {
    pub fn new(repository: RepositoryId) -> Self {
        Self {
            repository,
            order: RunOrder::default(),
            dry_run: false,
        }
    }

    pub fn with_order(mut self, order: RunOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Re-checks the repository parts, which may have been built by hand or
    /// deserialized without going through `RepositoryId::new`
    pub fn validate(&self) -> PurgeResult<()> {
        RepositoryId::new(&self.repository.owner, &self.repository.name).map(|_| ())
    }
}

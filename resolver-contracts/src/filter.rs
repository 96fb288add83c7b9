//! Remote-repository filtering: a pluggable accept/reject decision per
//! repository, plus the manager that decides whether filtering is active
//! at all for a session.

use async_trait::async_trait;
use resolver_model::{Artifact, RemoteRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    Accepted,
    Rejected(String),
}

#[async_trait]
pub trait RemoteRepositoryFilter: Send + Sync {
    async fn accept(&self, repository: &RemoteRepository, artifact: &Artifact) -> FilterDecision;
}

/// Whether a filter is configured at all changes the "locally installed"
/// decision downstream (see `LocalLookup`'s found predicate), so this is
/// modeled as returning an `Option` rather than a always-accept default.
#[async_trait]
pub trait RemoteRepositoryFilterManager: Send + Sync {
    async fn filter_for(&self) -> Option<std::sync::Arc<dyn RemoteRepositoryFilter>>;
}

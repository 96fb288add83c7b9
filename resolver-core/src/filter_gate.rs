//! Pure decision gates: remote-repository filtering and offline checks.
//! Side effects are limited to the exceptions the caller accumulates on its
//! own [`resolver_model::ArtifactResult`].

use resolver_contracts::{FilterDecision, OfflineDecision, OfflineController, RemoteRepositoryFilter};
use resolver_model::{Artifact, RemoteRepository, ResolveError};
use std::sync::Arc;
use tracing::debug;

/// Wraps an optional [`RemoteRepositoryFilter`]. Whether a filter is
/// configured at all (not just what it decides) changes `LocalLookup`'s
/// found predicate downstream, so this carries that fact rather than
/// defaulting to an always-accept filter.
pub struct FilterGate {
    filter: Option<Arc<dyn RemoteRepositoryFilter>>,
}

impl FilterGate {
    pub fn new(filter: Option<Arc<dyn RemoteRepositoryFilter>>) -> Self {
        Self { filter }
    }

    pub fn is_active(&self) -> bool {
        self.filter.is_some()
    }

    /// Narrows `repositories` in place, returning the rejected
    /// `(repository, reason)` pairs so the caller can attach
    /// [`ResolveError::FilteredOut`] to its result.
    pub async fn apply(
        &self,
        artifact: &Artifact,
        repositories: Vec<RemoteRepository>,
    ) -> (Vec<RemoteRepository>, Vec<ResolveError>) {
        let Some(filter) = &self.filter else {
            return (repositories, Vec::new());
        };

        let mut accepted = Vec::with_capacity(repositories.len());
        let mut rejected = Vec::new();
        for repository in repositories {
            match filter.accept(&repository, artifact).await {
                FilterDecision::Accepted => accepted.push(repository),
                FilterDecision::Rejected(reason) => {
                    debug!(%artifact, repository = %repository.id, %reason, "repository rejected by filter");
                    rejected.push(ResolveError::FilteredOut {
                        artifact: artifact.to_string(),
                        repository: repository.id.to_string(),
                        reason,
                    });
                }
            }
        }
        (accepted, rejected)
    }
}

/// Wraps the offline controller. Consulted once per candidate repository
/// during download planning (§4.2 step 7 of the distilled spec).
pub struct OfflineGate {
    controller: Arc<dyn OfflineController>,
}

impl OfflineGate {
    pub fn new(controller: Arc<dyn OfflineController>) -> Self {
        Self { controller }
    }

    pub async fn check(&self, repository: &RemoteRepository) -> OfflineDecision {
        self.controller.check_offline(repository).await
    }
}

//! Lifecycle events emitted during resolution. Dispatch is a side effect
//! only — a failing dispatcher must never affect the resolution outcome.

use async_trait::async_trait;
use resolver_model::{Artifact, RemoteRepository};

/// Event order per artifact: `Resolving` -> (optional `Downloading` ->
/// `Downloaded`) -> `Resolved`. `Resolving` fires exactly once per
/// non-pre-hosted artifact, during the shared pass; `Resolved` fires
/// exactly once per result, carrying the final exception count.
#[derive(Debug, Clone)]
pub enum ArtifactEvent {
    Resolving {
        artifact: Artifact,
    },
    Downloading {
        artifact: Artifact,
        repository: RemoteRepository,
    },
    Downloaded {
        artifact: Artifact,
        repository: RemoteRepository,
        succeeded: bool,
    },
    Resolved {
        artifact: Artifact,
        exception_count: usize,
    },
}

#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Best-effort; implementations must swallow their own failures rather
    /// than return them, since a closed or full downstream channel is not a
    /// resolution failure.
    async fn dispatch(&self, event: ArtifactEvent);
}

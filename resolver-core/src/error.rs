//! Call-level error surfaced by [`crate::orchestrator::Orchestrator::resolve`].

use resolver_model::ArtifactResult;
use std::fmt;

/// Thrown when any result in a `resolve` call has no file. Carries the full,
/// order-preserved result list so callers can inspect which requests
/// succeeded alongside which failed.
pub struct ResolutionFailure(pub Vec<ArtifactResult>);

impl fmt::Debug for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionFailure")
            .field("results", &self.0.len())
            .field(
                "unresolved",
                &self.0.iter().filter(|r| !r.is_success()).count(),
            )
            .finish()
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unresolved = self.0.iter().filter(|r| !r.is_success()).count();
        write!(
            f,
            "resolution failed for {unresolved} of {} requested artifacts",
            self.0.len()
        )
    }
}

impl std::error::Error for ResolutionFailure {}

/// Cross-cutting infrastructure fault: sync-context acquisition failure or a
/// post-processor throw. Unlike [`ResolutionFailure`], these propagate
/// without carrying a result list because no well-formed result set exists
/// yet.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("failed to acquire sync context: {0}")]
    SyncContext(String),

    #[error("post-processor {name} failed: {source}")]
    PostProcessor {
        name: String,
        #[source]
        source: resolver_model::ResolveError,
    },

    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),
}

//! Post-processor capability, run once per `resolve` call after every
//! group has executed. Modeled as a named capability rather than a bare
//! closure so the orchestrator can log which post-processor ran and so
//! iteration order is deterministic (caller-supplied registration order).

use async_trait::async_trait;
use resolver_model::{ArtifactResult, Result};

#[async_trait]
pub trait PostProcessor: Send + Sync {
    fn name(&self) -> &str;

    /// A post-processor error is a cross-cutting infrastructure fault: it
    /// propagates out of `resolve` rather than being accumulated on a
    /// per-result exception list.
    async fn post_process(&self, results: &mut [ArtifactResult]) -> Result<()>;
}

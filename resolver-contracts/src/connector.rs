//! Repository connector provisioning and the batched transport call.
//!
//! Transport itself (TLS, auth, proxying, retries) is out of scope; the
//! orchestrator only needs a scoped connector handle and a single batched
//! `get`.

use async_trait::async_trait;
use resolver_model::{Download, RemoteRepository};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("no connector available for repository {repository}")]
pub struct NoConnectorError {
    pub repository: String,
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Submits the batch as a single call; implementations mutate each
    /// download's `exception` field in place rather than returning a
    /// parallel error list, matching the distilled spec's "batched; may
    /// mutate each download's exception" contract.
    async fn get(&self, downloads: &mut [Download]);

    /// Best-effort close; failures here must never mask the resolution
    /// outcome (see `resolver-core`'s `DownloadCoordinator`).
    async fn close(&self);
}

#[async_trait]
pub trait RepositoryConnectorProvider: Send + Sync {
    async fn new_connector(
        &self,
        repository: &RemoteRepository,
    ) -> std::result::Result<std::sync::Arc<dyn Connector>, NoConnectorError>;
}

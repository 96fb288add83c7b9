//! In-process provider of artifacts built by sibling modules.

use async_trait::async_trait;
use resolver_model::{Artifact, RemoteRepository, Result};
use std::path::PathBuf;

#[async_trait]
pub trait WorkspaceReader: Send + Sync {
    /// Returns a file for the (post-version) artifact if a sibling module
    /// already built it in-process.
    async fn find_artifact(&self, artifact: &Artifact) -> Result<Option<PathBuf>>;

    /// The pseudo-repository identity attributed to workspace hits on
    /// [`resolver_model::ArtifactResult::repository`].
    fn repository(&self) -> RemoteRepository;
}

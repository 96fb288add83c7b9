//! Local Repository Manager (LRM): owns the on-disk cache layout and
//! tracking metadata. Path mapping and cache-metadata registration are
//! external collaborators, consumed only through this trait.

use async_trait::async_trait;
use resolver_model::{Artifact, LocalArtifactResult, RemoteRepository, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalRepository {
    pub base_dir: PathBuf,
}

impl LocalRepository {
    /// Pseudo-repository identity attributed to a cache hit with no
    /// recorded origin, mirroring `WorkspaceReader::repository`'s role for
    /// workspace hits on `ArtifactResult::repository`.
    pub fn as_repository(&self) -> RemoteRepository {
        RemoteRepository::new(
            "local",
            self.base_dir.to_string_lossy().into_owned(),
            "local",
        )
    }
}

/// Narrowed lookup request: the artifact plus the (already filtered)
/// repositories it's allowed to have come from.
#[derive(Debug, Clone)]
pub struct LocalArtifactRequest {
    pub artifact: Artifact,
    pub filtered_repositories: Vec<RemoteRepository>,
    pub request_context: String,
}

/// Registration payload telling the LRM an artifact now exists for a
/// source repository.
#[derive(Debug, Clone)]
pub struct Registration {
    pub artifact: Artifact,
    pub repository: RemoteRepository,
    /// Request contexts the connector reported as supported for this
    /// download, passed through verbatim to the LRM.
    pub supported_contexts: Vec<String>,
}

#[async_trait]
pub trait LocalRepositoryManager: Send + Sync {
    async fn find(&self, request: &LocalArtifactRequest) -> Result<LocalArtifactResult>;

    async fn add(&self, registration: Registration) -> Result<()>;

    /// Relative path the LRM wants a download for `artifact` from `repo`
    /// written to, anchored under `repository().base_dir`.
    fn path_for_remote_artifact(
        &self,
        artifact: &Artifact,
        repo: &RemoteRepository,
        request_context: &str,
    ) -> PathBuf;

    fn repository(&self) -> LocalRepository;
}

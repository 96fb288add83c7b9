//! External version resolver: turns a coordinate + range into a concrete
//! version. Out of scope for this crate; consumed only through this trait.

use async_trait::async_trait;
use resolver_model::{ArtifactRequest, RemoteRepository, Result};

/// Narrowed view of an [`ArtifactRequest`] handed to the version resolver
/// after filtering has removed rejected repositories.
#[derive(Debug, Clone)]
pub struct VersionRequest {
    pub request: ArtifactRequest,
    pub filtered_repositories: Vec<RemoteRepository>,
}

/// Where a resolved version came from, if the resolver can say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOrigin {
    Remote(RemoteRepository),
    Local,
    /// Some other repository type (e.g. a workspace-backed range). Per the
    /// distilled spec this forces `filtered := ∅` downstream — local-only
    /// success — which is preserved but flagged as a quirk inherited from
    /// the upstream resolver rather than a deliberate design choice.
    Other,
}

#[derive(Debug, Clone)]
pub struct VersionResolution {
    pub version: String,
    pub repository: Option<VersionOrigin>,
}

#[async_trait]
pub trait VersionResolver: Send + Sync {
    async fn resolve_version(&self, request: &VersionRequest) -> Result<VersionResolution>;
}

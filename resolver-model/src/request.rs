//! Inbound request to resolve a single artifact.

use crate::artifact::Artifact;
use crate::repository::RemoteRepository;
use std::sync::Arc;

/// Observability breadcrumb threaded through a resolution. Carries an
/// optional parent so nested/causal resolutions (e.g. a post-processor that
/// re-resolves a related artifact) can be correlated without the resolver
/// itself caring about the tracing backend.
#[derive(Debug, Clone)]
pub struct RequestTrace {
    pub description: String,
    pub parent: Option<Arc<RequestTrace>>,
}

impl RequestTrace {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            parent: None,
        }
    }

    pub fn child(self: &Arc<Self>, description: impl Into<String>) -> Arc<RequestTrace> {
        Arc::new(RequestTrace {
            description: description.into(),
            parent: Some(Arc::clone(self)),
        })
    }
}

/// One artifact to resolve, with its ordered candidate repositories.
#[derive(Debug, Clone)]
pub struct ArtifactRequest {
    pub artifact: Artifact,
    /// Ordered by caller preference; [`crate::group::ResolutionGroup`]
    /// placement preserves this order within a request.
    pub repositories: Vec<RemoteRepository>,
    pub request_context: String,
    pub trace: Option<Arc<RequestTrace>>,
}

impl ArtifactRequest {
    pub fn new(artifact: Artifact, request_context: impl Into<String>) -> Self {
        Self {
            artifact,
            repositories: Vec::new(),
            request_context: request_context.into(),
            trace: None,
        }
    }

    pub fn with_repositories(mut self, repositories: Vec<RemoteRepository>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_trace(mut self, trace: Arc<RequestTrace>) -> Self {
        self.trace = Some(trace);
        self
    }
}

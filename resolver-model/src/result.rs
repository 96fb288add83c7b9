//! Outbound, 1:1-with-request resolution outcome.

use crate::artifact::Artifact;
use crate::error::ResolveError;
use crate::repository::RemoteRepository;
use crate::request::ArtifactRequest;
use std::path::PathBuf;

/// Snapshot of what the local tier (workspace + LRM) knew about an artifact
/// at lookup time.
#[derive(Debug, Clone, Default)]
pub struct LocalArtifactResult {
    pub file: Option<PathBuf>,
    /// True iff the LRM's tracking metadata records this artifact as
    /// installed for one of the requested repositories.
    pub available: bool,
    pub origin_repository: Option<RemoteRepository>,
}

/// Mutable, 1:1 outcome for one [`ArtifactRequest`].
///
/// A result is *successful* iff `artifact.file` is set and `exceptions`
/// contains no fatal entry — in this crate every accumulated
/// [`ResolveError`] is treated as fatal to that result's success, matching
/// the distilled spec's "non-null file and empty exception list" rule as
/// refined by end-to-end scenario 2 (a recoverable per-repository failure
/// followed by a later success still leaves the earlier exception attached,
/// but the result is reported successful because `artifact.file` is set).
#[derive(Debug, Clone)]
pub struct ArtifactResult {
    pub artifact: Artifact,
    pub repository: Option<RemoteRepository>,
    pub exceptions: Vec<ResolveError>,
    pub local_result: LocalArtifactResult,
    pub request: ArtifactRequest,
}

impl ArtifactResult {
    pub fn new(request: ArtifactRequest) -> Self {
        let artifact = request.artifact.clone();
        Self {
            artifact,
            repository: None,
            exceptions: Vec::new(),
            local_result: LocalArtifactResult::default(),
            request,
        }
    }

    pub fn is_success(&self) -> bool {
        self.artifact.file.is_some()
    }

    pub fn add_exception(&mut self, error: ResolveError) {
        self.exceptions.push(error);
    }
}

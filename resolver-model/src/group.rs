//! Grouping of pending downloads by compatible remote repository.

use crate::artifact::Artifact;
use crate::error::ResolveError;
use crate::repository::RemoteRepository;
use crate::request::RequestTrace;
use crate::result::LocalArtifactResult;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Checksum enforcement requested for a download. The resolver itself does
/// not verify checksums (non-goal); this only tags the policy so the
/// connector can act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumPolicy {
    Ignore,
    Warn,
    Fail,
}

/// Stored decision about whether a cached artifact/failure is due for
/// re-fetch, consumed from and returned to the external `UpdateCheckManager`.
#[derive(Debug, Clone)]
pub struct PendingUpdateCheck {
    pub artifact: Artifact,
    pub repository: RemoteRepository,
    pub local_file: Option<PathBuf>,
    /// Filled in by `UpdateCheckManager::check`; `None` means "not yet
    /// evaluated".
    pub required: Option<bool>,
    /// The prior cached exception, if the check reports a re-fetch is not
    /// required.
    pub prior_exception: Option<ResolveError>,
    /// Filled in from the download outcome before `touch` runs.
    pub outcome_exception: Option<ResolveError>,
}

impl PendingUpdateCheck {
    pub fn new(artifact: Artifact, repository: RemoteRepository, local_file: Option<PathBuf>) -> Self {
        Self {
            artifact,
            repository,
            local_file,
            required: None,
            prior_exception: None,
            outcome_exception: None,
        }
    }
}

/// One planned download: gathered in [`crate::group::ResolutionGroup`],
/// executed by a batched `Connector::get`.
#[derive(Debug, Clone)]
pub struct Download {
    pub artifact: Artifact,
    pub request_context: String,
    pub trace: Option<Arc<RequestTrace>>,
    pub destination: PathBuf,
    /// True when `destination` already holds a local-result file and the
    /// transport should be allowed to short-circuit on an unchanged check.
    pub existence_check: bool,
    pub checksum_policy: ChecksumPolicy,
    /// Possibly mirrored list of repositories the connector may fall back
    /// across for this single download.
    pub repositories: Vec<RemoteRepository>,
    /// Set by the connector on failure; `None` on success.
    pub exception: Option<ResolveError>,
}

impl Download {
    pub fn succeeded(&self) -> bool {
        self.exception.is_none()
    }
}

/// One artifact's resolution state within a single remote repository group.
///
/// `resolved` is shared (by `Arc` clone) across every item referring to the
/// same logical artifact across *all* groups in this call, so the first
/// group to succeed short-circuits later groups.
#[derive(Debug, Clone)]
pub struct ResolutionItem {
    pub trace: Option<Arc<RequestTrace>>,
    pub artifact: Artifact,
    pub resolved: Arc<AtomicBool>,
    /// Index into the call's `Vec<ArtifactResult>`, standing in for the
    /// distilled spec's direct result back-reference.
    pub result_index: usize,
    pub local_result: LocalArtifactResult,
    pub repository: RemoteRepository,
    pub download: Option<Download>,
    pub update_check: Option<PendingUpdateCheck>,
}

/// `(repository, items)` — a batch of [`ResolutionItem`]s that share a
/// single connector session because their repositories are
/// [`RemoteRepository::is_compatible_with`] each other.
#[derive(Debug, Clone)]
pub struct ResolutionGroup {
    pub repository: RemoteRepository,
    pub items: Vec<ResolutionItem>,
}

impl ResolutionGroup {
    pub fn new(repository: RemoteRepository) -> Self {
        Self {
            repository,
            items: Vec::new(),
        }
    }
}

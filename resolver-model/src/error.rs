//! Error kinds produced while resolving a single artifact.
//!
//! These accumulate on [`crate::ArtifactResult`] rather than aborting a
//! batch; see `ResolutionFailure` in `resolver-core` for the call-level
//! aggregate.

use thiserror::Error;

/// Per-artifact failure recorded on an [`crate::ArtifactResult`].
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("io error: {0}")]
    Io(String),

    #[error("artifact not found: {artifact} (repository: {repository:?})")]
    NotFound {
        artifact: String,
        repository: Option<String>,
    },

    #[error("artifact {artifact} filtered out by {repository}: {reason}")]
    FilteredOut {
        artifact: String,
        repository: String,
        reason: String,
    },

    #[error("transfer failed for {artifact} (repository: {repository:?}): {cause}")]
    TransferError {
        artifact: String,
        repository: Option<String>,
        cause: String,
    },

    #[error("version resolution failed: {0}")]
    VersionError(String),
}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        ResolveError::Io(err.to_string())
    }
}

/// Convenience alias, mirroring `ferrex-core::error::Result`.
pub type Result<T> = std::result::Result<T, ResolveError>;

//! Global knobs that tune orchestrator behaviour.
//!
//! All fields carry defaults so existing call sites can keep using
//! [`ResolverConfig::default`] without supplying a full configuration
//! payload.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// `artifactResolver.snapshotNormalization` — rewrite a downloaded
    /// snapshot's timestamped filename to its `base_version` sibling.
    pub snapshot_normalization: bool,

    /// `artifactResolver.simpleLrmInterop` — when no filter is active and a
    /// physically-present-but-unregistered cached file is accepted, also
    /// register it with the LRM. Ignored when a filter is active.
    pub simple_lrm_interop: bool,

    /// Bounds `DownloadCoordinator`'s internal fan-out per group.
    pub max_concurrent_downloads_per_group: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            snapshot_normalization: true,
            simple_lrm_interop: false,
            max_concurrent_downloads_per_group: 4,
        }
    }
}

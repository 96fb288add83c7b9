//! Snapshot normalization: downstream tooling addresses snapshots by
//! `base_version`; the timestamped filename the connector wrote is a wire
//! concern only.

use crate::config::ResolverConfig;
use resolver_model::{Artifact, ResolveError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Given an artifact and the file a tier produced, returns the file to
/// expose to the caller.
pub struct PathPolicy<'a> {
    config: &'a ResolverConfig,
}

impl<'a> PathPolicy<'a> {
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    /// Replaces the timestamped version substring in `source`'s filename
    /// with `base_version`. Falls back to `source` unchanged if the
    /// filename doesn't actually contain the version token (defensive
    /// against callers that hand us an already-normalized path).
    fn normalized_destination(source: &Path, artifact: &Artifact) -> PathBuf {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let version = &artifact.coordinates.version;
        let base_version = &artifact.coordinates.base_version;
        let new_name = if file_name.contains(version.as_str()) {
            file_name.replacen(version.as_str(), base_version.as_str(), 1)
        } else {
            file_name
        };
        source
            .parent()
            .map(|dir| dir.join(&new_name))
            .unwrap_or_else(|| PathBuf::from(new_name))
    }

    /// Idempotence key: a destination is considered already up to date iff
    /// both its size and mtime match the source file exactly.
    async fn is_up_to_date(source: &Path, destination: &Path) -> std::io::Result<bool> {
        if !destination.exists() {
            return Ok(false);
        }
        let source_meta = tokio::fs::metadata(source).await?;
        let dest_meta = tokio::fs::metadata(destination).await?;
        Ok(source_meta.len() == dest_meta.len() && source_meta.modified()? == dest_meta.modified()?)
    }

    pub async fn apply(&self, artifact: &Artifact, source: PathBuf) -> Result<PathBuf> {
        if !self.config.snapshot_normalization || !artifact.is_snapshot() {
            return Ok(source);
        }
        if artifact.coordinates.version == artifact.coordinates.base_version {
            return Ok(source);
        }

        let destination = Self::normalized_destination(&source, artifact);
        if destination == source {
            return Ok(source);
        }

        let up_to_date = Self::is_up_to_date(&source, &destination)
            .await
            .map_err(ResolveError::from)?;

        if up_to_date {
            debug!(artifact = %artifact, "snapshot destination already normalized, skipping copy");
            return Ok(destination);
        }

        tokio::fs::copy(&source, &destination)
            .await
            .map_err(|e| ResolveError::TransferError {
                artifact: artifact.to_string(),
                repository: None,
                cause: format!("snapshot normalization copy failed: {e}"),
            })?;

        let source_meta = tokio::fs::metadata(&source)
            .await
            .map_err(ResolveError::from)?;
        let mtime = filetime::FileTime::from_last_modification_time(&source_meta);
        let dest_for_blocking = destination.clone();
        tokio::task::spawn_blocking(move || filetime::set_file_mtime(&dest_for_blocking, mtime))
            .await
            .map_err(|e| ResolveError::Io(e.to_string()))?
            .map_err(ResolveError::from)?;

        Ok(destination)
    }
}

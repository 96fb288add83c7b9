//! Remote repository identity and the compatibility rule used for grouping.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryId(String);

impl RepositoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate remote repository.
///
/// Two repositories are *compatible* — may share a [`crate::ResolutionGroup`]
/// — iff `url`, `content_type`, and `is_repository_manager` are all equal.
///
/// `releases_enabled`/`snapshots_enabled` stand in for the distilled spec's
/// "the applicable RepositoryPolicy from RemoteRepositoryManager" — rather
/// than introduce another external collaborator trait not named in the
/// external interfaces list, the policy bits travel on the repository
/// itself, which is how the upstream resolver's repository model carries
/// them too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub id: RepositoryId,
    pub url: String,
    pub content_type: String,
    pub is_repository_manager: bool,
    pub releases_enabled: bool,
    pub snapshots_enabled: bool,
    /// "Cache all failures" bit: when set, `DownloadCoordinator` consults
    /// the update-check manager before re-attempting a download that
    /// previously failed against this repository.
    pub cache_failures: bool,
}

impl RemoteRepository {
    pub fn new(id: impl Into<String>, url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            id: RepositoryId::new(id),
            url: url.into(),
            content_type: content_type.into(),
            is_repository_manager: false,
            releases_enabled: true,
            snapshots_enabled: true,
            cache_failures: false,
        }
    }

    pub fn as_repository_manager(mut self) -> Self {
        self.is_repository_manager = true;
        self
    }

    pub fn with_cache_failures(mut self, cache_failures: bool) -> Self {
        self.cache_failures = cache_failures;
        self
    }

    pub fn releases_only(mut self) -> Self {
        self.snapshots_enabled = false;
        self
    }

    pub fn snapshots_only(mut self) -> Self {
        self.releases_enabled = false;
        self
    }

    pub fn is_compatible_with(&self, other: &RemoteRepository) -> bool {
        self.url == other.url
            && self.content_type == other.content_type
            && self.is_repository_manager == other.is_repository_manager
    }

    /// Whether this repository's policy permits fetching `artifact` given
    /// its snapshot/release kind.
    pub fn allows(&self, artifact: &crate::artifact::Artifact) -> bool {
        if artifact.is_snapshot() {
            self.snapshots_enabled
        } else {
            self.releases_enabled
        }
    }
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

//! Workspace + LRM cache lookup and the "locally installed?" decision.

use crate::config::ResolverConfig;
use resolver_contracts::{LocalArtifactRequest, LocalRepositoryManager, Registration, VersionOrigin};
use resolver_model::{LocalArtifactResult, Result};
use std::sync::Arc;

pub struct LocalLookup {
    lrm: Arc<dyn LocalRepositoryManager>,
}

impl LocalLookup {
    pub fn new(lrm: Arc<dyn LocalRepositoryManager>) -> Self {
        Self { lrm }
    }

    pub async fn find(&self, request: &LocalArtifactRequest) -> Result<LocalArtifactResult> {
        self.lrm.find(request).await
    }

    pub async fn register(&self, registration: Registration) -> Result<()> {
        self.lrm.add(registration).await
    }

    pub fn lrm(&self) -> &Arc<dyn LocalRepositoryManager> {
        &self.lrm
    }

    /// §4.4 found predicate.
    ///
    /// With filtering active, presence alone is insufficient: only the
    /// LRM's own "available for one of the requested repositories" bit
    /// counts, because filters must be authoritative over origin. Without
    /// filtering, a physically-present cached file with no known origin is
    /// accepted when the version resolver pinned a local repository, or
    /// when it named no repository at all and the request carried none to
    /// begin with (covers version-range and sibling-install cases).
    pub fn is_found(
        filter_active: bool,
        local: &LocalArtifactResult,
        version_origin: Option<&VersionOrigin>,
        request_repositories_empty: bool,
    ) -> bool {
        if filter_active {
            return local.available;
        }
        local.available
            || (local.file.is_some()
                && (matches!(version_origin, Some(VersionOrigin::Local))
                    || (version_origin.is_none() && request_repositories_empty)))
    }

    /// Legacy interop (`simple_lrm_interop`, default off): when no filter is
    /// active, interop is enabled, and the file was physically present but
    /// not registered, register it with the LRM after materialization.
    /// Ignored when filtering is active.
    pub fn should_register_interop(
        config: &ResolverConfig,
        filter_active: bool,
        local: &LocalArtifactResult,
    ) -> bool {
        !filter_active && config.simple_lrm_interop && !local.available && local.file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolver_model::RemoteRepository;

    fn local_result(available: bool, has_file: bool) -> LocalArtifactResult {
        LocalArtifactResult {
            file: has_file.then(|| std::path::PathBuf::from("/cache/foo.jar")),
            available,
            origin_repository: None,
        }
    }

    #[test]
    fn filter_active_requires_available_flag() {
        let local = local_result(false, true);
        assert!(!LocalLookup::is_found(true, &local, None, true));

        let local = local_result(true, true);
        assert!(LocalLookup::is_found(true, &local, None, true));
    }

    #[test]
    fn no_filter_accepts_present_file_when_version_pinned_local() {
        let local = local_result(false, true);
        assert!(LocalLookup::is_found(
            false,
            &local,
            Some(&VersionOrigin::Local),
            false
        ));
    }

    #[test]
    fn no_filter_accepts_present_file_when_no_repos_requested() {
        let local = local_result(false, true);
        assert!(LocalLookup::is_found(false, &local, None, true));
    }

    #[test]
    fn no_filter_rejects_present_file_when_remote_pinned_and_repos_requested() {
        let local = local_result(false, true);
        let remote = RemoteRepository::new("central", "https://repo.example/", "default");
        assert!(!LocalLookup::is_found(
            false,
            &local,
            Some(&VersionOrigin::Remote(remote)),
            false
        ));
    }

    #[test]
    fn interop_only_applies_without_filter_and_unregistered_file() {
        let config = ResolverConfig {
            simple_lrm_interop: true,
            ..ResolverConfig::default()
        };
        let local = local_result(false, true);
        assert!(LocalLookup::should_register_interop(&config, false, &local));
        assert!(!LocalLookup::should_register_interop(&config, true, &local));

        let registered = local_result(true, true);
        assert!(!LocalLookup::should_register_interop(
            &config, false, &registered
        ));
    }
}

//! Wiring for one resolver instance: configuration, every external
//! collaborator, and the shared sync-context registry.

use crate::config::ResolverConfig;
use crate::sync_context::SyncContext;
use resolver_contracts::{
    EventDispatcher, LocalRepositoryManager, OfflineController, PostProcessor,
    RemoteRepositoryFilterManager, RepositoryConnectorProvider, UpdateCheckManager, VersionResolver,
    WorkspaceReader,
};
use std::sync::Arc;

/// Everything the orchestrator needs to resolve a batch of requests, held
/// behind `Arc<dyn Trait>` the way `ImageService` holds its repository
/// ports.
pub struct Session {
    pub config: ResolverConfig,
    pub version_resolver: Arc<dyn VersionResolver>,
    pub lrm: Arc<dyn LocalRepositoryManager>,
    pub workspace: Option<Arc<dyn WorkspaceReader>>,
    pub connector_provider: Arc<dyn RepositoryConnectorProvider>,
    pub update_check_manager: Arc<dyn UpdateCheckManager>,
    pub offline_controller: Arc<dyn OfflineController>,
    pub filter_manager: Arc<dyn RemoteRepositoryFilterManager>,
    pub events: Arc<dyn EventDispatcher>,
    /// Run in this order, once per `resolve` call, after every group has
    /// executed.
    pub post_processors: Vec<Arc<dyn PostProcessor>>,
    pub(crate) sync_context: SyncContext,
}

/// Builder mirroring the collaborator list in one place so constructing a
/// `Session` reads as a checklist rather than a long positional tuple.
pub struct SessionBuilder {
    config: ResolverConfig,
    version_resolver: Option<Arc<dyn VersionResolver>>,
    lrm: Option<Arc<dyn LocalRepositoryManager>>,
    workspace: Option<Arc<dyn WorkspaceReader>>,
    connector_provider: Option<Arc<dyn RepositoryConnectorProvider>>,
    update_check_manager: Option<Arc<dyn UpdateCheckManager>>,
    offline_controller: Option<Arc<dyn OfflineController>>,
    filter_manager: Option<Arc<dyn RemoteRepositoryFilterManager>>,
    events: Option<Arc<dyn EventDispatcher>>,
    post_processors: Vec<Arc<dyn PostProcessor>>,
}

impl SessionBuilder {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            version_resolver: None,
            lrm: None,
            workspace: None,
            connector_provider: None,
            update_check_manager: None,
            offline_controller: None,
            filter_manager: None,
            events: None,
            post_processors: Vec::new(),
        }
    }

    pub fn version_resolver(mut self, v: Arc<dyn VersionResolver>) -> Self {
        self.version_resolver = Some(v);
        self
    }

    pub fn lrm(mut self, v: Arc<dyn LocalRepositoryManager>) -> Self {
        self.lrm = Some(v);
        self
    }

    pub fn workspace(mut self, v: Arc<dyn WorkspaceReader>) -> Self {
        self.workspace = Some(v);
        self
    }

    pub fn connector_provider(mut self, v: Arc<dyn RepositoryConnectorProvider>) -> Self {
        self.connector_provider = Some(v);
        self
    }

    pub fn update_check_manager(mut self, v: Arc<dyn UpdateCheckManager>) -> Self {
        self.update_check_manager = Some(v);
        self
    }

    pub fn offline_controller(mut self, v: Arc<dyn OfflineController>) -> Self {
        self.offline_controller = Some(v);
        self
    }

    pub fn filter_manager(mut self, v: Arc<dyn RemoteRepositoryFilterManager>) -> Self {
        self.filter_manager = Some(v);
        self
    }

    pub fn events(mut self, v: Arc<dyn EventDispatcher>) -> Self {
        self.events = Some(v);
        self
    }

    pub fn post_processor(mut self, v: Arc<dyn PostProcessor>) -> Self {
        self.post_processors.push(v);
        self
    }

    /// Panics if a required collaborator was never set — mirrors the
    /// teacher's `expect`-on-invariant style rather than threading a
    /// builder error type through every call site for a config mistake
    /// that can only happen during wiring, not at request time.
    pub fn build(self) -> Session {
        Session {
            config: self.config,
            version_resolver: self.version_resolver.expect("version_resolver not configured"),
            lrm: self.lrm.expect("lrm not configured"),
            workspace: self.workspace,
            connector_provider: self
                .connector_provider
                .expect("connector_provider not configured"),
            update_check_manager: self
                .update_check_manager
                .expect("update_check_manager not configured"),
            offline_controller: self
                .offline_controller
                .expect("offline_controller not configured"),
            filter_manager: self.filter_manager.expect("filter_manager not configured"),
            events: self.events.expect("events not configured"),
            post_processors: self.post_processors,
            sync_context: SyncContext::new(),
        }
    }
}

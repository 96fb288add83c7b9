//! Hand-written fakes for every external collaborator trait, so integration
//! tests can drive the orchestrator end to end without a real network,
//! database, or build tool.

use async_trait::async_trait;
use resolver_contracts::{
    ArtifactEvent, Connector, EventDispatcher, FilterDecision, LocalArtifactRequest,
    LocalRepository, LocalRepositoryManager, NoConnectorError, OfflineController, OfflineDecision,
    PostProcessor, Registration, RemoteRepositoryFilter, RemoteRepositoryFilterManager,
    RepositoryConnectorProvider, UpdateCheckManager, VersionOrigin, VersionRequest,
    VersionResolution, VersionResolver, WorkspaceReader,
};
use resolver_model::{
    Artifact, ArtifactResult, Download, LocalArtifactResult, PendingUpdateCheck, RemoteRepository,
    Result as ResolverResult, SubjectKey,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Resolves every version request to the artifact's incoming version
/// unchanged, unless a pin was registered via [`FakeVersionResolver::pin`]
/// or the subject was registered via [`FakeVersionResolver::fail`], in
/// which case it reports a `VersionError` instead.
#[derive(Default)]
pub struct FakeVersionResolver {
    pins: Mutex<HashMap<String, VersionOrigin>>,
    failing: Mutex<HashMap<String, String>>,
}

impl FakeVersionResolver {
    pub fn pin(&self, subject: impl Into<String>, origin: VersionOrigin) {
        self.pins.lock().unwrap().insert(subject.into(), origin);
    }

    /// Makes version resolution fail for `subject` with `reason`, so tests
    /// can exercise the "version resolver fails" boundary behavior.
    pub fn fail(&self, subject: impl Into<String>, reason: impl Into<String>) {
        self.failing.lock().unwrap().insert(subject.into(), reason.into());
    }
}

#[async_trait]
impl VersionResolver for FakeVersionResolver {
    async fn resolve_version(&self, request: &VersionRequest) -> ResolverResult<VersionResolution> {
        let subject = SubjectKey::from_coordinates(&request.request.artifact.coordinates);
        if let Some(reason) = self.failing.lock().unwrap().get(subject.as_str()).cloned() {
            return Err(resolver_model::ResolveError::VersionError(reason));
        }
        let repository = self.pins.lock().unwrap().get(subject.as_str()).cloned();
        Ok(VersionResolution {
            version: request.request.artifact.coordinates.version.clone(),
            repository,
        })
    }
}

/// In-memory local repository manager backed by a temp directory. Tracks
/// "availability" the way a real LRM's metadata store would: present on
/// disk is not enough, `add` must have registered it.
pub struct FakeLrm {
    dir: TempDir,
    registered: Mutex<HashMap<String, (PathBuf, RemoteRepository)>>,
}

impl FakeLrm {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
            registered: Mutex::new(HashMap::new()),
        }
    }

    pub fn base_dir(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Pre-seeds a cached file on disk without registering it, simulating
    /// a physically-present-but-untracked cache entry.
    pub fn seed_unregistered_file(&self, artifact: &Artifact, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(format!(
            "{}-{}.{}",
            artifact.coordinates.id, artifact.coordinates.version, artifact.coordinates.extension
        ));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn key(artifact: &Artifact) -> String {
        SubjectKey::from_coordinates(&artifact.coordinates).to_string()
    }
}

#[async_trait]
impl LocalRepositoryManager for FakeLrm {
    async fn find(&self, request: &LocalArtifactRequest) -> ResolverResult<LocalArtifactResult> {
        let key = Self::key(&request.artifact);
        let registered = self.registered.lock().unwrap();
        if let Some((path, origin)) = registered.get(&key) {
            return Ok(LocalArtifactResult {
                file: Some(path.clone()),
                available: true,
                origin_repository: Some(origin.clone()),
            });
        }
        Ok(LocalArtifactResult::default())
    }

    async fn add(&self, registration: Registration) -> ResolverResult<()> {
        let key = Self::key(&registration.artifact);
        let file = registration
            .artifact
            .file
            .clone()
            .expect("registration artifact must carry a materialized file");
        self.registered
            .lock()
            .unwrap()
            .insert(key, (file, registration.repository));
        Ok(())
    }

    fn path_for_remote_artifact(
        &self,
        artifact: &Artifact,
        repo: &RemoteRepository,
        _request_context: &str,
    ) -> PathBuf {
        PathBuf::from(format!(
            "{}/{}-{}.{}",
            repo.id, artifact.coordinates.id, artifact.coordinates.version, artifact.coordinates.extension
        ))
    }

    fn repository(&self) -> LocalRepository {
        LocalRepository {
            base_dir: self.dir.path().to_path_buf(),
        }
    }
}

/// Writes a fixed payload to every download's destination, unless the
/// repository id is in the configured failure set, in which case it
/// attaches a `TransferError`.
pub struct FakeConnector {
    failing_repositories: Vec<String>,
    call_count: Arc<std::sync::atomic::AtomicUsize>,
    delay_ms: u64,
}

#[async_trait]
impl Connector for FakeConnector {
    async fn get(&self, downloads: &mut [Download]) {
        self.call_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        for download in downloads.iter_mut() {
            let repo_id = download
                .repositories
                .first()
                .map(|r| r.id.as_str().to_string())
                .unwrap_or_default();
            if self.failing_repositories.contains(&repo_id) {
                download.exception = Some(resolver_model::ResolveError::TransferError {
                    artifact: download.artifact.to_string(),
                    repository: Some(repo_id),
                    cause: "simulated transport failure".into(),
                });
                continue;
            }
            if let Some(parent) = download.destination.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&download.destination, b"fake artifact payload").unwrap();
        }
    }

    async fn close(&self) {}
}

pub struct FakeConnectorProvider {
    failing_repositories: Vec<String>,
    pub call_count: Arc<std::sync::atomic::AtomicUsize>,
    delay_ms: u64,
}

impl FakeConnectorProvider {
    pub fn new(failing_repositories: Vec<&str>) -> Self {
        Self {
            failing_repositories: failing_repositories.into_iter().map(String::from).collect(),
            call_count: Arc::new(std::sync::atomic::AtomicUsize::new(0)),
            delay_ms: 0,
        }
    }

    /// Makes every `get` call sleep before writing, so tests can force two
    /// concurrent `resolve` calls to overlap deterministically.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

#[async_trait]
impl RepositoryConnectorProvider for FakeConnectorProvider {
    async fn new_connector(
        &self,
        _repository: &RemoteRepository,
    ) -> std::result::Result<Arc<dyn Connector>, NoConnectorError> {
        Ok(Arc::new(FakeConnector {
            failing_repositories: self.failing_repositories.clone(),
            call_count: Arc::clone(&self.call_count),
            delay_ms: self.delay_ms,
        }))
    }
}

/// Always reports a re-fetch as required; records nothing durably. Enough
/// for tests that don't exercise `cache_failures`.
#[derive(Default)]
pub struct FakeUpdateCheckManager;

#[async_trait]
impl UpdateCheckManager for FakeUpdateCheckManager {
    async fn check_artifact(&self, check: &mut PendingUpdateCheck) -> ResolverResult<()> {
        check.required = Some(true);
        Ok(())
    }

    async fn touch_artifact(&self, _check: &PendingUpdateCheck) -> ResolverResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeOfflineController {
    offline_repositories: Vec<String>,
}

impl FakeOfflineController {
    pub fn new(offline_repositories: Vec<&str>) -> Self {
        Self {
            offline_repositories: offline_repositories.into_iter().map(String::from).collect(),
        }
    }
}

#[async_trait]
impl OfflineController for FakeOfflineController {
    async fn check_offline(&self, repository: &RemoteRepository) -> OfflineDecision {
        if self.offline_repositories.contains(&repository.id.as_str().to_string()) {
            OfflineDecision::Offline
        } else {
            OfflineDecision::Online
        }
    }
}

/// Rejects any repository whose id is in `rejected`, with a fixed reason.
pub struct FakeFilter {
    rejected: Vec<String>,
}

#[async_trait]
impl RemoteRepositoryFilter for FakeFilter {
    async fn accept(&self, repository: &RemoteRepository, _artifact: &Artifact) -> FilterDecision {
        if self.rejected.contains(&repository.id.as_str().to_string()) {
            FilterDecision::Rejected("policy".into())
        } else {
            FilterDecision::Accepted
        }
    }
}

pub struct FakeFilterManager {
    filter: Option<Arc<dyn RemoteRepositoryFilter>>,
}

impl FakeFilterManager {
    pub fn none() -> Self {
        Self { filter: None }
    }

    pub fn rejecting(rejected: Vec<&str>) -> Self {
        Self {
            filter: Some(Arc::new(FakeFilter {
                rejected: rejected.into_iter().map(String::from).collect(),
            })),
        }
    }
}

#[async_trait]
impl RemoteRepositoryFilterManager for FakeFilterManager {
    async fn filter_for(&self) -> Option<Arc<dyn RemoteRepositoryFilter>> {
        self.filter.clone()
    }
}

#[derive(Default)]
pub struct FakeEventDispatcher {
    pub events: Mutex<Vec<ArtifactEvent>>,
}

#[async_trait]
impl EventDispatcher for FakeEventDispatcher {
    async fn dispatch(&self, event: ArtifactEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl FakeEventDispatcher {
    pub fn count(&self, matcher: impl Fn(&ArtifactEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matcher(e)).count()
    }
}

/// No-op workspace: never has the artifact. Used to exercise the "no
/// workspace hit" path without needing `Session::workspace` unset.
#[derive(Default)]
pub struct EmptyWorkspace {
    repo: RemoteRepository,
}

impl EmptyWorkspace {
    pub fn new() -> Self {
        Self {
            repo: RemoteRepository::new("workspace", "workspace://", "workspace"),
        }
    }
}

#[async_trait]
impl WorkspaceReader for EmptyWorkspace {
    async fn find_artifact(&self, _artifact: &Artifact) -> ResolverResult<Option<PathBuf>> {
        Ok(None)
    }

    fn repository(&self) -> RemoteRepository {
        self.repo.clone()
    }
}

/// Counts invocations; never mutates results.
#[derive(Default)]
pub struct NoopPostProcessor {
    pub calls: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl PostProcessor for NoopPostProcessor {
    fn name(&self) -> &str {
        "noop"
    }

    async fn post_process(&self, _results: &mut [ArtifactResult]) -> ResolverResult<()> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

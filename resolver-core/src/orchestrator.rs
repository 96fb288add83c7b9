//! Top-level two-phase resolve loop: fans requests through the per-request
//! pipeline, schedules downloads, runs post-processors, and aggregates
//! results.

use crate::download_coordinator::DownloadCoordinator;
use crate::error::{OrchestratorError, ResolutionFailure};
use crate::filter_gate::{FilterGate, OfflineGate};
use crate::group_scheduler::GroupScheduler;
use crate::local_lookup::LocalLookup;
use crate::path_policy::PathPolicy;
use crate::session::Session;
use resolver_contracts::{
    ArtifactEvent, LocalArtifactRequest, OfflineDecision, Registration, VersionOrigin,
    VersionRequest,
};
use resolver_model::{
    ArtifactRequest, ArtifactResult, ResolutionGroup, ResolutionItem, ResolveError, SubjectKey,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

/// Owns one [`Session`] and exposes the orchestrator's two public
/// operations. Cheap to construct repeatedly since everything it holds is
/// already `Arc`-backed; callers typically keep one around for the
/// lifetime of a build.
pub struct Orchestrator {
    session: Session,
}

impl Orchestrator {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Convenience wrapper over [`Self::resolve`] for a single request.
    pub async fn resolve_artifact(
        &self,
        request: ArtifactRequest,
    ) -> Result<ArtifactResult, OrchestratorError> {
        let mut results = self.resolve(vec![request]).await?;
        Ok(results.remove(0))
    }

    /// Resolves a batch of requests. Returns results in request order; if
    /// any result lacks a file, the whole call fails with
    /// [`ResolutionFailure`] carrying every result (not just the failures),
    /// so callers can still inspect what did succeed.
    pub async fn resolve(
        &self,
        requests: Vec<ArtifactRequest>,
    ) -> Result<Vec<ArtifactResult>, OrchestratorError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let subject_keys: Vec<SubjectKey> = requests
            .iter()
            .filter(|request| request.artifact.local_path().is_none())
            .map(|request| SubjectKey::from_coordinates(&request.artifact.coordinates))
            .collect();

        let mut guard = self.session.sync_context.acquire_shared(&subject_keys).await;
        let (mut results, mut groups) = self.run_planning_pass(&requests, true).await;

        // Escalation is a close+reopen, never an upgrade, so a concurrent
        // exclusive holder can never observe this call straddling both
        // modes at once.
        if !groups.is_empty() {
            drop(guard);
            guard = self.session.sync_context.acquire_exclusive(&subject_keys).await;
            let (rerun_results, rerun_groups) = self.run_planning_pass(&requests, false).await;
            results = rerun_results;
            groups = rerun_groups;
        }

        let coordinator = DownloadCoordinator::new(
            Arc::clone(&self.session.connector_provider),
            Arc::clone(&self.session.update_check_manager),
            Arc::clone(&self.session.lrm),
            Arc::clone(&self.session.events),
            &self.session.config,
        );
        // Groups run concurrently and index into the same result set, so
        // each result is handed to the coordinator behind its own mutex
        // rather than as one `&mut` slice (see `DownloadCoordinator::
        // execute_groups`), then unwrapped back once every group has run.
        let locked_results: Vec<tokio::sync::Mutex<ArtifactResult>> =
            results.into_iter().map(tokio::sync::Mutex::new).collect();
        coordinator
            .execute_groups(groups, &locked_results, &self.session.config)
            .await;
        let mut results: Vec<ArtifactResult> = locked_results
            .into_iter()
            .map(tokio::sync::Mutex::into_inner)
            .collect();

        for processor in &self.session.post_processors {
            processor
                .post_process(&mut results)
                .await
                .map_err(|source| OrchestratorError::PostProcessor {
                    name: processor.name().to_string(),
                    source,
                })?;
        }

        // `guard` stays held through failure computation below and is
        // released by its own `Drop` impl when this function returns on
        // any path, satisfying "release on every exit path" without a
        // manual try/finally.
        let mut any_unresolved = false;
        for result in &mut results {
            if result.artifact.file.is_none() && result.exceptions.is_empty() {
                result.add_exception(ResolveError::NotFound {
                    artifact: result.artifact.to_string(),
                    repository: None,
                });
            }
            if result.artifact.file.is_none() {
                any_unresolved = true;
            }
            self.session
                .events
                .dispatch(ArtifactEvent::Resolved {
                    artifact: result.artifact.clone(),
                    exception_count: result.exceptions.len(),
                })
                .await;
        }

        if any_unresolved {
            return Err(OrchestratorError::Resolution(ResolutionFailure(results)));
        }

        Ok(results)
    }

    /// Runs the per-request pipeline (§4.2) over every request and buckets
    /// whatever still needs a download. `emit_resolving` is false on the
    /// post-escalation rerun: `ARTIFACT_RESOLVING` fires only once, during
    /// the shared pass.
    async fn run_planning_pass(
        &self,
        requests: &[ArtifactRequest],
        emit_resolving: bool,
    ) -> (Vec<ArtifactResult>, Vec<ResolutionGroup>) {
        let filter = self.session.filter_manager.filter_for().await;
        let filter_gate = FilterGate::new(filter);
        let offline_gate = OfflineGate::new(Arc::clone(&self.session.offline_controller));
        let local_lookup = LocalLookup::new(Arc::clone(&self.session.lrm));
        let path_policy = PathPolicy::new(&self.session.config);

        let mut results = Vec::with_capacity(requests.len());
        let mut scheduler = GroupScheduler::new();
        let mut resolved_flags: HashMap<SubjectKey, Arc<AtomicBool>> = HashMap::new();

        for (index, request) in requests.iter().enumerate() {
            let mut result = ArtifactResult::new(request.clone());
            self.process_request(
                request,
                index,
                &mut result,
                &mut scheduler,
                &mut resolved_flags,
                emit_resolving,
                &filter_gate,
                &offline_gate,
                &local_lookup,
                &path_policy,
            )
            .await;
            results.push(result);
        }

        (results, scheduler.into_groups())
    }

    #[allow(clippy::too_many_arguments)]
    async fn process_request(
        &self,
        request: &ArtifactRequest,
        result_index: usize,
        result: &mut ArtifactResult,
        scheduler: &mut GroupScheduler,
        resolved_flags: &mut HashMap<SubjectKey, Arc<AtomicBool>>,
        emit_resolving: bool,
        filter_gate: &FilterGate,
        offline_gate: &OfflineGate,
        local_lookup: &LocalLookup,
        path_policy: &PathPolicy<'_>,
    ) {
        // 1. Pre-hosted short-circuit.
        if let Some(path) = request.artifact.local_path() {
            let path = path.to_path_buf();
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => result.artifact.file = Some(path),
                _ => result.add_exception(ResolveError::NotFound {
                    artifact: request.artifact.to_string(),
                    repository: None,
                }),
            }
            return;
        }

        if emit_resolving {
            self.session
                .events
                .dispatch(ArtifactEvent::Resolving {
                    artifact: request.artifact.clone(),
                })
                .await;
        }

        // 2. Filter.
        let filter_active = filter_gate.is_active();
        let (mut filtered, rejections) = filter_gate
            .apply(&result.artifact, request.repositories.clone())
            .await;
        for rejection in rejections {
            result.add_exception(rejection);
        }

        // 3. Version.
        let version_request = VersionRequest {
            request: ArtifactRequest {
                artifact: result.artifact.clone(),
                repositories: request.repositories.clone(),
                request_context: request.request_context.clone(),
                trace: request.trace.clone(),
            },
            filtered_repositories: filtered.clone(),
        };
        let resolution = match self
            .session
            .version_resolver
            .resolve_version(&version_request)
            .await
        {
            Ok(resolution) => resolution,
            Err(error) => {
                result.add_exception(error);
                return;
            }
        };
        result.artifact.coordinates.version = resolution.version.clone();
        match &resolution.repository {
            Some(VersionOrigin::Remote(repo)) => filtered = vec![repo.clone()],
            // A local or otherwise non-remote pin narrows to local-only
            // success; this is an upstream quirk we preserve rather than
            // originate (see resolver-contracts::version::VersionOrigin).
            Some(VersionOrigin::Local) | Some(VersionOrigin::Other) => filtered = Vec::new(),
            None => {}
        }

        // 4. Workspace.
        if let Some(workspace) = &self.session.workspace {
            match workspace.find_artifact(&result.artifact).await {
                Ok(Some(file)) => {
                    result.artifact.file = Some(file);
                    result.repository = Some(workspace.repository());
                    return;
                }
                Ok(None) => {}
                Err(error) => {
                    result.add_exception(error);
                    return;
                }
            }
        }

        // 5. LocalLookup.
        let local_request = LocalArtifactRequest {
            artifact: result.artifact.clone(),
            filtered_repositories: filtered.clone(),
            request_context: request.request_context.clone(),
        };
        let local_result = match local_lookup.find(&local_request).await {
            Ok(local_result) => local_result,
            Err(error) => {
                result.add_exception(error);
                return;
            }
        };
        result.local_result = local_result.clone();

        // 6. Locally-installed decision.
        let found = LocalLookup::is_found(
            filter_active,
            &local_result,
            resolution.repository.as_ref(),
            request.repositories.is_empty(),
        );
        if found {
            if let Some(file) = local_result.file.clone() {
                match path_policy.apply(&result.artifact, file).await {
                    Ok(materialized) => {
                        result.artifact.file = Some(materialized);
                        result.repository = Some(
                            local_result
                                .origin_repository
                                .clone()
                                .unwrap_or_else(|| local_lookup.lrm().repository().as_repository()),
                        );
                    }
                    Err(error) => result.add_exception(error),
                }

                if LocalLookup::should_register_interop(&self.session.config, filter_active, &local_result) {
                    if let Some(repository) = result.repository.clone() {
                        if let Err(error) = local_lookup
                            .register(Registration {
                                artifact: result.artifact.clone(),
                                repository,
                                supported_contexts: vec![request.request_context.clone()],
                            })
                            .await
                        {
                            warn!(%error, "simple_lrm_interop registration failed");
                        }
                    }
                }
                return;
            }
        }

        // 7. Download planning.
        let subject_key = SubjectKey::from_coordinates(&result.artifact.coordinates);
        let shared_flag = Arc::clone(
            resolved_flags
                .entry(subject_key)
                .or_insert_with(|| Arc::new(AtomicBool::new(false))),
        );

        for repository in filtered {
            if !repository.allows(&result.artifact) {
                continue;
            }
            if offline_gate.check(&repository).await == OfflineDecision::Offline {
                result.add_exception(ResolveError::NotFound {
                    artifact: result.artifact.to_string(),
                    repository: Some(format!("{} ({})", repository.id, repository.url)),
                });
                continue;
            }

            let item = ResolutionItem {
                trace: request.trace.clone(),
                artifact: result.artifact.clone(),
                resolved: Arc::clone(&shared_flag),
                result_index,
                local_result: local_result.clone(),
                repository: repository.clone(),
                download: None,
                update_check: None,
            };
            scheduler.place(&repository, item);
        }
    }
}

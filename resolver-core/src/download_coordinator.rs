//! Per-group connector acquisition, batched download, and evaluation.

use crate::config::ResolverConfig;
use crate::path_policy::PathPolicy;
use futures::stream::{self, StreamExt};
use resolver_contracts::{
    ArtifactEvent, EventDispatcher, LocalRepositoryManager, Registration,
    RepositoryConnectorProvider, UpdateCheckManager,
};
use resolver_model::{
    ArtifactResult, ChecksumPolicy, Download, PendingUpdateCheck, ResolutionGroup, ResolveError,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct DownloadCoordinator {
    connector_provider: Arc<dyn RepositoryConnectorProvider>,
    update_check_manager: Arc<dyn UpdateCheckManager>,
    lrm: Arc<dyn LocalRepositoryManager>,
    events: Arc<dyn EventDispatcher>,
}

impl DownloadCoordinator {
    pub fn new(
        connector_provider: Arc<dyn RepositoryConnectorProvider>,
        update_check_manager: Arc<dyn UpdateCheckManager>,
        lrm: Arc<dyn LocalRepositoryManager>,
        events: Arc<dyn EventDispatcher>,
        _config: &ResolverConfig,
    ) -> Self {
        Self {
            connector_provider,
            update_check_manager,
            lrm,
            events,
        }
    }

    /// Runs every group's gather/emit/execute/evaluate cycle, up to
    /// `config.max_concurrent_downloads_per_group` groups in flight at
    /// once — analogous to `ImageService`'s `Semaphore::new(4)` capping
    /// concurrent variant work. Groups index into the same `results` set,
    /// so each result is held behind its own [`tokio::sync::Mutex`]: two
    /// groups only ever contend on an individual lock for the brief window
    /// where they're actually writing that one result (this happens when a
    /// single request lists repositories that land in separate groups, see
    /// `GroupScheduler`), never on the whole batch.
    pub async fn execute_groups(
        &self,
        groups: Vec<ResolutionGroup>,
        results: &[Mutex<ArtifactResult>],
        config: &ResolverConfig,
    ) {
        let concurrency = config.max_concurrent_downloads_per_group.max(1);
        stream::iter(groups)
            .for_each_concurrent(concurrency, |group| async move {
                self.execute_group(group, results, config).await;
            })
            .await;
    }

    async fn execute_group(
        &self,
        mut group: ResolutionGroup,
        results: &[Mutex<ArtifactResult>],
        config: &ResolverConfig,
    ) {
        // 1. Gather.
        for item in group.items.iter_mut() {
            if item.resolved.load(Ordering::SeqCst) {
                continue;
            }

            let request_context = {
                let result = results[item.result_index].lock().await;
                result.request.request_context.clone()
            };
            let destination = match &item.local_result.file {
                Some(file) => file.clone(),
                None => self.lrm.repository().base_dir.join(self.lrm.path_for_remote_artifact(
                    &item.artifact,
                    &group.repository,
                    &request_context,
                )),
            };
            let existence_check = item.local_result.file.is_some();

            if group.repository.cache_failures {
                let mut check = PendingUpdateCheck::new(
                    item.artifact.clone(),
                    group.repository.clone(),
                    item.local_result.file.clone(),
                );
                if let Err(error) = self.update_check_manager.check_artifact(&mut check).await {
                    warn!(%error, "update-check manager failed, proceeding as if a fetch is required");
                }
                if check.required == Some(false) {
                    if let Some(exception) = check.prior_exception.clone() {
                        results[item.result_index].lock().await.add_exception(exception);
                    }
                    item.update_check = Some(check);
                    continue;
                }
                item.update_check = Some(check);
            }

            item.download = Some(Download {
                artifact: item.artifact.clone(),
                request_context,
                trace: item.trace.clone(),
                destination,
                existence_check,
                checksum_policy: ChecksumPolicy::Warn,
                repositories: vec![group.repository.clone()],
                exception: None,
            });
        }

        // 2. Emit ARTIFACT_DOWNLOADING for each planned download.
        for item in &group.items {
            if let Some(download) = &item.download {
                self.events
                    .dispatch(ArtifactEvent::Downloading {
                        artifact: download.artifact.clone(),
                        repository: group.repository.clone(),
                    })
                    .await;
            }
        }

        // 3. Execute: acquire a connector (scoped, released on every exit
        // path) and submit the whole batch as a single call.
        let mut pending_indices = Vec::new();
        let mut downloads = Vec::new();
        for (idx, item) in group.items.iter_mut().enumerate() {
            if let Some(download) = item.download.take() {
                pending_indices.push(idx);
                downloads.push(download);
            }
        }

        if !downloads.is_empty() {
            match self.connector_provider.new_connector(&group.repository).await {
                Ok(connector) => {
                    connector.get(&mut downloads).await;
                    connector.close().await;
                }
                Err(error) => {
                    for download in downloads.iter_mut() {
                        download.exception = Some(ResolveError::TransferError {
                            artifact: download.artifact.to_string(),
                            repository: Some(group.repository.id.to_string()),
                            cause: error.to_string(),
                        });
                    }
                }
            }
        }

        for (download, idx) in downloads.into_iter().zip(pending_indices) {
            group.items[idx].download = Some(download);
        }

        // 4. Evaluate.
        let path_policy = PathPolicy::new(config);
        for item in group.items.iter_mut() {
            let Some(download) = item.download.take() else {
                continue;
            };

            if download.succeeded() {
                // `swap` rather than `store`: if two compatible-within-the-
                // batch-but-different groups race to resolve the same
                // logical artifact, only the first to flip the flag writes
                // the winning result, matching "the first successful group
                // short-circuits later groups" even when groups genuinely
                // run concurrently.
                let already_won = item.resolved.swap(true, Ordering::SeqCst);
                if !already_won {
                    let mut result = results[item.result_index].lock().await;
                    result.repository = Some(group.repository.clone());

                    match path_policy.apply(&download.artifact, download.destination.clone()).await {
                        Ok(file) => {
                            result.artifact.file = Some(file);
                            result.artifact.coordinates = download.artifact.coordinates.clone();
                            let registration_artifact = result.artifact.clone();
                            drop(result);

                            if let Err(error) = self
                                .lrm
                                .add(Registration {
                                    artifact: registration_artifact,
                                    repository: group.repository.clone(),
                                    supported_contexts: vec![download.request_context.clone()],
                                })
                                .await
                            {
                                warn!(%error, "failed to register artifact with local repository manager");
                            }
                        }
                        Err(error) => {
                            result.add_exception(error);
                        }
                    }
                }
            } else if let Some(exception) = download.exception.clone() {
                results[item.result_index].lock().await.add_exception(exception);
            }

            if let Some(mut check) = item.update_check.take() {
                check.outcome_exception = download.exception.clone();
                // Registration above strictly precedes this touch so a
                // concurrent resolver querying update-check state never
                // sees a "not required" verdict before the corresponding
                // registration is visible.
                if let Err(error) = self.update_check_manager.touch_artifact(&check).await {
                    warn!(%error, "failed to persist update-check outcome");
                }
            }

            debug!(
                artifact = %download.artifact,
                repository = %group.repository.id,
                succeeded = download.succeeded(),
                "download evaluated"
            );
            self.events
                .dispatch(ArtifactEvent::Downloaded {
                    artifact: download.artifact,
                    repository: group.repository.clone(),
                    succeeded: download.exception.is_none(),
                })
                .await;
        }
    }
}

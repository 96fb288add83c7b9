//! Offline gating: a pure decision, no side effects beyond the exception
//! the caller accumulates on its own result.

use async_trait::async_trait;
use resolver_model::RemoteRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflineDecision {
    Online,
    Offline,
}

#[async_trait]
pub trait OfflineController: Send + Sync {
    async fn check_offline(&self, repository: &RemoteRepository) -> OfflineDecision;
}

//! Timestamp-based "is a re-fetch due" policy, and the matching "persist
//! what happened" write-back. Both are external collaborators — the
//! elapsed-time policy itself is out of scope for this crate.

use async_trait::async_trait;
use resolver_model::{PendingUpdateCheck, Result};

#[async_trait]
pub trait UpdateCheckManager: Send + Sync {
    /// Fills `check.required` (and `check.prior_exception` when a fetch is
    /// not required) based on elapsed-time policy.
    async fn check_artifact(&self, check: &mut PendingUpdateCheck) -> Result<()>;

    /// Persists the outcome recorded on `check.outcome_exception`. Must run
    /// strictly after the corresponding LRM registration for the same item
    /// so a concurrent resolver querying update-check state never observes
    /// a "not required" verdict before the artifact it is due to skip has
    /// actually been registered.
    async fn touch_artifact(&self, check: &PendingUpdateCheck) -> Result<()>;
}

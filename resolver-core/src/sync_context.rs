//! Scoped shared/exclusive locking keyed by artifact subject, used by
//! [`crate::orchestrator::Orchestrator`] to coordinate concurrent resolvers
//! against the same local repository.
//!
//! Escalation from shared to exclusive is *not* an upgrade: the shared
//! guard is dropped and a fresh exclusive guard acquired. This guarantees no
//! other holder is concurrently in the exclusive critical section with
//! stale state, at the cost of a re-run of the planning pass (see
//! [`crate::orchestrator::Orchestrator::resolve`]).

use dashmap::DashMap;
use resolver_model::SubjectKey;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Registry of per-subject locks. Lives for the lifetime of a `Session`;
/// entries are created lazily and never removed, trading a little memory
/// for never needing to coordinate cleanup with in-flight guards.
#[derive(Default)]
pub struct SyncContext {
    locks: DashMap<SubjectKey, Arc<RwLock<()>>>,
}

/// RAII handle over every lock acquired for one `resolve` call. Dropping it
/// releases every held guard, so release happens on every exit path
/// (including panics unwinding through the call) without a manual
/// try/finally.
pub struct SyncGuard {
    _reads: Vec<OwnedRwLockReadGuard<()>>,
    _writes: Vec<OwnedRwLockWriteGuard<()>>,
}

impl SyncContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, key: &SubjectKey) -> Arc<RwLock<()>> {
        Arc::clone(
            self.locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(RwLock::new(())))
                .value(),
        )
    }

    /// Acquires every key's lock in **sorted order** to avoid lock-ordering
    /// deadlocks between two calls that share a partially-overlapping key
    /// set.
    fn sorted_unique(keys: &[SubjectKey]) -> Vec<SubjectKey> {
        let mut sorted: Vec<SubjectKey> = keys.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted
    }

    pub async fn acquire_shared(&self, keys: &[SubjectKey]) -> SyncGuard {
        let mut reads = Vec::new();
        for key in Self::sorted_unique(keys) {
            let lock = self.lock_for(&key);
            reads.push(lock.read_owned().await);
        }
        SyncGuard {
            _reads: reads,
            _writes: Vec::new(),
        }
    }

    pub async fn acquire_exclusive(&self, keys: &[SubjectKey]) -> SyncGuard {
        let mut writes = Vec::new();
        for key in Self::sorted_unique(keys) {
            let lock = self.lock_for(&key);
            writes.push(lock.write_owned().await);
        }
        SyncGuard {
            _reads: Vec::new(),
            _writes: writes,
        }
    }
}

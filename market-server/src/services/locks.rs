//! Per-user serialization
//!
//! Cart mutations, checkout, and reorder for one user run under that
//! user's async mutex, so a merge never interleaves with another
//! mutation of the same cart. Different users never contend. Inventory
//! correctness does not depend on these locks; the store's conditional
//! updates carry that on their own.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-user mutexes, created on first use and kept for the
/// life of the process.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the user's lock, waiting behind other holders
    pub async fn acquire(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

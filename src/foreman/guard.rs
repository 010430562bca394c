//! Single-flight claims on tasks being drained.

use crate::task::domain::VendorTaskKey;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Set of task keys currently being reconciled.
#[derive(Debug, Clone, Default)]
pub struct InFlightRegistry {
    keys: Arc<Mutex<HashSet<VendorTaskKey>>>,
}

impl InFlightRegistry {
    /// Claims `key`, returning `None` when another drain already holds it.
    ///
    /// The claim is released when the returned guard drops.
    #[must_use]
    pub fn claim(&self, key: VendorTaskKey) -> Option<InFlightClaim> {
        let inserted = self
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());
        inserted.then(|| InFlightClaim {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    /// Returns whether `key` is currently claimed.
    #[must_use]
    pub fn is_claimed(&self, key: &VendorTaskKey) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Guard releasing an in-flight claim on drop.
#[derive(Debug)]
pub struct InFlightClaim {
    keys: Arc<Mutex<HashSet<VendorTaskKey>>>,
    key: VendorTaskKey,
}

impl Drop for InFlightClaim {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

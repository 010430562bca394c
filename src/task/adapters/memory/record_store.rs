//! In-memory implementation of the [`RecordStore`] port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ReciprocalLink, VendorTaskKey},
    ports::{RecordStore, RecordStoreError, RecordStoreResult},
};

/// Thread-safe in-memory record store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<RwLock<RecordState>>,
}

#[derive(Debug, Default)]
struct RecordState {
    links: HashMap<VendorTaskKey, VendorTaskKey>,
    watermarks: HashMap<VendorTaskKey, DateTime<Utc>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of link records (one per direction).
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.state
            .read()
            .map(|guard| guard.links.len())
            .unwrap_or(0)
    }
}

fn poisoned(err: &impl ToString) -> RecordStoreError {
    RecordStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get_reciprocal(
        &self,
        key: &VendorTaskKey,
    ) -> RecordStoreResult<Option<VendorTaskKey>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.links.get(key).cloned())
    }

    async fn create_link(&self, link: &ReciprocalLink) -> RecordStoreResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        for key in [link.origin(), link.reciprocal()] {
            if state.links.contains_key(key) {
                return Err(RecordStoreError::DuplicateLink(key.clone()));
            }
        }

        let reversed = link.reversed();
        for direction in [link, &reversed] {
            state
                .links
                .insert(direction.origin().clone(), direction.reciprocal().clone());
            state
                .watermarks
                .insert(direction.origin().clone(), direction.synced_at());
        }
        Ok(())
    }

    async fn get_last_synced(
        &self,
        key: &VendorTaskKey,
    ) -> RecordStoreResult<Option<DateTime<Utc>>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.watermarks.get(key).copied())
    }

    async fn update_last_synced(
        &self,
        key: &VendorTaskKey,
        synced_at: DateTime<Utc>,
    ) -> RecordStoreResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.watermarks.insert(key.clone(), synced_at);
        Ok(())
    }
}

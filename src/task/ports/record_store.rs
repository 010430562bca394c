//! Record-store port for reciprocal links and sync watermarks.

use crate::task::domain::{ReciprocalLink, VendorTaskKey};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for record-store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

/// Key-value store keyed by `(vendor_task_id, vendor_name)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the task paired with `key`, if a link exists.
    async fn get_reciprocal(&self, key: &VendorTaskKey)
    -> RecordStoreResult<Option<VendorTaskKey>>;

    /// Persists both directions of `link` in one step.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::DuplicateLink`] when either side is already
    /// linked; nothing is written in that case.
    async fn create_link(&self, link: &ReciprocalLink) -> RecordStoreResult<()>;

    /// Returns the last-synced watermark for `key`, if one was recorded.
    async fn get_last_synced(&self, key: &VendorTaskKey)
    -> RecordStoreResult<Option<DateTime<Utc>>>;

    /// Records `synced_at` as the watermark for `key`, creating the record
    /// when needed.
    async fn update_last_synced(
        &self,
        key: &VendorTaskKey,
        synced_at: DateTime<Utc>,
    ) -> RecordStoreResult<()>;
}

/// Errors returned by record-store implementations.
#[derive(Debug, Clone, Error)]
pub enum RecordStoreError {
    /// A link already exists for the key.
    #[error("task {0} is already linked")]
    DuplicateLink(VendorTaskKey),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecordStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

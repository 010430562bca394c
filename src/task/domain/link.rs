//! Reciprocal link between a requester-side task and its doer-side twin.

use super::VendorTaskKey;
use chrono::{DateTime, Utc};

/// Pairing written to the record store when a reciprocal task is created.
///
/// The store persists both directions of the link; see
/// [`ReciprocalLink::reversed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReciprocalLink {
    origin: VendorTaskKey,
    reciprocal: VendorTaskKey,
    synced_at: DateTime<Utc>,
}

impl ReciprocalLink {
    /// Creates a link whose watermark starts at the Unix epoch, so every
    /// existing comment counts as unsynced.
    #[must_use]
    pub const fn new(origin: VendorTaskKey, reciprocal: VendorTaskKey) -> Self {
        Self {
            origin,
            reciprocal,
            synced_at: DateTime::UNIX_EPOCH,
        }
    }

    /// Returns the task the link was created from.
    #[must_use]
    pub const fn origin(&self) -> &VendorTaskKey {
        &self.origin
    }

    /// Returns the paired task.
    #[must_use]
    pub const fn reciprocal(&self) -> &VendorTaskKey {
        &self.reciprocal
    }

    /// Returns the initial watermark for both directions.
    #[must_use]
    pub const fn synced_at(&self) -> DateTime<Utc> {
        self.synced_at
    }

    /// Returns the same link seen from the reciprocal side.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.reciprocal.clone(),
            reciprocal: self.origin.clone(),
            synced_at: self.synced_at,
        }
    }
}

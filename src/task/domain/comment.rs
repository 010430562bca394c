//! Comments ferried between the two sides of a task.

use super::CommentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message posted by a user on a vendor task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    created_at: DateTime<Utc>,
    message: String,
}

impl Comment {
    /// Creates a comment.
    #[must_use]
    pub fn new(id: CommentId, created_at: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            id,
            created_at,
            message: message.into(),
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns when the vendor recorded the comment.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

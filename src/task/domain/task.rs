//! Canonical task value shared by every vendor adapter.

use super::{
    Comment, CommentId, TaskCategory, TaskDomainError, TaskField, TaskStatus, VendorName,
    VendorTaskId, VendorTaskKey,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A vendor task translated into canonical fields.
///
/// Adapters build a fresh `Task` on every read; the engine never trusts a
/// value that has not come back from the vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: VendorTaskId,
    category: TaskCategory,
    status: Option<TaskStatus>,
    name: String,
    description: Option<String>,
    price: Option<u64>,
    email: Option<String>,
    location: Option<u64>,
    reciprocal: Option<VendorTaskKey>,
    comments: BTreeMap<CommentId, Comment>,
}

impl Task {
    /// Creates a task with no status and no optional fields.
    #[must_use]
    pub fn new(category: TaskCategory, id: VendorTaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            category,
            status: None,
            name: name.into(),
            description: None,
            price: None,
            email: None,
            location: None,
            reciprocal: None,
            comments: BTreeMap::new(),
        }
    }

    /// Sets the status as reported by the vendor.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the price.
    #[must_use]
    pub const fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the location identifier.
    #[must_use]
    pub const fn with_location(mut self, location: u64) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the reciprocal task reference.
    #[must_use]
    pub fn with_reciprocal(mut self, reciprocal: VendorTaskKey) -> Self {
        self.reciprocal = Some(reciprocal);
        self
    }

    /// Returns the vendor task identifier.
    #[must_use]
    pub const fn id(&self) -> &VendorTaskId {
        &self.id
    }

    /// Returns the record-store key of this task on `vendor`.
    #[must_use]
    pub fn key(&self, vendor: &VendorName) -> VendorTaskKey {
        VendorTaskKey::new(self.id.clone(), vendor.clone())
    }

    /// Returns the task category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the status, if the task has one yet.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns whether the task has any status.
    #[must_use]
    pub const fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// Returns whether the task currently has `status`.
    #[must_use]
    pub fn is(&self, status: TaskStatus) -> bool {
        self.status == Some(status)
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the price, if any.
    #[must_use]
    pub const fn price(&self) -> Option<u64> {
        self.price
    }

    /// Returns the contact email, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the location identifier, if any.
    #[must_use]
    pub const fn location(&self) -> Option<u64> {
        self.location
    }

    /// Returns the reciprocal task reference, if known.
    #[must_use]
    pub const fn reciprocal(&self) -> Option<&VendorTaskKey> {
        self.reciprocal.as_ref()
    }

    /// Records the reciprocal task reference so the vendor can embed it.
    pub fn set_reciprocal(&mut self, reciprocal: VendorTaskKey) {
        self.reciprocal = Some(reciprocal);
    }

    /// Moves the task to `next`.
    ///
    /// An unset status may only become [`TaskStatus::Created`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the move
    /// would regress the task or leave a terminal status.
    pub fn advance_to(&mut self, next: TaskStatus) -> Result<(), TaskDomainError> {
        let allowed = match self.status {
            None => next == TaskStatus::Created,
            Some(current) => current.can_advance_to(next),
        };
        if !allowed {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = Some(next);
        Ok(())
    }

    /// Returns whether `field` holds a usable value.
    #[must_use]
    pub fn has_field(&self, field: TaskField) -> bool {
        match field {
            TaskField::Id => true,
            TaskField::Name => !self.name.trim().is_empty(),
            TaskField::Description => is_filled(self.description.as_deref()),
            TaskField::Price => self.price.is_some(),
            TaskField::Email => is_filled(self.email.as_deref()),
            TaskField::Location => self.location.is_some(),
        }
    }

    /// Returns the required fields this task is still missing.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<TaskField> {
        self.category
            .required_fields()
            .iter()
            .copied()
            .filter(|field| !self.has_field(*field))
            .collect()
    }

    /// Returns whether every field required by the category is present.
    #[must_use]
    pub fn is_spec_ready(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Replaces the transient comment thread.
    pub fn set_comments(&mut self, comments: BTreeMap<CommentId, Comment>) {
        self.comments = comments;
    }

    /// Returns comments created strictly after `watermark`, oldest first.
    ///
    /// A missing watermark selects every comment.
    #[must_use]
    pub fn comments_since(&self, watermark: Option<DateTime<Utc>>) -> Vec<&Comment> {
        let mut selected: Vec<&Comment> = self
            .comments
            .values()
            .filter(|comment| watermark.is_none_or(|ts| comment.created_at() > ts))
            .collect();
        selected.sort_by_key(|comment| comment.created_at());
        selected
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}

//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an external vendor service, used in record-store
/// keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorName(String);

impl VendorName {
    /// Creates a validated vendor name.
    ///
    /// Names are trimmed and lower-cased so that `"Asana"` and `"asana"` key
    /// the same records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidVendorName`] when the value is empty
    /// or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(TaskDomainError::InvalidVendorName(raw));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Returns the vendor name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VendorName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for VendorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vendor-assigned task identifier. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorTaskId(String);

impl VendorTaskId {
    /// Creates a validated vendor task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VendorTaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for VendorTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vendor-assigned comment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Creates a validated comment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCommentId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyCommentId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record-store key: a task identifier scoped to the vendor that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VendorTaskKey {
    task_id: VendorTaskId,
    vendor: VendorName,
}

impl VendorTaskKey {
    /// Creates a key from its parts.
    #[must_use]
    pub const fn new(task_id: VendorTaskId, vendor: VendorName) -> Self {
        Self { task_id, vendor }
    }

    /// Creates a key from raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when either part fails validation.
    pub fn from_parts(
        task_id: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self::new(VendorTaskId::new(task_id)?, VendorName::new(vendor)?))
    }

    /// Returns the vendor task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &VendorTaskId {
        &self.task_id
    }

    /// Returns the vendor name.
    #[must_use]
    pub const fn vendor(&self) -> &VendorName {
        &self.vendor
    }
}

impl fmt::Display for VendorTaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor, self.task_id)
    }
}

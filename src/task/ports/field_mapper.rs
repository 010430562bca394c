//! Field-mapper port translating raw vendor records to canonical tasks.

use crate::task::domain::{Task, TaskDomainError};
use serde_json::Value;
use thiserror::Error;

/// Translates between one vendor's raw task records and [`Task`].
pub trait FieldMapper: Send + Sync {
    /// Parses a raw vendor record.
    ///
    /// # Errors
    ///
    /// Returns [`FieldMappingError`] when the record lacks an identifier or a
    /// field has the wrong shape.
    fn to_canonical(&self, raw: &Value) -> Result<Task, FieldMappingError>;

    /// Renders a task as a raw vendor record.
    fn from_canonical(&self, task: &Task) -> Value;
}

/// Errors returned while mapping vendor records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldMappingError {
    /// The raw record is not a JSON object.
    #[error("vendor record is not an object")]
    NotAnObject,

    /// A field the mapper cannot do without is absent.
    #[error("vendor record is missing field '{0}'")]
    MissingField(String),

    /// A field is present but has the wrong shape.
    #[error("vendor field '{field}' is invalid: {reason}")]
    InvalidField {
        /// Vendor field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A mapped value failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

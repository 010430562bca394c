//! Error types for task domain validation and parsing.

use super::{TaskStatus, VendorTaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The vendor name is empty or contains whitespace.
    #[error("invalid vendor name '{0}'")]
    InvalidVendorName(String),

    /// The vendor task identifier is empty after trimming.
    #[error("vendor task identifier must not be empty")]
    EmptyTaskId,

    /// The comment identifier is empty after trimming.
    #[error("comment identifier must not be empty")]
    EmptyCommentId,

    /// The requested status change would move the task backwards or out of
    /// a terminal state.
    #[error("task {task_id} cannot move from {from_status} to {to}", from_status = DisplayStatus(*.from))]
    InvalidStatusTransition {
        /// Task whose status change was rejected.
        task_id: VendorTaskId,
        /// Status before the attempted change; `None` when unset.
        from: Option<TaskStatus>,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing canonical task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

struct DisplayStatus(Option<TaskStatus>);

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(status) => f.write_str(status.as_str()),
            None => f.write_str("<unset>"),
        }
    }
}

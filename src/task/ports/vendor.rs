//! Vendor adapter port: everything the engine needs from one external
//! service.

use crate::task::{
    domain::{
        Comment, CommentId, Task, TaskDomainError, TaskField, TaskStatus, VendorName, VendorTaskId,
        VendorTaskKey,
    },
    ports::FieldMappingError,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for vendor adapter operations.
pub type VendorResult<T> = Result<T, VendorError>;

/// Which side of the pairing a vendor serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorSide {
    /// Requester side (project tracker). Originates tasks.
    Employer,
    /// Doer side (labour marketplace). Receives reciprocal tasks.
    Employee,
}

impl VendorSide {
    /// Returns the opposite side.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Employer => Self::Employee,
            Self::Employee => Self::Employer,
        }
    }
}

impl fmt::Display for VendorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Employer => f.write_str("employer"),
            Self::Employee => f.write_str("employee"),
        }
    }
}

/// Adapter over one vendor's task API.
///
/// Every mutating call returns the task as re-read from the vendor after the
/// write, so callers always hold vendor-confirmed state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorAdapter: Send + Sync {
    /// Stable vendor identifier used in record-store keys.
    fn name(&self) -> &VendorName;

    /// Side of the pairing this vendor serves.
    fn side(&self) -> VendorSide;

    /// Reads one task.
    ///
    /// Returns `None` when the vendor has no such task.
    async fn read_task(&self, id: &VendorTaskId) -> VendorResult<Option<Task>>;

    /// Reads every task the vendor exposes to the engine.
    ///
    /// `None` entries are tasks whose spec is incomplete; the vendor has been
    /// asked for the missing fields and the task must be skipped this pass.
    async fn read_tasks(&self) -> VendorResult<BTreeMap<VendorTaskId, Option<Task>>>;

    /// Creates a new vendor task mirroring `task`.
    ///
    /// # Errors
    ///
    /// Requester-side vendors return [`VendorError::CreateNotAllowed`].
    async fn create_task(&self, task: &Task) -> VendorResult<Task>;

    /// Pushes every canonical field of `task` to the vendor.
    async fn update_task(&self, task: &Task) -> VendorResult<Task>;

    /// Moves the vendor task to `status` and returns the confirmed task.
    async fn update_task_to(&self, task: &Task, status: TaskStatus) -> VendorResult<Task>;

    /// Asks the vendor's users to supply the missing fields.
    async fn request_required_fields(&self, task: &Task, missing: &[TaskField])
    -> VendorResult<()>;

    /// Posts a comment on a vendor task.
    async fn add_comment(&self, task_id: &VendorTaskId, message: &str) -> VendorResult<bool>;

    /// Reads a task's comments keyed by comment id.
    async fn read_comments(
        &self,
        task_id: &VendorTaskId,
    ) -> VendorResult<BTreeMap<CommentId, Comment>>;
}

/// Errors returned by vendor adapters.
#[derive(Debug, Clone, Error)]
pub enum VendorError {
    /// The vendor has no such task.
    #[error("task not found: {0}")]
    NotFound(VendorTaskKey),

    /// Requester-side vendors never create tasks on request.
    #[error("vendor {0} does not accept task creation")]
    CreateNotAllowed(VendorName),

    /// The adapter does not implement the capability yet. Callers may skip
    /// the step instead of aborting.
    #[error("vendor {vendor} does not support {capability}")]
    Unsupported {
        /// Vendor lacking the capability.
        vendor: VendorName,
        /// Name of the missing capability.
        capability: &'static str,
    },

    /// The vendor record could not be mapped onto a canonical task.
    #[error(transparent)]
    Mapping(#[from] FieldMappingError),

    /// The vendor rejected a domain rule, such as a status regression.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Transport or vendor API failure.
    #[error("vendor transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl VendorError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns whether the error marks a missing capability rather than a
    /// fault.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

//! Error types raised by reconciliation passes.

use crate::task::{
    domain::{TaskStatus, VendorName, VendorTaskKey},
    ports::{RecordStoreError, VendorError, VendorSide},
};
use thiserror::Error;

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Failures of a single reconciliation pass.
///
/// Precondition and invariant violations are fatal for the task's current
/// drain; adapter and store failures abort the pass and are retried on the
/// next poll.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A task reached a workflow without a status.
    #[error("task {0} has no status")]
    MissingStatus(VendorTaskKey),

    /// Registration tasks may only be processed from the employer side.
    #[error("registration task {0} cannot be processed from the employee side")]
    SoloFromEmployee(VendorTaskKey),

    /// A registration task was seen in a status other than posted or
    /// completed.
    #[error("registration task {task} has unexpected status {status}")]
    UnexpectedSoloStatus {
        /// Offending task.
        task: VendorTaskKey,
        /// Status it was found in.
        status: TaskStatus,
    },

    /// An employee-side task has no linked employer task.
    #[error("task {0} has no reciprocal and only the employer side may create one")]
    NoReciprocal(VendorTaskKey),

    /// The record store names a reciprocal task the vendor does not have.
    #[error("reciprocal task {0} no longer exists")]
    ReciprocalMissing(VendorTaskKey),

    /// The record store links a task to a vendor other than the expected
    /// counterpart.
    #[error("reciprocal {found} is not held by vendor {expected}")]
    ReciprocalVendorMismatch {
        /// Vendor the reciprocal should live on.
        expected: VendorName,
        /// Link found in the record store.
        found: VendorTaskKey,
    },

    /// The joint status pair matches no reconciliation rule.
    #[error("no reconciliation rule for employer {employer} and employee {employee}")]
    UnexpectedStatusPair {
        /// Employer-side status.
        employer: TaskStatus,
        /// Employee-side status.
        employee: TaskStatus,
    },

    /// A rule asked for a move the status machine does not allow.
    #[error("{side} task cannot move from {from} to {to}")]
    ForbiddenTransition {
        /// Side that would have moved.
        side: VendorSide,
        /// Current status of that side.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// A vendor adapter call failed.
    #[error(transparent)]
    Vendor(#[from] VendorError),

    /// A record-store call failed.
    #[error(transparent)]
    RecordStore(#[from] RecordStoreError),
}

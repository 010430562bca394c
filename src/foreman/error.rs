//! Errors raised by the drive loop.

use crate::config::ConfigError;
use crate::task::{
    domain::{VendorName, VendorTaskKey},
    ports::{RecordStoreError, VendorError},
};
use crate::workflow::{RegistryError, WorkflowError};
use thiserror::Error;

/// Result type for foreman operations.
pub type ForemanResult<T> = Result<T, ForemanError>;

/// Failures of a drain or an inbound trigger.
#[derive(Debug, Error)]
pub enum ForemanError {
    /// No registered adapter carries the vendor name.
    #[error("unknown vendor: {0}")]
    UnknownVendor(VendorName),

    /// The vendor has no such task.
    #[error("task not found: {0}")]
    TaskNotFound(VendorTaskKey),

    /// Another drain of the same task is in progress.
    #[error("task {0} is already being reconciled")]
    AlreadyReconciling(VendorTaskKey),

    /// A drain kept reporting changes past the configured pass limit.
    #[error("task {task} still changing after {limit} passes")]
    PassLimitExceeded {
        /// Task being drained.
        task: VendorTaskKey,
        /// Configured limit.
        limit: usize,
    },

    /// A reconciliation pass failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A vendor call outside a workflow failed.
    #[error(transparent)]
    Vendor(#[from] VendorError),

    /// A record-store call outside a workflow failed.
    #[error(transparent)]
    RecordStore(#[from] RecordStoreError),

    /// The adapters do not match the configuration.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

//! Workflow selection by task category.

use super::{PairedWorkflow, SoloWorkflow, SyncContext, Workflow, WorkflowError, WorkflowResult};
use crate::task::{
    domain::{Task, TaskCategory},
    ports::{RecordStore, VendorSide},
};
use mockable::Clock;

/// Builds the workflow variant matching a task's category.
pub struct WorkflowFactory;

impl WorkflowFactory {
    /// Builds a workflow for a task read from the employer side.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::MissingStatus`] when the task has no status.
    pub fn instantiate_from_employer<S, C>(
        ctx: &SyncContext<S, C>,
        task: Task,
    ) -> WorkflowResult<Workflow<'_, S, C>>
    where
        S: RecordStore,
        C: Clock + Send + Sync,
    {
        Self::instantiate(ctx, task, VendorSide::Employer)
    }

    /// Builds a workflow for a task read from the `initiator` side.
    ///
    /// The primary worker is the registry's adapter for `initiator`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::MissingStatus`] when the task has no status.
    pub fn instantiate<S, C>(
        ctx: &SyncContext<S, C>,
        task: Task,
        initiator: VendorSide,
    ) -> WorkflowResult<Workflow<'_, S, C>>
    where
        S: RecordStore,
        C: Clock + Send + Sync,
    {
        let worker = ctx.registry().for_side(initiator).as_ref();
        if !task.has_status() {
            return Err(WorkflowError::MissingStatus(task.key(worker.name())));
        }

        Ok(match task.category() {
            TaskCategory::Registration => {
                Workflow::Solo(SoloWorkflow::new(ctx, worker, task, initiator))
            }
            TaskCategory::Priced => {
                Workflow::Paired(PairedWorkflow::new(ctx, worker, task, initiator))
            }
        })
    }
}

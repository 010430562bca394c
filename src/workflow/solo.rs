//! One-sided workflow for registration tasks.

use super::{SyncContext, WorkflowError, WorkflowResult};
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{RecordStore, VendorAdapter, VendorSide},
};
use mockable::Clock;

/// Completes posted registration tasks and confirms them with a comment.
///
/// No reciprocal task exists, so no link record or watermark is written.
pub struct SoloWorkflow<'a, S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    ctx: &'a SyncContext<S, C>,
    worker: &'a dyn VendorAdapter,
    task: Task,
    initiator: VendorSide,
}

impl<'a, S, C> SoloWorkflow<'a, S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    pub(super) const fn new(
        ctx: &'a SyncContext<S, C>,
        worker: &'a dyn VendorAdapter,
        task: Task,
        initiator: VendorSide,
    ) -> Self {
        Self {
            ctx,
            worker,
            task,
            initiator,
        }
    }

    /// Runs one pass and returns the completed task, or `None` when the task
    /// was already completed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::SoloFromEmployee`] for employee-initiated
    /// passes, [`WorkflowError::UnexpectedSoloStatus`] for any status other
    /// than posted or completed, and adapter failures.
    pub async fn process(self) -> WorkflowResult<Option<Task>> {
        let key = self.task.key(self.worker.name());
        if self.initiator != VendorSide::Employer {
            return Err(WorkflowError::SoloFromEmployee(key));
        }

        match self.task.status() {
            Some(TaskStatus::Posted) => {
                let completed = self
                    .worker
                    .update_task_to(&self.task, TaskStatus::Completed)
                    .await?;
                let confirmation = self.ctx.phrases().registration_confirmation();
                match self.worker.add_comment(completed.id(), confirmation).await {
                    Ok(_) => {}
                    Err(error) if error.is_unsupported() => {
                        tracing::warn!(%error, task = %key, "registration confirmation not posted");
                    }
                    Err(error) => return Err(error.into()),
                }
                tracing::info!(task = %key, "registration completed");
                Ok(Some(completed))
            }
            Some(TaskStatus::Completed) => Ok(None),
            Some(status) => Err(WorkflowError::UnexpectedSoloStatus { task: key, status }),
            None => Err(WorkflowError::MissingStatus(key)),
        }
    }
}

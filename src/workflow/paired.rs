//! Two-sided workflow for priced tasks.

use super::{
    SyncContext, WorkflowError, WorkflowResult,
    transition::{Decision, next_hop},
};
use crate::task::{
    domain::{Comment, ReciprocalLink, Task, TaskStatus, VendorTaskKey},
    ports::{RecordStore, VendorAdapter, VendorSide},
};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Reconciles a primary task with its reciprocal on the other vendor.
///
/// One pass resolves (or creates) the reciprocal, applies at most one status
/// hop, forwards new primary comments, and persists watermarks for the
/// sides that changed.
///
/// Watermarks never pass a comment the pass has not seen: the primary mark
/// is the later of the pass start and the newest delivered comment, and it
/// advances after each delivery so a failed forward resumes where it
/// stopped.
pub struct PairedWorkflow<'a, S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    ctx: &'a SyncContext<S, C>,
    worker: &'a dyn VendorAdapter,
    reciprocal_worker: &'a dyn VendorAdapter,
    task: Task,
    initiator: VendorSide,
    task_changed: bool,
    reciprocal_changed: bool,
    delivered_through: Option<DateTime<Utc>>,
    echoes_through: Option<DateTime<Utc>>,
}

impl<'a, S, C> PairedWorkflow<'a, S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    pub(super) fn new(
        ctx: &'a SyncContext<S, C>,
        worker: &'a dyn VendorAdapter,
        task: Task,
        initiator: VendorSide,
    ) -> Self {
        let reciprocal_worker = ctx.registry().for_side(initiator.counterpart()).as_ref();
        Self {
            ctx,
            worker,
            reciprocal_worker,
            task,
            initiator,
            task_changed: false,
            reciprocal_changed: false,
            delivered_through: None,
            echoes_through: None,
        }
    }

    /// Runs one pass and returns the confirmed primary task when it changed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when the reciprocal cannot be resolved, the
    /// status pair matches no rule, or an adapter or store call fails.
    pub async fn process(mut self) -> WorkflowResult<Option<Task>> {
        let started = self.ctx.clock().utc();
        let mut reciprocal = self.resolve_reciprocal().await?;
        self.reconcile_statuses(&mut reciprocal).await?;
        self.reconcile_comments(&reciprocal).await?;
        self.finalize(&reciprocal, started).await
    }

    fn primary_key(&self) -> VendorTaskKey {
        self.task.key(self.worker.name())
    }

    async fn resolve_reciprocal(&mut self) -> WorkflowResult<Task> {
        let key = self.primary_key();
        let store = self.ctx.store();

        if let Some(linked) = store.get_reciprocal(&key).await? {
            if linked.vendor() != self.reciprocal_worker.name() {
                return Err(WorkflowError::ReciprocalVendorMismatch {
                    expected: self.reciprocal_worker.name().clone(),
                    found: linked,
                });
            }
            return self
                .reciprocal_worker
                .read_task(linked.task_id())
                .await?
                .ok_or(WorkflowError::ReciprocalMissing(linked));
        }

        if self.initiator != VendorSide::Employer {
            return Err(WorkflowError::NoReciprocal(key));
        }

        let created = self.reciprocal_worker.create_task(&self.task).await?;
        let reciprocal_key = created.key(self.reciprocal_worker.name());
        store
            .create_link(&ReciprocalLink::new(key.clone(), reciprocal_key.clone()))
            .await?;
        tracing::info!(task = %key, reciprocal = %reciprocal_key, "created reciprocal task");

        self.task.set_reciprocal(reciprocal_key);
        self.task = self.worker.update_task(&self.task).await?;
        self.task_changed = true;
        Ok(created)
    }

    async fn reconcile_statuses(&mut self, reciprocal: &mut Task) -> WorkflowResult<()> {
        let primary_status = self
            .task
            .status()
            .ok_or_else(|| WorkflowError::MissingStatus(self.primary_key()))?;
        let reciprocal_status = reciprocal.status().ok_or_else(|| {
            WorkflowError::MissingStatus(reciprocal.key(self.reciprocal_worker.name()))
        })?;
        let (employer, employee) = match self.initiator {
            VendorSide::Employer => (primary_status, reciprocal_status),
            VendorSide::Employee => (reciprocal_status, primary_status),
        };

        let hop = match next_hop(employer, employee) {
            Decision::InSync => return Ok(()),
            Decision::Unexpected => {
                return Err(WorkflowError::UnexpectedStatusPair { employer, employee });
            }
            Decision::Advance(hop) => hop,
        };

        let primary_moves = hop.side == self.initiator;
        let from = if primary_moves {
            primary_status
        } else {
            reciprocal_status
        };
        if !from.can_advance_to(hop.status) {
            return Err(WorkflowError::ForbiddenTransition {
                side: hop.side,
                from,
                to: hop.status,
            });
        }

        tracing::info!(
            task = %self.primary_key(),
            side = %hop.side,
            %from,
            to = %hop.status,
            "advancing task status"
        );
        if primary_moves {
            self.task = self.worker.update_task_to(&self.task, hop.status).await?;
            self.task_changed = true;
        } else {
            *reciprocal = self
                .reciprocal_worker
                .update_task_to(reciprocal, hop.status)
                .await?;
            self.reciprocal_changed = true;
        }
        Ok(())
    }

    async fn reconcile_comments(&mut self, reciprocal: &Task) -> WorkflowResult<()> {
        if !matches!(
            self.task.status(),
            Some(TaskStatus::Assigned | TaskStatus::Completed | TaskStatus::Approved)
        ) {
            return Ok(());
        }

        let key = self.primary_key();
        let comments = match self.worker.read_comments(self.task.id()).await {
            Ok(comments) => comments,
            Err(error) if error.is_unsupported() => {
                tracing::debug!(%error, task = %key, "comment sync skipped");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };
        self.task.set_comments(comments);

        let store = self.ctx.store();
        let watermark = store
            .get_last_synced(&key)
            .await?
            .unwrap_or(DateTime::UNIX_EPOCH);
        let pending: Vec<Comment> = self
            .task
            .comments_since(Some(watermark))
            .into_iter()
            .cloned()
            .collect();

        let mut forwarded = Vec::with_capacity(pending.len());
        for comment in pending {
            match self
                .reciprocal_worker
                .add_comment(reciprocal.id(), comment.message())
                .await
            {
                Ok(_) => {}
                Err(error) if error.is_unsupported() => {
                    tracing::debug!(%error, task = %key, "reciprocal does not take comments");
                    break;
                }
                Err(error) => return Err(error.into()),
            }
            store.update_last_synced(&key, comment.created_at()).await?;
            self.delivered_through = Some(comment.created_at());
            forwarded.push(comment);
        }
        if forwarded.is_empty() {
            return Ok(());
        }
        tracing::info!(task = %key, forwarded = forwarded.len(), "forwarded comments");
        self.task_changed = true;
        self.skip_echoes(reciprocal, &forwarded).await
    }

    /// Finds the copies just posted on the reciprocal so a pass started from
    /// that side does not send them back.
    ///
    /// Only echoes at the head of the reciprocal's unsynced comments are
    /// skipped; the first comment that is not an echo stops the scan.
    async fn skip_echoes(
        &mut self,
        reciprocal: &Task,
        forwarded: &[Comment],
    ) -> WorkflowResult<()> {
        let reciprocal_key = reciprocal.key(self.reciprocal_worker.name());
        let thread = match self.reciprocal_worker.read_comments(reciprocal.id()).await {
            Ok(thread) => thread,
            Err(error) => {
                tracing::warn!(%error, task = %reciprocal_key, "cannot read back forwarded comments");
                return Ok(());
            }
        };
        let since = self
            .ctx
            .store()
            .get_last_synced(&reciprocal_key)
            .await?
            .unwrap_or(DateTime::UNIX_EPOCH);

        let mut mirror = reciprocal.clone();
        mirror.set_comments(thread);
        let mut unmatched: Vec<&str> = forwarded.iter().map(Comment::message).collect();
        for candidate in mirror.comments_since(Some(since)) {
            let Some(position) = unmatched
                .iter()
                .position(|message| *message == candidate.message())
            else {
                break;
            };
            unmatched.swap_remove(position);
            self.echoes_through = Some(candidate.created_at());
        }
        Ok(())
    }

    async fn finalize(
        self,
        reciprocal: &Task,
        started: DateTime<Utc>,
    ) -> WorkflowResult<Option<Task>> {
        let store = self.ctx.store();

        let reciprocal_mark = if self.reciprocal_changed {
            Some(later(started, self.echoes_through))
        } else {
            self.echoes_through
        };
        if let Some(mark) = reciprocal_mark {
            store
                .update_last_synced(&reciprocal.key(self.reciprocal_worker.name()), mark)
                .await?;
        }
        if !self.task_changed {
            return Ok(None);
        }
        store
            .update_last_synced(&self.primary_key(), later(started, self.delivered_through))
            .await?;
        let pushed = self.worker.update_task(&self.task).await?;
        Ok(Some(pushed))
    }
}

fn later(started: DateTime<Utc>, seen: Option<DateTime<Utc>>) -> DateTime<Utc> {
    seen.map_or(started, |through| through.max(started))
}

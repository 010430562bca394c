//! The drive loop: drains every requester task to a fixed point.

use super::{ForemanError, ForemanResult, InFlightRegistry};
use crate::config::{DEFAULT_MAX_PASSES, SyncConfig};
use crate::task::{
    domain::{Task, VendorName, VendorTaskId, VendorTaskKey},
    ports::{RecordStore, VendorAdapter, VendorSide},
    services::ready_spec,
};
use crate::workflow::{AdapterRegistry, SyncContext, WorkflowFactory};
use mockable::Clock;
use std::sync::Arc;

/// Result of draining one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainOutcome {
    key: VendorTaskKey,
    task: Task,
    passes: usize,
}

impl DrainOutcome {
    /// Key of the drained task on its initiating vendor.
    #[must_use]
    pub const fn key(&self) -> &VendorTaskKey {
        &self.key
    }

    /// Last vendor-confirmed state of the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Number of passes run, including the final unchanged one.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }
}

/// A task whose drain failed during [`Foreman::send_jack`].
#[derive(Debug)]
pub struct DrainFailure {
    /// Task that failed.
    pub task: VendorTaskKey,
    /// Why it failed.
    pub error: ForemanError,
}

/// Summary of one [`Foreman::send_jack`] sweep.
#[derive(Debug, Default)]
pub struct SendJackReport {
    /// Tasks drained to a fixed point.
    pub drained: Vec<DrainOutcome>,
    /// Tasks held back by the readiness gate.
    pub skipped: Vec<VendorTaskId>,
    /// Tasks whose drain failed.
    pub failed: Vec<DrainFailure>,
}

impl SendJackReport {
    /// Returns whether every present task drained cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives reconciliation passes for requester-side tasks.
pub struct Foreman<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    ctx: SyncContext<S, C>,
    max_passes: usize,
    in_flight: InFlightRegistry,
}

impl<S, C> Foreman<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Creates a foreman with the default pass limit.
    #[must_use]
    pub fn new(ctx: SyncContext<S, C>) -> Self {
        Self {
            ctx,
            max_passes: DEFAULT_MAX_PASSES,
            in_flight: InFlightRegistry::default(),
        }
    }

    /// Wires a foreman from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanError::Config`] for an invalid configuration and
    /// [`ForemanError::Registry`] when the adapters do not carry the
    /// configured vendor names.
    pub fn from_config(
        config: &SyncConfig,
        registry: AdapterRegistry,
        store: Arc<S>,
        clock: Arc<C>,
    ) -> ForemanResult<Self> {
        config.validate()?;
        registry.expect_names(&config.employer_vendor()?, &config.employee_vendor()?)?;
        let ctx = SyncContext::new(registry, store, clock).with_phrasebook(config.phrases.clone());
        Ok(Self::new(ctx).with_max_passes(config.max_passes_per_task))
    }

    /// Sets the per-task pass limit. Values below one are raised to one.
    #[must_use]
    pub fn with_max_passes(mut self, limit: usize) -> Self {
        self.max_passes = limit.max(1);
        self
    }

    /// Shares `in_flight` with other foremen in the process, so a poller and
    /// a webhook handler never drain the same task at once.
    #[must_use]
    pub fn with_in_flight(mut self, in_flight: InFlightRegistry) -> Self {
        self.in_flight = in_flight;
        self
    }

    /// Reconciles every task the employer vendor exposes.
    ///
    /// Incomplete tasks are skipped. A failing task is logged and recorded
    /// in the report; the sweep carries on with the next one.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanError::Vendor`] when the employer task listing fails.
    pub async fn send_jack(&self) -> ForemanResult<SendJackReport> {
        let employer = self.ctx.registry().employer();
        let tasks = employer.read_tasks().await?;
        tracing::info!(vendor = %employer.name(), count = tasks.len(), "sending jack");

        let mut report = SendJackReport::default();
        for (id, entry) in tasks {
            let Some(task) = entry else {
                tracing::debug!(vendor = %employer.name(), task = %id, "task not ready");
                report.skipped.push(id);
                continue;
            };
            let key = task.key(employer.name());
            match self.drain(task, VendorSide::Employer).await {
                Ok(outcome) => report.drained.push(outcome),
                Err(error) => {
                    tracing::error!(%error, task = %key, "task reconciliation failed");
                    report.failed.push(DrainFailure { task: key, error });
                }
            }
        }
        Ok(report)
    }

    /// Reconciles one task on demand, as triggered by a vendor webhook.
    ///
    /// Returns `None` when the readiness gate holds the task back.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanError::UnknownVendor`], [`ForemanError::TaskNotFound`],
    /// or any drain failure.
    pub async fn send_jack_for_task(
        &self,
        vendor: &VendorName,
        task_id: &VendorTaskId,
    ) -> ForemanResult<Option<DrainOutcome>> {
        let adapter = self.adapter(vendor)?;
        let fetched = adapter
            .read_task(task_id)
            .await?
            .ok_or_else(|| ForemanError::TaskNotFound(task_key(task_id, vendor)))?;
        let Some(task) = ready_spec(adapter.as_ref(), fetched).await? else {
            tracing::debug!(%vendor, task = %task_id, "task not ready");
            return Ok(None);
        };
        self.drain(task, adapter.side()).await.map(Some)
    }

    /// Posts `message` on the task linked to `(task_id, vendor)` without a
    /// full reconciliation pass.
    ///
    /// Returns `false` when the task has no link.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanError::UnknownVendor`] for an unregistered vendor on
    /// either end of the link, or the failing store or vendor call.
    pub async fn ferry_comment(
        &self,
        vendor: &VendorName,
        task_id: &VendorTaskId,
        message: &str,
    ) -> ForemanResult<bool> {
        self.adapter(vendor)?;
        let key = task_key(task_id, vendor);
        let Some(reciprocal) = self.ctx.store().get_reciprocal(&key).await? else {
            tracing::debug!(task = %key, "no reciprocal to ferry comment to");
            return Ok(false);
        };
        let target = self.adapter(reciprocal.vendor())?;
        let posted = target.add_comment(reciprocal.task_id(), message).await?;
        tracing::info!(task = %key, reciprocal = %reciprocal, posted, "ferried comment");
        Ok(posted)
    }

    fn adapter(&self, vendor: &VendorName) -> ForemanResult<&Arc<dyn VendorAdapter>> {
        self.ctx
            .registry()
            .get(vendor)
            .ok_or_else(|| ForemanError::UnknownVendor(vendor.clone()))
    }

    async fn drain(&self, task: Task, initiator: VendorSide) -> ForemanResult<DrainOutcome> {
        let worker = self.ctx.registry().for_side(initiator);
        let key = task.key(worker.name());
        let _claim = self
            .in_flight
            .claim(key.clone())
            .ok_or_else(|| ForemanError::AlreadyReconciling(key.clone()))?;

        let mut latest = task;
        let mut passes = 0;
        loop {
            if passes == self.max_passes {
                return Err(ForemanError::PassLimitExceeded {
                    task: key,
                    limit: self.max_passes,
                });
            }
            passes += 1;
            tracing::debug!(task = %key, pass = passes, status = ?latest.status(), "reconciliation pass");

            let workflow = WorkflowFactory::instantiate(&self.ctx, latest.clone(), initiator)?;
            match workflow.process().await? {
                Some(updated) => latest = updated,
                None => break,
            }
        }

        tracing::info!(task = %key, passes, status = ?latest.status(), "task drained");
        Ok(DrainOutcome {
            key,
            task: latest,
            passes,
        })
    }
}

fn task_key(task_id: &VendorTaskId, vendor: &VendorName) -> VendorTaskKey {
    VendorTaskKey::new(task_id.clone(), vendor.clone())
}

//! Reconciliation engine for paired vendor tasks.
//!
//! A [`Workflow`] runs one pass over a primary task: it resolves the
//! reciprocal task, applies at most one status hop, forwards new comments,
//! and returns the primary task when the pass changed it. Callers repeat
//! passes on the returned task until `None` comes back.

mod context;
mod error;
mod factory;
mod paired;
mod solo;
pub mod transition;

pub use context::{AdapterRegistry, RegistryError, SyncContext};
pub use error::{WorkflowError, WorkflowResult};
pub use factory::WorkflowFactory;
pub use paired::PairedWorkflow;
pub use solo::SoloWorkflow;

use crate::task::{domain::Task, ports::RecordStore};
use mockable::Clock;

/// A single reconciliation pass, chosen by task category.
pub enum Workflow<'a, S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Registration task without a reciprocal.
    Solo(SoloWorkflow<'a, S, C>),
    /// Priced task paired across both vendors.
    Paired(PairedWorkflow<'a, S, C>),
}

impl<S, C> Workflow<'_, S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Runs the pass and returns the primary task if it changed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when the pass hits an invariant violation or
    /// an adapter or store failure.
    pub async fn process(self) -> WorkflowResult<Option<Task>> {
        match self {
            Self::Solo(workflow) => workflow.process().await,
            Self::Paired(workflow) => workflow.process().await,
        }
    }
}

#[cfg(test)]
mod tests;

//! Shared world state for reconciliation BDD scenarios.

use std::sync::Arc;

use jackalope::{
    foreman::{Foreman, ForemanError, SendJackReport},
    task::{
        adapters::memory::{InMemoryRecordStore, InMemoryVendor},
        domain::{TaskStatus, VendorName, VendorTaskId, VendorTaskKey},
        ports::VendorSide,
    },
    workflow::{AdapterRegistry, SyncContext},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Vendor adapter type used by the BDD world.
pub type WorldVendor = InMemoryVendor<DefaultClock>;

/// Scenario world for reconciliation behaviour tests.
pub struct ReconciliationWorld {
    pub tracker: Arc<WorldVendor>,
    pub marketplace: Arc<WorldVendor>,
    pub foreman: Foreman<InMemoryRecordStore, DefaultClock>,
    pub last_report: Option<Result<SendJackReport, ForemanError>>,
}

impl ReconciliationWorld {
    /// Creates a world with empty vendors and no sweep run yet.
    ///
    /// # Panics
    ///
    /// Panics if the fixed vendor names fail validation.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let tracker = Arc::new(InMemoryVendor::new(
            VendorName::new("asana").expect("valid vendor name"),
            VendorSide::Employer,
            Arc::clone(&clock),
        ));
        let marketplace = Arc::new(InMemoryVendor::new(
            VendorName::new("taskrabbit").expect("valid vendor name"),
            VendorSide::Employee,
            Arc::clone(&clock),
        ));
        let registry = AdapterRegistry::new(tracker.clone(), marketplace.clone())
            .expect("vendors sit on their own sides");
        let foreman = Foreman::new(SyncContext::new(
            registry,
            Arc::new(InMemoryRecordStore::new()),
            clock,
        ));

        Self {
            tracker,
            marketplace,
            foreman,
            last_report: None,
        }
    }

    /// Returns the marketplace key linked to tracker job `job`.
    ///
    /// # Errors
    ///
    /// Returns an error if the job is missing or has not been linked yet.
    pub fn marketplace_copy(&self, job: &str) -> Result<VendorTaskKey, eyre::Report> {
        self.tracker
            .stored_task(&VendorTaskId::new(job)?)?
            .and_then(|task| task.reciprocal().cloned())
            .ok_or_else(|| eyre::eyre!("tracker job {job} has no marketplace copy"))
    }

    /// Returns the tracker's current status for `job`.
    ///
    /// # Errors
    ///
    /// Returns an error if the job id is invalid or its record is unreadable.
    pub fn tracker_status(&self, job: &str) -> Result<Option<TaskStatus>, eyre::Report> {
        Ok(self
            .tracker
            .stored_task(&VendorTaskId::new(job)?)?
            .and_then(|task| task.status()))
    }
}

impl Default for ReconciliationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReconciliationWorld {
    ReconciliationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a status word from a feature file.
///
/// # Errors
///
/// Returns an error for words outside the canonical vocabulary.
pub fn status(word: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(word).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

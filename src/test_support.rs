//! Shared fixtures for unit tests.

use crate::task::{
    adapters::memory::{InMemoryRecordStore, InMemoryVendor},
    domain::{
        Comment, CommentId, ReciprocalLink, Task, TaskCategory, TaskStatus, VendorName,
        VendorTaskId, VendorTaskKey,
    },
    ports::{RecordStore, VendorSide},
};
use crate::workflow::{AdapterRegistry, SyncContext};
use chrono::{DateTime, Local, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(seconds: i64) -> Self {
        Self {
            now: Mutex::new(ts(seconds)),
        }
    }

    pub fn set(&self, seconds: i64) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = ts(seconds);
    }
}

impl mockable::Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn ts(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).expect("timestamp in range")
}

pub fn vendor(name: &str) -> VendorName {
    VendorName::new(name).expect("valid vendor name")
}

pub fn task_id(id: &str) -> VendorTaskId {
    VendorTaskId::new(id).expect("valid task id")
}

pub fn comment(id: &str, seconds: i64, message: &str) -> Comment {
    Comment::new(CommentId::new(id).expect("valid comment id"), ts(seconds), message)
}

pub fn priced(id: &str, status: TaskStatus) -> Task {
    Task::new(TaskCategory::Priced, task_id(id), "Assemble bookshelf")
        .with_price(80)
        .with_status(status)
}

pub fn registration(id: &str, status: TaskStatus) -> Task {
    Task::new(TaskCategory::Registration, task_id(id), "Volunteer day")
        .with_email("ada@example.com")
        .with_status(status)
}

pub type Vendor = InMemoryVendor<FixedClock>;

/// Two in-memory vendors, a record store, and the context wiring them.
pub struct Harness {
    pub employer: Arc<Vendor>,
    pub employee: Arc<Vendor>,
    pub store: Arc<InMemoryRecordStore>,
    pub clock: Arc<FixedClock>,
    pub ctx: SyncContext<InMemoryRecordStore, FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::at(1_000));
        let employer = Arc::new(InMemoryVendor::new(
            vendor("asana"),
            VendorSide::Employer,
            Arc::clone(&clock),
        ));
        let employee = Arc::new(InMemoryVendor::new(
            vendor("taskrabbit"),
            VendorSide::Employee,
            Arc::clone(&clock),
        ));
        let store = Arc::new(InMemoryRecordStore::new());
        let registry = AdapterRegistry::new(employer.clone(), employee.clone())
            .expect("distinct vendors on their own sides");
        let ctx = SyncContext::new(registry, Arc::clone(&store), Arc::clone(&clock));
        Self {
            employer,
            employee,
            store,
            clock,
            ctx,
        }
    }

    pub fn employer_key(&self, id: &str) -> VendorTaskKey {
        VendorTaskKey::new(task_id(id), vendor("asana"))
    }

    pub fn employee_key(&self, id: &str) -> VendorTaskKey {
        VendorTaskKey::new(task_id(id), vendor("taskrabbit"))
    }

    /// Seeds a linked priced pair and returns the employer task.
    pub async fn linked_pair(&self, employer: TaskStatus, employee: TaskStatus) -> Task {
        let employer_task = priced("e-1", employer).with_reciprocal(self.employee_key("w-1"));
        self.employer.seed_task(&employer_task).expect("seed employer");
        self.employee
            .seed_task(&priced("w-1", employee))
            .expect("seed employee");
        self.store
            .create_link(&ReciprocalLink::new(
                self.employer_key("e-1"),
                self.employee_key("w-1"),
            ))
            .await
            .expect("link pair");
        employer_task
    }

    pub fn employer_status(&self, id: &str) -> Option<TaskStatus> {
        self.employer
            .stored_task(&task_id(id))
            .expect("readable record")
            .and_then(|task| task.status())
    }

    pub fn employee_status(&self, id: &str) -> Option<TaskStatus> {
        self.employee
            .stored_task(&task_id(id))
            .expect("readable record")
            .and_then(|task| task.status())
    }
}

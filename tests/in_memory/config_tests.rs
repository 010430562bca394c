//! Engines wired from TOML configuration.

use super::helpers::{Marketplace, handyman_job, id};
use jackalope::{
    config::SyncConfig,
    foreman::ForemanError,
    task::domain::{Task, TaskCategory, TaskStatus},
};
use rstest::rstest;
use serde_json::json;

const MARKETPLACE_DIALECT: &str = r#"
employer_vendor = "asana"
employee_vendor = "taskrabbit"
max_passes_per_task = 4

[phrases]
registration_confirmation = "Thanks for signing up"

[vocabularies.taskrabbit]
entries = [
    { word = "draft", status = "created" },
    { word = "open", status = "posted" },
    { word = "accepted", status = "assigned" },
    { word = "done", status = "completed" },
    { word = "paid", status = "approved" },
    { word = "lapsed", status = "expired" },
    { word = "withdrawn", status = "canceled" },
]

[fields.taskrabbit]
id = "task_id"
status = "state"
name = "title"
price = "budget"
"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vendor_dialect_round_trips_through_a_drain() {
    let config = SyncConfig::from_toml_str(MARKETPLACE_DIALECT).expect("config parses");
    let marketplace = Marketplace::from_config(&config).expect("engine wires");
    marketplace
        .tracker
        .seed_task(&handyman_job("job-1", TaskStatus::Created))
        .expect("seed job");

    marketplace.foreman.send_jack().await.expect("posting sweep");
    let mirror = marketplace
        .tracker
        .stored_task(&id("job-1"))
        .expect("readable")
        .and_then(|task| task.reciprocal().cloned())
        .expect("linked");
    let copy = marketplace
        .rabbit
        .stored_task(mirror.task_id())
        .expect("readable")
        .expect("copy exists");

    assert_eq!(copy.status(), Some(TaskStatus::Posted));
    assert_eq!(copy.price(), Some(120));
    assert_eq!(copy.name(), "Hang kitchen shelves");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn raw_marketplace_record_is_read_in_its_own_words() {
    let config = SyncConfig::from_toml_str(MARKETPLACE_DIALECT).expect("config parses");
    let marketplace = Marketplace::from_config(&config).expect("engine wires");
    let raw_id = marketplace
        .rabbit
        .seed_raw(json!({
            "task_id": 4_417,
            "title": "Paint the porch",
            "state": "Accepted",
            "budget": "95",
        }))
        .expect("seed raw record");

    let task = marketplace
        .rabbit
        .stored_task(&raw_id)
        .expect("readable")
        .expect("record exists");

    assert_eq!(raw_id.as_str(), "4417");
    assert_eq!(task.category(), TaskCategory::Priced);
    assert_eq!(task.status(), Some(TaskStatus::Assigned));
    assert_eq!(task.price(), Some(95));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_confirmation_comes_from_configuration() {
    let config = SyncConfig::from_toml_str(MARKETPLACE_DIALECT).expect("config parses");
    let marketplace = Marketplace::from_config(&config).expect("engine wires");
    marketplace
        .tracker
        .seed_task(
            &Task::new(
                TaskCategory::Registration,
                id("reg-1"),
                "Book club",
            )
            .with_email("reader@example.org")
            .with_status(TaskStatus::Posted),
        )
        .expect("seed registration");

    marketplace.foreman.send_jack().await.expect("sweep succeeds");

    let thread = marketplace.tracker.comments_of(&id("reg-1"));
    assert_eq!(
        thread.first().map(|item| item.message().to_owned()),
        Some("Thanks for signing up".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_pass_limit_bounds_each_drain() {
    let mut config = SyncConfig::from_toml_str(MARKETPLACE_DIALECT).expect("config parses");
    config.max_passes_per_task = 1;
    let marketplace = Marketplace::from_config(&config).expect("engine wires");
    marketplace
        .tracker
        .seed_task(&handyman_job("job-1", TaskStatus::Created))
        .expect("seed job");

    let report = marketplace.foreman.send_jack().await.expect("sweep runs");

    let failure = report.failed.first().expect("drain stopped");
    assert!(matches!(
        failure.error,
        ForemanError::PassLimitExceeded { limit: 1, .. }
    ));
}

#[rstest]
fn same_vendor_on_both_sides_is_rejected() {
    let result = SyncConfig::from_toml_str(
        r#"
        employer_vendor = "asana"
        employee_vendor = "Asana"
        "#,
    );

    assert!(result.is_err());
    assert!(matches!(
        result.map_err(ForemanError::from),
        Err(ForemanError::Config(_))
    ));
}

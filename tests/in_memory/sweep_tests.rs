//! Batch sweeps over the employer vendor.

use super::helpers::{Marketplace, handyman_job, id, marketplace, note};
use jackalope::task::{
    adapters::memory::VendorCall,
    domain::{Task, TaskCategory, TaskStatus},
};
use rstest::rstest;

fn forwarded(calls: Vec<VendorCall>) -> Vec<String> {
    calls
        .into_iter()
        .filter_map(|call| match call {
            VendorCall::AddComment(_, message) => Some(message),
            _ => None,
        })
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn job_travels_the_whole_lifecycle(marketplace: Marketplace) {
    let job = id("job-1");
    marketplace
        .tracker
        .seed_task(&handyman_job("job-1", TaskStatus::Created))
        .expect("seed job");

    let posting = marketplace.foreman.send_jack().await.expect("posting sweep");
    assert!(posting.is_clean());
    let mirror = marketplace
        .tracker
        .stored_task(&job)
        .expect("readable")
        .and_then(|task| task.reciprocal().cloned())
        .expect("tracker records its marketplace copy");
    assert_eq!(mirror.vendor().as_str(), "taskrabbit");
    assert_eq!(marketplace.tracker_status(&job), Some(TaskStatus::Posted));
    assert_eq!(
        marketplace.rabbit_status(mirror.task_id()),
        Some(TaskStatus::Posted)
    );

    marketplace.clock.set(2_000);
    marketplace
        .rabbit
        .set_status(mirror.task_id(), TaskStatus::Assigned)
        .expect("tasker accepts");
    marketplace
        .tracker
        .seed_comment(&job, note("n-1", 1_500, "Spare key is under the mat"))
        .expect("seed note");
    marketplace.foreman.send_jack().await.expect("assignment sweep");
    assert_eq!(marketplace.tracker_status(&job), Some(TaskStatus::Assigned));
    assert_eq!(
        forwarded(marketplace.rabbit.mutations()),
        vec!["Spare key is under the mat".to_owned()]
    );

    marketplace
        .rabbit
        .set_status(mirror.task_id(), TaskStatus::Completed)
        .expect("tasker finishes");
    marketplace.foreman.send_jack().await.expect("completion sweep");
    assert_eq!(marketplace.tracker_status(&job), Some(TaskStatus::Completed));

    marketplace
        .tracker
        .set_status(&job, TaskStatus::Approved)
        .expect("requester approves");
    marketplace.foreman.send_jack().await.expect("approval sweep");
    assert_eq!(
        marketplace.rabbit_status(mirror.task_id()),
        Some(TaskStatus::Approved)
    );

    marketplace.tracker.clear_calls();
    marketplace.rabbit.clear_calls();
    let settled = marketplace.foreman.send_jack().await.expect("idle sweep");
    assert!(settled.is_clean());
    assert!(marketplace.tracker.mutations().is_empty());
    assert!(marketplace.rabbit.mutations().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_forwarded_once(marketplace: Marketplace) {
    let job = id("job-2");
    marketplace
        .tracker
        .seed_task(&handyman_job("job-2", TaskStatus::Created))
        .expect("seed job");
    marketplace.foreman.send_jack().await.expect("posting sweep");
    let mirror = marketplace
        .tracker
        .stored_task(&job)
        .expect("readable")
        .and_then(|task| task.reciprocal().cloned())
        .expect("linked");
    marketplace
        .rabbit
        .set_status(mirror.task_id(), TaskStatus::Assigned)
        .expect("tasker accepts");
    marketplace.clock.set(3_000);
    marketplace
        .tracker
        .seed_comment(&job, note("n-1", 2_000, "Parking is on the left"))
        .expect("seed note");

    marketplace.foreman.send_jack().await.expect("first sweep");
    marketplace.foreman.send_jack().await.expect("second sweep");

    assert_eq!(
        forwarded(marketplace.rabbit.mutations()),
        vec!["Parking is on the left".to_owned()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn incomplete_job_is_asked_for_its_price(marketplace: Marketplace) {
    let draft = id("job-3");
    marketplace
        .tracker
        .seed_task(&Task::new(TaskCategory::Priced, draft.clone(), "Fix the fence"))
        .expect("seed draft");

    let report = marketplace.foreman.send_jack().await.expect("sweep succeeds");

    assert_eq!(report.skipped, vec![draft.clone()]);
    let thread = marketplace.tracker.comments_of(&draft);
    let request = thread.first().expect("fields requested");
    assert!(request.message().contains("price"));
    assert!(marketplace.rabbit.calls().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registrations_never_reach_the_marketplace(marketplace: Marketplace) {
    let signup = id("reg-1");
    marketplace
        .tracker
        .seed_task(
            &Task::new(TaskCategory::Registration, signup.clone(), "Park clean-up")
                .with_email("volunteer@example.org")
                .with_status(TaskStatus::Posted),
        )
        .expect("seed registration");

    let report = marketplace.foreman.send_jack().await.expect("sweep succeeds");

    assert!(report.is_clean());
    assert_eq!(marketplace.tracker_status(&signup), Some(TaskStatus::Completed));
    assert_eq!(
        marketplace
            .tracker
            .comments_of(&signup)
            .first()
            .map(|item| item.message().to_owned()),
        Some("You're registered!".to_owned())
    );
    assert!(marketplace.rabbit.calls().is_empty());
    assert_eq!(marketplace.store.link_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancellation_and_expiry_close_the_pair(marketplace: Marketplace) {
    for job in ["job-4", "job-5"] {
        marketplace
            .tracker
            .seed_task(&handyman_job(job, TaskStatus::Created))
            .expect("seed job");
    }
    marketplace.foreman.send_jack().await.expect("posting sweep");
    let mirror_of = |job: &str| {
        marketplace
            .tracker
            .stored_task(&id(job))
            .expect("readable")
            .and_then(|task| task.reciprocal().cloned())
            .expect("linked")
    };
    let cancelled = mirror_of("job-4");
    let lapsed = mirror_of("job-5");

    marketplace
        .tracker
        .set_status(&id("job-4"), TaskStatus::Canceled)
        .expect("requester cancels");
    marketplace
        .rabbit
        .set_status(lapsed.task_id(), TaskStatus::Expired)
        .expect("marketplace expires");
    let report = marketplace.foreman.send_jack().await.expect("closing sweep");

    assert!(report.is_clean());
    assert_eq!(
        marketplace.rabbit_status(cancelled.task_id()),
        Some(TaskStatus::Canceled)
    );
    assert_eq!(marketplace.tracker_status(&id("job-5")), Some(TaskStatus::Expired));
}

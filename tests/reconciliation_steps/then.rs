//! Then steps for reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, status};
use jackalope::{
    foreman::SendJackReport,
    task::{adapters::memory::VendorCall, domain::VendorTaskId},
};
use rstest_bdd_macros::then;

fn report(world: &ReconciliationWorld) -> Result<&SendJackReport, eyre::Report> {
    match world.last_report.as_ref() {
        Some(Ok(report)) => Ok(report),
        Some(Err(err)) => Err(eyre::eyre!("sweep failed outright: {err}")),
        None => Err(eyre::eyre!("no sweep has run")),
    }
}

#[then(r#"the tracker job "{job}" has status "{state}""#)]
fn tracker_job_has_status(
    world: &ReconciliationWorld,
    job: String,
    state: String,
) -> Result<(), eyre::Report> {
    let expected = status(&state)?;
    let actual = world.tracker_status(&job)?;
    if actual != Some(expected) {
        return Err(eyre::eyre!("expected tracker {job} {expected}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the marketplace copy of "{job}" has status "{state}""#)]
fn marketplace_copy_has_status(
    world: &ReconciliationWorld,
    job: String,
    state: String,
) -> Result<(), eyre::Report> {
    let expected = status(&state)?;
    let copy = world.marketplace_copy(&job)?;
    let actual = world
        .marketplace
        .stored_task(copy.task_id())?
        .and_then(|task| task.status());
    if actual != Some(expected) {
        return Err(eyre::eyre!("expected copy of {job} {expected}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the marketplace copy of "{job}" received {count:usize} comment "{message}""#)]
fn marketplace_copy_received(
    world: &ReconciliationWorld,
    job: String,
    count: usize,
    message: String,
) -> Result<(), eyre::Report> {
    let copy = world.marketplace_copy(&job)?;
    let received = world
        .marketplace
        .comments_of(copy.task_id())
        .iter()
        .filter(|comment| comment.message() == message)
        .count();
    if received != count {
        return Err(eyre::eyre!("expected {count} copies of {message:?}, found {received}"));
    }
    Ok(())
}

#[then(r#"job "{job}" is skipped"#)]
fn job_is_skipped(world: &ReconciliationWorld, job: String) -> Result<(), eyre::Report> {
    let id = VendorTaskId::new(job)?;
    if !report(world)?.skipped.contains(&id) {
        return Err(eyre::eyre!("{id} was not skipped"));
    }
    Ok(())
}

#[then(r#"the tracker job "{job}" has a comment mentioning "{needle}""#)]
fn tracker_comment_mentions(
    world: &ReconciliationWorld,
    job: String,
    needle: String,
) -> Result<(), eyre::Report> {
    let thread = world.tracker.comments_of(&VendorTaskId::new(job)?);
    if !thread.iter().any(|comment| comment.message().contains(&needle)) {
        return Err(eyre::eyre!("no comment mentions {needle:?}"));
    }
    Ok(())
}

#[then("the marketplace was not contacted")]
fn marketplace_not_contacted(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    let calls: Vec<VendorCall> = world.marketplace.calls();
    if !calls.is_empty() {
        return Err(eyre::eyre!("marketplace saw {calls:?}"));
    }
    Ok(())
}

#[then(r#"the sweep reports a failure for "{job}""#)]
fn sweep_reports_failure(world: &ReconciliationWorld, job: String) -> Result<(), eyre::Report> {
    let failed = report(world)?
        .failed
        .iter()
        .any(|failure| failure.task.task_id().as_str() == job);
    if !failed {
        return Err(eyre::eyre!("expected {job} among failed drains"));
    }
    Ok(())
}

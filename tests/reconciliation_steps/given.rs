//! Given steps for reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async, status};
use chrono::Utc;
use eyre::WrapErr;
use jackalope::task::domain::{Comment, CommentId, Task, TaskCategory, VendorTaskId};
use rstest_bdd_macros::given;

#[given(r#"a priced job "{job}" in the tracker with status "{state}""#)]
fn priced_job(
    world: &mut ReconciliationWorld,
    job: String,
    state: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(TaskCategory::Priced, VendorTaskId::new(job)?, "Assemble wardrobe")
        .with_price(75)
        .with_status(status(&state)?);
    world.tracker.seed_task(&task)?;
    Ok(())
}

#[given(r#"an unpriced job "{job}" in the tracker"#)]
fn unpriced_job(world: &mut ReconciliationWorld, job: String) -> Result<(), eyre::Report> {
    world.tracker.seed_task(&Task::new(
        TaskCategory::Priced,
        VendorTaskId::new(job)?,
        "Replace door handle",
    ))?;
    Ok(())
}

#[given(r#"a registration "{job}" in the tracker with status "{state}""#)]
fn registration(
    world: &mut ReconciliationWorld,
    job: String,
    state: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(TaskCategory::Registration, VendorTaskId::new(job)?, "Repair café")
        .with_email("helper@example.org")
        .with_status(status(&state)?);
    world.tracker.seed_task(&task)?;
    Ok(())
}

#[given("the foreman has sent jack")]
fn foreman_has_sent_jack(world: &mut ReconciliationWorld) -> Result<(), eyre::Report> {
    let report = run_async(world.foreman.send_jack()).wrap_err("setup sweep")?;
    if !report.is_clean() {
        return Err(eyre::eyre!("setup sweep failed: {:?}", report.failed));
    }
    Ok(())
}

#[given(r#"the marketplace copy of "{job}" is moved to "{state}""#)]
fn marketplace_copy_moved(
    world: &mut ReconciliationWorld,
    job: String,
    state: String,
) -> Result<(), eyre::Report> {
    let copy = world.marketplace_copy(&job)?;
    world.marketplace.set_status(copy.task_id(), status(&state)?)?;
    Ok(())
}

#[given(r#"the tracker job "{job}" is moved to "{state}""#)]
fn tracker_job_moved(
    world: &mut ReconciliationWorld,
    job: String,
    state: String,
) -> Result<(), eyre::Report> {
    world
        .tracker
        .set_status(&VendorTaskId::new(job)?, status(&state)?)?;
    Ok(())
}

#[given(r#"the requester comments "{message}" on "{job}""#)]
fn requester_comments(
    world: &mut ReconciliationWorld,
    message: String,
    job: String,
) -> Result<(), eyre::Report> {
    let id = CommentId::new(format!("{job}-note"))?;
    world
        .tracker
        .seed_comment(&VendorTaskId::new(job)?, Comment::new(id, Utc::now(), message))?;
    Ok(())
}

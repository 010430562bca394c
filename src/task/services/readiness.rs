//! Readiness gate applied to freshly read vendor tasks.

use std::collections::BTreeMap;

use crate::task::{
    domain::{Task, TaskStatus, VendorTaskId},
    ports::{VendorAdapter, VendorResult},
};

/// Decides whether a freshly read task may be reconciled this pass.
///
/// - spec-ready without a status: moved to `Created`, pushed, and returned;
/// - spec-ready with a status: returned unchanged;
/// - incomplete without a status: moved to `Created`, pushed, the vendor is
///   asked for the missing fields, and `None` is returned;
/// - incomplete with a status: `None`. Its fields were requested when it was
///   first seen and the status is never lowered.
///
/// A vendor that cannot request fields is logged and skipped.
///
/// # Errors
///
/// Returns [`crate::task::ports::VendorError`] when a vendor write fails.
pub async fn ready_spec<A>(adapter: &A, task: Task) -> VendorResult<Option<Task>>
where
    A: VendorAdapter + ?Sized,
{
    let ready = task.is_spec_ready();
    match (ready, task.status()) {
        (true, Some(_)) => Ok(Some(task)),
        (true, None) => {
            let mut created = task;
            created.advance_to(TaskStatus::Created)?;
            let confirmed = adapter.update_task(&created).await?;
            tracing::info!(
                vendor = %adapter.name(),
                task = %confirmed.id(),
                "task spec ready; marked created"
            );
            Ok(Some(confirmed))
        }
        (false, Some(status)) => {
            tracing::debug!(
                vendor = %adapter.name(),
                task = %task.id(),
                %status,
                "task spec still incomplete; skipping"
            );
            Ok(None)
        }
        (false, None) => {
            let missing = task.missing_fields();
            let mut created = task;
            created.advance_to(TaskStatus::Created)?;
            let confirmed = adapter.update_task(&created).await?;
            match adapter.request_required_fields(&confirmed, &missing).await {
                Ok(()) => {
                    tracing::info!(
                        vendor = %adapter.name(),
                        task = %confirmed.id(),
                        missing = ?missing,
                        "requested missing task fields"
                    );
                }
                Err(error) if error.is_unsupported() => {
                    tracing::warn!(%error, task = %confirmed.id(), "cannot request missing fields");
                }
                Err(error) => return Err(error),
            }
            Ok(None)
        }
    }
}

/// Applies [`ready_spec`] to every record of a vendor listing.
///
/// A record that could not be parsed, or whose readiness write failed, is
/// logged and listed as `None`; the other records are still gated.
pub async fn ready_listing<A>(
    adapter: &A,
    parsed: Vec<(VendorTaskId, VendorResult<Task>)>,
) -> BTreeMap<VendorTaskId, Option<Task>>
where
    A: VendorAdapter + ?Sized,
{
    let mut listing = BTreeMap::new();
    for (id, record) in parsed {
        let gated = match record {
            Ok(task) => ready_spec(adapter, task).await,
            Err(error) => Err(error),
        };
        let ready = gated.unwrap_or_else(|error| {
            tracing::error!(%error, vendor = %adapter.name(), task = %id, "task left out of listing");
            None
        });
        listing.insert(id, ready);
    }
    listing
}

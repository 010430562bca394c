//! Drive loop and inbound triggers.
//!
//! The [`Foreman`] reads requester-side tasks and repeats workflow passes on
//! each until a pass reports no change. It also serves the webhook entry
//! points for single-task reconciliation and comment ferrying.

mod error;
mod guard;
mod service;

pub use error::{ForemanError, ForemanResult};
pub use guard::{InFlightClaim, InFlightRegistry};
pub use service::{DrainFailure, DrainOutcome, Foreman, SendJackReport};

#[cfg(test)]
mod tests;

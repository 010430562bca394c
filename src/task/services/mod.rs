//! Services shared by vendor adapters and the reconciliation engine.

mod readiness;

pub use readiness::{ready_listing, ready_spec};

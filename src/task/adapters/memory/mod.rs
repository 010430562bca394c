//! In-memory adapter implementations for tests and local runs.
//!
//! These adapters are thread-safe and need no network or database.

mod record_store;
mod vendor;

pub use record_store::InMemoryRecordStore;
pub use vendor::{InMemoryVendor, VendorCall};

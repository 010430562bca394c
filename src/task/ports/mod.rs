//! Port contracts for task synchronization.
//!
//! Ports define infrastructure-agnostic interfaces used by the workflow
//! engine: one adapter per vendor, one record store, and the field mapping
//! each vendor adapter parses its raw records with.

pub mod field_mapper;
pub mod record_store;
pub mod vendor;

pub use field_mapper::{FieldMapper, FieldMappingError};
pub use record_store::{RecordStore, RecordStoreError, RecordStoreResult};
pub use vendor::{VendorAdapter, VendorError, VendorResult, VendorSide};

#[cfg(test)]
pub use record_store::MockRecordStore;
#[cfg(test)]
pub use vendor::MockVendorAdapter;

//! Adapter implementations for the task ports.

pub mod json_mapper;
pub mod memory;

pub use json_mapper::{JsonFieldMapper, VendorFieldNames};

//! Canonical task model shared by every vendor.
//!
//! Vendors describe tasks in their own field names and status words; this
//! module defines the canonical form the engine reasons about and the ports
//! each vendor adapter implements:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Shared services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

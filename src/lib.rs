//! Jackalope: task synchronization between a requester service and a labour
//! marketplace.
//!
//! Tasks created on the employer side (a project tracker) are mirrored onto
//! the employee side (a marketplace), and status changes and comments are
//! ferried between the two until both agree.
//!
//! # Architecture
//!
//! Jackalope follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task, status, and comment types
//! - **Ports**: Abstract vendor and record-store interfaces
//! - **Adapters**: Concrete implementations of ports (in-memory, JSON mapping)
//!
//! # Modules
//!
//! - [`task`]: Canonical task model, ports, and adapters
//! - [`workflow`]: One reconciliation pass over a task pair
//! - [`foreman`]: Drive loop and inbound triggers
//! - [`config`]: Process configuration
//! - [`phrase`]: Canned messages posted on vendor tasks

pub mod config;
pub mod foreman;
pub mod phrase;
pub mod task;
pub mod workflow;

#[cfg(test)]
mod test_support;

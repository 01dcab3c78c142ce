//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL video store through Diesel
//! - **memory**: process-local video store for development and tests
//! - **imagekit**: upload credential signing
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

pub mod imagekit;
pub mod memory;
pub mod persistence;

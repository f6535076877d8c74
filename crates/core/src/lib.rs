//! Domain logic for the CDC Dreams administration client.
//!
//! Entity and draft types, client-side pagination, lookup-label
//! resolution, event classification and reporting arithmetic. This crate
//! performs no I/O; all collections are passed in by the caller.

pub mod error;
pub mod event_status;
pub mod lookup;
pub mod models;
pub mod pagination;
pub mod reporting;
pub mod types;

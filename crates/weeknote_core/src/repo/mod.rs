//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the week-scoped note storage contract.
//! - Keep ordering and ownership bookkeeping out of the service layer.
//!
//! # Invariants
//! - Repository writes must enforce `Note::validate()` before storing.
//! - Missing ids are reported as `None`/`false`, never as errors.

pub mod note_repo;

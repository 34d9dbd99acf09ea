//! Flutter bridge crate for weeknote.
//!
//! Thin FRB-facing wrappers; all business rules live in `weeknote_core`.

pub mod api;

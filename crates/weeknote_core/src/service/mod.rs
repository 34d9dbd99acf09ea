//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into week-scoped note use-cases.
//! - Hold view-controller state so UI/FFI layers stay thin.

pub mod capture_session;
pub mod note_service;

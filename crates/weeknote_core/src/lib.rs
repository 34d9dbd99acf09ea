//! Core domain logic for weeknote.
//! This crate is the single source of truth for note ordering and week
//! bucketing invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::week::{
    clamp_to_supported, max_supported_date, min_supported_date, parse_date, shift_weeks,
    week_key_of, week_range_label, WeekKey, WeekKeyError,
};
pub use repo::note_repo::{InMemoryNoteRepository, NoteRepository, RepoError, RepoResult};
pub use service::capture_session::{
    CaptureSession, DragGesture, NoteView, SessionSnapshot, ViewMode,
};
pub use service::note_service::{
    summarize_notes, NoteService, NoteServiceError, NoteServiceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

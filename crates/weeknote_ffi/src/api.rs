//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the capture session to Dart via FRB as sync calls.
//! - Flatten core types into string-based envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutating call returns the fresh snapshot so the UI re-renders
//!   from one source of truth.
//! - Calls are serialized through one process-wide session lock.

use chrono::{Local, NaiveDate};
use log::warn;
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;
use weeknote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_date,
    ping as ping_inner, CaptureSession, NoteId, SessionSnapshot, ViewMode,
};

static SESSION: OnceLock<Mutex<CaptureSession>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One rendered note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiNote {
    pub id: String,
    pub content: String,
    pub display_date: String,
    pub display_time: String,
}

/// Render state of the capture screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiSnapshot {
    /// `YYYY-MM-DD` of the selected week's Sunday.
    pub week_key: String,
    pub range_label: String,
    /// `capture` or `summary`.
    pub mode: String,
    pub notes: Vec<FfiNote>,
    pub note_count: u32,
    pub summary: String,
    pub dragging_id: Option<String>,
}

/// Result envelope for session calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    /// Whether input was accepted. No-ops still report `ok = true`.
    pub ok: bool,
    /// Whether the call changed stored notes or view state.
    pub changed: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    pub snapshot: FfiSnapshot,
}

/// Returns the current render snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn session_snapshot() -> FfiSnapshot {
    with_session(|session| to_ffi_snapshot(session.snapshot()))
}

/// Commits draft text (Ctrl/Cmd+Enter or blur) into the selected week.
#[flutter_rust_bridge::frb(sync)]
pub fn session_commit_draft(content: String) -> SessionResponse {
    with_session(|session| commit_draft_on(session, content))
}

/// Deletes one note of the selected week.
#[flutter_rust_bridge::frb(sync)]
pub fn session_delete_note(note_id: String) -> SessionResponse {
    with_session(|session| delete_on(session, &note_id))
}

/// Picks up a note for drag-and-drop.
#[flutter_rust_bridge::frb(sync)]
pub fn session_begin_drag(note_id: String) -> SessionResponse {
    with_session(|session| begin_drag_on(session, &note_id))
}

/// Records the hovered slot; does not reorder.
#[flutter_rust_bridge::frb(sync)]
pub fn session_drag_over(index: u32) -> SessionResponse {
    with_session(|session| {
        session.drag_over(index as usize);
        respond(session, true, session.drag().is_some(), "Hover recorded.")
    })
}

/// Commits the drag gesture as a single reorder.
#[flutter_rust_bridge::frb(sync)]
pub fn session_drop() -> SessionResponse {
    with_session(|session| {
        let moved = session.drop_drag();
        let message = if moved { "Note moved." } else { "Order unchanged." };
        respond(session, true, moved, message)
    })
}

/// Abandons the drag gesture.
#[flutter_rust_bridge::frb(sync)]
pub fn session_cancel_drag() -> SessionResponse {
    with_session(|session| {
        let had_drag = session.drag().is_some();
        session.cancel_drag();
        respond(session, true, had_drag, "Drag cancelled.")
    })
}

/// Moves the selected week by `weeks` (negative goes back).
#[flutter_rust_bridge::frb(sync)]
pub fn session_navigate(weeks: i32) -> SessionResponse {
    with_session(|session| {
        session.navigate(i64::from(weeks));
        respond(session, true, weeks != 0, "Week selected.")
    })
}

/// Jumps to the week containing `date` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn session_go_to(date: String) -> SessionResponse {
    with_session(|session| go_to_on(session, &date))
}

/// Switches between `capture` and `summary`.
#[flutter_rust_bridge::frb(sync)]
pub fn session_set_mode(mode: String) -> SessionResponse {
    with_session(|session| set_mode_on(session, &mode))
}

/// Summary text for the external clipboard sink.
#[flutter_rust_bridge::frb(sync)]
pub fn session_clipboard_text() -> String {
    with_session(|session| session.clipboard_text())
}

fn with_session<T>(f: impl FnOnce(&mut CaptureSession) -> T) -> T {
    let lock = SESSION.get_or_init(|| Mutex::new(CaptureSession::new(today())));
    // A panic mid-call cannot leave the store half-mutated; keep serving.
    let mut session = lock.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut session)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn commit_draft_on(session: &mut CaptureSession, content: String) -> SessionResponse {
    match session.commit_draft(content) {
        Ok(Some(_)) => respond(session, true, true, "Note created."),
        Ok(None) => respond(session, true, false, "Empty draft ignored."),
        Err(err) => respond(
            session,
            false,
            false,
            format!("session_commit_draft failed: {err}"),
        ),
    }
}

fn delete_on(session: &mut CaptureSession, note_id: &str) -> SessionResponse {
    let Some(id) = parse_note_id(note_id) else {
        return invalid_id(session, "session_delete_note", note_id);
    };
    let removed = session.delete(id);
    let message = if removed { "Note deleted." } else { "Note not found." };
    respond(session, true, removed, message)
}

fn begin_drag_on(session: &mut CaptureSession, note_id: &str) -> SessionResponse {
    let Some(id) = parse_note_id(note_id) else {
        return invalid_id(session, "session_begin_drag", note_id);
    };
    let started = session.begin_drag(id);
    let message = if started { "Drag started." } else { "Note not found." };
    respond(session, true, started, message)
}

fn go_to_on(session: &mut CaptureSession, date: &str) -> SessionResponse {
    match parse_date(date) {
        Ok(date) => {
            session.go_to(date);
            respond(session, true, true, "Week selected.")
        }
        Err(err) => respond(session, false, false, format!("session_go_to failed: {err}")),
    }
}

fn set_mode_on(session: &mut CaptureSession, mode: &str) -> SessionResponse {
    let Some(mode) = parse_mode(mode) else {
        return respond(
            session,
            false,
            false,
            format!("session_set_mode failed: unknown mode `{mode}`"),
        );
    };
    let changed = session.mode() != mode;
    session.set_mode(mode);
    respond(session, true, changed, "Mode set.")
}

fn parse_note_id(raw: &str) -> Option<NoteId> {
    Uuid::parse_str(raw.trim()).ok()
}

fn parse_mode(raw: &str) -> Option<ViewMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "capture" => Some(ViewMode::Capture),
        "summary" => Some(ViewMode::Summary),
        _ => None,
    }
}

fn mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Capture => "capture",
        ViewMode::Summary => "summary",
    }
}

fn invalid_id(session: &CaptureSession, call: &str, raw: &str) -> SessionResponse {
    respond(
        session,
        false,
        false,
        format!("{call} failed: invalid note id `{raw}`"),
    )
}

fn respond(
    session: &CaptureSession,
    ok: bool,
    changed: bool,
    message: impl Into<String>,
) -> SessionResponse {
    let message = message.into();
    if !ok {
        warn!("event=ffi_call module=ffi status=rejected message={message}");
    }
    SessionResponse {
        ok,
        changed,
        message,
        snapshot: to_ffi_snapshot(session.snapshot()),
    }
}

fn to_ffi_snapshot(snapshot: SessionSnapshot) -> FfiSnapshot {
    FfiSnapshot {
        week_key: snapshot.week_key.to_string(),
        range_label: snapshot.range_label,
        mode: mode_label(snapshot.mode).to_string(),
        notes: snapshot
            .notes
            .into_iter()
            .map(|note| FfiNote {
                id: note.id.to_string(),
                content: note.content,
                display_date: note.display_date,
                display_time: note.display_time,
            })
            .collect(),
        note_count: u32::try_from(snapshot.note_count).unwrap_or(u32::MAX),
        summary: snapshot.summary,
        dragging_id: snapshot.dragging.map(|id| id.to_string()),
    }
}

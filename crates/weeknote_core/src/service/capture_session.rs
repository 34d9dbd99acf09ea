//! Capture session: view-controller state over the note service.
//!
//! # Responsibility
//! - Own the selected reference date, the capture/summary mode flag and the
//!   in-flight drag gesture.
//! - Translate user actions into note service calls for the selected week.
//! - Produce render-ready snapshots for front ends.
//!
//! # Invariants
//! - `ViewMode` has exactly two states; both are reachable from each other.
//! - Dragging never mutates the store; only `drop_drag` commits one reorder.
//! - Week navigation and mode switches cancel any active drag.

use crate::model::note::{Note, NoteId};
use crate::model::week::{
    clamp_to_supported, shift_weeks, week_key_of, week_range_label, WeekKey,
};
use crate::repo::note_repo::{InMemoryNoteRepository, NoteRepository};
use crate::service::note_service::{NoteService, NoteServiceResult};
use chrono::{Local, NaiveDate, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Which screen the front end should render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Draft entry plus the reorderable note list.
    #[default]
    Capture,
    /// Numbered weekly summary ready for copying.
    Summary,
}

/// Drag gesture in progress: the picked-up note and where it hovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    pub source: NoteId,
    pub hover_index: Option<usize>,
}

/// One note as the list renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteView {
    pub id: NoteId,
    pub content: String,
    pub display_date: String,
    pub display_time: String,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub week_key: WeekKey,
    pub range_label: String,
    pub mode: ViewMode,
    pub notes: Vec<NoteView>,
    pub note_count: usize,
    pub summary: String,
    /// Note currently picked up by a drag gesture.
    pub dragging: Option<NoteId>,
}

/// View-controller state for the single capture screen.
#[derive(Debug)]
pub struct CaptureSession<R: NoteRepository = InMemoryNoteRepository> {
    service: NoteService<R>,
    reference_date: NaiveDate,
    mode: ViewMode,
    drag: Option<DragGesture>,
}

impl CaptureSession<InMemoryNoteRepository> {
    /// Starts an empty in-memory session on `reference_date`.
    pub fn new(reference_date: NaiveDate) -> Self {
        Self::with_service(
            NoteService::new(InMemoryNoteRepository::new()),
            reference_date,
        )
    }

    /// Starts an empty in-memory session on today's local date.
    pub fn starting_today() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl<R: NoteRepository> CaptureSession<R> {
    /// Wraps an existing service; starts in capture mode with no drag.
    ///
    /// `reference_date` is clamped into years 1..=9999.
    pub fn with_service(service: NoteService<R>, reference_date: NaiveDate) -> Self {
        Self {
            service,
            reference_date: clamp_to_supported(reference_date),
            mode: ViewMode::Capture,
            drag: None,
        }
    }

    pub fn service(&self) -> &NoteService<R> {
        &self.service
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Week containing the reference date.
    pub fn week_key(&self) -> WeekKey {
        week_key_of(self.reference_date)
    }

    pub fn range_label(&self) -> String {
        week_range_label(self.reference_date)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn drag(&self) -> Option<DragGesture> {
        self.drag
    }

    /// Switches to the summary screen.
    pub fn open_summary(&mut self) {
        self.set_mode(ViewMode::Summary);
    }

    /// Returns to the capture screen.
    pub fn close_summary(&mut self) {
        self.set_mode(ViewMode::Capture);
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.cancel_drag();
            debug!("event=mode_change module=capture_session status=ok mode={mode:?}");
        }
        self.mode = mode;
    }

    /// Commits draft text as a new note in the selected week.
    ///
    /// Whitespace-only drafts are ignored and return `Ok(None)`.
    pub fn commit_draft(&mut self, text: impl Into<String>) -> NoteServiceResult<Option<Note>> {
        let week = self.week_key();
        self.service.create_note(week, text)
    }

    /// Deletes a note from the selected week.
    pub fn delete(&mut self, id: NoteId) -> bool {
        if self.drag.is_some_and(|drag| drag.source == id) {
            self.drag = None;
        }
        let week = self.week_key();
        self.service.delete_note(week, id)
    }

    /// Moves a note within the selected week in one step.
    pub fn reorder(&mut self, id: NoteId, target_index: usize) -> bool {
        let week = self.week_key();
        self.service.reorder_note(week, id, target_index)
    }

    /// Picks up a note of the selected week; returns `false` if absent.
    pub fn begin_drag(&mut self, id: NoteId) -> bool {
        let week = self.week_key();
        let present = self
            .service
            .find_note(id)
            .is_some_and(|(owner, _)| owner == week);
        self.drag = present.then_some(DragGesture {
            source: id,
            hover_index: None,
        });
        present
    }

    /// Records the list slot under the pointer; the store is untouched.
    pub fn drag_over(&mut self, index: usize) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover_index = Some(index);
        }
    }

    /// Ends the gesture, committing one reorder to the last hovered slot.
    ///
    /// Returns whether the order changed.
    pub fn drop_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(DragGesture {
                source,
                hover_index: Some(index),
            }) => self.reorder(source, index),
            _ => false,
        }
    }

    /// Ends the gesture without changing the order.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn previous_week(&mut self) {
        self.navigate(-1);
    }

    pub fn next_week(&mut self) {
        self.navigate(1);
    }

    /// Shifts the reference date by `weeks` weeks.
    pub fn navigate(&mut self, weeks: i64) {
        self.go_to(shift_weeks(self.reference_date, weeks));
    }

    /// Jumps to the week containing `date`, clamped into years 1..=9999.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.cancel_drag();
        self.reference_date = clamp_to_supported(date);
        debug!(
            "event=week_select module=capture_session status=ok week={}",
            self.week_key()
        );
    }

    /// Notes of the selected week in display order.
    pub fn notes(&self) -> Vec<Note> {
        self.service.list_notes(self.week_key())
    }

    /// Summary text of the selected week.
    pub fn summary(&self) -> String {
        self.service.summarize(self.week_key())
    }

    /// Text handed verbatim to an external clipboard sink.
    pub fn clipboard_text(&self) -> String {
        self.summary()
    }

    /// Render snapshot with display strings in local time.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_in(&Local)
    }

    /// Render snapshot with display strings in `tz`.
    pub fn snapshot_in<Tz: TimeZone>(&self, tz: &Tz) -> SessionSnapshot
    where
        Tz::Offset: Display,
    {
        let week_key = self.week_key();
        let notes = self
            .service
            .list_notes(week_key)
            .into_iter()
            .map(|note| NoteView {
                display_date: note.display_date_in(tz),
                display_time: note.display_time_in(tz),
                id: note.id,
                content: note.content,
            })
            .collect::<Vec<_>>();

        SessionSnapshot {
            week_key,
            range_label: self.range_label(),
            mode: self.mode,
            note_count: notes.len(),
            summary: self.summary(),
            dragging: self.drag.map(|drag| drag.source),
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CaptureSession, ViewMode};
    use chrono::NaiveDate;

    fn session() -> CaptureSession {
        CaptureSession::new(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
    }

    #[test]
    fn starts_in_capture_mode_without_drag() {
        let session = session();
        assert_eq!(session.mode(), ViewMode::Capture);
        assert!(session.drag().is_none());
        assert_eq!(session.week_key().to_string(), "2024-03-10");
    }

    #[test]
    fn begin_drag_requires_note_in_selected_week() {
        let mut session = session();
        let note = session.commit_draft("idea").unwrap().unwrap();
        session.next_week();
        assert!(!session.begin_drag(note.id));
        assert!(session.drag().is_none());

        session.previous_week();
        assert!(session.begin_drag(note.id));
    }

    #[test]
    fn drop_without_hover_changes_nothing() {
        let mut session = session();
        let first = session.commit_draft("a").unwrap().unwrap();
        session.commit_draft("b").unwrap();

        assert!(session.begin_drag(first.id));
        assert!(!session.drop_drag());
        assert!(session.drag().is_none());
        assert_eq!(session.notes()[0].id, first.id);
    }

    #[test]
    fn deleting_dragged_note_clears_gesture() {
        let mut session = session();
        let note = session.commit_draft("a").unwrap().unwrap();
        session.begin_drag(note.id);
        assert!(session.delete(note.id));
        assert!(session.drag().is_none());
    }
}

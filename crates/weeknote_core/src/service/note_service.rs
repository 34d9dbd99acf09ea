//! Note use-case service.
//!
//! # Responsibility
//! - Provide week-scoped create/delete/reorder/list APIs.
//! - Derive the numbered weekly summary text.
//!
//! # Invariants
//! - Whitespace-only content never creates a note.
//! - Missing ids and no-op moves are silent; they return `false`.
//! - Log lines carry ids and week keys only, never note content.

use crate::model::note::{Note, NoteId};
use crate::model::week::WeekKey;
use crate::repo::note_repo::{NoteRepository, RepoError};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SUMMARY_SEPARATOR: &str = "\n\n";

/// Service error for note use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteServiceError {
    /// Storage rejected the write.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over repository implementations.
#[derive(Debug, Default)]
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates a note stamped with the current time.
    ///
    /// Returns `Ok(None)` when `content` is empty after trimming.
    pub fn create_note(
        &mut self,
        week: WeekKey,
        content: impl Into<String>,
    ) -> NoteServiceResult<Option<Note>> {
        self.create_note_at(week, content, Utc::now())
    }

    /// Creates a note with a caller-provided creation time.
    ///
    /// The content is stored verbatim; trimming only decides emptiness.
    pub fn create_note_at(
        &mut self,
        week: WeekKey,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> NoteServiceResult<Option<Note>> {
        let content = content.into();
        if content.trim().is_empty() {
            debug!("event=note_create module=note_service status=skipped reason=empty week={week}");
            return Ok(None);
        }

        let note = Note::new(content, created_at);
        self.repo.append_note(week, note.clone())?;
        info!(
            "event=note_create module=note_service status=ok week={week} id={} chars={}",
            note.id,
            note.content.chars().count()
        );
        Ok(Some(note))
    }

    /// Deletes one note from `week`; returns whether it was removed.
    pub fn delete_note(&mut self, week: WeekKey, id: NoteId) -> bool {
        let removed = self.repo.remove_note(week, id).is_some();
        if removed {
            info!("event=note_delete module=note_service status=ok week={week} id={id}");
        } else {
            debug!(
                "event=note_delete module=note_service status=skipped reason=missing week={week} id={id}"
            );
        }
        removed
    }

    /// Moves one note to `target_index` within `week`.
    ///
    /// `target_index` is clamped to the last position. Returns `false` when
    /// the id is not in `week` or already sits at the target.
    pub fn reorder_note(&mut self, week: WeekKey, moving_id: NoteId, target_index: usize) -> bool {
        let moved = self.repo.move_note(week, moving_id, target_index);
        if moved {
            info!(
                "event=note_reorder module=note_service status=ok week={week} id={moving_id} target={target_index}"
            );
        } else {
            debug!(
                "event=note_reorder module=note_service status=skipped week={week} id={moving_id} target={target_index}"
            );
        }
        moved
    }

    /// Notes of `week` in display order; empty for unknown weeks.
    pub fn list_notes(&self, week: WeekKey) -> Vec<Note> {
        self.repo.notes(week).to_vec()
    }

    /// Number of notes collected in `week`.
    pub fn note_count(&self, week: WeekKey) -> usize {
        self.repo.notes(week).len()
    }

    /// Finds a note and the week that owns it.
    pub fn find_note(&self, id: NoteId) -> Option<(WeekKey, Note)> {
        self.repo
            .locate_note(id)
            .map(|(week, note)| (week, note.clone()))
    }

    /// Weeks that currently hold notes, ascending.
    pub fn weeks(&self) -> Vec<WeekKey> {
        self.repo.weeks()
    }

    /// Builds `"1. first\n\n2. second"` for `week`; empty when no notes.
    pub fn summarize(&self, week: WeekKey) -> String {
        summarize_notes(self.repo.notes(week))
    }
}

/// Numbers notes in display order and joins them with blank lines.
pub fn summarize_notes(notes: &[Note]) -> String {
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| format!("{}. {}", index + 1, note.content))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::summarize_notes;
    use crate::model::note::Note;
    use chrono::Utc;

    #[test]
    fn summary_of_no_notes_is_empty() {
        assert_eq!(summarize_notes(&[]), "");
    }

    #[test]
    fn summary_keeps_multiline_content_verbatim() {
        let notes = vec![Note::new("line one\nline two", Utc::now())];
        assert_eq!(summarize_notes(&notes), "1. line one\nline two");
    }
}

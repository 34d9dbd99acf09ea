//! Week-keyed note repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the `WeekKey -> ordered notes` mapping.
//! - Enforce store-wide id uniqueness and single-week ownership.
//! - Apply positional moves atomically (one call per committed drop).
//!
//! # Invariants
//! - A `NoteId` appears at most once across all weeks.
//! - Weeks with no notes are not retained in the mapping.
//! - Operations addressing a week never touch other weeks.

use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::model::week::WeekKey;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Note failed record validation.
    Validation(NoteValidationError),
    /// Id is already stored, possibly under another week.
    DuplicateId { id: NoteId, existing_week: WeekKey },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId { id, existing_week } => {
                write!(f, "note id {id} already stored in week {existing_week}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId { .. } => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Storage contract used by `NoteService`.
pub trait NoteRepository {
    /// Appends `note` to the end of `week`.
    fn append_note(&mut self, week: WeekKey, note: Note) -> RepoResult<()>;
    /// Removes the note from `week`; `None` when `week` does not hold it.
    fn remove_note(&mut self, week: WeekKey, id: NoteId) -> Option<Note>;
    /// Moves the note to `target_index` (clamped) inside `week`.
    ///
    /// Returns `true` only when the order actually changed.
    fn move_note(&mut self, week: WeekKey, id: NoteId, target_index: usize) -> bool;
    /// Notes of `week` in display order.
    fn notes(&self, week: WeekKey) -> &[Note];
    /// Finds a note anywhere in the store.
    fn locate_note(&self, id: NoteId) -> Option<(WeekKey, &Note)>;
    /// Weeks currently holding at least one note, ascending.
    fn weeks(&self) -> Vec<WeekKey>;
}

/// Process-memory repository; contents live as long as the value.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNoteRepository {
    weeks: BTreeMap<WeekKey, Vec<Note>>,
    owners: HashMap<NoteId, WeekKey>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, week: WeekKey, id: NoteId) -> Option<usize> {
        if self.owners.get(&id) != Some(&week) {
            return None;
        }
        self.weeks
            .get(&week)
            .and_then(|notes| notes.iter().position(|note| note.id == id))
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn append_note(&mut self, week: WeekKey, note: Note) -> RepoResult<()> {
        note.validate()?;
        if let Some(existing_week) = self.owners.get(&note.id) {
            return Err(RepoError::DuplicateId {
                id: note.id,
                existing_week: *existing_week,
            });
        }

        self.owners.insert(note.id, week);
        self.weeks.entry(week).or_default().push(note);
        Ok(())
    }

    fn remove_note(&mut self, week: WeekKey, id: NoteId) -> Option<Note> {
        let index = self.position(week, id)?;
        let notes = self.weeks.get_mut(&week)?;
        let removed = notes.remove(index);
        if notes.is_empty() {
            self.weeks.remove(&week);
        }
        self.owners.remove(&id);
        Some(removed)
    }

    fn move_note(&mut self, week: WeekKey, id: NoteId, target_index: usize) -> bool {
        let Some(from) = self.position(week, id) else {
            return false;
        };
        let Some(notes) = self.weeks.get_mut(&week) else {
            return false;
        };

        let to = target_index.min(notes.len() - 1);
        if from == to {
            return false;
        }
        let moving = notes.remove(from);
        notes.insert(to, moving);
        true
    }

    fn notes(&self, week: WeekKey) -> &[Note] {
        self.weeks.get(&week).map(Vec::as_slice).unwrap_or(&[])
    }

    fn locate_note(&self, id: NoteId) -> Option<(WeekKey, &Note)> {
        let week = *self.owners.get(&id)?;
        self.notes(week)
            .iter()
            .find(|note| note.id == id)
            .map(|note| (week, note))
    }

    fn weeks(&self) -> Vec<WeekKey> {
        self.weeks.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryNoteRepository, NoteRepository, RepoError};
    use crate::model::note::Note;
    use crate::model::week::{week_key_of, WeekKey};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn week(y: i32, m: u32, d: u32) -> WeekKey {
        week_key_of(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn note(content: &str) -> Note {
        Note::new(content, Utc.with_ymd_and_hms(2024, 3, 12, 8, 0, 0).unwrap())
    }

    fn contents(repo: &InMemoryNoteRepository, week: WeekKey) -> Vec<String> {
        repo.notes(week).iter().map(|n| n.content.clone()).collect()
    }

    #[test]
    fn append_rejects_id_stored_in_other_week() {
        let mut repo = InMemoryNoteRepository::new();
        let first = note("a");
        repo.append_note(week(2024, 3, 12), first.clone()).unwrap();

        let err = repo
            .append_note(week(2024, 3, 19), first.clone())
            .unwrap_err();
        assert_eq!(
            err,
            RepoError::DuplicateId {
                id: first.id,
                existing_week: week(2024, 3, 12),
            }
        );
        assert!(repo.notes(week(2024, 3, 19)).is_empty());
    }

    #[test]
    fn remove_with_wrong_week_is_noop() {
        let mut repo = InMemoryNoteRepository::new();
        let kept = note("kept");
        repo.append_note(week(2024, 3, 12), kept.clone()).unwrap();

        assert!(repo.remove_note(week(2024, 3, 19), kept.id).is_none());
        assert_eq!(contents(&repo, week(2024, 3, 12)), vec!["kept"]);
    }

    #[test]
    fn emptied_week_is_dropped_from_mapping() {
        let mut repo = InMemoryNoteRepository::new();
        let only = note("only");
        repo.append_note(week(2024, 3, 12), only.clone()).unwrap();
        assert_eq!(repo.weeks(), vec![week(2024, 3, 12)]);

        repo.remove_note(week(2024, 3, 12), only.id).unwrap();
        assert!(repo.weeks().is_empty());
        assert!(repo.locate_note(only.id).is_none());
    }

    #[test]
    fn move_places_note_at_target_and_clamps() {
        let mut repo = InMemoryNoteRepository::new();
        let w = week(2024, 3, 12);
        let a = note("a");
        repo.append_note(w, a.clone()).unwrap();
        repo.append_note(w, note("b")).unwrap();
        repo.append_note(w, note("c")).unwrap();

        assert!(repo.move_note(w, a.id, 1));
        assert_eq!(contents(&repo, w), vec!["b", "a", "c"]);

        assert!(repo.move_note(w, a.id, 99));
        assert_eq!(contents(&repo, w), vec!["b", "c", "a"]);

        assert!(!repo.move_note(w, a.id, 2));
        assert_eq!(contents(&repo, w), vec!["b", "c", "a"]);
    }
}

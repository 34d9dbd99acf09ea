//! Note domain model.
//!
//! # Responsibility
//! - Define the captured note record owned by one week.
//! - Derive display-only date/time strings from the stored timestamp.
//!
//! # Invariants
//! - `id` is never nil and never reused for another note.
//! - `content` is immutable after creation; reordering is the only mutation.
//! - Display strings are derived on demand and never stored.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a captured note.
///
/// Time-ordered (UUID v7) so ids sort roughly by creation, but callers must
/// only rely on global uniqueness.
pub type NoteId = Uuid;

/// Validation errors for note construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Nil UUID is reserved and cannot identify a note.
    NilId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
        }
    }
}

impl Error for NoteValidationError {}

/// One captured idea inside a week bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Raw text as committed by the user (not trimmed).
    pub content: String,
    /// Creation instant in UTC.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note with a freshly generated id.
    pub fn new(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: content.into(),
            created_at,
        }
    }

    /// Creates a note with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `NoteValidationError::NilId` for the nil UUID.
    pub fn with_id(
        id: NoteId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id,
            content: content.into(),
            created_at,
        };
        note.validate()?;
        Ok(note)
    }

    /// Checks the record-level invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        Ok(())
    }

    /// Short month/day label in local time, e.g. `Mar 12`.
    pub fn display_date(&self) -> String {
        self.display_date_in(&Local)
    }

    /// 12-hour clock label in local time, e.g. `09:05 AM`.
    pub fn display_time(&self) -> String {
        self.display_time_in(&Local)
    }

    /// Short month/day label in the given time zone.
    pub fn display_date_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: Display,
    {
        self.created_at.with_timezone(tz).format("%b %-d").to_string()
    }

    /// 12-hour clock label in the given time zone.
    pub fn display_time_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: Display,
    {
        self.created_at
            .with_timezone(tz)
            .format("%I:%M %p")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteValidationError};
    use chrono::{FixedOffset, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn new_generates_non_nil_unique_ids() {
        let at = Utc.with_ymd_and_hms(2024, 3, 12, 9, 5, 0).unwrap();
        let first = Note::new("a", at);
        let second = Note::new("a", at);
        assert!(!first.id.is_nil());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn with_id_rejects_nil() {
        let at = Utc.with_ymd_and_hms(2024, 3, 12, 9, 5, 0).unwrap();
        let err = Note::with_id(Uuid::nil(), "x", at).unwrap_err();
        assert_eq!(err, NoteValidationError::NilId);
    }

    #[test]
    fn display_strings_follow_the_given_zone() {
        let at = Utc.with_ymd_and_hms(2024, 3, 12, 23, 30, 0).unwrap();
        let note = Note::new("late", at);
        assert_eq!(note.display_date_in(&Utc), "Mar 12");
        assert_eq!(note.display_time_in(&Utc), "11:30 PM");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(note.display_date_in(&plus_two), "Mar 13");
        assert_eq!(note.display_time_in(&plus_two), "01:30 AM");
    }
}

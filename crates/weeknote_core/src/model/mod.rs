//! Domain model for week-scoped note capture.
//!
//! # Responsibility
//! - Define the note record and the calendar-week key that buckets notes.
//! - Keep date math pure so navigation never mutates stored notes.
//!
//! # Invariants
//! - Every note is identified by a stable, non-nil `NoteId`.
//! - A `WeekKey` always names the Sunday that opens its week.

pub mod note;
pub mod week;

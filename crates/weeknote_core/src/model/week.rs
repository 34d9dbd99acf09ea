//! Calendar week bucketing.
//!
//! # Responsibility
//! - Map any date to the Sunday that starts its week (`WeekKey`).
//! - Format the Sunday..Saturday range label shown above the note list.
//! - Shift reference dates by whole weeks for navigation.
//!
//! # Invariants
//! - A `WeekKey` always wraps a Sunday.
//! - All dates in one Sunday..Saturday span share a single `WeekKey`.
//! - Reference dates are confined to years 1..=9999; week math clamps into
//!   that window and never overflows.
//! - Every function here is pure; none touches stored notes.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const WEEK_KEY_FORMAT: &str = "%Y-%m-%d";
const DAYS_PER_WEEK: i64 = 7;
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Errors when parsing week keys or reference dates from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekKeyError {
    /// Input is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Input is a valid date but not the Sunday starting a week.
    NotSunday(NaiveDate),
    /// Input is a valid date outside years 1..=9999.
    OutOfRange(NaiveDate),
}

impl Display for WeekKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::NotSunday(date) => write!(f, "week key must be a Sunday, got {date}"),
            Self::OutOfRange(date) => write!(
                f,
                "date {date} is outside the supported years {MIN_YEAR}..={MAX_YEAR}"
            ),
        }
    }
}

impl Error for WeekKeyError {}

/// Canonical identifier of a Sunday..Saturday week.
///
/// Serialized as the `YYYY-MM-DD` string of the week's Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// Sunday that starts this week.
    pub fn start(self) -> NaiveDate {
        self.0
    }

    /// Saturday that ends this week.
    pub fn end(self) -> NaiveDate {
        self.0.checked_add_days(Days::new(6)).unwrap_or(self.0)
    }

    /// Returns whether `date` falls inside this week.
    pub fn contains(self, date: NaiveDate) -> bool {
        week_key_of(date) == self
    }
}

impl Display for WeekKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(WEEK_KEY_FORMAT))
    }
}

impl FromStr for WeekKey {
    type Err = WeekKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let date = parse_calendar_date(value)?;
        if date.weekday() != Weekday::Sun {
            return Err(WeekKeyError::NotSunday(date));
        }
        // The first supported week opens on the Sunday before 0001-01-01.
        if date < week_key_of(min_supported_date()).0 || date > max_supported_date() {
            return Err(WeekKeyError::OutOfRange(date));
        }
        Ok(Self(date))
    }
}

impl TryFrom<String> for WeekKey {
    type Error = WeekKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(value: WeekKey) -> Self {
        value.to_string()
    }
}

/// First reference date accepted by parsing and navigation.
pub fn min_supported_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Last reference date accepted by parsing and navigation.
pub fn max_supported_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Pins `date` into the supported window.
pub fn clamp_to_supported(date: NaiveDate) -> NaiveDate {
    date.clamp(min_supported_date(), max_supported_date())
}

/// Computes the week key (Sunday on or before `date`).
///
/// Dates outside the supported window are clamped first.
pub fn week_key_of(date: NaiveDate) -> WeekKey {
    let date = clamp_to_supported(date);
    let offset = u64::from(date.weekday().num_days_from_sunday());
    WeekKey(date.checked_sub_days(Days::new(offset)).unwrap_or(date))
}

/// Formats `"<Mon> <Day> - <Mon> <Day>"` for the week containing `date`.
///
/// Month names are English abbreviations and days are not zero padded, so a
/// week spanning a month boundary reads like `Mar 31 - Apr 6`.
pub fn week_range_label(date: NaiveDate) -> String {
    let week = week_key_of(date);
    format!(
        "{} - {}",
        week.start().format("%b %-d"),
        week.end().format("%b %-d")
    )
}

/// Moves a reference date by `weeks` whole weeks (negative goes back).
///
/// Saturates at the first and last supported dates.
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    let date = clamp_to_supported(date);
    let days = weeks.saturating_mul(DAYS_PER_WEEK);
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude).unwrap_or_else(max_supported_date)
    } else {
        date.checked_sub_days(magnitude).unwrap_or_else(min_supported_date)
    };
    clamp_to_supported(shifted)
}

/// Parses a `YYYY-MM-DD` reference date within years 1..=9999.
pub fn parse_date(value: &str) -> Result<NaiveDate, WeekKeyError> {
    let date = parse_calendar_date(value)?;
    if date != clamp_to_supported(date) {
        return Err(WeekKeyError::OutOfRange(date));
    }
    Ok(date)
}

fn parse_calendar_date(value: &str) -> Result<NaiveDate, WeekKeyError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, WEEK_KEY_FORMAT)
        .map_err(|_| WeekKeyError::InvalidDate(trimmed.to_string()))
}

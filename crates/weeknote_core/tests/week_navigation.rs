use chrono::NaiveDate;
use weeknote_core::{
    max_supported_date, min_supported_date, parse_date, shift_weeks, week_key_of,
    week_range_label, WeekKey, WeekKeyError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn sunday_and_following_saturday_share_a_key() {
    let sunday = week_key_of(date(2024, 3, 10));
    let saturday = week_key_of(date(2024, 3, 16));
    let next_sunday = week_key_of(date(2024, 3, 17));

    assert_eq!(sunday, saturday);
    assert_ne!(sunday, next_sunday);
}

#[test]
fn every_day_of_a_week_maps_to_its_sunday() {
    let expected = week_key_of(date(2024, 3, 10));
    for day in 10..=16 {
        assert_eq!(week_key_of(date(2024, 3, day)), expected, "day {day}");
    }
    assert_eq!(expected.start(), date(2024, 3, 10));
}

#[test]
fn range_label_for_midweek_date() {
    assert_eq!(week_range_label(date(2024, 3, 12)), "Mar 10 - Mar 16");
}

#[test]
fn range_label_spans_month_and_year_boundaries() {
    assert_eq!(week_range_label(date(2024, 4, 2)), "Mar 31 - Apr 6");
    assert_eq!(week_range_label(date(2025, 1, 1)), "Dec 29 - Jan 4");
}

#[test]
fn week_key_crosses_year_boundary() {
    let key = week_key_of(date(2025, 1, 4));
    assert_eq!(key.to_string(), "2024-12-29");
}

#[test]
fn navigating_by_one_week_shifts_key_and_label() {
    let start = date(2024, 3, 12);
    let next = shift_weeks(start, 1);
    let previous = shift_weeks(start, -1);

    assert_eq!(week_range_label(next), "Mar 17 - Mar 23");
    assert_eq!(week_range_label(previous), "Mar 3 - Mar 9");
    assert_eq!(week_key_of(shift_weeks(next, -1)), week_key_of(start));
}

#[test]
fn week_key_round_trips_through_text() {
    let key = week_key_of(date(2024, 3, 12));
    let parsed: WeekKey = key.to_string().parse().unwrap();
    assert_eq!(parsed, key);

    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"2024-03-10\"");
    assert!(serde_json::from_str::<WeekKey>("\"2024-03-12\"").is_err());
}

#[test]
fn parse_date_rejects_malformed_input() {
    assert!(parse_date("2024-02-30").is_err());
    assert!(parse_date("03/12/2024").is_err());
    assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
}

#[test]
fn calendar_extremes_key_and_label_without_overflow() {
    assert_eq!(week_key_of(NaiveDate::MAX).to_string(), "9999-12-26");
    assert_eq!(week_range_label(NaiveDate::MAX), "Dec 26 - Jan 1");
    assert_eq!(week_key_of(NaiveDate::MIN).to_string(), "0000-12-31");
    assert_eq!(week_range_label(NaiveDate::MIN), "Dec 31 - Jan 6");
}

#[test]
fn navigation_stops_at_last_supported_week() {
    let last = max_supported_date();
    let beyond = shift_weeks(last, 1);
    assert_eq!(beyond, last);
    assert_eq!(week_range_label(beyond), "Dec 26 - Jan 1");
    assert_eq!(shift_weeks(min_supported_date(), -3), min_supported_date());
}

#[test]
fn parse_date_rejects_dates_beyond_supported_years() {
    assert_eq!(
        parse_date("+262142-12-30").unwrap_err(),
        WeekKeyError::OutOfRange(NaiveDate::from_ymd_opt(262_142, 12, 30).unwrap())
    );
    assert!(matches!(
        parse_date("-262143-01-01"),
        Err(WeekKeyError::OutOfRange(_))
    ));
}

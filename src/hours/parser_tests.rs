use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use super::parser::{parse, TimeWindow};
use super::is_open_at;

fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

// 2024-01-01 is a Monday; the first week of 2024 pins every weekday.
fn monday(hour: u32, minute: u32) -> NaiveDateTime {
    at(2024, 1, 1, hour, minute)
}

fn tuesday(hour: u32, minute: u32) -> NaiveDateTime {
    at(2024, 1, 2, hour, minute)
}

fn saturday(hour: u32, minute: u32) -> NaiveDateTime {
    at(2024, 1, 6, hour, minute)
}

fn sunday(hour: u32, minute: u32) -> NaiveDateTime {
    at(2024, 1, 7, hour, minute)
}

#[test]
fn parses_day_ranged_window() {
    let windows = parse("週一-五 09:00-18:00");
    assert_eq!(
        windows,
        vec![TimeWindow {
            start_day: 1,
            end_day: 5,
            start_minute: 540,
            end_minute: 1080,
        }]
    );
}

#[test]
fn parses_day_ranged_window_without_space() {
    assert_eq!(parse("週一-五09:00-18:00"), parse("週一-五 09:00-18:00"));
}

#[test]
fn parses_bare_time_range_as_all_week() {
    let windows = parse("08:00-22:00");
    assert_eq!(
        windows,
        vec![TimeWindow {
            start_day: 0,
            end_day: 6,
            start_minute: 480,
            end_minute: 1320,
        }]
    );
}

#[test]
fn sunday_maps_to_zero() {
    let windows = parse("週日-日 10:00-12:00");
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start_day, 0);
    assert_eq!(windows[0].end_day, 0);
}

#[test]
fn multiple_entries_split_on_semicolon() {
    let windows = parse("週一-五 09:00-18:00;週六-六 10:00-14:00");
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[1].start_day, 6);
    assert_eq!(windows[1].end_day, 6);
}

#[test]
fn reversed_day_range_is_dropped() {
    assert!(parse("週五-一 09:00-18:00").is_empty());
    assert!(parse("週五-一09:00-18:00").is_empty());
}

#[test]
fn weekend_range_never_matches_any_day() {
    // 六=6, 日=0 reads naturally as "weekends" but is a reversed range; it
    // contains no day rather than spilling into the whole week.
    let hours = "週六-日 10:00-16:00";
    assert!(parse(hours).is_empty());
    assert!(!is_open_at(hours, tuesday(10, 0)));
    assert!(!is_open_at(hours, saturday(12, 0)));
    assert!(!is_open_at(hours, sunday(12, 0)));
}

#[test]
fn malformed_tokens_are_skipped() {
    assert!(parse("").is_empty());
    assert!(parse("   ").is_empty());
    assert!(parse("休息").is_empty());
    assert!(parse("9:00-18:00").is_empty()); // single-digit hour
    assert!(parse("09:00~18:00").is_empty());
    // One good token survives among garbage.
    assert_eq!(parse("不定休 週一-五 09:00-18:00").len(), 1);
}

#[test]
fn bad_day_unit_is_dropped_whole() {
    // The day fragment claims its time fragment; a bad day character drops
    // the unit without leaking the time part as an all-week window.
    assert!(parse("週八-五 09:00-18:00").is_empty());
    // A day fragment with no time range after it is skipped alone.
    assert_eq!(parse("週一-五 公休 09:00-18:00").len(), 1);
}

#[test]
fn inverted_minute_span_is_dropped() {
    assert!(parse("18:00-09:00").is_empty());
    assert!(parse("09:00-09:00").is_empty());
}

#[test]
fn out_of_range_digits_parse_but_never_match() {
    let windows = parse("25:00-26:00");
    assert_eq!(windows.len(), 1);
    // 25:00 is minute 1500; no real instant reaches it.
    for minute in [0u16, 720, 1439] {
        assert!(!windows[0].contains(3, minute));
    }
}

#[test]
fn open_weekday_window() {
    let hours = "週一-五 09:00-18:00";
    assert!(is_open_at(hours, tuesday(10, 0)));
    assert!(!is_open_at(hours, tuesday(19, 0)));
    assert!(!is_open_at(hours, saturday(10, 0)));
}

#[test]
fn upper_bound_is_half_open() {
    let hours = "08:00-22:00";
    assert!(is_open_at(hours, monday(21, 59)));
    assert!(!is_open_at(hours, monday(22, 0)));
    assert!(is_open_at(hours, sunday(8, 0)));
    assert!(!is_open_at(hours, sunday(7, 59)));
}

#[test]
fn any_window_is_sufficient() {
    let hours = "週一-五 09:00-12:00;週一-五 13:00-18:00";
    assert!(is_open_at(hours, monday(10, 0)));
    assert!(!is_open_at(hours, monday(12, 30)));
    assert!(is_open_at(hours, monday(14, 0)));
}

#[test]
fn empty_and_garbage_evaluate_closed() {
    assert!(!is_open_at("", monday(10, 0)));
    assert!(!is_open_at("公休", monday(10, 0)));
}

proptest! {
    #[test]
    fn parse_is_total_and_windows_hold_invariants(raw in ".{0,64}") {
        for window in parse(&raw) {
            prop_assert!(window.start_day <= window.end_day);
            prop_assert!(window.end_day <= 6);
            prop_assert!(window.start_minute < window.end_minute);
        }
    }

    #[test]
    fn parse_is_deterministic(raw in ".{0,64}") {
        prop_assert_eq!(parse(&raw), parse(&raw));
    }

    #[test]
    fn evaluation_never_panics(raw in ".{0,64}", hour in 0u32..24, minute in 0u32..60) {
        let _ = is_open_at(&raw, monday(hour, minute));
    }
}

// src/tests/predicate_tests.rs

//! tests for `predicate.rs`

#![allow(non_snake_case)]

use ::test_case::test_case;

use crate::common::{
    LevelOpt,
    LEVEL_MAX,
};
use crate::data::datetime::{
    ymdhms,
    ymdhmsl,
    DateTimeL,
    DateTimeLOpt,
};
use crate::data::predicate::{
    PredicateError,
    QueryPredicate,
};
use crate::data::record::RawRecord;
use crate::tests::common::{
    raw_record,
    FO_0,
};

/// a fixed stand-in for "now"; 2020-06-06 06:30:30 +00:00
fn local_now() -> DateTimeL {
    ymdhms(&FO_0, 2020, 6, 6, 6, 30, 30)
}

/// helper to resolve with the fixed "now"
fn resolve(
    start_str: &str,
    end_str: &str,
    level_str: &str,
) -> Result<QueryPredicate, PredicateError> {
    QueryPredicate::resolve(start_str, end_str, level_str, &FO_0, &local_now())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// window resolution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_resolve_explicit_window() {
    let predicate = resolve("2020-01-01 10:00:00", "2020-01-01 11:00:00", "").unwrap();
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 1, 1, 10, 0, 0));
    assert_eq!(*predicate.dt_end(), ymdhms(&FO_0, 2020, 1, 1, 11, 0, 0));
    assert_eq!(predicate.max_level(), 0);
}

/// no end time means "now"
#[test]
fn test_resolve_end_defaults_to_now() {
    let predicate = resolve("2020-06-06 05:00:00", "", "").unwrap();
    assert_eq!(*predicate.dt_end(), local_now());
}

/// no start time means end time minus one hour
#[test]
fn test_resolve_start_defaults_to_end_minus_one_hour() {
    let predicate = resolve("", "2020-01-01 11:00:00", "").unwrap();
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 1, 1, 10, 0, 0));
}

#[test]
fn test_resolve_nothing_given() {
    let predicate = resolve("", "", "").unwrap();
    assert_eq!(*predicate.dt_end(), local_now());
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 6, 6, 5, 30, 30));
    assert_eq!(predicate.max_level(), 0);
}

#[test_case("2020-01-01 11:00:00", "2020-01-01 10:00:00"; "end before start")]
#[test_case("2020-01-01 10:00:00", "2020-01-01 10:00:00"; "end equals start")]
fn test_resolve_end_not_after_start(
    start_str: &str,
    end_str: &str,
) {
    assert_eq!(
        resolve(start_str, end_str, ""),
        Err(PredicateError::EndNotAfterStart),
    );
}

#[test_case("NONSENSE", ""; "bad start")]
#[test_case("", "NONSENSE"; "bad end")]
#[test_case("2020-99-01", ""; "impossible date")]
fn test_resolve_unknown_time_format(
    start_str: &str,
    end_str: &str,
) {
    assert_eq!(
        resolve(start_str, end_str, ""),
        Err(PredicateError::UnknownTimeFormat),
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// relative offsets
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// an offset without `"@"` anchors on "now"
#[test]
fn test_resolve_offset_from_now() {
    let predicate = resolve("-30m", "", "").unwrap();
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 6, 6, 6, 0, 30));
    assert_eq!(*predicate.dt_end(), local_now());
}

/// sub-second parts of "now" are dropped before the offset applies
#[test]
fn test_resolve_offset_from_now_truncates_subseconds() {
    let now: DateTimeL = ymdhmsl(&FO_0, 2020, 6, 6, 6, 30, 30, 450);
    let predicate = QueryPredicate::resolve("-30m", "", "", &FO_0, &now).unwrap();
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 6, 6, 6, 0, 30));
}

/// a `"@"` start offsets from the given end
#[test]
fn test_resolve_start_relative_to_end() {
    let predicate = resolve("@-2h", "2020-01-01 12:00:00", "").unwrap();
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 1, 1, 10, 0, 0));
    assert_eq!(*predicate.dt_end(), ymdhms(&FO_0, 2020, 1, 1, 12, 0, 0));
}

/// a `"@"` end offsets from the given start
#[test]
fn test_resolve_end_relative_to_start() {
    let predicate = resolve("2020-01-01 10:00:00", "@+30m", "").unwrap();
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 1, 1, 10, 0, 0));
    assert_eq!(*predicate.dt_end(), ymdhms(&FO_0, 2020, 1, 1, 10, 30, 0));
}

/// both bounds deferring to each other cannot resolve
#[test]
fn test_resolve_both_relative() {
    assert_eq!(
        resolve("@-1h", "@+1h", ""),
        Err(PredicateError::UnknownTimeFormat),
    );
}

/// a `"@"` end cannot defer to a start that was not given
#[test]
fn test_resolve_end_relative_to_unset_start() {
    assert_eq!(
        resolve("", "@+1h", ""),
        Err(PredicateError::UnknownTimeFormat),
    );
}

/// a `"@"` start with no end defers to the default end, "now"
#[test]
fn test_resolve_start_relative_to_default_end() {
    let predicate = resolve("@-1h", "", "").unwrap();
    assert_eq!(*predicate.dt_end(), local_now());
    assert_eq!(*predicate.dt_start(), ymdhms(&FO_0, 2020, 6, 6, 5, 30, 30));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// severity ceiling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("", 0; "empty means unfiltered")]
#[test_case("0", 0; "zero")]
#[test_case("3", 3; "three")]
#[test_case("5", LEVEL_MAX; "highest")]
fn test_resolve_level(
    level_str: &str,
    level_expect: u8,
) {
    let predicate = resolve("", "", level_str).unwrap();
    assert_eq!(predicate.max_level(), level_expect);
}

#[test_case("6"; "too high")]
#[test_case("-1"; "negative")]
#[test_case("abc"; "word")]
#[test_case("1.5"; "fractional")]
fn test_resolve_level_rejects(level_str: &str) {
    assert_eq!(resolve("", "", level_str), Err(PredicateError::UnknownLevel));
}

#[test]
fn test_unknown_level_display_names_allowed_values() {
    let text = format!("{}", PredicateError::UnknownLevel);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Error: unknown information level"));
    assert_eq!(
        lines.next(),
        Some(
            "The following values are allowed: up to Critical - 1, up to Error - 2, \
             up to Warning - 3, up to Informational - 4, up to Verbose - 5"
        ),
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// matching
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// the window excludes the start instant and includes the end instant
#[test_case(ymdhms(&FO_0, 2020, 1, 1, 10, 0, 0), false; "at start excluded")]
#[test_case(ymdhmsl(&FO_0, 2020, 1, 1, 10, 0, 0, 1), true; "just after start")]
#[test_case(ymdhms(&FO_0, 2020, 1, 1, 10, 30, 0), true; "inside")]
#[test_case(ymdhms(&FO_0, 2020, 1, 1, 11, 0, 0), true; "at end included")]
#[test_case(ymdhmsl(&FO_0, 2020, 1, 1, 11, 0, 0, 1), false; "just after end")]
#[test_case(ymdhms(&FO_0, 2020, 1, 1, 9, 59, 59), false; "before start")]
fn test_matches_window(
    dt: DateTimeL,
    matches_expect: bool,
) {
    let predicate = resolve("2020-01-01 10:00:00", "2020-01-01 11:00:00", "").unwrap();
    assert_eq!(predicate.matches_window(&Some(dt)), matches_expect);
}

/// an absent creation time cannot pass the window
#[test]
fn test_matches_window_none() {
    let predicate = resolve("2020-01-01 10:00:00", "2020-01-01 11:00:00", "").unwrap();
    let dt_none: DateTimeLOpt = None;
    assert!(!predicate.matches_window(&dt_none));
}

#[test_case("", Some(5), true; "unfiltered passes verbose")]
#[test_case("", None, true; "unfiltered passes missing level")]
#[test_case("3", Some(1), true; "critical under ceiling")]
#[test_case("3", Some(3), true; "at ceiling")]
#[test_case("3", Some(4), false; "over ceiling")]
#[test_case("3", None, false; "missing level under ceiling")]
fn test_matches_level(
    level_str: &str,
    level: LevelOpt,
    matches_expect: bool,
) {
    let predicate = resolve("", "", level_str).unwrap();
    assert_eq!(predicate.matches_level(level), matches_expect);
}

#[test]
fn test_matches_raw_needs_both() {
    let predicate = resolve("2020-01-01 10:00:00", "2020-01-01 11:00:00", "2").unwrap();
    let inside_low: RawRecord = raw_record(ymdhms(&FO_0, 2020, 1, 1, 10, 30, 0), Some(2));
    let inside_high: RawRecord = raw_record(ymdhms(&FO_0, 2020, 1, 1, 10, 30, 0), Some(4));
    let outside_low: RawRecord = raw_record(ymdhms(&FO_0, 2020, 1, 1, 12, 0, 0), Some(2));
    assert!(predicate.matches_raw(&inside_low));
    assert!(!predicate.matches_raw(&inside_high));
    assert!(!predicate.matches_raw(&outside_low));
}

// src/data/datetime.rs

//! Datetime type aliases used across the crate, and functions to transform
//! user-passed datetime strings to chrono [`DateTime`] instances.
//!
//! A user-passed string is matched against the ordered table
//! [`DT_FILTER_PATTERNS`] of chrono [`strftime`] patterns. A date without a
//! time of day means midnight of that date; a time of day without a date
//! means that time today. A string that matches no pattern may instead be a
//! relative offset like `"-30m"` or `"@+1h"`; see
//! [`duration_from_offset_str`].
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.38/chrono/struct.DateTime.html
//! [`strftime`]: https://docs.rs/chrono/0.4.38/chrono/format/strftime/index.html
//! [`DT_FILTER_PATTERNS`]: self::DT_FILTER_PATTERNS
//! [`duration_from_offset_str`]: self::duration_from_offset_str

#![allow(non_camel_case_types)]

use ::chrono::{
    DateTime,
    Datelike, // adds method `.year()` onto `DateTime`
    Duration,
    FixedOffset,
    NaiveDateTime,
    TimeZone,
    Timelike, // adds method `.with_nanosecond()` onto `DateTime`
};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::de_wrn;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// type aliases
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// String of a chrono [`strftime`] pattern.
///
/// [`strftime`]: https://docs.rs/chrono/0.4.38/chrono/format/strftime/index.html
pub type DateTimePattern_str = str;

/// The localized [`DateTime`] type used across the crate.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.38/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// Pattern a [`DateTimeL`] is rendered with for user-facing output.
pub const DATETIME_DISPLAY_PATTERN: &DateTimePattern_str = "%Y-%m-%d %H:%M:%S";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// acceptable user-passed datetime patterns
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One acceptable user-passed datetime form.
///
/// (strftime pattern, has_timezone, has_time, has_date)
pub type DtFilterPattern<'b> = (&'b DateTimePattern_str, bool, bool, bool);

pub const DT_FILTER_PATTERNS_COUNT: usize = 27;

/// Acceptable forms for user-passed time window bounds.
///
/// An ordered brute-force table; the first matching pattern wins. It covers
/// ISO-like, slashed, dotted-European, and US 12-hour date shapes, in
/// seconds and minutes precision, with optional fractional seconds and
/// optional numeric timezone, plus date-only and time-of-day-only forms.
pub const DT_FILTER_PATTERNS: [DtFilterPattern; DT_FILTER_PATTERNS_COUNT] = [
    // YYYYmmddTHHMMSS
    ("%Y%m%dT%H%M%S", false, true, true),
    // YYYY-mm-dd HH:MM:SS*
    ("%Y-%m-%d %H:%M:%S", false, true, true),
    ("%Y-%m-%d %H:%M:%S.%3f", false, true, true),
    ("%Y-%m-%d %H:%M:%S.%6f", false, true, true),
    ("%Y-%m-%d %H:%M:%S %z", true, true, true),
    ("%Y-%m-%d %H:%M:%S %:z", true, true, true),
    ("%Y-%m-%d %H:%M", false, true, true),
    // YYYY-mm-ddTHH:MM:SS*
    ("%Y-%m-%dT%H:%M:%S", false, true, true),
    ("%Y-%m-%dT%H:%M:%S.%3f", false, true, true),
    ("%Y-%m-%dT%H:%M:%S.%6f", false, true, true),
    ("%Y-%m-%dT%H:%M:%S%z", true, true, true),
    ("%Y-%m-%dT%H:%M:%S%:z", true, true, true),
    // YYYY/mm/dd HH:MM:SS*
    ("%Y/%m/%d %H:%M:%S", false, true, true),
    ("%Y/%m/%d %H:%M:%S.%3f", false, true, true),
    ("%Y/%m/%d %H:%M", false, true, true),
    // dd.mm.YYYY HH:MM:SS
    ("%d.%m.%Y %H:%M:%S", false, true, true),
    ("%d.%m.%Y %H:%M", false, true, true),
    // mm/dd/YYYY hh:MM:SS AM|PM
    ("%m/%d/%Y %I:%M:%S %p", false, true, true),
    ("%m/%d/%Y %I:%M %p", false, true, true),
    ("%m/%d/%Y %H:%M:%S", false, true, true),
    // date only
    ("%Y%m%d", false, false, true),
    ("%Y-%m-%d", false, false, true),
    ("%Y/%m/%d", false, false, true),
    ("%d.%m.%Y", false, false, true),
    ("%m/%d/%Y", false, false, true),
    // time of day only
    ("%H:%M:%S", false, true, false),
    ("%H:%M", false, true, false),
];

/// Value to append in [`datetime_from_filter_str`] when `has_time` is
/// `false`.
const DT_FILTER_APPEND_TIME_VALUE: &str = " T000000";

/// Strftime pattern to append in [`datetime_from_filter_str`] when
/// `has_time` is `false`.
const DT_FILTER_APPEND_TIME_PATTERN: &str = " T%H%M%S";

/// Strftime pattern to prepend in [`datetime_from_filter_str`] when
/// `has_date` is `false`.
const DT_FILTER_APPEND_DATE_PATTERN: &str = "%Y%m%dT";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// relative offset strings
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const CGN_DUR_OFFSET_TYPE: &str = "offset_type";
const CGN_DUR_OFFSET_ADDSUB: &str = "offset_addsub";
const CGN_DUR_OFFSET_SECONDS: &str = "seconds";
const CGN_DUR_OFFSET_MINUTES: &str = "minutes";
const CGN_DUR_OFFSET_HOURS: &str = "hours";
const CGN_DUR_OFFSET_DAYS: &str = "days";
const CGN_DUR_OFFSET_WEEKS: &str = "weeks";

const CGP_DUR_OFFSET_TYPE: &str = concatcp!("(?P<", CGN_DUR_OFFSET_TYPE, r">[@]?)");
const CGP_DUR_OFFSET_ADDSUB: &str = concatcp!("(?P<", CGN_DUR_OFFSET_ADDSUB, r">[+\-])");
const CGP_DUR_OFFSET_SECONDS: &str = concatcp!("(?P<", CGN_DUR_OFFSET_SECONDS, r">[\d]+s)");
const CGP_DUR_OFFSET_MINUTES: &str = concatcp!("(?P<", CGN_DUR_OFFSET_MINUTES, r">[\d]+m)");
const CGP_DUR_OFFSET_HOURS: &str = concatcp!("(?P<", CGN_DUR_OFFSET_HOURS, r">[\d]+h)");
const CGP_DUR_OFFSET_DAYS: &str = concatcp!("(?P<", CGN_DUR_OFFSET_DAYS, r">[\d]+d)");
const CGP_DUR_OFFSET_WEEKS: &str = concatcp!("(?P<", CGN_DUR_OFFSET_WEEKS, r">[\d]+w)");

lazy_static! {
    /// user-passed strings of a duration that is a relative offset,
    /// e.g. `"-1h30m"` or `"@+2d"`
    static ref REGEX_DUR_OFFSET: Regex = {
        defñ!("lazy_static! REGEX_DUR_OFFSET::new()");

        Regex::new(
            concatcp!(
                "^",
                CGP_DUR_OFFSET_TYPE,
                CGP_DUR_OFFSET_ADDSUB, "(",
                CGP_DUR_OFFSET_SECONDS, "|",
                CGP_DUR_OFFSET_MINUTES, "|",
                CGP_DUR_OFFSET_HOURS, "|",
                CGP_DUR_OFFSET_DAYS, "|",
                CGP_DUR_OFFSET_WEEKS,
                ")+$"
            )
        ).unwrap()
    };
}

/// A relative offset string anchors on "now" (program run-time) or on the
/// other bound of the time window.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum DurOffsetType {
    Now,
    Other,
}

/// Duration offset is added or subtracted from a `DateTime`?
#[derive(Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
enum DurOffsetAddSub {
    Add = 1,
    Sub = -1,
}

// maps named capture group matches of `CGP_DUR_OFFSET_TYPE` to
// `DurOffsetType`
// helper to `duration_from_offset_str`
fn offset_match_to_offset_duration_type(offset_str: &str) -> DurOffsetType {
    match offset_str.chars().next() {
        Some('@') => DurOffsetType::Other,
        _ => DurOffsetType::Now,
    }
}

// maps named capture group matches of `CGP_DUR_OFFSET_ADDSUB` to
// `DurOffsetAddSub`
// helper to `duration_from_offset_str`
fn offset_match_to_offset_addsub(offset_str: &str) -> DurOffsetAddSub {
    match offset_str.chars().next() {
        Some('+') => DurOffsetAddSub::Add,
        Some('-') => DurOffsetAddSub::Sub,
        _ => {
            panic!("Bad match offset_str {:?}, cannot determine DurOffsetAddSub", offset_str);
        }
    }
}

/// Regular expression processing of a user-passed duration string like
/// `"-4m2s"`, which becomes a duration of negative 4 minutes + 2 seconds.
/// Returns the duration and whether it anchors on "now" or on the other
/// window bound (leading `"@"`).
pub fn duration_from_offset_str(val: &str) -> Option<(Duration, DurOffsetType)> {
    defn!("({:?})", val);

    if val.is_empty() {
        // take the early exit to avoid building regex `REGEX_DUR_OFFSET` (expensive operation)
        defx!("is_empty; return None");
        return None;
    }

    let mut duration_offset_type: DurOffsetType = DurOffsetType::Now;
    let mut duration_addsub: DurOffsetAddSub = DurOffsetAddSub::Add;
    let mut seconds: i64 = 0;
    let mut minutes: i64 = 0;
    let mut hours: i64 = 0;
    let mut days: i64 = 0;
    let mut weeks: i64 = 0;

    let captures: regex::Captures = match REGEX_DUR_OFFSET.captures(val) {
        Some(caps) => caps,
        None => {
            defx!("REGEX_DUR_OFFSET.captures(…) None");
            return None;
        }
    };

    if let Some(match_) = captures.name(CGN_DUR_OFFSET_TYPE) {
        defo!("matched named group {:?}, match {:?}", CGN_DUR_OFFSET_TYPE, match_.as_str());
        duration_offset_type = offset_match_to_offset_duration_type(match_.as_str());
    }

    if let Some(match_) = captures.name(CGN_DUR_OFFSET_ADDSUB) {
        defo!("matched named group {:?}, match {:?}", CGN_DUR_OFFSET_ADDSUB, match_.as_str());
        duration_addsub = offset_match_to_offset_addsub(match_.as_str());
    }

    let addsub: i64 = duration_addsub as i64;

    for (cgn, unit, count) in [
        (CGN_DUR_OFFSET_SECONDS, 's', &mut seconds),
        (CGN_DUR_OFFSET_MINUTES, 'm', &mut minutes),
        (CGN_DUR_OFFSET_HOURS, 'h', &mut hours),
        (CGN_DUR_OFFSET_DAYS, 'd', &mut days),
        (CGN_DUR_OFFSET_WEEKS, 'w', &mut weeks),
    ] {
        if let Some(match_) = captures.name(cgn) {
            defo!("matched named group {:?}, match {:?}", cgn, match_.as_str());
            let digits = match_
                .as_str()
                .replace(unit, "");
            match digits.parse::<i64>() {
                Ok(val_) => {
                    *count = val_ * addsub;
                }
                Err(_err) => {
                    de_wrn!("Unable to parse {} from {:?} {}", cgn, match_.as_str(), _err);
                    return None;
                }
            }
        }
    }

    let duration_sum: Option<Duration> = match (
        Duration::try_seconds(seconds),
        Duration::try_minutes(minutes),
        Duration::try_hours(hours),
        Duration::try_days(days),
        Duration::try_weeks(weeks),
    ) {
        // each unit can fit alone while the sum still overflows
        (Some(s), Some(m), Some(h), Some(d), Some(w)) => s
            .checked_add(&m)
            .and_then(|dur| dur.checked_add(&h))
            .and_then(|dur| dur.checked_add(&d))
            .and_then(|dur| dur.checked_add(&w)),
        _ => None,
    };
    let duration: Duration = match duration_sum {
        Some(duration_) => duration_,
        None => {
            de_wrn!("Unable to parse a duration from {:?}", val);
            return None;
        }
    };
    defx!("return {:?}, {:?}", duration, duration_offset_type);

    Some((duration, duration_offset_type))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// string to DateTimeL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Transform `data` to a `DateTimeL` according to strftime `pattern`.
///
/// If `has_tz` then the pattern carries a timezone and `data` resolves on
/// its own. Else parse a `NaiveDateTime` and resolve it in `tz_offset`.
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &DateTimePattern_str,
    has_tz: bool,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    defn!("({:?}, {:?}, {:?}, {:?})", data, pattern, has_tz, tz_offset);

    if has_tz {
        match DateTime::parse_from_str(data, pattern) {
            Ok(val) => {
                defx!("return {:?}", val);

                Some(val)
            }
            Err(_err) => {
                defx!("DateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);

                None
            }
        }
    } else {
        // no timezone in `pattern` so first parse a `NaiveDateTime` instance
        let dt_naive: NaiveDateTime = match NaiveDateTime::parse_from_str(data, pattern) {
            Ok(val) => val,
            Err(_err) => {
                defx!("NaiveDateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);
                return None;
            }
        };
        // second resolve the `NaiveDateTime` instance in `tz_offset`
        match tz_offset
            .from_local_datetime(&dt_naive)
            .earliest()
        {
            Some(val) => {
                defx!("return {:?}", val);

                Some(val)
            }
            None => {
                defx!("tz_offset.from_local_datetime({:?}).earliest() returned None", dt_naive);

                None
            }
        }
    }
}

/// Transform a user-passed datetime string to a [`DateTimeL`] by trying
/// every entry of [`DT_FILTER_PATTERNS`] in order.
///
/// A date without a time of day means midnight of that date,
/// e.g. `"20220101"` is processed as `"20220101 T000000"`.
/// A time of day without a date means that time today,
/// e.g. `"10:00"` is processed as `"20220101T10:00"` on 2022-01-01
/// (the date is taken from `local_now`).
///
/// Relative offset strings are not processed here; see
/// [`duration_from_offset_str`].
pub fn datetime_from_filter_str(
    dts: &str,
    tz_offset: &FixedOffset,
    local_now: &DateTimeL,
) -> DateTimeLOpt {
    defn!("({:?}, {:?}, {:?})", dts, tz_offset, local_now);
    for (pattern_, has_tz, has_time, has_date) in DT_FILTER_PATTERNS.iter() {
        let mut pattern: String = String::from(*pattern_);
        let mut dts_: String = String::from(dts);
        if !has_time {
            dts_.push_str(DT_FILTER_APPEND_TIME_VALUE);
            pattern.push_str(DT_FILTER_APPEND_TIME_PATTERN);
            defo!("appended {:?}, {:?}", DT_FILTER_APPEND_TIME_VALUE, DT_FILTER_APPEND_TIME_PATTERN);
        }
        if !has_date {
            let ymd: String = format!(
                "{:04}{:02}{:02}T",
                local_now.year(),
                local_now.month(),
                local_now.day(),
            );
            dts_.insert_str(0, ymd.as_str());
            pattern.insert_str(0, DT_FILTER_APPEND_DATE_PATTERN);
            defo!("prepended {:?}, {:?}", ymd, DT_FILTER_APPEND_DATE_PATTERN);
        }
        if let Some(val) = datetime_parse_from_str(dts_.as_str(), pattern.as_str(), *has_tz, tz_offset) {
            defx!("return {:?}", val);
            return Some(val);
        }
    }
    defx!("return None");

    None
}

/// Drop the fractional seconds of `dt`.
///
/// Relative offsets anchored on "now" resolve from a whole second, the
/// precision a user can express in a filter string.
pub fn datetime_truncate_to_second(dt: &DateTimeL) -> DateTimeL {
    match dt.with_nanosecond(0) {
        Some(dt_) => dt_,
        None => *dt,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// conversion helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Create a [`DateTimeL`] in `fixedoffset` from the given parts.
/// Panics on out-of-range parts; intended for tests.
pub fn ymdhms(
    fixedoffset: &FixedOffset,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeL {
    fixedoffset
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// [`ymdhms`] with milliseconds.
pub fn ymdhmsl(
    fixedoffset: &FixedOffset,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
    milli: u32,
) -> DateTimeL {
    ymdhms(fixedoffset, year, month, day, hour, min, sec)
        .with_nanosecond(milli * 1_000_000)
        .unwrap()
}

/// [`ymdhms`] with microseconds.
pub fn ymdhmsm(
    fixedoffset: &FixedOffset,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
    micro: u32,
) -> DateTimeL {
    ymdhms(fixedoffset, year, month, day, hour, min, sec)
        .with_nanosecond(micro * 1_000)
        .unwrap()
}

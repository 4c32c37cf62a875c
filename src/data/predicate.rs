// src/data/predicate.rs

//! Implement [`QueryPredicate`], the resolved time-window +
//! severity-ceiling filter applied uniformly to every source in a run.

use std::fmt;

use ::chrono::{
    Duration,
    FixedOffset,
};
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    Level,
    LevelOpt,
    LEVEL_MAX,
};
use crate::data::datetime::{
    datetime_from_filter_str,
    datetime_truncate_to_second,
    duration_from_offset_str,
    DateTimeL,
    DateTimeLOpt,
    DurOffsetType,
};
use crate::data::record::RawRecord;

/// Error from [`QueryPredicate::resolve`].
///
/// The `Display` form is the diagnostic shown to the user; for
/// [`UnknownLevel`] it spans two lines, the second enumerating the legal
/// values.
///
/// [`UnknownLevel`]: PredicateError::UnknownLevel
#[derive(Debug, Eq, PartialEq)]
pub enum PredicateError {
    /// a window bound could not be parsed as a datetime or an offset
    UnknownTimeFormat,
    /// the resolved end time is not later than the resolved start time
    EndNotAfterStart,
    /// the severity ceiling is not an integer in `0..=LEVEL_MAX`
    UnknownLevel,
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateError::UnknownTimeFormat => {
                write!(f, "Error: unknown time format")
            }
            PredicateError::EndNotAfterStart => {
                write!(f, "Error: end time has to be later than start time")
            }
            PredicateError::UnknownLevel => {
                write!(
                    f,
                    "Error: unknown information level\n\
                     The following values are allowed: up to Critical - 1, \
                     up to Error - 2, up to Warning - 3, \
                     up to Informational - 4, up to Verbose - 5"
                )
            }
        }
    }
}

/// One bound of the time window as the user expressed it.
enum Bound {
    /// not given; a default applies
    Unset,
    /// an absolute instant
    Fixed(DateTimeL),
    /// a `"@"` offset deferring to the other bound
    Relative(Duration),
}

/// Transform one user-passed window bound to a [`Bound`].
///
/// Offsets anchored on "now" resolve immediately; offsets anchored on the
/// other bound (leading `"@"`) stay relative until [`QueryPredicate::resolve`]
/// knows both bounds.
fn bound_from_str(
    val: &str,
    tz_offset: &FixedOffset,
    local_now: &DateTimeL,
) -> Result<Bound, PredicateError> {
    if val.is_empty() {
        return Result::Ok(Bound::Unset);
    }
    if let Some(dt) = datetime_from_filter_str(val, tz_offset, local_now) {
        return Result::Ok(Bound::Fixed(dt));
    }
    match duration_from_offset_str(val) {
        Some((duration, DurOffsetType::Now)) => {
            let now_second: DateTimeL = datetime_truncate_to_second(local_now);
            match now_second.checked_add_signed(duration) {
                Some(dt) => Result::Ok(Bound::Fixed(dt)),
                None => Result::Err(PredicateError::UnknownTimeFormat),
            }
        }
        Some((duration, DurOffsetType::Other)) => Result::Ok(Bound::Relative(duration)),
        None => Result::Err(PredicateError::UnknownTimeFormat),
    }
}

/// The resolved time-window + severity-ceiling filter.
///
/// Immutable once constructed; shared by reference across all source
/// queries in one run. The window is exclusive of the start and inclusive
/// of the end, `dt_start < dt <= dt_end`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryPredicate {
    /// instants strictly after this pass the window
    dt_start: DateTimeL,
    /// instants at or before this pass the window
    dt_end: DateTimeL,
    /// severity ceiling; `0` means unfiltered
    max_level: Level,
    /// the offset user-passed strings resolved in; record instants are
    /// localized to it for display
    tz_offset: FixedOffset,
}

impl QueryPredicate {
    /// Resolve user-passed filter strings into a `QueryPredicate`.
    ///
    /// An empty string means "not given". Resolution order:
    ///
    /// 1. end time: the explicit value, else "now" (`local_now`);
    /// 2. start time: the explicit value, else end time minus one hour;
    /// 3. reject a window whose end is not later than its start;
    /// 4. severity ceiling: the explicit value in `0..=LEVEL_MAX`, else `0`.
    ///
    /// A bound may be a `"@"` offset deferring to the other bound; both
    /// bounds deferring to each other cannot resolve.
    pub fn resolve(
        start_str: &str,
        end_str: &str,
        level_str: &str,
        tz_offset: &FixedOffset,
        local_now: &DateTimeL,
    ) -> Result<QueryPredicate, PredicateError> {
        defn!("({:?}, {:?}, {:?})", start_str, end_str, level_str);
        let bound_start: Bound = bound_from_str(start_str, tz_offset, local_now)?;
        let bound_end: Bound = bound_from_str(end_str, tz_offset, local_now)?;

        let dt_end: DateTimeL = match (&bound_start, &bound_end) {
            (Bound::Relative(_), Bound::Relative(_)) => {
                defx!("both bounds defer to each other");
                return Result::Err(PredicateError::UnknownTimeFormat);
            }
            (_, Bound::Fixed(dt)) => *dt,
            (_, Bound::Unset) => *local_now,
            (Bound::Fixed(dt_start_), Bound::Relative(duration)) => {
                match dt_start_.checked_add_signed(*duration) {
                    Some(dt) => dt,
                    None => return Result::Err(PredicateError::UnknownTimeFormat),
                }
            }
            (Bound::Unset, Bound::Relative(_)) => {
                // the end defers to a start that was not given
                defx!("end bound defers to unset start bound");
                return Result::Err(PredicateError::UnknownTimeFormat);
            }
        };
        let dt_start: DateTimeL = match bound_start {
            Bound::Fixed(dt) => dt,
            Bound::Unset => match dt_end.checked_sub_signed(Duration::hours(1)) {
                Some(dt) => dt,
                None => return Result::Err(PredicateError::UnknownTimeFormat),
            },
            Bound::Relative(duration) => match dt_end.checked_add_signed(duration) {
                Some(dt) => dt,
                None => return Result::Err(PredicateError::UnknownTimeFormat),
            },
        };
        if dt_end <= dt_start {
            defx!("end {:?} not later than start {:?}", dt_end, dt_start);
            return Result::Err(PredicateError::EndNotAfterStart);
        }

        let max_level: Level = match level_str.is_empty() {
            true => 0,
            false => match level_str.parse::<i64>() {
                Ok(value) if (0..=LEVEL_MAX as i64).contains(&value) => value as Level,
                Ok(_) | Err(_) => {
                    defx!("bad level {:?}", level_str);
                    return Result::Err(PredicateError::UnknownLevel);
                }
            },
        };
        defx!("return window ({:?}, {:?}], level {}", dt_start, dt_end, max_level);

        Result::Ok(QueryPredicate {
            dt_start,
            dt_end,
            max_level,
            tz_offset: *tz_offset,
        })
    }

    /// Create a new `QueryPredicate` from resolved parts, localizing to the
    /// offset of `dt_start`. Only for testing.
    #[doc(hidden)]
    #[cfg(any(debug_assertions, test))]
    pub fn new_(
        dt_start: DateTimeL,
        dt_end: DateTimeL,
        max_level: Level,
    ) -> QueryPredicate {
        QueryPredicate {
            tz_offset: *dt_start.offset(),
            dt_start,
            dt_end,
            max_level,
        }
    }

    pub const fn dt_start(&self) -> &DateTimeL {
        &self.dt_start
    }

    pub const fn dt_end(&self) -> &DateTimeL {
        &self.dt_end
    }

    pub const fn max_level(&self) -> Level {
        self.max_level
    }

    pub const fn tz_offset(&self) -> &FixedOffset {
        &self.tz_offset
    }

    /// Does an event created at `dt` pass the time window?
    ///
    /// An absent timestamp cannot pass; the window always applies.
    pub fn matches_window(
        &self,
        dt: &DateTimeLOpt,
    ) -> bool {
        match dt {
            Some(dt_) => &self.dt_start < dt_ && dt_ <= &self.dt_end,
            None => false,
        }
    }

    /// Does an event of severity `level` pass the severity ceiling?
    ///
    /// A ceiling of `0` passes everything. With a ceiling set, an event
    /// without a level cannot pass.
    pub fn matches_level(
        &self,
        level: LevelOpt,
    ) -> bool {
        match (self.max_level, level) {
            (0, _) => true,
            (max, Some(level_)) => level_ <= max,
            (_, None) => false,
        }
    }

    /// Does `raw` pass both the time window and the severity ceiling?
    pub fn matches_raw(
        &self,
        raw: &RawRecord,
    ) -> bool {
        self.matches_window(raw.dt()) && self.matches_level(raw.level())
    }
}

// src/tests/common.rs

//! Common fixtures for tests: fixed timezone offsets, record builders, and
//! an in-memory [`Session`] whose sources replay scripted steps.
//!
//! [`Session`]: crate::readers::session::Session

#![allow(non_snake_case)]

use std::collections::VecDeque;

use ::chrono::FixedOffset;
use ::lazy_static::lazy_static;

use crate::common::{
    LevelOpt,
    SourceName,
    SourceNames,
    ResultS3,
};
use crate::data::datetime::DateTimeL;
use crate::data::predicate::QueryPredicate;
use crate::data::record::{
    RawDescription,
    RawRecord,
};
use crate::readers::session::{
    RecordCursor,
    ResultNextRecord,
    Session,
    SessionError,
};

lazy_static! {
    /// timezone offset of +00:00
    pub static ref FO_0: FixedOffset = FixedOffset::east_opt(0).unwrap();
    /// timezone offset of +01:00
    pub static ref FO_E1: FixedOffset = FixedOffset::east_opt(3600).unwrap();
    /// timezone offset of -08:00
    pub static ref FO_W8: FixedOffset = FixedOffset::west_opt(8 * 3600).unwrap();
}

/// Create a well-formed [`RawRecord`] for tests.
pub fn raw_record(
    dt: DateTimeL,
    level: LevelOpt,
) -> RawRecord {
    RawRecord::new(
        Some(dt),
        100,
        String::from("FakeProvider"),
        level,
        RawDescription::Formatted(String::from("fake event")),
        Vec::new(),
    )
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FakeSession
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One scripted step a [`FakeCursor`] replays.
#[derive(Clone, Debug)]
pub enum FakeStep {
    /// yield a well-formed record created at this time with this level
    Record(DateTimeL, LevelOpt),
    /// yield an unreadable record carrying this message
    Unreadable(&'static str),
    /// break the cursor with this message
    Fail(&'static str),
}

/// A cursor replaying the scripted steps of one [`FakeSession`] source.
pub struct FakeCursor {
    steps: VecDeque<FakeStep>,
}

impl RecordCursor for FakeCursor {
    fn next_record(&mut self) -> ResultNextRecord {
        match self.steps.pop_front() {
            None => ResultS3::Done,
            Some(FakeStep::Record(dt, level)) => ResultS3::Found(raw_record(dt, level)),
            Some(FakeStep::Unreadable(mesg)) => {
                ResultS3::Found(RawRecord::unreadable(String::from(mesg)))
            }
            Some(FakeStep::Fail(mesg)) => {
                ResultS3::Err(SessionError::Parse(String::from(mesg)))
            }
        }
    }
}

/// An in-memory [`Session`] of scripted sources.
///
/// Like a real session, opening a cursor drops scripted records that do
/// not pass the predicate; unreadable records and failures replay
/// unconditionally.
pub struct FakeSession {
    /// source name and its scripted steps, in listing order
    sources: Vec<(SourceName, Vec<FakeStep>)>,
    /// refuse to enumerate source names
    fail_listing: bool,
}

impl FakeSession {
    pub fn new(sources: &[(&str, Vec<FakeStep>)]) -> FakeSession {
        FakeSession {
            sources: sources
                .iter()
                .map(|(name, steps)| (SourceName::from(*name), steps.clone()))
                .collect(),
            fail_listing: false,
        }
    }

    /// A session that cannot enumerate its sources.
    pub fn new_fail_listing() -> FakeSession {
        FakeSession {
            sources: Vec::new(),
            fail_listing: true,
        }
    }
}

impl Session for FakeSession {
    type Cursor = FakeCursor;

    fn list_source_names(&self) -> Result<SourceNames, SessionError> {
        if self.fail_listing {
            return Result::Err(SessionError::NotSupported(String::from(
                "listing refused",
            )));
        }

        Result::Ok(
            self.sources
                .iter()
                .map(|(name, _)| name.clone())
                .collect(),
        )
    }

    fn open_cursor(
        &self,
        source: &SourceName,
        predicate: &QueryPredicate,
    ) -> Result<FakeCursor, SessionError> {
        let steps: &Vec<FakeStep> = match self
            .sources
            .iter()
            .find(|(name, _)| name == source)
        {
            Some((_, steps)) => steps,
            None => {
                return Result::Err(SessionError::Parse(format!(
                    "no event log named {:?}",
                    source,
                )));
            }
        };
        let steps: VecDeque<FakeStep> = steps
            .iter()
            .filter(|step| match step {
                FakeStep::Record(dt, level) => {
                    predicate.matches_raw(&raw_record(*dt, *level))
                }
                FakeStep::Unreadable(_) | FakeStep::Fail(_) => true,
            })
            .cloned()
            .collect();

        Result::Ok(FakeCursor { steps })
    }
}

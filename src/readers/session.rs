// src/readers/session.rs

//! Implement traits [`Session`] and [`RecordCursor`], the seam between the
//! source-independent query plumbing and a concrete event log store.
//!
//! [`Session`]: crate::readers::session::Session
//! [`RecordCursor`]: crate::readers::session::RecordCursor

use std::fmt;
use std::io::Error;

use crate::common::{
    ResultS3,
    SourceName,
    SourceNames,
};
use crate::data::predicate::QueryPredicate;
use crate::data::record::RawRecord;

/// Error from a [`Session`] or a [`RecordCursor`].
#[derive(Debug)]
pub enum SessionError {
    /// an underlying filesystem or read failure
    Io(Error),
    /// the store's data could not be decoded
    Parse(String),
    /// the request asks for something this backend cannot do
    NotSupported(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(err) => write!(f, "{}", err),
            SessionError::Parse(mesg) => write!(f, "{}", mesg),
            SessionError::NotSupported(mesg) => write!(f, "{}", mesg),
        }
    }
}

impl From<Error> for SessionError {
    fn from(err: Error) -> SessionError {
        SessionError::Io(err)
    }
}

/// [`ResultS3`] returned by [`RecordCursor::next_record`] distinguishes
/// between "found a record", "no more records", and "failure".
///
/// [`ResultS3`]: crate::common::ResultS3
pub type ResultNextRecord = ResultS3<RawRecord, SessionError>;

/// A stepwise producer of the [`RawRecord`s] of one source that pass a
/// [`QueryPredicate`].
///
/// [`RawRecord`s]: crate::data::record::RawRecord
/// [`QueryPredicate`]: crate::data::predicate::QueryPredicate
pub trait RecordCursor {
    /// Step to the next matching record.
    ///
    /// An unreadable record is still returned as `Found`; callers decide
    /// how to surface it. `Err` means the cursor is broken; callers must
    /// not call `next_record` again after an `Err`.
    fn next_record(&mut self) -> ResultNextRecord;
}

/// A connection to one event log store holding zero or more named sources.
///
/// A `Session` hands out one [`RecordCursor`] per queried source. Opening
/// a cursor for one source must not disturb cursors of other sources.
pub trait Session {
    type Cursor: RecordCursor;

    /// Enumerate the names of all sources this store holds, unordered.
    fn list_source_names(&self) -> Result<SourceNames, SessionError>;

    /// Open a cursor over the records of `source` that pass `predicate`.
    fn open_cursor(
        &self,
        source: &SourceName,
        predicate: &QueryPredicate,
    ) -> Result<Self::Cursor, SessionError>;
}

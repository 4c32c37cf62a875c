// src/readers/mod.rs

//! "Readers" for _aellib_.
//!
//! ## Overview of readers
//!
//! * A [`Session`] connects to one event log store and enumerates the
//!   [source names] it holds.
//! * A [`RecordCursor`], opened from a `Session` for one source name and one
//!   [`QueryPredicate`], steps through the matching [`RawRecord`s] of that
//!   source.
//! * [`run_query`] drives a `Session` across many sources and merges the
//!   results into one time-ordered [`Record`] stream.
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`Session`]: crate::readers::session::Session
//! [`RecordCursor`]: crate::readers::session::RecordCursor
//! [source names]: crate::common::SourceName
//! [`QueryPredicate`]: crate::data::predicate::QueryPredicate
//! [`RawRecord`s]: crate::data::record::RawRecord
//! [`run_query`]: crate::readers::aggregator::run_query
//! [`Record`]: crate::data::record::Record

pub mod aggregator;
pub mod evtxsession;
pub mod session;
pub mod sources;

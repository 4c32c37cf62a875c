// src/data/mod.rs

//! The `data` module is specialized data containers for the
//! [`Record`]s flowing through a query, the [`QueryPredicate`] filter,
//! and datetime handling.
//!
//! ## Definitions of data
//!
//! ### Record
//!
//! A `Record` is one normalized event entry retrieved from a source:
//! a creation instant, the source name, the numeric event id, the
//! provider ("origin") string, a resolved severity name, and a free-text
//! body. It is created while draining a source's cursor and is immutable
//! afterward.
//!
//! ### RawRecord
//!
//! A [`RawRecord`] is the not-yet-normalized form a backend cursor yields:
//! the timestamp may be absent, the severity is a number, the description
//! may be missing or unreadable. A `RawRecord` becomes a `Record` inside
//! the aggregation loop.
//!
//! ### QueryPredicate
//!
//! A `QueryPredicate` is the resolved time-window + severity-ceiling
//! filter, constructed once per run and shared by every source query.
//!
//! [`Record`]: crate::data::record::Record
//! [`RawRecord`]: crate::data::record::RawRecord
//! [`QueryPredicate`]: crate::data::predicate::QueryPredicate

pub mod datetime;
pub mod predicate;
pub mod record;

// src/lib.rs

//! # all_event_logs
//!
//! Library for the binary program _ael_ ("all event logs").
//!
//! Queries events from many named event logs, filters them by a time window
//! and a severity ceiling, merges them into one time-ordered sequence, and
//! renders that sequence as text, CSV, or an interactive grid.
//!
//! Overview of modules:
//!
//! * [`argscan`] scans raw command-line tokens into a parameter table.
//! * [`data`] is the record, filter, and datetime containers.
//! * [`readers`] queries the event-log backend and aggregates the results.
//! * [`printer`] renders the merged sequence for the user.
//! * [`debug`] is diagnostic printing helpers.
//!
//! [`argscan`]: crate::argscan
//! [`data`]: crate::data
//! [`readers`]: crate::readers
//! [`printer`]: crate::printer
//! [`debug`]: crate::debug

pub mod argscan;
pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;

// src/printer/mod.rs

//! The `printer` module is for printing the merged [`Record`] stream,
//! as tab-separated text or CSV (with severity color effects on the
//! console), as an interactive grid, and for printing the closing
//! run summary.
//!
//! [`Record`]: crate::data::record::Record

pub mod gridview;
pub mod printers;
pub mod summary;

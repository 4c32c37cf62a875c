// src/readers/aggregator.rs

//! Implement [`run_query`], the driver that queries many sources of one
//! [`Session`] and merges the results into one time-ordered [`Record`]
//! stream.
//!
//! [`run_query`]: self::run_query
//! [`Session`]: crate::readers::session::Session
//! [`Record`]: crate::data::record::Record

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    Count,
    ResultS3,
    SourceName,
    SourceNames,
};
use crate::data::datetime::DateTimeL;
use crate::data::predicate::QueryPredicate;
use crate::data::record::Record;
use crate::readers::session::{
    RecordCursor,
    Session,
};

/// What one [`run_query`] produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Every matching record of every queried source, in ascending
    /// timestamp order.
    pub records: Vec<Record>,
    /// How many sources were asked for records.
    pub sources_attempted: Count,
    /// How many sources were opened and drained without failure.
    pub sources_succeeded: Count,
}

/// Drain one source's cursor into `records`.
///
/// Returns the count of records taken, or `None` when the cursor failed
/// partway; records taken before the failure stay in `records`.
fn drain_cursor<C: RecordCursor>(
    cursor: &mut C,
    source: &SourceName,
    dt_fallback: &DateTimeL,
    records: &mut Vec<Record>,
) -> Option<Count> {
    let mut count: Count = 0;
    loop {
        match cursor.next_record() {
            ResultS3::Found(raw) => {
                count += 1;
                records.push(Record::from_raw(raw, source, dt_fallback));
            }
            ResultS3::Done => {
                defo!("cursor {:?} Done after {} records", source, count);
                break Some(count);
            }
            ResultS3::Err(err) => {
                defo!("cursor {:?} Err after {} records", source, count);
                eprintln!("Error opening the event log \"{}\": {}", source, err);
                break None;
            }
        }
    }
}

/// Query every source in `source_names` with the same `predicate` and
/// merge the results into one stream sorted by event creation time.
///
/// A source that cannot be opened or that fails partway is diagnosed on
/// _stderr_ (quiet does not suppress failures) and not counted as
/// succeeded; the remaining sources are still queried. Records taken
/// before a partway failure are kept. Per-source progress is printed to
/// _stdout_ unless `quiet`.
///
/// Records without a creation time take `dt_fallback`.
///
/// The sort is stable. Sources are queried in the order given, so records
/// with equal timestamps stay grouped by source in that order.
pub fn run_query<S: Session>(
    session: &S,
    predicate: &QueryPredicate,
    source_names: &SourceNames,
    dt_fallback: &DateTimeL,
    quiet: bool,
) -> RunOutcome {
    defn!("({} sources)", source_names.len());
    let mut records: Vec<Record> = Vec::new();
    let mut sources_succeeded: Count = 0;
    for source in source_names.iter() {
        defo!("open_cursor({:?})", source);
        let mut cursor: S::Cursor = match session.open_cursor(source, predicate) {
            Result::Ok(cursor) => cursor,
            Result::Err(err) => {
                eprintln!("Error opening the event log \"{}\": {}", source, err);
                continue;
            }
        };
        let count: Count = match drain_cursor(&mut cursor, source, dt_fallback, &mut records) {
            Some(count) => count,
            None => continue,
        };
        sources_succeeded += 1;
        if !quiet {
            println!("Processed event log \"{}\": {} entries", source, count);
        }
    }
    records.sort_by(|a, b| a.dt().cmp(b.dt()));
    defx!(
        "return {} records, {}/{} sources succeeded",
        records.len(),
        sources_succeeded,
        source_names.len()
    );

    RunOutcome {
        records,
        sources_attempted: source_names.len() as Count,
        sources_succeeded,
    }
}

// src/printer/summary.rs

//! Closing run-summary printing function.
//! Only used by `ael.rs`.

use ::si_trace_print::defñ;

use crate::common::Count;
use crate::readers::aggregator::RunOutcome;

/// Print the closing run summary to _stdout_; one line counting the
/// events taken, the sources that answered, and the sources that failed.
///
/// Prints even when zero events matched. `quiet` suppresses it entirely.
pub fn print_summary(
    outcome: &RunOutcome,
    quiet: bool,
) {
    defñ!();
    if quiet {
        return;
    }
    let failed: Count = outcome.sources_attempted - outcome.sources_succeeded;
    println!(
        "Successfully processed {} events from {} logs, access errors with {} logs.",
        outcome.records.len(),
        outcome.sources_succeeded,
        failed,
    );
}

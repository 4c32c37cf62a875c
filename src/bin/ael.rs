// src/bin/ael.rs

//! Driver program _ael_ drives the [_aellib_].
//!
//! Processes user-passed command-line arguments with an [`ArgScan`].
//! Then resolves the user-passed time window and severity ceiling to a
//! [`QueryPredicate`], opens an [`EvtxDirSession`] over the event log
//! store, and queries every named event log (or every event log of the
//! session when none are named) with [`run_query`].
//!
//! The merged records, ordered by event creation time, are rendered as
//! tab-separated text, as semicolon-separated CSV, or in an interactive
//! full-screen grid; to the console or appended to a file. A closing
//! summary line counts the records taken and the sources that answered.
//!
//! A source that cannot be read is diagnosed on _stderr_ and does not
//! stop the run; the exit value is zero as long as the query itself ran.
//!
//! [_aellib_]: aellib
//! [`ArgScan`]: aellib::argscan::ArgScan
//! [`QueryPredicate`]: aellib::data::predicate::QueryPredicate
//! [`EvtxDirSession`]: aellib::readers::evtxsession::EvtxDirSession
//! [`run_query`]: aellib::readers::aggregator::run_query

use ::aellib::argscan::{
    ArgScan,
    ArgScanError,
};
use ::aellib::common::{
    FPath,
    OutputMode,
    SourceNames,
    EXITCODE_BAD_ARGUMENTS,
    EXITCODE_NO_SOURCES,
    EXITCODE_SUCCESS,
    EXITCODE_WRITE_FAILED,
};
use ::aellib::data::datetime::DateTimeL;
use ::aellib::data::predicate::{
    PredicateError,
    QueryPredicate,
};
use ::aellib::data::record::Record;
use ::aellib::e_err;
use ::aellib::printer::gridview::show_grid;
use ::aellib::printer::printers::{
    write_records_to_file,
    ColorChoice,
    RecordPrinter,
};
use ::aellib::printer::summary::print_summary;
use ::aellib::readers::aggregator::{
    run_query,
    RunOutcome,
};
use ::aellib::readers::evtxsession::{
    EvtxDirSession,
    COMPUTER_LOCALHOST,
    EVTX_LOGS_DIR_DEFAULT,
};
use ::aellib::readers::session::SessionError;
use ::aellib::readers::sources::resolve_source_names;
use ::chrono::{
    DateTime,
    FixedOffset,
    Local,
    Utc,
};
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};
use ::si_trace_print::stack::stack_offset_set;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// user-facing name of this program
const NAME_BIN: &str = "ael";

thread_local! {
    /// for user-passed strings of a duration that will be offset from the
    /// current datetime.
    static UTC_NOW: DateTime<Utc> = {
        defo!("thread_local! UTC_NOW::new()");

        Utc::now()
    };
    static LOCAL_NOW: DateTime<Local> = {
        defo!("thread_local! LOCAL_NOW::new()");

        UTC_NOW.with(|utc_now| {
            DateTime::from(utc_now.with_timezone(&Local))
        })
    };
    static LOCAL_NOW_OFFSET: FixedOffset = {
        defo!("thread_local! LOCAL_NOW_OFFSET::new()");

        LOCAL_NOW.with(|local_now| *local_now.offset())
    };
}

/// Every parameter name and alias this program accepts. A scanned
/// parameter matching none of these fails the run before any query.
const PARAMS_ALLOWED: [&str; 34] = [
    "?", "h", "help",
    "l", "log", "logname",
    "c", "computer", "computername",
    "s", "start", "starttime",
    "e", "end", "endtime",
    "level",
    "csv", "g", "grid",
    "f", "file", "filename",
    "q", "quiet",
    "d", "domain", "domainname",
    "u", "user", "username",
    "p", "pass", "password",
    "logdir",
];

#[cfg(debug_assertions)]
const CLI_HELP_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_NOTE_DEBUG: &str = "";

#[cfg(test)]
const CLI_HELP_NOTE_TEST: &str = "\nTEST BUILD";
#[cfg(not(test))]
const CLI_HELP_NOTE_TEST: &str = "";

/// `-help` message.
const CLI_HELP: &str = concatcp!(
    NAME_BIN, "\t\t\t\t\t", env!("CARGO_PKG_AUTHORS"), r#"

Console program to determine the events of all event logs ordered by time.

"#,
    NAME_BIN, r#" [[-logname:]<LOGNAMES>] [-level:<LEVEL>]
    [-starttime:<STARTTIME>] [-endtime:<ENDTIME>] [-logdir:<DIRECTORY>]
    [-filename:<FILENAME>] [-csv] [-grid] [-quiet] [-?|-help]

Parameters:
-logname:<LOGNAMES> comma separated list of event log names. Queries all event
    logs if omitted (can be abbreviated as -log or -l or can be omitted).
-level:<LEVEL> queries up to level <LEVEL>. Queries all events if omitted.
    Level: Critical - 1, Error - 2, Warning - 3, Informational - 4, Verbose - 5
-starttime:<STARTTIME> start time of events to query (can be abbreviated as
    -start or -s). Default is end time minus one hour.
-endtime:<ENDTIME> end time of events to query (can be abbreviated as -end or
    -e). Default is now.
-logdir:<DIRECTORY> directory of the .evtx files to query. Default is
    ""#, EVTX_LOGS_DIR_DEFAULT, r#"".
-computername:<COMPUTER> name of computer to query (can be abbreviated as
    -computer or -c). Only this computer can be queried.
-domainname, -username, -password (and abbreviations -d, -u, -p) are accepted
    for compatibility but logons are not supported when reading .evtx files.
-filename:<FILENAME> name of the file in which the results are output (can be
    abbreviated as -file or -f). Default is output to the console.
-csv output format "comma separated" instead of output format text.
-grid output to a full-screen grid instead of console (can be abbreviated
    as -g).
-quiet shows only error messages and results (can be abbreviated as -q).
-? or -help shows this help (can be abbreviated as -h).

Times may be passed in many common forms, e.g. "2019/11/29 10:00",
"2019-11-29T10:00:00", "11/29/2019 10:00 AM", "20191129", or "10:00".
A time of day without a date means today. A date without a time of day means
that date at time 00:00:00. Without a timezone the local timezone is presumed.

Times may also be relative offsets "-DwDdDhDmDs" or "+DwDdDhDmDs" from now,
where "D" is a decimal number and "w" is weeks, "d" is days, "h" is hours,
"m" is minutes, "s" is seconds, e.g. "-starttime:-1d12h".
An offset "@+DwDdDhDmDs" or "@-DwDdDhDmDs" is relative to the other given
time, e.g. "-starttime:10:00 -endtime:@+30m".

Examples:
"#,
    NAME_BIN, " -start:10:00 -end:11:00\n",
    NAME_BIN, " -start:10:00 -end:11:00 /GRID\n",
    NAME_BIN, " System,Setup,Application -logdir=logs\n",
    NAME_BIN, " /logname=Application /level:2 /q /CSV /file:OnlyErrors.csv\n",
    NAME_BIN, " \"/starttime:2019/11/29 10:00\" \"/endtime:2019/11/29 11:00\"\n",
    NAME_BIN, " \"/s=2019/12/08 10:09:49.450\" \"/e=2019/12/08 10:09:49.850\"\n",
    NAME_BIN, " /log=Application -start:@-2h -end:12:00\n",
    r#"
---

Version: "#, env!("CARGO_PKG_VERSION"), r#"
MSRV: "#, env!("CARGO_PKG_RUST_VERSION"), r#"
License: "#, env!("CARGO_PKG_LICENSE"), r#"
Repository: "#, env!("CARGO_PKG_REPOSITORY"), r#"
Author: "#, env!("CARGO_PKG_AUTHORS"),
    CLI_HELP_NOTE_DEBUG,
    CLI_HELP_NOTE_TEST,
);

/// Scan user-passed arguments and reject unknown parameter names.
fn cli_scan_args(tokens: &[String]) -> Result<ArgScan, ArgScanError> {
    let args: ArgScan = ArgScan::new(tokens)?;
    args.check_unknown(&PARAMS_ALLOWED)?;

    Result::Ok(args)
}

/// [`cli_scan_args`] or exit with [`EXITCODE_BAD_ARGUMENTS`].
fn cli_scan_args_exit(tokens: &[String]) -> ArgScan {
    match cli_scan_args(tokens) {
        Result::Ok(args) => args,
        Result::Err(err) => {
            eprintln!("{}", err);
            std::process::exit(EXITCODE_BAD_ARGUMENTS);
        }
    }
}

/// Resolve the user-passed time window and severity ceiling.
///
/// Reads parameter `s`, `start`, or `starttime` for the start time;
/// `e`, `end`, or `endtime` for the end time; `level` for the ceiling.
/// An alias given earlier in those lists wins.
fn cli_predicate(
    args: &ArgScan,
    tz_offset: &FixedOffset,
    local_now: &DateTimeL,
) -> Result<QueryPredicate, PredicateError> {
    let start_str: &str =
        args.value_or_default("s", args.value_or_default("start", args.value("starttime")));
    let end_str: &str =
        args.value_or_default("e", args.value_or_default("end", args.value("endtime")));
    let level_str: &str = args.value("level");

    QueryPredicate::resolve(start_str, end_str, level_str, tz_offset, local_now)
}

/// [`cli_predicate`] anchored on this run's "now", or exit with
/// [`EXITCODE_BAD_ARGUMENTS`].
fn cli_predicate_exit(args: &ArgScan) -> QueryPredicate {
    let tz_offset: FixedOffset = LOCAL_NOW_OFFSET.with(|tz_offset| *tz_offset);
    let local_now: DateTimeL = LOCAL_NOW.with(|local_now| (*local_now).into());
    match cli_predicate(args, &tz_offset, &local_now) {
        Result::Ok(predicate) => predicate,
        Result::Err(err) => {
            eprintln!("{}", err);
            std::process::exit(EXITCODE_BAD_ARGUMENTS);
        }
    }
}

/// Open a session over the event log store named by the user-passed
/// parameters.
///
/// Reads parameter `logdir` for the store directory and `c`, `computer`,
/// or `computername` for the computer to query. The credential parameters
/// (`u`/`user`/`username`, `p`/`pass`/`password`, `d`/`domain`/
/// `domainname`) are read and refused when non-empty; logons are not
/// supported when reading `.evtx` files.
fn cli_session(args: &ArgScan) -> Result<EvtxDirSession, SessionError> {
    let dir: &str = args.value_or_default("logdir", EVTX_LOGS_DIR_DEFAULT);
    let computer: &str = args.value_or_default(
        "c",
        args.value_or_default("computer", args.value_or_default("computername", COMPUTER_LOCALHOST)),
    );
    let username: &str =
        args.value_or_default("u", args.value_or_default("user", args.value("username")));
    let password: &str =
        args.value_or_default("p", args.value_or_default("pass", args.value("password")));
    let domain: &str =
        args.value_or_default("d", args.value_or_default("domain", args.value("domainname")));

    EvtxDirSession::new(dir, computer, username, password, domain)
}

/// [`cli_session`] or exit with [`EXITCODE_BAD_ARGUMENTS`].
fn cli_session_exit(args: &ArgScan) -> EvtxDirSession {
    match cli_session(args) {
        Result::Ok(session) => session,
        Result::Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(EXITCODE_BAD_ARGUMENTS);
        }
    }
}

/// The rendering selected by switches `csv` and `grid`/`g`;
/// `grid` wins over `csv`, neither means text.
fn cli_output_mode(args: &ArgScan) -> OutputMode {
    let mut mode: OutputMode = OutputMode::Text;
    if args.exists("csv") {
        mode = OutputMode::Csv;
    }
    if args.exists("grid") || args.exists("g") {
        mode = OutputMode::Grid;
    }

    mode
}

/// The user-passed list of event log names; parameter `l`, `log`, or
/// `logname`, else the unqualified token. Empty means every event log of
/// the session.
fn cli_source_list(args: &ArgScan) -> &str {
    args.value_or_default(
        "l",
        args.value_or_default("log", args.value_or_default("logname", args.default_value())),
    )
}

/// The user-passed output file name; parameter `f`, `file`, or
/// `filename`. Empty means output to the console.
fn cli_file_name(args: &ArgScan) -> &str {
    args.value_or_default("f", args.value_or_default("file", args.value("filename")))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// main
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Render the merged records to the console or to the user-passed file.
///
/// With a file every rendering is line-based, so the grid rendering
/// falls back to its CSV rows. Exits with [`EXITCODE_WRITE_FAILED`] when
/// the rendering cannot be written.
fn print_records_exit(
    records: &[Record],
    mode: OutputMode,
    file_name: &FPath,
) {
    defn!("({} records, {:?}, {:?})", records.len(), mode, file_name);
    if file_name.is_empty() {
        match mode {
            OutputMode::Grid => {
                if let Err(err) = show_grid(records) {
                    e_err!("{}", err);
                    std::process::exit(EXITCODE_WRITE_FAILED);
                }
            }
            OutputMode::Text | OutputMode::Csv => {
                let mut printer: RecordPrinter = RecordPrinter::new(ColorChoice::Auto, mode);
                if let Err(err) = printer.print_records(records) {
                    e_err!("{}", err);
                    std::process::exit(EXITCODE_WRITE_FAILED);
                }
            }
        }
    } else if let Err(err) = write_records_to_file(file_name, records, mode) {
        eprintln!("Error writing to file \"{}\": {}", file_name, err);
        std::process::exit(EXITCODE_WRITE_FAILED);
    }
    defx!();
}

pub fn main() {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let args: ArgScan = cli_scan_args_exit(tokens.as_slice());

    if args.exists("?") || args.exists("h") || args.exists("help") {
        // help wanted
        println!("{}", CLI_HELP);
        defx!("help");
        std::process::exit(EXITCODE_SUCCESS);
    }

    // no status messages?
    let quiet: bool = args.exists("q") || args.exists("quiet");
    let predicate: QueryPredicate = cli_predicate_exit(&args);
    let session: EvtxDirSession = cli_session_exit(&args);
    let mode: OutputMode = cli_output_mode(&args);
    let file_name: FPath = FPath::from(cli_file_name(&args));

    // the event logs to query; an absent list means querying all of them
    let source_names: SourceNames = match resolve_source_names(&session, cli_source_list(&args)) {
        Result::Ok(source_names) => source_names,
        Result::Err(err) => {
            eprintln!("Error connecting to event log: {}", err);
            std::process::exit(EXITCODE_NO_SOURCES);
        }
    };

    // records missing a creation time take this run's "now"
    let dt_fallback: DateTimeL = LOCAL_NOW.with(|local_now| (*local_now).into());
    let outcome: RunOutcome = run_query(&session, &predicate, &source_names, &dt_fallback, quiet);

    if !outcome.records.is_empty() {
        // only write events if there are any
        print_records_exit(&outcome.records, mode, &file_name);
    }

    print_summary(&outcome, quiet);
    defx!();
    std::process::exit(EXITCODE_SUCCESS);
}

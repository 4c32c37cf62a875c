// src/readers/evtxsession.rs

//! Implement [`EvtxDirSession`], a [`Session`] over a directory of
//! [Windows Event Log `.evtx` format] files read with [`EvtxParser`].
//!
//! Each `.evtx` file under the directory is one source; the source name is
//! the file name without its extension, so `System.evtx` is the source
//! `"System"`.
//!
//! `.evtx` files in the wild were found to store events in a
//! non-chronological order, so no per-source order is assumed here; the
//! caller sorts the merged stream. The record iterator of [`EvtxParser`]
//! borrows the parser, so a cursor reads all matching records when it is
//! opened and then steps through them from memory.
//!
//! [`EvtxDirSession`]: self::EvtxDirSession
//! [`Session`]: crate::readers::session::Session
//! [`EvtxParser`]: https://docs.rs/evtx/0.8.5/evtx/struct.EvtxParser.html
//! [Windows Event Log `.evtx` format]: https://github.com/libyal/libevtx/blob/main/documentation/Windows%20XML%20Event%20Log%20(EVTX).asciidoc

use std::collections::VecDeque;
use std::fs::File;
use std::path::{
    Path,
    PathBuf,
};

use ::cfg_if::cfg_if;
use ::chrono::{
    DateTime,
    FixedOffset,
    Utc,
};
use ::evtx::{
    EvtxParser,
    ParserSettings,
};
use ::serde_json::Value;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    FPath,
    Level,
    LevelOpt,
    ResultS3,
    SourceName,
    SourceNames,
};
use crate::data::datetime::DateTimeLOpt;
use crate::data::predicate::QueryPredicate;
use crate::data::record::{
    EventId,
    RawDescription,
    RawRecord,
};
use crate::de_wrn;
use crate::readers::session::{
    RecordCursor,
    ResultNextRecord,
    Session,
    SessionError,
};

/// The `DateTime` used by [`EvtxParser`], field [`SerializedEvtxRecord.timestamp`],
/// which is referred to as a "timestamp".
///
/// [`EvtxParser`]: https://docs.rs/evtx/0.8.5/evtx/struct.EvtxParser.html
/// [`SerializedEvtxRecord.timestamp`]: https://docs.rs/evtx/0.8.5/evtx/struct.SerializedEvtxRecord.html#structfield.timestamp
pub type Timestamp = DateTime<Utc>;

/// File name extension of the files an [`EvtxDirSession`] reads, matched
/// without regard to case.
pub const EVTX_EXTENSION: &str = "evtx";

/// The computer name meaning "this computer"; the only one an
/// [`EvtxDirSession`] accepts.
pub const COMPUTER_LOCALHOST: &str = "localhost";

cfg_if! {
    if #[cfg(windows)] {
        /// Directory of `.evtx` files read when none is given;
        /// where Windows keeps its own.
        pub const EVTX_LOGS_DIR_DEFAULT: &str = r"C:\Windows\System32\winevt\Logs";
        /// Environment variable holding this computer's name.
        const ENV_COMPUTER_NAME: &str = "COMPUTERNAME";
    } else {
        /// Directory of `.evtx` files read when none is given.
        pub const EVTX_LOGS_DIR_DEFAULT: &str = ".";
        /// Environment variable holding this computer's name.
        /// Shells set it but rarely export it, so it is often absent.
        const ENV_COMPUTER_NAME: &str = "HOSTNAME";
    }
}

/// Does `computer` name this computer?
///
/// `""` and `"localhost"` always do. Otherwise the name is compared to the
/// host name in the environment, without regard to ASCII case; with no
/// host name in the environment no other name matches.
pub fn is_local_computer(computer: &str) -> bool {
    if computer.is_empty() || computer == COMPUTER_LOCALHOST {
        return true;
    }
    match std::env::var(ENV_COMPUTER_NAME) {
        Ok(local) => computer.eq_ignore_ascii_case(&local),
        Err(_) => false,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// JSON field extraction
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The event identifier at `Event.System.EventID`; either a bare number
/// or, for events with qualifiers, an object with the number at `"#text"`.
fn json_event_id(system: &Value) -> EventId {
    let eventid: &Value = &system["EventID"];
    match eventid.as_u64() {
        Some(id) => id,
        None => eventid["#text"]
            .as_u64()
            .unwrap_or(0),
    }
}

/// The provider name at `Event.System.Provider`, an XML attribute.
fn json_origin(system: &Value) -> String {
    match system["Provider"]["#attributes"]["Name"].as_str() {
        Some(name) => name.to_owned(),
        None => String::new(),
    }
}

/// The severity level at `Event.System.Level`. Values beyond the named
/// levels occur; they are kept as-is and display as `"Unknown"`.
fn json_level(system: &Value) -> LevelOpt {
    let level: &Value = &system["Level"];
    match level.as_u64() {
        Some(value) => Some(value.min(u64::from(Level::MAX)) as Level),
        None => match level.as_str() {
            Some(value) => value.parse::<Level>().ok(),
            None => None,
        },
    }
}

/// The rendered event message at `Event.RenderingInfo.Message`, when the
/// file carries one. Most `.evtx` files do not; the message templates live
/// in provider libraries, not in the file.
fn json_description(event: &Value) -> RawDescription {
    match event["RenderingInfo"]["Message"].as_str() {
        Some(mesg) => RawDescription::Formatted(mesg.to_owned()),
        None => RawDescription::Missing,
    }
}

fn json_property_value(value: &Value) -> String {
    match value {
        Value::String(val) => val.clone(),
        Value::Null => String::new(),
        val => val.to_string(),
    }
}

fn push_property_values(
    value: &Value,
    properties: &mut Vec<String>,
) {
    match value {
        Value::Array(values) => {
            for value_ in values {
                properties.push(json_property_value(value_));
            }
        }
        _ => properties.push(json_property_value(value)),
    }
}

/// The payload values of the record, the values under `Event.EventData`
/// or `Event.UserData`, in enumeration order. XML attributes under
/// `"#attributes"` keys are not payload.
fn json_properties(event: &Value) -> Vec<String> {
    let mut properties: Vec<String> = Vec::new();
    for key in [&event["EventData"], &event["UserData"]] {
        match key {
            Value::Object(map) => {
                for (name, value_) in map.iter() {
                    if name == "#attributes" {
                        continue;
                    }
                    push_property_values(value_, &mut properties);
                }
            }
            Value::Null => {}
            value_ => properties.push(json_property_value(value_)),
        }
    }

    properties
}

/// Transform one record's JSON rendering to a [`RawRecord`].
///
/// The stored timestamp is a UTC instant; it is localized to `tz_offset`,
/// the offset the record will display in.
pub fn raw_record_from_json(
    timestamp: &Timestamp,
    json: &Value,
    tz_offset: &FixedOffset,
) -> RawRecord {
    let event: &Value = &json["Event"];
    let system: &Value = &event["System"];
    let dt: DateTimeLOpt = Some(timestamp.with_timezone(tz_offset));

    RawRecord::new(
        dt,
        json_event_id(system),
        json_origin(system),
        json_level(system),
        json_description(event),
        json_properties(event),
    )
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EvtxDirSession
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A [`Session`] over the `.evtx` files directly under one directory.
///
/// [`Session`]: crate::readers::session::Session
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvtxDirSession {
    /// The directory holding the `.evtx` files.
    dir: FPath,
}

impl EvtxDirSession {
    /// Create a new `EvtxDirSession` over the `.evtx` files under `dir`.
    ///
    /// Remote computers and credentials need a live Windows Event Log
    /// service; a directory of `.evtx` files has neither, so any computer
    /// name that is not this computer, and any credential at all, is
    /// refused here.
    ///
    /// The directory itself is not touched until
    /// [`list_source_names`] or [`open_cursor`].
    ///
    /// [`list_source_names`]: EvtxDirSession#method.list_source_names
    /// [`open_cursor`]: EvtxDirSession#method.open_cursor
    pub fn new(
        dir: &str,
        computer: &str,
        username: &str,
        password: &str,
        domain: &str,
    ) -> Result<EvtxDirSession, SessionError> {
        defn!("({:?}, {:?}, {:?})", dir, computer, username);
        if !username.is_empty() || !password.is_empty() || !domain.is_empty() {
            defx!("credentials given; return NotSupported");
            return Result::Err(SessionError::NotSupported(
                String::from("cannot use credentials to read .evtx files"),
            ));
        }
        if !is_local_computer(computer) {
            defx!("remote computer given; return NotSupported");
            return Result::Err(SessionError::NotSupported(format!(
                "cannot read .evtx files from remote computer {:?}",
                computer,
            )));
        }
        defx!("return EvtxDirSession({:?})", dir);

        Result::Ok(EvtxDirSession {
            dir: FPath::from(dir),
        })
    }

    pub const fn dir(&self) -> &FPath {
        &self.dir
    }
}

impl Session for EvtxDirSession {
    type Cursor = EvtxDirCursor;

    /// The file name stems of the `.evtx` files directly under the
    /// directory, in the order the filesystem lists them.
    fn list_source_names(&self) -> Result<SourceNames, SessionError> {
        defn!("({:?})", self.dir);
        let mut names: SourceNames = SourceNames::new();
        for entry in std::fs::read_dir(Path::new(&self.dir))? {
            let entry = entry?;
            let path: PathBuf = entry.path();
            match path.extension() {
                Some(ext) if ext.eq_ignore_ascii_case(EVTX_EXTENSION) => {}
                _ => continue,
            }
            if !path.is_file() {
                continue;
            }
            match path
                .file_stem()
                .and_then(|stem| stem.to_str())
            {
                Some(stem) => names.push(SourceName::from(stem)),
                None => continue,
            }
        }
        defx!("return {} source names", names.len());

        Result::Ok(names)
    }

    /// Open `{dir}/{source}.evtx` and read all records passing `predicate`.
    ///
    /// A record entry that cannot be decoded at all is kept as an
    /// [unreadable `RawRecord`]; the filters cannot apply to it since
    /// nothing about it is known.
    ///
    /// [unreadable `RawRecord`]: crate::data::record::RawRecord::unreadable
    fn open_cursor(
        &self,
        source: &SourceName,
        predicate: &QueryPredicate,
    ) -> Result<EvtxDirCursor, SessionError> {
        defn!("({:?})", source);
        let mut path: PathBuf = PathBuf::from(&self.dir);
        path.push(format!("{}.{}", source, EVTX_EXTENSION));
        // one thread keeps the enumeration order of the file
        let settings: ParserSettings = ParserSettings::default().num_threads(1);
        defo!("EvtxParser::from_path({:?})", path);
        let mut parser: EvtxParser<File> = match EvtxParser::from_path(&path) {
            Ok(parser) => parser.with_configuration(settings),
            Err(err) => {
                defx!("EvtxParser::from_path Error; return {:?}", err);
                return Result::Err(SessionError::Parse(err.to_string()));
            }
        };
        let mut records: VecDeque<RawRecord> = VecDeque::new();
        for result in parser.records_json_value() {
            match result {
                Ok(record) => {
                    let raw: RawRecord =
                        raw_record_from_json(&record.timestamp, &record.data, predicate.tz_offset());
                    if predicate.matches_raw(&raw) {
                        records.push_back(raw);
                    }
                }
                Err(err) => {
                    de_wrn!("records_json_value: {}", err);
                    records.push_back(RawRecord::unreadable(err.to_string()));
                }
            }
        }
        defx!("return cursor of {} records", records.len());

        Result::Ok(EvtxDirCursor { records })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EvtxDirCursor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A [`RecordCursor`] over the matching records of one `.evtx` file,
/// read into memory by [`EvtxDirSession::open_cursor`].
///
/// [`RecordCursor`]: crate::readers::session::RecordCursor
#[derive(Debug)]
pub struct EvtxDirCursor {
    records: VecDeque<RawRecord>,
}

impl RecordCursor for EvtxDirCursor {
    fn next_record(&mut self) -> ResultNextRecord {
        match self.records.pop_front() {
            Some(raw) => ResultS3::Found(raw),
            None => ResultS3::Done,
        }
    }
}

// src/data/record.rs

//! Implement the [`Record`] flowing through a query, and [`RawRecord`],
//! the not-yet-normalized form a backend cursor yields.

use crate::common::{
    LevelOpt,
    SourceName,
};
use crate::data::datetime::{
    DateTimeL,
    DateTimeLOpt,
    DATETIME_DISPLAY_PATTERN,
};

/// Numeric identifier assigned by the source to one event.
///
/// Wide enough for both the plain and the qualifier-extended identifier
/// forms an event log stores.
pub type EventId = u64;

/// Body prefix synthesized for an event that could not be read.
pub const BODY_ERROR_PREFIX: &str = "### Error reading the event log entry: ";

/// Resolved human-readable severity name for `level`.
///
/// Level `0` is always named "LogAlways". A level the event log does not
/// define, or an absent level, resolves to "Unknown".
pub const fn severity_name(level: LevelOpt) -> &'static str {
    match level {
        Some(0) => "LogAlways",
        Some(1) => "Critical",
        Some(2) => "Error",
        Some(3) => "Warning",
        Some(4) => "Information",
        Some(5) => "Verbose",
        Some(_) | None => "Unknown",
    }
}

/// The description carried by a [`RawRecord`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawDescription {
    /// the source supplied a formatted description (may still be empty)
    Formatted(String),
    /// the source has no description for this event
    Missing,
    /// the event could not be read; the message says why
    Unreadable(String),
}

/// Resolve the free-text body of a record.
///
/// An empty or missing description falls back to the concatenation of the
/// raw property values. An unreadable event synthesizes a body carrying
/// [`BODY_ERROR_PREFIX`] and the failure message; the event is still
/// emitted, never silently dropped.
pub fn resolve_body(
    description: &RawDescription,
    properties: &[String],
) -> String {
    match description {
        RawDescription::Formatted(text) if !text.is_empty() => text.clone(),
        RawDescription::Formatted(_)
        | RawDescription::Missing => properties.concat(),
        RawDescription::Unreadable(message) => {
            let mut body = String::with_capacity(BODY_ERROR_PREFIX.len() + message.len());
            body.push_str(BODY_ERROR_PREFIX);
            body.push_str(message);

            body
        }
    }
}

/// A not-yet-normalized event as a backend cursor yields it.
///
/// The timestamp may be absent, the severity is a number the backend may
/// not have supplied, the description may be missing or unreadable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawRecord {
    dt: DateTimeLOpt,
    id: EventId,
    origin: String,
    level: LevelOpt,
    description: RawDescription,
    properties: Vec<String>,
}

impl RawRecord {
    pub fn new(
        dt: DateTimeLOpt,
        id: EventId,
        origin: String,
        level: LevelOpt,
        description: RawDescription,
        properties: Vec<String>,
    ) -> RawRecord {
        RawRecord {
            dt,
            id,
            origin,
            level,
            description,
            properties,
        }
    }

    /// A `RawRecord` standing in for an event that could not be read at
    /// all; no field of it is known.
    pub fn unreadable(message: String) -> RawRecord {
        RawRecord {
            dt: None,
            id: 0,
            origin: String::new(),
            level: None,
            description: RawDescription::Unreadable(message),
            properties: Vec::new(),
        }
    }

    pub const fn dt(&self) -> &DateTimeLOpt {
        &self.dt
    }

    pub const fn id(&self) -> EventId {
        self.id
    }

    pub const fn level(&self) -> LevelOpt {
        self.level
    }

    pub const fn is_unreadable(&self) -> bool {
        matches!(self.description, RawDescription::Unreadable(_))
    }
}

/// One normalized event entry retrieved from a source.
///
/// Created while draining a source's cursor; immutable afterward; owned
/// exclusively by the result buffer until rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// instant the event was created at the source
    dt: DateTimeL,
    /// name of the originating source
    source: SourceName,
    /// numeric identifier assigned by the source
    id: EventId,
    /// provider/component string from the source
    origin: String,
    /// resolved human-readable severity name
    severity: &'static str,
    /// free-text description; may span multiple lines
    body: String,
}

impl Record {
    /// Normalize `raw` from `source` into a `Record`.
    ///
    /// An absent timestamp falls back to `dt_fallback` (the run's "now").
    pub fn from_raw(
        raw: RawRecord,
        source: &SourceName,
        dt_fallback: &DateTimeL,
    ) -> Record {
        let severity: &'static str = severity_name(raw.level);
        let body: String = resolve_body(&raw.description, &raw.properties);
        let dt: DateTimeL = match raw.dt {
            Some(dt) => dt,
            None => *dt_fallback,
        };

        Record {
            dt,
            source: source.clone(),
            id: raw.id,
            origin: raw.origin,
            severity,
            body,
        }
    }

    /// Create a new `Record`. Only for testing.
    #[doc(hidden)]
    #[cfg(any(debug_assertions, test))]
    pub fn new_(
        dt: DateTimeL,
        source: &str,
        id: EventId,
        origin: &str,
        severity: &'static str,
        body: &str,
    ) -> Record {
        Record {
            dt,
            source: String::from(source),
            id,
            origin: String::from(origin),
            severity,
            body: String::from(body),
        }
    }

    pub const fn dt(&self) -> &DateTimeL {
        &self.dt
    }

    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    pub const fn id(&self) -> EventId {
        self.id
    }

    pub fn origin(&self) -> &str {
        self.origin.as_str()
    }

    pub const fn severity(&self) -> &'static str {
        self.severity
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// The timestamp as rendered in user-facing output.
    pub fn dt_display(&self) -> String {
        self.dt
            .format(DATETIME_DISPLAY_PATTERN)
            .to_string()
    }
}

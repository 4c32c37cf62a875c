// src/common.rs
//
// common type aliases and other globals (avoids circular imports)

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling, command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;
pub type FileOpenOptions = std::fs::OpenOptions;

/// Name of one event log; a _source_ of events.
pub type SourceName = String;
pub type SourceNames = Vec<SourceName>;

/// A count of anything.
pub type Count = u64;

/// An event severity level as stored by the event log.
///
/// `0` is "LogAlways", `1` is "Critical", through `5`, "Verbose".
/// As a filter ceiling, `0` means "do not filter by level".
pub type Level = u8;
pub type LevelOpt = Option<Level>;

/// Largest valid [`Level`] filter value.
pub const LEVEL_MAX: Level = 5;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// rendering selection and process exit values
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// How the merged event sequence is rendered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputMode {
    /// tab-separated text, one event per line (multi-line bodies indented)
    #[default]
    Text,
    /// semicolon-separated, double-quoted CSV
    Csv,
    /// interactive full-screen table
    Grid,
}

/// Process exit value for a run without fatal errors
/// (zero matching events is not an error).
pub const EXITCODE_SUCCESS: i32 = 0;
/// Process exit value for bad arguments or failed validation.
pub const EXITCODE_BAD_ARGUMENTS: i32 = -1;
/// Process exit value when the set of event log names cannot be retrieved.
pub const EXITCODE_NO_SOURCES: i32 = -2;
/// Process exit value when writing the rendered output fails.
pub const EXITCODE_WRITE_FAILED: i32 = 1;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Results enums for cursor stepping functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result` Extended
/// for functions stepping through a finite sequence where exhaustion
/// is expected and is not an error.
#[derive(Debug, PartialEq)]
pub enum ResultS3<T, E> {
    /// Contains the success data
    Found(T),
    /// Sequence exhausted, or other condition that means "Done", nothing to
    /// return, but no bad errors happened
    Done,
    /// Contains the error value, something bad happened
    Err(E),
}

impl<T, E> ResultS3<T, E> {
    // Querying the contained values

    /// Returns `true` if the result is [`Found`, `Done`].
    #[allow(dead_code)]
    #[must_use = "if you intended to assert that this is ok, consider `.unwrap()` instead"]
    #[inline(always)]
    pub const fn is_ok(&self) -> bool {
        matches!(*self, ResultS3::Found(_) | ResultS3::Done)
    }

    /// Returns `true` if the result is [`Err`].
    #[allow(dead_code)]
    #[must_use = "if you intended to assert that this is err, consider `.unwrap_err()` instead"]
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Returns `true` if the result is [`Found`].
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultS3::Found(_))
    }

    /// Returns `true` if the result is [`Done`].
    #[inline(always)]
    pub const fn is_done(&self) -> bool {
        matches!(*self, ResultS3::Done)
    }

    // Adapter for each variant

    /// Converts from `ResultS3<T, E>` to [`Option<T>`].
    ///
    /// Converts `self` into an [`Option<T>`], consuming `self`,
    /// and discarding the error, if any.
    #[allow(dead_code)]
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultS3::Found(x) => Some(x),
            ResultS3::Done => None,
            ResultS3::Err(_) => None,
        }
    }

    /// Converts from `ResultS3<T, E>` to [`Option<E>`].
    ///
    /// Converts `self` into an [`Option<E>`], consuming `self`,
    /// and discarding the success value, if any.
    #[allow(dead_code)]
    #[inline(always)]
    pub fn err(self) -> Option<E> {
        match self {
            ResultS3::Found(_) => None,
            ResultS3::Done => None,
            ResultS3::Err(x) => Some(x),
        }
    }
}

impl<T, E> std::fmt::Display for ResultS3<T, E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultS3::Found(_) => { write!(f, "ResultS3::Found") },
            ResultS3::Done => { write!(f, "ResultS3::Done") },
            ResultS3::Err(err) => { write!(f, "ResultS3::Err({})", err) },
        }
    }
}

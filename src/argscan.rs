// src/argscan.rs

//! Scan raw command-line tokens into a parameter table; [`ArgScan`].
//!
//! A token beginning with an _introducing character_ names a parameter.
//! The first _separating character_ after the introducer splits the token
//! into a name and a value, `-NAME:VALUE`. A token with an introducer and
//! no separator is a _bare switch_ with an empty value, `-NAME`. One token
//! without any introducing character may be accepted as the _default value_,
//! an implicit parameter. Parameter names are case-folded; the same name
//! given twice is an error, not an overwrite.
//!
//! The scan is one linear pass; every token is classified as exactly one of
//! pair, switch, default value, or error.

use std::collections::BTreeMap;
use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

/// Introducing characters accepted by default; `-NAME` and `/NAME`.
pub const INTRODUCERS_DEFAULT: &[char] = &['-', '/'];

/// Separating characters accepted by default; `NAME=VALUE` and `NAME:VALUE`.
pub const SEPARATORS_DEFAULT: &[char] = &['=', ':'];

/// Pass among the introducers to [`ArgScan::scan`] to accept parameter names
/// with no introducing character at all; the name scan then starts at the
/// first character of the token.
pub const INTRODUCER_NONE: char = '\0';

/// A case-folded parameter name.
pub type ParamName = String;
/// A parameter value; bare switches carry an empty value.
pub type ParamValue = String;

type ParamMap = BTreeMap<ParamName, ParamValue>;

/// Error from [`ArgScan::scan`] or [`ArgScan::check_unknown`].
///
/// The `Display` form is the single diagnostic line shown to the user.
#[derive(Debug, Eq, PartialEq)]
pub enum ArgScanError {
    /// introducing character with no usable name, or a separating character
    /// in the first scanned position
    MalformedToken(String),
    /// the same case-folded parameter name occurred twice
    DuplicateParameter(ParamName),
    /// a second unqualified token when one default value was already set
    DuplicateDefault,
    /// an unqualified token but no default value is allowed
    UnrecognizedToken(String),
    /// a scanned parameter name not among the allowed names
    UnknownParameter(ParamName),
}

impl fmt::Display for ArgScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgScanError::MalformedToken(token) => {
                write!(f, "Error in parameter {}", token)
            }
            ArgScanError::DuplicateParameter(name) => {
                write!(f, "Multiple occurrence of parameter {}", name)
            }
            ArgScanError::DuplicateDefault => {
                write!(f, "Multiple occurrence of the default parameter")
            }
            ArgScanError::UnrecognizedToken(token) => {
                write!(f, "Error in parameter {}", token)
            }
            ArgScanError::UnknownParameter(name) => {
                write!(f, "Unknown parameter {}.", name)
            }
        }
    }
}

/// The scanned parameter table.
///
/// Built once from the full argument vector at process start;
/// read-only afterward.
#[derive(Debug)]
pub struct ArgScan {
    /// case-folded parameter name to value; bare switches map to `""`
    entries: ParamMap,
    /// the single unqualified token, if one was given
    default_value: Option<String>,
}

impl ArgScan {
    /// Scan `tokens` with [`INTRODUCERS_DEFAULT`] and [`SEPARATORS_DEFAULT`],
    /// one unqualified default value allowed.
    pub fn new(tokens: &[String]) -> Result<ArgScan, ArgScanError> {
        ArgScan::scan(tokens, INTRODUCERS_DEFAULT, SEPARATORS_DEFAULT, true)
    }

    /// Scan `tokens` into a parameter table.
    ///
    /// Classification of one token:
    ///
    /// 1. a token beginning with an introducer (every token when
    ///    [`INTRODUCER_NONE`] is among `introducers`) is scanned left to
    ///    right for the first separating character;
    /// 2. separator found after at least one name character: a name+value
    ///    pair; the name is case-folded; a repeated name is an error;
    /// 3. separator found in the first scanned position: error, the name
    ///    is empty;
    /// 4. no separator and at least one character after the introducer:
    ///    a bare switch, same repeated-name check;
    /// 5. no separator and no characters after the introducer: error;
    /// 6. no introducing character: the default value when `allow_default`
    ///    and the default slot is empty, otherwise an error.
    ///
    /// The first erroneous token aborts the scan.
    pub fn scan(
        tokens: &[String],
        introducers: &[char],
        separators: &[char],
        allow_default: bool,
    ) -> Result<ArgScan, ArgScanError> {
        defn!("({} tokens)", tokens.len());
        // `INTRODUCER_NONE` selects the mode where no token requires an
        // introducing character
        let no_introducer: bool = introducers.contains(&INTRODUCER_NONE);
        let mut entries = ParamMap::new();
        let mut default_value: Option<String> = None;
        for token in tokens.iter() {
            let introduced: bool = no_introducer
                || token
                    .chars()
                    .next()
                    .map_or(false, |c| introducers.contains(&c));
            if !introduced {
                // rule 6; the token is the default value
                if !allow_default {
                    defx!("unrecognized token {:?}", token);
                    return Result::Err(ArgScanError::UnrecognizedToken(token.clone()));
                }
                match default_value {
                    None => {
                        defo!("default value {:?}", token);
                        default_value = Some(token.clone());
                    }
                    Some(_) => {
                        defx!("second default value {:?}", token);
                        return Result::Err(ArgScanError::DuplicateDefault);
                    }
                }
                continue;
            }
            // the name scan starts after the introducing character, at the
            // first character when none is required
            let start_byte: usize = match no_introducer {
                true => 0,
                false => token.chars().next().map_or(0, char::len_utf8),
            };
            let scanned: &str = &token[start_byte..];
            match scanned
                .char_indices()
                .find(|(_, c)| separators.contains(c))
            {
                Some((0, _)) => {
                    // rule 3; separating character where the name should begin
                    defx!("separator in first scanned position {:?}", token);
                    return Result::Err(ArgScanError::MalformedToken(token.clone()));
                }
                Some((index, separator)) => {
                    // rule 2; a name+value pair
                    let name: ParamName = scanned[..index].to_uppercase();
                    let value: ParamValue =
                        scanned[index + separator.len_utf8()..].to_string();
                    if entries.contains_key(&name) {
                        defx!("duplicate parameter {:?}", name);
                        return Result::Err(ArgScanError::DuplicateParameter(name));
                    }
                    defo!("parameter {:?} value {:?}", name, value);
                    entries.insert(name, value);
                }
                None if !scanned.is_empty() => {
                    // rule 4; a bare switch
                    let name: ParamName = scanned.to_uppercase();
                    if entries.contains_key(&name) {
                        defx!("duplicate switch {:?}", name);
                        return Result::Err(ArgScanError::DuplicateParameter(name));
                    }
                    defo!("switch {:?}", name);
                    entries.insert(name, ParamValue::new());
                }
                None => {
                    // rule 5; an introducing character and nothing else
                    defx!("nothing after introducer {:?}", token);
                    return Result::Err(ArgScanError::MalformedToken(token.clone()));
                }
            }
        }
        defx!("{} parameters, default value {:?}", entries.len(), default_value);

        Result::Ok(ArgScan {
            entries,
            default_value,
        })
    }

    /// The value of parameter `name` (case-insensitive);
    /// an empty string if the parameter was not given.
    pub fn value(&self, name: &str) -> &str {
        match self.entries.get(&name.to_uppercase()) {
            Some(value) => value.as_str(),
            None => "",
        }
    }

    /// The value of parameter `name` (case-insensitive);
    /// `fallback` if the parameter was not given.
    ///
    /// Chains into an alias-precedence lookup,
    /// `value_or_default("e", value_or_default("end", value("endtime")))`.
    pub fn value_or_default<'a>(
        &'a self,
        name: &str,
        fallback: &'a str,
    ) -> &'a str {
        match self.entries.get(&name.to_uppercase()) {
            Some(value) => value.as_str(),
            None => fallback,
        }
    }

    /// Was parameter `name` given (case-insensitive)?
    /// Bare switches are tested with this.
    pub fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// The unqualified token; an empty string if none was given.
    pub fn default_value(&self) -> &str {
        match &self.default_value {
            Some(value) => value.as_str(),
            None => "",
        }
    }

    /// Every scanned parameter name must match one of `allowed`
    /// (case-insensitive). The first offending name, in the table's sorted
    /// iteration order, fails the whole run.
    pub fn check_unknown(&self, allowed: &[&str]) -> Result<(), ArgScanError> {
        defñ!("({} allowed names)", allowed.len());
        for name in self.entries.keys() {
            if !allowed
                .iter()
                .any(|allow| allow.eq_ignore_ascii_case(name))
            {
                return Result::Err(ArgScanError::UnknownParameter(name.clone()));
            }
        }

        Result::Ok(())
    }
}

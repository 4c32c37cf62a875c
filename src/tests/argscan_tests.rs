// src/tests/argscan_tests.rs

//! tests for `argscan.rs`

#![allow(non_snake_case)]

use ::test_case::test_case;

use crate::argscan::{
    ArgScan,
    ArgScanError,
    INTRODUCERS_DEFAULT,
    INTRODUCER_NONE,
    SEPARATORS_DEFAULT,
};

/// helper to transform `&[&str]` to the `Vec<String>` a scan takes
fn tokens(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| String::from(*s)).collect()
}

/// helper to scan with default settings, panicking on scan errors
fn scan_ok(strs: &[&str]) -> ArgScan {
    ArgScan::new(&tokens(strs)).unwrap()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// token classification
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(&["-level:2"], "level", "2"; "dash colon")]
#[test_case(&["-level=2"], "level", "2"; "dash equals")]
#[test_case(&["/level:2"], "level", "2"; "slash colon")]
#[test_case(&["/level=2"], "level", "2"; "slash equals")]
#[test_case(&["-file:a=b:c"], "file", "a=b:c"; "only first separator splits")]
#[test_case(&["-file:"], "file", ""; "empty value")]
#[test_case(&["-start:2020-01-01 10:00:00"], "start", "2020-01-01 10:00:00"; "value with spaces and colons")]
fn test_scan_pair(
    strs: &[&str],
    name: &str,
    value: &str,
) {
    let args = scan_ok(strs);
    assert!(args.exists(name));
    assert_eq!(args.value(name), value);
}

#[test_case(&["-q"], "q"; "dash")]
#[test_case(&["/GRID"], "grid"; "slash upper")]
#[test_case(&["-?"], "?"; "question mark")]
fn test_scan_switch(
    strs: &[&str],
    name: &str,
) {
    let args = scan_ok(strs);
    assert!(args.exists(name));
    assert_eq!(args.value(name), "");
}

#[test]
fn test_scan_default_value() {
    let args = scan_ok(&["System,Application", "-q"]);
    assert_eq!(args.default_value(), "System,Application");
    assert!(args.exists("q"));
}

#[test]
fn test_scan_no_default_value() {
    let args = scan_ok(&["-q"]);
    assert_eq!(args.default_value(), "");
}

#[test_case(&["-"]; "dash alone")]
#[test_case(&["/"]; "slash alone")]
#[test_case(&["-:value"]; "separator first after dash")]
#[test_case(&["/=value"]; "separator first after slash")]
fn test_scan_malformed(strs: &[&str]) {
    let result = ArgScan::new(&tokens(strs));
    assert!(matches!(result, Err(ArgScanError::MalformedToken(_))));
}

#[test_case(&["-level:1", "-level:2"]; "same token twice")]
#[test_case(&["-level:1", "/LEVEL=2"]; "different introducer separator case")]
#[test_case(&["-q", "/q"]; "switch twice")]
#[test_case(&["-q", "-Q:value"]; "switch then pair")]
fn test_scan_duplicate_parameter(strs: &[&str]) {
    let result = ArgScan::new(&tokens(strs));
    assert!(matches!(result, Err(ArgScanError::DuplicateParameter(_))));
}

#[test]
fn test_scan_duplicate_default() {
    let result = ArgScan::new(&tokens(&["System", "Application"]));
    assert!(matches!(result, Err(ArgScanError::DuplicateDefault)));
}

#[test]
fn test_scan_default_disallowed() {
    let result = ArgScan::scan(
        &tokens(&["System"]),
        INTRODUCERS_DEFAULT,
        SEPARATORS_DEFAULT,
        false,
    );
    assert!(matches!(result, Err(ArgScanError::UnrecognizedToken(_))));
}

/// the first erroneous token aborts the scan
#[test]
fn test_scan_aborts_on_first_error() {
    let result = ArgScan::new(&tokens(&["-q", "-", "-q"]));
    assert!(matches!(result, Err(ArgScanError::MalformedToken(_))));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// INTRODUCER_NONE mode
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_scan_no_introducer_pair() {
    let args = ArgScan::scan(
        &tokens(&["level=2", "quiet"]),
        &[INTRODUCER_NONE],
        SEPARATORS_DEFAULT,
        false,
    )
    .unwrap();
    assert_eq!(args.value("level"), "2");
    assert!(args.exists("quiet"));
}

#[test]
fn test_scan_no_introducer_separator_first() {
    let result = ArgScan::scan(
        &tokens(&["=value"]),
        &[INTRODUCER_NONE],
        SEPARATORS_DEFAULT,
        false,
    );
    assert!(matches!(result, Err(ArgScanError::MalformedToken(_))));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// lookups
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("level"; "lower")]
#[test_case("LEVEL"; "upper")]
#[test_case("Level"; "mixed")]
fn test_lookups_fold_case(name: &str) {
    let args = scan_ok(&["-LeVeL:3"]);
    assert!(args.exists(name));
    assert_eq!(args.value(name), "3");
}

#[test]
fn test_value_of_missing_parameter_is_empty() {
    let args = scan_ok(&[]);
    assert_eq!(args.value("level"), "");
    assert!(!args.exists("level"));
}

#[test_case(&["-e:10:00"], "10:00"; "e set")]
#[test_case(&["-end:11:00"], "11:00"; "end set")]
#[test_case(&["-endtime:12:00"], "12:00"; "endtime set")]
#[test_case(&["-e:10:00", "-end:11:00"], "10:00"; "e wins over end")]
#[test_case(&["-e:", "-end:11:00"], ""; "empty e still wins")]
#[test_case(&[], ""; "none set")]
fn test_value_or_default_alias_chain(
    strs: &[&str],
    value_expect: &str,
) {
    let args = scan_ok(strs);
    let value = args.value_or_default("e", args.value_or_default("end", args.value("endtime")));
    assert_eq!(value, value_expect);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// check_unknown
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_check_unknown_all_allowed() {
    let args = scan_ok(&["-level:2", "/q", "System"]);
    assert!(args.check_unknown(&["level", "q"]).is_ok());
}

#[test]
fn test_check_unknown_rejects() {
    let args = scan_ok(&["-level:2", "-nonsense:1"]);
    let result = args.check_unknown(&["level"]);
    match result {
        Err(ArgScanError::UnknownParameter(name)) => assert_eq!(name, "NONSENSE"),
        other => panic!("expected UnknownParameter, got {:?}", other),
    }
}

/// the default value is not a parameter name; it is never checked
#[test]
fn test_check_unknown_ignores_default_value() {
    let args = scan_ok(&["System,Application"]);
    assert!(args.check_unknown(&[]).is_ok());
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// diagnostics
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(
    ArgScanError::MalformedToken(String::from("-")),
    "Error in parameter -";
    "malformed"
)]
#[test_case(
    ArgScanError::DuplicateParameter(String::from("LEVEL")),
    "Multiple occurrence of parameter LEVEL";
    "duplicate parameter"
)]
#[test_case(
    ArgScanError::DuplicateDefault,
    "Multiple occurrence of the default parameter";
    "duplicate default"
)]
#[test_case(
    ArgScanError::UnrecognizedToken(String::from("System")),
    "Error in parameter System";
    "unrecognized token"
)]
#[test_case(
    ArgScanError::UnknownParameter(String::from("NONSENSE")),
    "Unknown parameter NONSENSE.";
    "unknown parameter"
)]
fn test_error_display(
    err: ArgScanError,
    text_expect: &str,
) {
    assert_eq!(format!("{}", err), text_expect);
}

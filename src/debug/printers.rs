// src/debug/printers.rs

//! Macros for printing user-facing diagnostics, and debug-build variants.
//!
//! Diagnostics print to the standard error stream. Status messages that
//! honor the quiet switch are not printed here; these macros are for
//! errors and warnings that always print.

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `d`ebug `e`println! an `err`or
#[macro_export]
macro_rules! de_err {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions,test))]
            eprint!("ERROR: ");
            #[cfg(any(debug_assertions,test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_err;

/// `d`ebug `e`println! an `warn`ing
#[macro_export]
macro_rules! de_wrn {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions,test))]
            eprint!("WARNING: ");
            #[cfg(any(debug_assertions,test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_wrn;

/// `e`println! an `err`or
#[macro_export]
macro_rules! e_err {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("ERROR: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_err;

/// `e`println! a `warn`ing
#[macro_export]
macro_rules! e_wrn {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("WARNING: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_wrn;

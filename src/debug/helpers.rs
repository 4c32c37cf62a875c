// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use std::io::Write;
use std::path::Path;

use ::si_trace_print::defñ;

#[doc(hidden)]
pub use ::tempfile::tempdir;
#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

use crate::common::FPath;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
///
/// A known prefix eases cleanup of temporary files remaining after
/// testing. See <https://github.com/Stebalien/tempfile/issues/183>.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-ael-test-";

/// Small helper function for copying a `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_str().unwrap())
}

/// Small helper function for naming a path under `tempdir`.
/// No file is created; tests of file creation start from this.
pub fn fpath_in_tmpdir(
    tempdir: &TempDir,
    name: &str,
) -> FPath {
    FPath::from(
        tempdir
            .path()
            .join(name)
            .to_str()
            .unwrap(),
    )
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    defñ!();
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix(STR_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()…tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Create a temporary directory.
pub fn create_temp_dir() -> TempDir {
    defñ!();
    ::tempfile::tempdir().unwrap()
}

/// Testing helper function to write a `[u8]` to exactly-named file `name`
/// within the passed `TempDir`.
pub fn create_file_bytes_in_tmpdir(
    data: &[u8],
    name: &str,
    tempdir: &TempDir,
) -> FPath {
    let path = tempdir.path().join(name);
    defñ!("File::create({:?})", path);
    let mut file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => panic!("File::create({:?}) return Err {}", path, err),
    };
    file.write_all(data).unwrap();

    FPath::from(path.to_str().unwrap())
}

/// Testing helper to create empty exactly-named files within the passed
/// `TempDir`.
pub fn create_files_in_tmpdir(
    tempdir: &TempDir,
    names: &[&str],
) -> Vec<FPath> {
    names
        .iter()
        .map(|name| create_file_bytes_in_tmpdir(&[], name, tempdir))
        .collect()
}

/// Is the file at `path` present and non-empty?
pub fn file_has_content(path: &FPath) -> bool {
    match std::fs::metadata(Path::new(path)) {
        Ok(metadata) => metadata.len() > 0,
        Err(_) => false,
    }
}

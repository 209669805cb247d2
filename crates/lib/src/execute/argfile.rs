//! `@file` argument indirection.
//!
//! protoc reads `@<path>` as a file holding one argument per line, which
//! keeps long source lists clear of OS command-line length limits.

use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::consts::ARGUMENT_FILE_PREFIX;

/// Writes `args` one per line, UTF-8, into a new temp file inside `dir`.
///
/// The file is deleted when the returned handle is dropped.
pub fn write_argument_file(dir: &Path, args: &[String]) -> io::Result<NamedTempFile> {
  let file = Builder::new().prefix(ARGUMENT_FILE_PREFIX).tempfile_in(dir)?;
  {
    let mut writer = BufWriter::new(file.as_file());
    for arg in args {
      writeln!(writer, "{}", arg)?;
    }
    writer.flush()?;
  }
  Ok(file)
}

/// The single argument that points protoc at an argument file.
pub fn argument_file_reference(path: &Path) -> OsString {
  let mut reference = OsString::from("@");
  reference.push(absolute(path));
  reference
}

fn absolute(path: &Path) -> PathBuf {
  dunce::canonicalize(path)
    .or_else(|_| std::path::absolute(path))
    .unwrap_or_else(|_| path.to_path_buf())
}

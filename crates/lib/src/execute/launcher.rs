//! Process creation.
//!
//! The [`Launcher`] trait is the boundary between an invocation and the
//! operating system. [`SystemLauncher`] spawns real processes; tests swap in
//! launchers that fail on demand.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Exit code reported for a process that terminated without one.
pub const NO_EXIT_CODE: i32 = -1;

/// What a started process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
  pub code: i32,
  pub stdout: Vec<u8>,
  pub stderr: Vec<u8>,
}

/// The process could not be launched.
///
/// A failure carrying an underlying cause (the OS refused to create the
/// process, a pipe broke) is considered transient and may be retried. A
/// failure without one is final.
#[derive(Debug, Error)]
#[error("unable to launch {}: {message}", .program.display())]
pub struct LaunchError {
  program: PathBuf,
  message: String,
  #[source]
  cause: Option<io::Error>,
}

impl LaunchError {
  pub fn new(program: impl Into<PathBuf>, message: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      message: message.into(),
      cause: None,
    }
  }

  pub fn with_cause(program: impl Into<PathBuf>, message: impl Into<String>, cause: io::Error) -> Self {
    Self {
      program: program.into(),
      message: message.into(),
      cause: Some(cause),
    }
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  pub fn cause(&self) -> Option<&io::Error> {
    self.cause.as_ref()
  }

  /// Whether another attempt could succeed.
  pub fn is_transient(&self) -> bool {
    self.cause.is_some()
  }
}

/// Spawns a program and waits for it to exit.
pub trait Launcher {
  fn launch(&mut self, program: &Path, args: &[OsString]) -> Result<ProcessOutput, LaunchError>;
}

impl<F> Launcher for F
where
  F: FnMut(&Path, &[OsString]) -> Result<ProcessOutput, LaunchError>,
{
  fn launch(&mut self, program: &Path, args: &[OsString]) -> Result<ProcessOutput, LaunchError> {
    self(program, args)
  }
}

/// Launches real OS processes with no stdin and both output streams piped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
  fn launch(&mut self, program: &Path, args: &[OsString]) -> Result<ProcessOutput, LaunchError> {
    debug!(program = %program.display(), args = args.len(), "spawning process");

    let output = Command::new(program)
      .args(args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .output()
      .map_err(|e| LaunchError::with_cause(program, "error while executing process", e))?;

    Ok(ProcessOutput {
      code: output.status.code().unwrap_or(NO_EXIT_CODE),
      stdout: output.stdout,
      stderr: output.stderr,
    })
  }
}

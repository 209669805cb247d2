//! Running an invocation.
//!
//! Execution renders the command line, optionally moves it into an argument
//! file, then launches protoc. Process creation can fail sporadically on some
//! platforms while the system is under load, so a launch that fails with an
//! underlying OS error is retried a bounded number of times. A process that
//! starts and exits non-zero is never retried.

pub mod argfile;
pub mod launcher;
pub mod types;

use std::ffi::OsString;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::invocation::Invocation;

pub use argfile::{argument_file_reference, write_argument_file};
pub use launcher::{LaunchError, Launcher, NO_EXIT_CODE, ProcessOutput, SystemLauncher};
pub use types::ExecuteError;

/// How often the retry pause checks the interrupt flag.
const INTERRUPT_POLL: Duration = Duration::from_millis(50);

impl Invocation {
  /// Runs protoc and returns its exit code.
  ///
  /// Captured stdout and stderr are appended to this invocation's buffers
  /// and can be read through [`Invocation::output`] and
  /// [`Invocation::error`].
  pub fn execute(&mut self) -> Result<i32, ExecuteError> {
    self.execute_with(&mut SystemLauncher)
  }

  /// Runs protoc through the given launcher.
  pub fn execute_with<L: Launcher + ?Sized>(&mut self, launcher: &mut L) -> Result<i32, ExecuteError> {
    let args = self.command_line();

    // Held until the process has exited; dropping it removes the file.
    let mut argument_file = None;
    if self.config.use_argument_file
      && let Some(dir) = &self.config.temp_directory
    {
      match write_argument_file(dir, &args) {
        Ok(file) => {
          debug!(path = %file.path().display(), "using arguments file");
          argument_file = Some(file);
        }
        Err(e) => {
          error!(error = %e, "error creating file with protoc arguments, passing them directly");
        }
      }
    }

    let process_args: Vec<OsString> = match &argument_file {
      Some(file) => vec![argument_file_reference(file.path())],
      None => args.into_iter().map(OsString::from).collect(),
    };

    let max_attempts = self.config.retry.max_attempts();
    let mut attempt = 0;
    loop {
      attempt += 1;
      match launcher.launch(&self.config.executable, &process_args) {
        Ok(output) => {
          self.output.extend_from_slice(&output.stdout);
          self.error.extend_from_slice(&output.stderr);
          info!(code = output.code, attempt, "protoc finished");
          return Ok(output.code);
        }
        Err(e) => {
          let attempts_left = max_attempts - attempt;
          if attempts_left == 0 || !e.is_transient() {
            return Err(ExecuteError::Launch {
              attempts: attempt,
              source: e,
            });
          }
          warn!(error = %e, attempts_left, "unable to invoke protoc, will retry");
          self.pause()?;
        }
      }
    }
  }

  fn pause(&self) -> Result<(), ExecuteError> {
    let deadline = Instant::now() + self.config.retry.delay();
    loop {
      if let Some(flag) = &self.config.interrupt
        && flag.load(Ordering::SeqCst)
      {
        return Err(ExecuteError::Interrupted);
      }
      let now = Instant::now();
      if now >= deadline {
        return Ok(());
      }
      std::thread::sleep((deadline - now).min(INTERRUPT_POLL));
    }
  }
}

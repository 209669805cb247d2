//! Types for running an invocation.

use thiserror::Error;

use super::launcher::LaunchError;

/// Errors that end an execution without an exit code.
///
/// A compiler that starts and exits non-zero is not an error here; its exit
/// code is returned to the caller.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// Launching failed and no attempts remain, or the failure had no cause.
  #[error("protoc launch failed after {attempts} attempt(s): {source}")]
  Launch {
    attempts: u32,
    #[source]
    source: LaunchError,
  },

  /// The interrupt flag was raised while waiting to retry.
  #[error("interrupted while waiting to retry protoc launch")]
  Interrupted,
}

impl ExecuteError {
  /// The launch error of the final attempt, if launching is what failed.
  pub fn launch_error(&self) -> Option<&LaunchError> {
    match self {
      ExecuteError::Launch { source, .. } => Some(source),
      ExecuteError::Interrupted => None,
    }
  }
}

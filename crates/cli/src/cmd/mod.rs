mod render;
mod run;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use protorun_lib::{Invocation, InvocationFile, RetryPolicy};

pub use render::cmd_render;
pub use run::cmd_run;

/// Options shared by every command that loads an invocation file.
#[derive(Debug, Args)]
pub struct InvocationArgs {
  /// Path to the invocation file
  #[arg(default_value = "protorun.json")]
  pub file: PathBuf,

  /// protoc executable (defaults to $PROTOC, then `protoc` on PATH)
  #[arg(long)]
  pub protoc: Option<PathBuf>,

  /// Maximum launch attempts when process creation fails
  #[arg(long, default_value_t = RetryPolicy::DEFAULT_ATTEMPTS)]
  pub attempts: u32,

  /// Pause between launch attempts (e.g. "1s", "250ms")
  #[arg(long, value_parser = humantime::parse_duration)]
  pub retry_delay: Option<Duration>,
}

impl InvocationArgs {
  pub fn load(&self) -> Result<Invocation> {
    let mut builder = InvocationFile::load_builder(&self.file, self.protoc.as_deref())
      .with_context(|| format!("Failed to load invocation file: {}", self.file.display()))?;

    let delay = self.retry_delay.unwrap_or(RetryPolicy::DEFAULT_DELAY);
    builder.retry_policy(RetryPolicy::new(self.attempts, delay));

    let invocation = builder.build().context("Invalid invocation")?;
    debug!(file = %self.file.display(), "invocation ready");
    Ok(invocation)
  }
}

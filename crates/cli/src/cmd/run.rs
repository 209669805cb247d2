//! Implementation of the `protorun run` command.
//!
//! Loads an invocation file, runs protoc and relays its captured output. The
//! compiler's exit code becomes the exit code of this command.

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cmd::InvocationArgs;
use crate::output::{OutputFormat, format_duration, print_error, print_info, print_json, print_success, print_warning};

#[derive(Debug, Serialize)]
struct RunReport {
  exit_code: i32,
  arguments: Vec<String>,
  stdout: String,
  stderr: String,
  duration_ms: u128,
}

pub fn cmd_run(args: &InvocationArgs, output: OutputFormat) -> Result<i32> {
  let start = Instant::now();

  let mut invocation = args.load()?;
  invocation.log_execution_parameters();
  if !output.is_json() {
    print_info(&format!("Running {}", invocation.executable().display()));
  }

  let code = match invocation.execute() {
    Ok(code) => code,
    Err(err) => {
      if !output.is_json()
        && let Some(launch) = err.launch_error()
      {
        print_warning(&format!(
          "Check that {} exists and is executable, or set --protoc / $PROTOC",
          launch.program().display()
        ));
      }
      return Err(err).with_context(|| format!("Failed to run {}", invocation.executable().display()));
    }
  };

  let stdout = invocation.output();
  let stderr = invocation.error();

  if output.is_json() {
    print_json(&RunReport {
      exit_code: code,
      arguments: invocation.command_line(),
      stdout,
      stderr,
      duration_ms: start.elapsed().as_millis(),
    })?;
    return Ok(code);
  }

  print!("{}", stdout);
  eprint!("{}", stderr);

  if code == 0 {
    if !stderr.is_empty() {
      print_warning("protoc reported warnings");
    }
    print_success(&format!("protoc finished in {}", format_duration(start.elapsed())));
  } else {
    print_error(&format!("protoc exited with code {}", code));
  }

  Ok(code)
}

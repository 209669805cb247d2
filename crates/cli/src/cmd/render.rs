//! Implementation of the `protorun render` command.
//!
//! Prints the argument list protoc would receive, without running it.

use anyhow::Result;

use crate::cmd::InvocationArgs;
use crate::output::{OutputFormat, print_json};

pub fn cmd_render(args: &InvocationArgs, output: OutputFormat) -> Result<()> {
  let invocation = args.load()?;
  invocation.log_execution_parameters();

  let command = invocation.command_line();
  if output.is_json() {
    print_json(&serde_json::json!({
      "executable": invocation.executable(),
      "arguments": command,
    }))?;
  } else {
    for arg in &command {
      println!("{}", arg);
    }
  }

  Ok(())
}

mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{InvocationArgs, cmd_render, cmd_run};
use output::{OutputFormat, print_error};

/// protorun - Render and run protoc invocations
#[derive(Parser)]
#[command(name = "protorun")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the protoc arguments described by an invocation file
  Render {
    #[command(flatten)]
    invocation: InvocationArgs,
  },

  /// Run protoc as described by an invocation file
  Run {
    #[command(flatten)]
    invocation: InvocationArgs,
  },
}

fn main() {
  let cli = Cli::parse();

  // RUST_LOG wins over --verbose
  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .without_time()
    .with_writer(std::io::stderr)
    .init();

  match dispatch(&cli) {
    Ok(0) => {}
    Ok(code) => std::process::exit(code),
    Err(err) => {
      print_error(&format!("{:#}", err));
      std::process::exit(1);
    }
  }
}

fn dispatch(cli: &Cli) -> Result<i32> {
  match &cli.command {
    Commands::Render { invocation } => cmd_render(invocation, cli.output).map(|()| 0),
    Commands::Run { invocation } => cmd_run(invocation, cli.output),
  }
}

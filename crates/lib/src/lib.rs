//! protorun-lib: Core types and logic for driving protoc
//!
//! This crate turns a validated set of build options into an exact protoc
//! command line and runs it:
//! - `InvocationBuilder`: fail-fast accumulation of import paths, sources,
//!   output directories, plugins and descriptor-set options
//! - `Invocation`: the immutable result; renders, logs and executes
//! - `PluginDescriptor`: a custom `protoc-gen-<id>` code generator
//! - `InvocationFile`: JSON form of an invocation

pub mod config;
pub mod consts;
pub mod execute;
pub mod invocation;
pub mod plugin;


pub use config::{InvocationFile, InvocationFileError};
pub use execute::{ExecuteError, LaunchError, Launcher, ProcessOutput, SystemLauncher};
pub use invocation::{ConfigError, Invocation, InvocationBuilder, OutputTarget, RetryPolicy};
pub use plugin::PluginDescriptor;

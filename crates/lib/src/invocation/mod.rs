//! Compiler invocations.
//!
//! An [`Invocation`] is an immutable, validated protoc configuration produced
//! by an [`InvocationBuilder`]. It renders the exact argument list protoc
//! expects, logs its configuration for troubleshooting, and runs the compiler
//! (see [`crate::execute`]).
//!
//! # Submodules
//!
//! - [`builder`] - fail-fast configuration accumulator
//! - `command` - argument rendering
//! - `diagnostics` - debug dump of the configuration

pub mod builder;
mod command;
mod diagnostics;
mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use builder::InvocationBuilder;
pub use types::*;

use crate::plugin::PluginDescriptor;

/// A fully configured compiler invocation.
///
/// The configuration never changes after construction. The only mutable
/// state is the pair of buffers collecting the compiler's stdout and stderr,
/// which [`Invocation::execute`] appends to.
#[derive(Debug)]
pub struct Invocation {
  pub(crate) config: InvocationConfig,
  pub(crate) output: Vec<u8>,
  pub(crate) error: Vec<u8>,
}

impl Invocation {
  pub(crate) fn new(config: InvocationConfig) -> Self {
    Self {
      config,
      output: Vec::new(),
      error: Vec::new(),
    }
  }

  pub fn executable(&self) -> &Path {
    &self.config.executable
  }

  pub fn import_paths(&self) -> &[PathBuf] {
    &self.config.import_paths
  }

  pub fn source_files(&self) -> &[PathBuf] {
    &self.config.source_files
  }

  pub fn output_directories(&self) -> &BTreeMap<OutputTarget, PathBuf> {
    &self.config.outputs
  }

  pub fn output_directory(&self, target: OutputTarget) -> Option<&Path> {
    self.config.outputs.get(&target).map(PathBuf::as_path)
  }

  pub fn plugins(&self) -> &[PluginDescriptor] {
    &self.config.plugins
  }

  pub fn plugin_directory(&self) -> Option<&Path> {
    self.config.plugin_directory.as_deref()
  }

  pub fn native_plugin(&self) -> &NativePlugin {
    &self.config.native_plugin
  }

  pub fn descriptor_set(&self) -> Option<&DescriptorSet> {
    self.config.descriptor_set.as_ref()
  }

  pub fn uses_argument_file(&self) -> bool {
    self.config.use_argument_file
  }

  pub fn retry_policy(&self) -> RetryPolicy {
    self.config.retry
  }

  /// Captured standard output of every execution so far.
  pub fn output(&self) -> String {
    String::from_utf8_lossy(&self.output).into_owned()
  }

  /// Captured standard error of every execution so far.
  pub fn error(&self) -> String {
    String::from_utf8_lossy(&self.error).into_owned()
  }
}

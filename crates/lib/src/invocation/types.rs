//! Types shared by the invocation builder, renderer and executor.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plugin::PluginDescriptor;

/// A code-generation target that protoc writes into a directory.
///
/// The declaration order is the order in which output flags are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
  /// Primary managed language; custom plugins ride on its directory.
  Java,
  #[serde(rename = "javanano")]
  JavaNano,
  Cpp,
  Python,
  /// Output of the native (non-managed) plugin.
  Custom,
}

impl OutputTarget {
  /// Returns the builder field name used in error messages.
  pub fn field(&self) -> &'static str {
    match self {
      Self::Java => "java_output_directory",
      Self::JavaNano => "javanano_output_directory",
      Self::Cpp => "cpp_output_directory",
      Self::Python => "python_output_directory",
      Self::Custom => "custom_output_directory",
    }
  }

  /// Human-readable label for diagnostics.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Java => "Java",
      Self::JavaNano => "Java Nano",
      Self::Cpp => "C++",
      Self::Python => "Python",
      Self::Custom => "Custom",
    }
  }
}

impl fmt::Display for OutputTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// Where and how to write the serialized descriptor set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSet {
  pub path: PathBuf,
  pub include_imports: bool,
  pub include_source_info: bool,
}

/// The native plugin driving the custom output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativePlugin {
  pub id: Option<String>,
  /// When unset, protoc finds `protoc-gen-<id>` on its own search path.
  pub executable: Option<PathBuf>,
  /// Also applied as the prefix of `--javanano_out`.
  pub parameter: Option<String>,
}

/// Bounds on retrying a process launch that failed before the process started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  max_attempts: u32,
  delay: Duration,
}

impl RetryPolicy {
  pub const DEFAULT_ATTEMPTS: u32 = 3;
  pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

  /// Creates a policy; at least one attempt is always made.
  pub fn new(max_attempts: u32, delay: Duration) -> Self {
    Self {
      max_attempts: max_attempts.max(1),
      delay,
    }
  }

  pub fn max_attempts(&self) -> u32 {
    self.max_attempts
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_DELAY)
  }
}

/// Fully validated configuration of one compiler invocation.
#[derive(Debug, Clone)]
pub struct InvocationConfig {
  pub(crate) executable: PathBuf,
  pub(crate) import_paths: Vec<PathBuf>,
  pub(crate) source_files: Vec<PathBuf>,
  pub(crate) outputs: BTreeMap<OutputTarget, PathBuf>,
  pub(crate) plugins: Vec<PluginDescriptor>,
  pub(crate) plugin_directory: Option<PathBuf>,
  pub(crate) native_plugin: NativePlugin,
  pub(crate) descriptor_set: Option<DescriptorSet>,
  pub(crate) use_argument_file: bool,
  pub(crate) temp_directory: Option<PathBuf>,
  pub(crate) retry: RetryPolicy,
  pub(crate) interrupt: Option<Arc<AtomicBool>>,
}

impl InvocationConfig {
  pub(crate) fn new(executable: PathBuf) -> Self {
    Self {
      executable,
      import_paths: Vec::new(),
      source_files: Vec::new(),
      outputs: BTreeMap::new(),
      plugins: Vec::new(),
      plugin_directory: None,
      native_plugin: NativePlugin::default(),
      descriptor_set: None,
      use_argument_file: false,
      temp_directory: None,
      retry: RetryPolicy::default(),
      interrupt: None,
    }
  }
}

/// Errors raised while configuring an invocation.
///
/// All of them are reported at the builder call that caused them and are
/// never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("'{field}' must not be empty")]
  Empty { field: &'static str },

  #[error("'{field}' is not a directory: {path}")]
  NotADirectory { field: &'static str, path: PathBuf },

  #[error("'{field}' is not a file: {path}")]
  NotAFile { field: &'static str, path: PathBuf },

  #[error("'{field}' is not valid UTF-8: {path}")]
  NonUtf8Path { field: &'static str, path: PathBuf },

  #[error("source file must have the .{extension} extension: {path}")]
  WrongExtension { path: PathBuf, extension: &'static str },

  #[error("source file is not under any registered import path: {path}")]
  NotInImportPath { path: PathBuf },

  #[error("'native_plugin_id' matches one of the built-in protoc plugins: {id}")]
  ReservedPluginId { id: String },

  #[error("'native_plugin_parameter' contains illegal character '{character}': {parameter}")]
  IllegalParameter { parameter: String, character: char },

  #[error("parent directory of '{field}' does not exist: {path}")]
  MissingParent { field: &'static str, path: PathBuf },

  #[error(
    "at least one of these properties must be set: 'java_output_directory', \
     'javanano_output_directory', 'cpp_output_directory', 'python_output_directory' \
     or 'custom_output_directory'"
  )]
  NoOutputDirectory,

  #[error("no source files were added")]
  NoSourceFiles,

  #[error("'custom_output_directory' requires 'native_plugin_id'")]
  MissingNativePluginId,

  #[error("argument file mode requires 'temp_directory'")]
  MissingTempDirectory,
}

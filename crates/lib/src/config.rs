//! Invocation files.
//!
//! An invocation file is a JSON description of one protoc run, mapped field
//! by field onto an [`InvocationBuilder`]:
//!
//! ```json
//! {
//!   "import_paths": ["proto"],
//!   "source_files": ["proto/service.proto"],
//!   "outputs": { "java": "gen/java", "python": "gen/py" },
//!   "plugins": ["grpc-java"],
//!   "plugin_directory": "tools/plugins",
//!   "descriptor_set": { "path": "gen/service.pb", "include_imports": true }
//! }
//! ```
//!
//! Relative paths are resolved against the directory containing the file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_EXECUTABLE, PROTOC_ENV};
use crate::invocation::{ConfigError, InvocationBuilder, OutputTarget};
use crate::plugin::PluginDescriptor;

#[derive(Debug, Error)]
pub enum InvocationFileError {
  #[error("failed to read invocation file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse invocation file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error(transparent)]
  Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativePluginEntry {
  pub id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub executable: Option<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parameter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptorSetEntry {
  pub path: PathBuf,
  #[serde(default)]
  pub include_imports: bool,
  #[serde(default)]
  pub include_source_info: bool,
}

/// On-disk form of an invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvocationFile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub executable: Option<PathBuf>,
  #[serde(default)]
  pub import_paths: Vec<PathBuf>,
  #[serde(default)]
  pub source_files: Vec<PathBuf>,
  #[serde(default)]
  pub outputs: BTreeMap<OutputTarget, PathBuf>,
  #[serde(default)]
  pub plugins: Vec<PluginDescriptor>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plugin_directory: Option<PathBuf>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub native_plugin: Option<NativePluginEntry>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub descriptor_set: Option<DescriptorSetEntry>,
  #[serde(default)]
  pub use_argument_file: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub temp_directory: Option<PathBuf>,
}

impl InvocationFile {
  /// Reads and parses an invocation file.
  pub fn load(path: &Path) -> Result<Self, InvocationFileError> {
    let content = fs::read_to_string(path).map_err(|source| InvocationFileError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| InvocationFileError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Loads `path` and turns it into a builder, resolving relative paths
  /// against the file's directory.
  pub fn load_builder(path: &Path, executable: Option<&Path>) -> Result<InvocationBuilder, InvocationFileError> {
    let file = Self::load(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    debug!(path = %path.display(), base = %base.display(), "loaded invocation file");
    Ok(file.to_builder(base, executable)?)
  }

  /// Applies every field to a fresh builder.
  ///
  /// `executable` overrides the file's own `executable`; when neither is
  /// set, [`resolve_executable`] picks one.
  pub fn to_builder(&self, base: &Path, executable: Option<&Path>) -> Result<InvocationBuilder, ConfigError> {
    let executable = match executable {
      Some(explicit) => Some(explicit.to_path_buf()),
      None => self.executable.as_deref().map(|program| resolve_program(base, program)),
    };
    let mut builder = InvocationBuilder::new(resolve_executable(executable))?;

    let resolve = |p: &PathBuf| base.join(p);

    builder.add_import_paths(self.import_paths.iter().map(resolve))?;
    builder.add_source_files(self.source_files.iter().map(resolve))?;

    for (target, dir) in &self.outputs {
      builder.output_directory(*target, resolve(dir))?;
    }

    if let Some(dir) = &self.plugin_directory {
      builder.plugin_directory(resolve(dir))?;
    }
    for plugin in &self.plugins {
      builder.add_plugin(plugin.clone())?;
    }

    if let Some(native) = &self.native_plugin {
      builder.native_plugin_id(native.id.as_str())?;
      if let Some(executable) = &native.executable {
        builder.native_plugin_executable(resolve_program(base, executable))?;
      }
      if let Some(parameter) = &native.parameter {
        builder.native_plugin_parameter(parameter.as_str())?;
      }
    }

    if let Some(set) = &self.descriptor_set {
      builder.descriptor_set_file(resolve(&set.path), set.include_imports, set.include_source_info)?;
    }

    if let Some(dir) = &self.temp_directory {
      builder.temp_directory(resolve(dir))?;
    }
    builder.use_argument_file(self.use_argument_file);

    Ok(builder)
  }
}

/// Picks the protoc executable: the explicit value, else `$PROTOC`, else
/// `protoc` from `PATH`.
pub fn resolve_executable(explicit: Option<PathBuf>) -> PathBuf {
  if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
    return path;
  }
  match std::env::var_os(PROTOC_ENV) {
    Some(value) if !value.is_empty() => PathBuf::from(value),
    _ => PathBuf::from(DEFAULT_EXECUTABLE),
  }
}

/// Bare program names stay untouched so they are looked up on `PATH`.
fn resolve_program(base: &Path, program: &Path) -> PathBuf {
  if program.components().count() > 1 {
    base.join(program)
  } else {
    program.to_path_buf()
  }
}

//! Custom code-generator plugins.
//!
//! A plugin is a `protoc-gen-<id>` executable that protoc drives through its
//! plugin protocol. The descriptor only knows the plugin's id; where the
//! executable lives is decided by the plugin directory handed to
//! [`PluginDescriptor::executable_in`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::PLUGIN_PREFIX;

/// Identifies a single custom code-generator plugin.
///
/// Two descriptors with the same id are the same plugin, whatever else they
/// carry, so they collapse when collected into a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginDescriptor {
  id: String,
}

impl PluginDescriptor {
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into() }
  }

  /// The generator name used in `--<id>_out=` and `--plugin=protoc-gen-<id>=`.
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Name of the executable protoc looks for, e.g. `protoc-gen-grpc-java`.
  pub fn executable_name(&self) -> String {
    format!("{}{}{}", PLUGIN_PREFIX, self.id, std::env::consts::EXE_SUFFIX)
  }

  /// Resolves the plugin executable inside `directory`.
  ///
  /// Without a directory the bare executable name is returned and protoc is
  /// left to find it on `PATH`.
  pub fn executable_in(&self, directory: Option<&Path>) -> PathBuf {
    match directory {
      Some(dir) => dir.join(self.executable_name()),
      None => PathBuf::from(self.executable_name()),
    }
  }
}

impl PartialEq for PluginDescriptor {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for PluginDescriptor {}

impl Hash for PluginDescriptor {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Display for PluginDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.id)
  }
}

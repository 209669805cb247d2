use tracing::{Level, debug};

use super::{Invocation, OutputTarget};

impl Invocation {
  /// Dumps the resolved configuration and the rendered command line at debug
  /// level. Does nothing when debug logging is disabled.
  pub fn log_execution_parameters(&self) {
    if !tracing::enabled!(Level::DEBUG) {
      return;
    }
    let config = &self.config;

    debug!(executable = %config.executable.display(), "protoc executable");

    for import_path in &config.import_paths {
      debug!(path = %import_path.display(), "import path");
    }

    for (target, dir) in &config.outputs {
      debug!(target = %target, dir = %dir.display(), "output directory");
      if *target == OutputTarget::Java {
        for plugin in &config.plugins {
          debug!(plugin = %plugin, "plugin for Java output");
        }
      }
    }

    if let Some(dir) = &config.plugin_directory {
      debug!(dir = %dir.display(), "plugin directory");
    }

    let native = &config.native_plugin;
    if let Some(id) = &native.id {
      debug!(
        id = %id,
        executable = ?native.executable,
        parameter = ?native.parameter,
        "native plugin"
      );
    }

    if let Some(descriptor_set) = &config.descriptor_set {
      debug!(
        path = %descriptor_set.path.display(),
        include_imports = descriptor_set.include_imports,
        include_source_info = descriptor_set.include_source_info,
        "descriptor set output"
      );
    }

    for source in &config.source_files {
      debug!(path = %source.display(), "protobuf source");
    }

    let command = self.command_line();
    if !command.is_empty() {
      debug!(command = %command.join(" "), "command line options");
    }
  }
}

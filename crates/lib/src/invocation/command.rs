use std::path::Path;

use crate::consts::{PARAMETER_SEPARATOR, PLUGIN_PREFIX};

use super::{Invocation, OutputTarget};

impl Invocation {
  /// Renders the protoc arguments, excluding the executable itself.
  ///
  /// Ordering: import paths, Java output with its plugins, the remaining
  /// managed outputs, the custom generator, source files, then the
  /// descriptor-set options. Rendering is pure and deterministic.
  pub fn command_line(&self) -> Vec<String> {
    let config = &self.config;
    let mut command = Vec::new();

    for import_path in &config.import_paths {
      command.push(format!("--proto_path={}", import_path.display()));
    }

    // All plugins share the Java output directory.
    if let Some(java_out) = config.outputs.get(&OutputTarget::Java) {
      command.push(format!("--java_out={}", java_out.display()));
      for plugin in &config.plugins {
        let executable = plugin.executable_in(config.plugin_directory.as_deref());
        command.push(plugin_flag(plugin.id(), &executable));
        command.push(format!("--{}_out={}", plugin.id(), java_out.display()));
      }
    }

    let parameter = config.native_plugin.parameter.as_deref();
    if let Some(dir) = config.outputs.get(&OutputTarget::JavaNano) {
      command.push(out_flag("javanano", parameter, dir));
    }
    if let Some(dir) = config.outputs.get(&OutputTarget::Cpp) {
      command.push(out_flag("cpp", None, dir));
    }
    if let Some(dir) = config.outputs.get(&OutputTarget::Python) {
      command.push(out_flag("python", None, dir));
    }

    if let (Some(dir), Some(id)) = (
      config.outputs.get(&OutputTarget::Custom),
      config.native_plugin.id.as_deref(),
    ) {
      if let Some(executable) = &config.native_plugin.executable {
        command.push(plugin_flag(id, executable));
      }
      command.push(out_flag(id, parameter, dir));
    }

    for source in &config.source_files {
      command.push(source.display().to_string());
    }

    if let Some(descriptor_set) = &config.descriptor_set {
      command.push(format!("--descriptor_set_out={}", descriptor_set.path.display()));
      if descriptor_set.include_imports {
        command.push("--include_imports".to_string());
      }
      if descriptor_set.include_source_info {
        command.push("--include_source_info".to_string());
      }
    }

    command
  }
}

fn plugin_flag(id: &str, executable: &Path) -> String {
  format!("--plugin={}{}={}", PLUGIN_PREFIX, id, executable.display())
}

fn out_flag(generator: &str, parameter: Option<&str>, dir: &Path) -> String {
  match parameter {
    Some(parameter) => format!("--{}_out={}{}{}", generator, parameter, PARAMETER_SEPARATOR, dir.display()),
    None => format!("--{}_out={}", generator, dir.display()),
  }
}

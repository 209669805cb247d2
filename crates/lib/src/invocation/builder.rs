//! Fail-fast accumulation of invocation settings.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::trace;

use crate::consts::{BUILTIN_GENERATORS, PARAMETER_SEPARATOR, SOURCE_EXTENSION};
use crate::plugin::PluginDescriptor;

use super::Invocation;
use super::types::{ConfigError, DescriptorSet, InvocationConfig, OutputTarget, RetryPolicy};

/// Accumulates and validates the configuration of a compiler invocation.
///
/// Every setter checks its argument immediately and returns a [`ConfigError`]
/// naming the offending field, so a bad configuration never reaches
/// [`InvocationBuilder::build`]. Paths, sources and plugins accumulate into
/// insertion-ordered, duplicate-free collections.
///
/// ```no_run
/// # use protorun_lib::invocation::InvocationBuilder;
/// # fn main() -> Result<(), protorun_lib::invocation::ConfigError> {
/// let invocation = InvocationBuilder::new("protoc")?
///   .add_import_path("proto")?
///   .add_source_file("proto/service.proto")?
///   .java_output_directory("target/generated")?
///   .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InvocationBuilder {
  config: InvocationConfig,
}

impl InvocationBuilder {
  pub fn new(executable: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let executable = executable.into();
    if executable.as_os_str().is_empty() {
      return Err(ConfigError::Empty { field: "executable" });
    }
    let executable = utf8("executable", executable)?;
    Ok(Self {
      config: InvocationConfig::new(executable),
    })
  }

  /// Registers a directory searched for imported definitions.
  pub fn add_import_path(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    let path = directory("import_path", path.into())?;
    if !self.config.import_paths.contains(&path) {
      self.config.import_paths.push(path);
    }
    Ok(self)
  }

  pub fn add_import_paths<I, P>(&mut self, paths: I) -> Result<&mut Self, ConfigError>
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    for path in paths {
      self.add_import_path(path)?;
    }
    Ok(self)
  }

  /// Adds a definition file to compile.
  ///
  /// The file must already sit under one of the registered import paths, so
  /// import paths have to be added first.
  pub fn add_source_file(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    let path = utf8("source_file", path.into())?;
    if path.as_os_str().is_empty() {
      return Err(ConfigError::Empty { field: "source_file" });
    }
    if !path.is_file() {
      return Err(ConfigError::NotAFile {
        field: "source_file",
        path,
      });
    }
    if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
      return Err(ConfigError::WrongExtension {
        path,
        extension: SOURCE_EXTENSION,
      });
    }
    if !self.is_in_import_path(&path) {
      return Err(ConfigError::NotInImportPath { path });
    }
    if !self.config.source_files.contains(&path) {
      self.config.source_files.push(path);
    }
    Ok(self)
  }

  pub fn add_source_files<I, P>(&mut self, paths: I) -> Result<&mut Self, ConfigError>
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    for path in paths {
      self.add_source_file(path)?;
    }
    Ok(self)
  }

  pub fn java_output_directory(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    self.output_directory(OutputTarget::Java, path.into())
  }

  pub fn javanano_output_directory(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    self.output_directory(OutputTarget::JavaNano, path.into())
  }

  pub fn cpp_output_directory(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    self.output_directory(OutputTarget::Cpp, path.into())
  }

  pub fn python_output_directory(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    self.output_directory(OutputTarget::Python, path.into())
  }

  pub fn custom_output_directory(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    self.output_directory(OutputTarget::Custom, path.into())
  }

  /// Sets the directory for any output target.
  pub fn output_directory(&mut self, target: OutputTarget, path: PathBuf) -> Result<&mut Self, ConfigError> {
    let path = directory(target.field(), path)?;
    self.config.outputs.insert(target, path);
    Ok(self)
  }

  /// Binds a plugin to the Java output directory.
  pub fn add_plugin(&mut self, plugin: PluginDescriptor) -> Result<&mut Self, ConfigError> {
    if plugin.id().is_empty() {
      return Err(ConfigError::Empty { field: "plugin" });
    }
    if !self.config.plugins.contains(&plugin) {
      self.config.plugins.push(plugin);
    }
    Ok(self)
  }

  pub fn plugin_directory(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    self.config.plugin_directory = Some(directory("plugin_directory", path.into())?);
    Ok(self)
  }

  /// Names the native plugin that writes the custom output directory.
  pub fn native_plugin_id(&mut self, id: impl Into<String>) -> Result<&mut Self, ConfigError> {
    let id = id.into();
    if id.is_empty() {
      return Err(ConfigError::Empty {
        field: "native_plugin_id",
      });
    }
    if BUILTIN_GENERATORS.contains(&id.as_str()) {
      return Err(ConfigError::ReservedPluginId { id });
    }
    self.config.native_plugin.id = Some(id);
    Ok(self)
  }

  pub fn native_plugin_executable(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    let path = utf8("native_plugin_executable", path.into())?;
    if path.as_os_str().is_empty() {
      return Err(ConfigError::Empty {
        field: "native_plugin_executable",
      });
    }
    self.config.native_plugin.executable = Some(path);
    Ok(self)
  }

  /// Sets the parameter string passed ahead of the output directory.
  pub fn native_plugin_parameter(&mut self, parameter: impl Into<String>) -> Result<&mut Self, ConfigError> {
    let parameter = parameter.into();
    if parameter.contains(PARAMETER_SEPARATOR) {
      return Err(ConfigError::IllegalParameter {
        parameter,
        character: PARAMETER_SEPARATOR,
      });
    }
    self.config.native_plugin.parameter = Some(parameter);
    Ok(self)
  }

  /// Requests a serialized descriptor set at `path`.
  pub fn descriptor_set_file(
    &mut self,
    path: impl Into<PathBuf>,
    include_imports: bool,
    include_source_info: bool,
  ) -> Result<&mut Self, ConfigError> {
    let path = utf8("descriptor_set_file", path.into())?;
    if path.as_os_str().is_empty() {
      return Err(ConfigError::Empty {
        field: "descriptor_set_file",
      });
    }
    // A bare file name lives in the current directory.
    let parent_exists = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
      _ => Path::new(".").is_dir(),
    };
    if !parent_exists {
      return Err(ConfigError::MissingParent {
        field: "descriptor_set_file",
        path,
      });
    }
    self.config.descriptor_set = Some(DescriptorSet {
      path,
      include_imports,
      include_source_info,
    });
    Ok(self)
  }

  /// Passes the arguments through an `@file` instead of the command line.
  pub fn use_argument_file(&mut self, enabled: bool) -> &mut Self {
    self.config.use_argument_file = enabled;
    self
  }

  /// Directory in which the argument file is created.
  pub fn temp_directory(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, ConfigError> {
    self.config.temp_directory = Some(directory("temp_directory", path.into())?);
    Ok(self)
  }

  pub fn retry_policy(&mut self, policy: RetryPolicy) -> &mut Self {
    self.config.retry = policy;
    self
  }

  /// Installs a flag that, once raised, aborts the pause between retries.
  pub fn interrupt_flag(&mut self, flag: Arc<AtomicBool>) -> &mut Self {
    self.config.interrupt = Some(flag);
    self
  }

  /// Validates cross-field constraints and produces an [`Invocation`].
  ///
  /// The invocation receives its own copy of the configuration; changing
  /// the builder afterwards does not affect it.
  pub fn build(&self) -> Result<Invocation, ConfigError> {
    let config = &self.config;
    if config.source_files.is_empty() {
      return Err(ConfigError::NoSourceFiles);
    }
    if config.outputs.is_empty() {
      return Err(ConfigError::NoOutputDirectory);
    }
    if config.outputs.contains_key(&OutputTarget::Custom) && config.native_plugin.id.is_none() {
      return Err(ConfigError::MissingNativePluginId);
    }
    if config.use_argument_file && config.temp_directory.is_none() {
      return Err(ConfigError::MissingTempDirectory);
    }
    Ok(Invocation::new(config.clone()))
  }

  /// Walks the file's ancestors until a registered import path is found.
  fn is_in_import_path(&self, file: &Path) -> bool {
    let mut current = file.parent();
    while let Some(dir) = current {
      if self.config.import_paths.iter().any(|p| p == dir) {
        trace!(file = %file.display(), import_path = %dir.display(), "source file resolved");
        return true;
      }
      current = dir.parent();
    }
    false
  }
}

fn utf8(field: &'static str, path: PathBuf) -> Result<PathBuf, ConfigError> {
  if path.to_str().is_none() {
    return Err(ConfigError::NonUtf8Path { field, path });
  }
  Ok(path)
}

fn directory(field: &'static str, path: PathBuf) -> Result<PathBuf, ConfigError> {
  let path = utf8(field, path)?;
  if path.as_os_str().is_empty() {
    return Err(ConfigError::Empty { field });
  }
  if !path.is_dir() {
    return Err(ConfigError::NotADirectory { field, path });
  }
  Ok(path)
}

//! Runs invocations against stand-in compiler scripts.

use std::path::Path;

use protorun_lib::ExecuteError;

use super::common::Project;
#[cfg(unix)]
use super::common::ECHO_ARGS;

#[test]
#[cfg(unix)]
fn executes_with_rendered_arguments() {
  let project = Project::new();
  let protoc = project.script("protoc", ECHO_ARGS);
  let mut invocation = project.builder(&protoc).build().unwrap();

  let code = invocation.execute().unwrap();

  assert_eq!(code, 0);
  let printed: Vec<String> = invocation.output().lines().map(str::to_string).collect();
  assert_eq!(printed, invocation.command_line());
  assert_eq!(invocation.error(), "");
}

#[test]
#[cfg(unix)]
fn argument_file_is_expanded_by_the_compiler() {
  let project = Project::new();
  let protoc = project.script("protoc", ECHO_ARGS);
  let temp = project.dir("tmp");
  let mut builder = project.builder(&protoc);
  builder.use_argument_file(true).temp_directory(&temp).unwrap();
  let mut invocation = builder.build().unwrap();

  let code = invocation.execute().unwrap();

  assert_eq!(code, 0);
  let printed: Vec<String> = invocation.output().lines().map(str::to_string).collect();
  assert_eq!(printed, invocation.command_line());
  assert_eq!(std::fs::read_dir(&temp).unwrap().count(), 0);
}

#[test]
#[cfg(unix)]
fn nonzero_exit_code_is_reported_with_stderr() {
  let project = Project::new();
  let protoc = project.script("protoc", "echo 'a.proto:1:1: Expected \"message\".' >&2\nexit 1");
  let mut invocation = project.builder(&protoc).build().unwrap();

  let code = invocation.execute().unwrap();

  assert_eq!(code, 1);
  assert!(invocation.error().contains("Expected \"message\""));
}

#[test]
#[cfg(unix)]
fn utf8_output_survives_capture() {
  let project = Project::new();
  let protoc = project.script("protoc", "printf 'warnung: größe\\n'");
  let mut invocation = project.builder(&protoc).build().unwrap();

  invocation.execute().unwrap();

  assert_eq!(invocation.output(), "warnung: größe\n");
}

#[test]
fn missing_executable_exhausts_retries() {
  let project = Project::new();
  let missing = project.path("bin/not-protoc");
  let mut invocation = project.builder(Path::new(&missing)).build().unwrap();

  let err = invocation.execute().unwrap_err();

  match err {
    ExecuteError::Launch { attempts, source } => {
      assert_eq!(attempts, 3);
      assert!(source.is_transient());
    }
    other => panic!("unexpected error: {other}"),
  }
}

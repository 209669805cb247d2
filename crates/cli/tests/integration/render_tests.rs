//! `protorun render` integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn render_prints_one_argument_per_line() {
  let env = TestEnv::from_fixture("java.json");

  let output = env
    .protorun_cmd()
    .arg("render")
    .arg(&env.config_path)
    .output()
    .unwrap();

  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout).unwrap();
  let lines: Vec<&str> = stdout.lines().collect();
  assert_eq!(lines.len(), 3);
  assert!(lines[0].starts_with("--proto_path="));
  assert!(lines[0].ends_with("proto"));
  assert!(lines[1].starts_with("--java_out="));
  assert!(lines[2].ends_with("a.proto"));
}

#[test]
fn render_full_fixture_keeps_documented_order() {
  let env = TestEnv::from_fixture("full.json");

  let output = env
    .protorun_cmd()
    .arg("render")
    .arg(&env.config_path)
    .output()
    .unwrap();

  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout).unwrap();
  let flags: Vec<&str> = stdout
    .lines()
    .map(|line| line.split('=').next().unwrap_or(line))
    .collect();
  assert_eq!(flags[0], "--proto_path");
  assert_eq!(flags[1], "--java_out");
  assert_eq!(flags[2], "--plugin");
  assert_eq!(flags[3], "--grpc-java_out");
  assert_eq!(flags[4], "--python_out");
  assert!(flags[5].ends_with("a.proto"));
  assert_eq!(&flags[6..], &["--descriptor_set_out", "--include_imports"]);
}

#[test]
fn render_json_includes_executable_and_arguments() {
  let env = TestEnv::from_fixture("java.json");

  let output = env
    .protorun_cmd()
    .args(["--output", "json", "render", "--protoc", "/opt/protoc/bin/protoc"])
    .arg(&env.config_path)
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["executable"], "/opt/protoc/bin/protoc");
  assert_eq!(json["arguments"].as_array().unwrap().len(), 3);
}

#[test]
fn render_uses_default_file_name() {
  let env = TestEnv::from_fixture("java.json");

  env
    .protorun_cmd()
    .arg("render")
    .assert()
    .success()
    .stdout(predicate::str::contains("--java_out="));
}

#[test]
fn verbose_render_logs_parameters() {
  let env = TestEnv::from_fixture("java.json");

  env
    .protorun_cmd()
    .args(["--verbose", "render"])
    .arg(&env.config_path)
    .assert()
    .success()
    .stderr(predicate::str::contains("command line options"));
}

#[test]
fn source_outside_import_path_is_rejected() {
  let env = TestEnv::from_fixture("outside_import_path.json");

  env
    .protorun_cmd()
    .arg("render")
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("not under any registered import path"));
}

#[test]
fn unknown_field_is_rejected() {
  let env = TestEnv::from_fixture("java.json");
  env.write_file("bad.json", r#"{ "import_path": ["proto"] }"#);

  env
    .protorun_cmd()
    .args(["render", "bad.json"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load invocation file"));
}

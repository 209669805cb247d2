//! `protorun run` integration tests against a stand-in compiler.

use predicates::prelude::*;

use super::common::TestEnv;
#[cfg(unix)]
use super::common::ECHO_ARGS;

#[test]
#[cfg(unix)]
fn run_relays_compiler_output() {
  let env = TestEnv::from_fixture("java.json");
  let protoc = env.fake_protoc(ECHO_ARGS);

  env
    .protorun_cmd()
    .arg("run")
    .arg("--protoc")
    .arg(&protoc)
    .arg(&env.config_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("--java_out="))
    .stderr(predicate::str::contains("protoc finished"));
}

#[test]
#[cfg(unix)]
fn run_through_argument_file() {
  let env = TestEnv::from_fixture("argfile.json");
  let protoc = env.fake_protoc(ECHO_ARGS);

  env
    .protorun_cmd()
    .arg("run")
    .arg("--protoc")
    .arg(&protoc)
    .arg(&env.config_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("--proto_path="));

  assert_eq!(std::fs::read_dir(env.temp.path().join("tmp")).unwrap().count(), 0);
}

#[test]
#[cfg(unix)]
fn protoc_env_var_selects_executable() {
  let env = TestEnv::from_fixture("java.json");
  let protoc = env.fake_protoc("echo from-env");

  env
    .protorun_cmd()
    .env("PROTOC", &protoc)
    .arg("run")
    .arg(&env.config_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("from-env"));
}

#[test]
#[cfg(unix)]
fn run_exits_with_compiler_exit_code() {
  let env = TestEnv::from_fixture("java.json");
  let protoc = env.fake_protoc("echo 'a.proto:3:1: Expected top-level statement' >&2\nexit 3");

  env
    .protorun_cmd()
    .arg("run")
    .arg("--protoc")
    .arg(&protoc)
    .arg(&env.config_path)
    .assert()
    .code(3)
    .stderr(predicate::str::contains("Expected top-level statement"))
    .stderr(predicate::str::contains("exited with code 3"));
}

#[test]
#[cfg(unix)]
fn run_json_reports_exit_code_and_streams() {
  let env = TestEnv::from_fixture("java.json");
  let protoc = env.fake_protoc("echo out\necho err >&2");

  let output = env
    .protorun_cmd()
    .args(["--output", "json", "run", "--protoc"])
    .arg(&protoc)
    .arg(&env.config_path)
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["exit_code"], 0);
  assert_eq!(json["stdout"], "out\n");
  assert_eq!(json["stderr"], "err\n");
  assert_eq!(json["arguments"].as_array().unwrap().len(), 3);
}

#[test]
fn run_with_missing_executable_fails_after_retries() {
  let env = TestEnv::from_fixture("java.json");

  env
    .protorun_cmd()
    .args(["run", "--retry-delay", "0s", "--attempts", "2", "--protoc"])
    .arg(env.temp.path().join("bin/not-protoc"))
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to run"))
    .stderr(predicate::str::contains("exists and is executable"))
    .stderr(predicate::str::contains("not-protoc"));
}

#[test]
fn invalid_retry_delay_is_rejected() {
  let env = TestEnv::from_fixture("java.json");

  env
    .protorun_cmd()
    .args(["run", "--retry-delay", "soon"])
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("retry-delay"));
}

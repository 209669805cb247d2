//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated project tree for one test.
///
/// Holds `proto/a.proto`, `other/b.proto` and every directory the fixtures
/// point at, so each fixture passes the builder's existence checks.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file, copied to `protorun.json`.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("protorun.json");
    std::fs::write(&config_path, fixture_content(name)).unwrap();

    let env = Self { temp, config_path };
    env.write_file("proto/a.proto", "syntax = \"proto3\";\n");
    env.write_file("other/b.proto", "syntax = \"proto3\";\n");
    for dir in ["out/java", "out/python", "plugins", "tmp"] {
      std::fs::create_dir_all(env.temp.path().join(dir)).unwrap();
    }
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write an executable shell script standing in for protoc.
  #[cfg(unix)]
  pub fn fake_protoc(&self, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.write_file("bin/protoc", &format!("#!/bin/sh\n{}\n", body));
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Get a Command for the protorun binary with PROTOC cleared.
  pub fn protorun_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("protorun");
    cmd.current_dir(self.temp.path()).env_remove("PROTOC").env_remove("RUST_LOG");
    cmd
  }
}

/// Script body that prints every argument on its own line, expanding
/// `@file` references the way protoc does.
#[cfg(unix)]
pub const ECHO_ARGS: &str = r#"for arg in "$@"; do
  case "$arg" in
    @*) cat "${arg#@}" ;;
    *) printf '%s\n' "$arg" ;;
  esac
done"#;

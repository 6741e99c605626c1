//! Integration tests for the `jotl` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch project dir plus a config file that swaps the driver installer
/// for a command that always succeeds.
struct Sandbox {
    dir: TempDir,
    config: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("jotl-test.toml");
        fs::write(&config, "[installer]\nprogram = \"true\"\nargs = []\n").unwrap();
        Self { dir, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn jotl(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("jotl");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--config")
            .arg(&self.config);
        cmd
    }
}

#[test]
fn help_lists_subcommands() {
    cargo_bin_cmd!("jotl")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("completions"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag() {
    cargo_bin_cmd!("jotl")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_help_shows_every_flag() {
    cargo_bin_cmd!("jotl")
        .args(["init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--driver"))
        .stdout(predicate::str::contains("--log"))
        .stdout(predicate::str::contains("--git"));
}

#[cfg(unix)]
#[test]
fn sqlite_project_is_provisioned() {
    let sandbox = Sandbox::new();

    sandbox
        .jotl()
        .args(["init", "-n", "demo", "-d", "sqlite", "-l", "info", "--git", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"));

    let root = sandbox.path();
    assert!(root.join("jotl/config.yaml").is_file());
    assert!(root.join("jotl/db/jotl.db").is_file());
    assert!(root.join("jotl/.env").is_file());
    assert!(!root.join("jotl/docker-compose.yml").exists());
    assert!(!root.join(".git").exists());

    let ignore = fs::read_to_string(root.join(".gitignore")).unwrap();
    assert!(ignore.lines().any(|line| line == "/jotl"));

    let settings = fs::read_to_string(root.join("jotl/config.yaml")).unwrap();
    assert!(settings.contains("demo"));
    assert!(settings.contains("sqlite"));
}

#[cfg(unix)]
#[test]
fn postgres_project_gets_compose_file() {
    let sandbox = Sandbox::new();

    sandbox
        .jotl()
        .args(["init", "-n", "acme/api", "-d", "postgres", "-l", "debug", "--git", "false"])
        .assert()
        .success();

    let root = sandbox.path();
    let compose = fs::read_to_string(root.join("jotl/docker-compose.yml")).unwrap();
    assert!(compose.contains("postgres"));
    assert!(!compose.contains("{{"));
    assert!(!root.join("jotl/db").exists());

    let env = fs::read_to_string(root.join("jotl/.env")).unwrap();
    assert!(env.contains("DB_CONNECTION_STRING=postgres://"));
}

#[cfg(unix)]
#[test]
fn rerun_converges_and_keeps_single_ignore_entry() {
    let sandbox = Sandbox::new();
    let args = ["init", "-n", "demo", "-d", "sqlite", "-l", "warn", "--git", "false"];

    sandbox.jotl().args(args).assert().success();
    sandbox
        .jotl()
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("already"));

    let ignore = fs::read_to_string(sandbox.path().join(".gitignore")).unwrap();
    assert_eq!(ignore.lines().filter(|line| *line == "/jotl").count(), 1);
}

#[cfg(unix)]
#[test]
fn json_output_is_a_report() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .jotl()
        .args(["--output-format", "json"])
        .args(["init", "-n", "demo", "-d", "sqlite", "-l", "error", "--git", "false"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["config"]["name"], "demo");
    assert_eq!(report["config"]["storage_driver"], "sqlite");
    assert_eq!(report["already_initialized"], false);
    assert!(report["command_hint"].is_null());
    assert_eq!(report["provisioning"]["steps"].as_array().unwrap().len(), 8);
}

#[test]
fn completions_bash() {
    cargo_bin_cmd!("jotl")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jotl"));
}

#[test]
fn config_get_reads_the_file() {
    let sandbox = Sandbox::new();
    sandbox
        .jotl()
        .args(["config", "get", "installer.program"])
        .assert()
        .success()
        .stdout(predicate::str::diff("true\n"));
}

#[test]
fn config_env_overrides_file() {
    let sandbox = Sandbox::new();
    sandbox
        .jotl()
        .env("JOTL_INSTALLER__PROGRAM", "cargo")
        .args(["config", "get", "installer.program"])
        .assert()
        .success()
        .stdout(predicate::str::diff("cargo\n"));
}

#[test]
fn config_path_reports_override() {
    let sandbox = Sandbox::new();
    sandbox
        .jotl()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jotl-test.toml"));
}

#[test]
fn config_init_writes_missing_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.toml");

    cargo_bin_cmd!("jotl")
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[installer]"));
    assert!(written.contains("user.email"));
}

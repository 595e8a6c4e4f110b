//! Integration tests for the jdkswitch binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A sandbox with its own home, config dir and settings file.
struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("home/.config")).unwrap();
        fs::create_dir_all(temp.path().join("roots")).unwrap();
        fs::write(
            temp.path().join("config.yml"),
            "scan_default_roots: false\n",
        )
        .unwrap();
        Self { temp }
    }

    fn roots(&self) -> PathBuf {
        self.temp.path().join("roots")
    }

    fn settings(&self) -> PathBuf {
        self.temp.path().join("config.yml")
    }

    fn command(&self) -> Command {
        let home = self.temp.path().join("home");
        let mut cmd = Command::new(cargo_bin("jdkswitch"));
        cmd.env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("JDKSWITCH_CONFIG")
            .arg("--config")
            .arg(self.settings());
        cmd
    }

    fn add_jdk(&self, name: &str, version: &str) -> PathBuf {
        let home = self.roots().join(name);
        let bin = home.join("bin");
        fs::create_dir_all(&bin).unwrap();
        let (java, javac) = if cfg!(windows) {
            ("java.exe", "javac.exe")
        } else {
            ("java", "javac")
        };
        fs::write(bin.join(java), "").unwrap();
        fs::write(bin.join(javac), "").unwrap();
        fs::write(
            home.join("release"),
            format!("JAVA_VERSION=\"{}\"\n", version),
        )
        .unwrap();
        home
    }

    fn register_roots(&self) {
        self.command()
            .args(["roots", "add"])
            .arg(self.roots())
            .assert()
            .success();
    }
}

fn contains_path(path: &Path) -> predicates::str::ContainsPredicate {
    predicate::str::contains(path.display().to_string())
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("jdkswitch"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("switch the active one"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("jdkswitch"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_scope() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("jdkswitch"));
    cmd.args(["use", "17", "--scope", "machine"]);
    cmd.assert().failure();
    Ok(())
}

#[test]
fn roots_add_list_remove() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.register_roots();

    let settings = fs::read_to_string(sandbox.settings())?;
    assert!(settings.contains("custom_roots"));

    sandbox
        .command()
        .args(["roots", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom"))
        .stdout(contains_path(&sandbox.roots()));

    sandbox
        .command()
        .args(["roots", "remove"])
        .arg(sandbox.roots())
        .assert()
        .success();

    sandbox
        .command()
        .args(["roots", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No roots configured"));
    Ok(())
}

#[test]
fn roots_add_rejects_missing_directory() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .args(["roots", "add"])
        .arg(sandbox.roots().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
    Ok(())
}

#[test]
fn list_shows_registered_installations() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.add_jdk("jdk-17.0.2", "17.0.2");
    sandbox.add_jdk("jdk-11.0.15", "11.0.15");
    sandbox.register_roots();

    sandbox
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("17.0.2"))
        .stdout(predicate::str::contains("11.0.15"));
    Ok(())
}

#[test]
fn no_command_lists() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.add_jdk("jdk-21", "21.0.1");
    sandbox.register_roots();

    sandbox
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("21.0.1"));
    Ok(())
}

#[test]
fn list_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.add_jdk("jdk-21", "21.0.1");
    sandbox.register_roots();

    let output = sandbox.command().args(["list", "--json"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["installations"][0]["version"], "21.0.1");
    Ok(())
}

#[test]
fn validate_accepts_and_rejects() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let home = sandbox.add_jdk("jdk-17", "17.0.2");

    sandbox
        .command()
        .arg("validate")
        .arg(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("17.0.2"));

    sandbox
        .command()
        .arg("validate")
        .arg(sandbox.roots())
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn use_unknown_version_fails() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.add_jdk("jdk-17", "17.0.2");
    sandbox.register_roots();

    sandbox
        .command()
        .args(["use", "8", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No installation matches '8'"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn use_writes_user_profile_and_current_reports_it() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let home = sandbox.add_jdk("jdk-17.0.2", "17.0.2");
    sandbox.add_jdk("jdk-11.0.15", "11.0.15");
    sandbox.register_roots();

    sandbox
        .command()
        .args(["use", "17", "--scope", "user", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now active"));

    let profile = sandbox
        .temp
        .path()
        .join("home/.config/jdkswitch/env.sh");
    let content = fs::read_to_string(profile)?;
    assert!(content.contains(&format!("export JAVA_HOME=\"{}\"", home.display())));
    assert!(content.contains(&home.join("bin").display().to_string()));

    sandbox
        .command()
        .arg("current")
        .assert()
        .success()
        .stdout(contains_path(&home));
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("jdkswitch"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("jdkswitch"));
    Ok(())
}

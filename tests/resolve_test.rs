//! Integration tests for working out the active installation.

use std::path::Path;
use std::sync::Arc;

use jdkswitch::environment::{MemoryStore, Scope};
use jdkswitch::exec::{CommandOutput, ScriptedRunner};
use jdkswitch::install::{Bitness, InstallationRecord, UNKNOWN_VERSION};
use jdkswitch::layout::Layout;
use jdkswitch::resolve::{ActiveResolver, Tier};

fn record(version: &str, path: &str) -> InstallationRecord {
    InstallationRecord::new(version, Path::new(path), Bitness::Bits64)
}

fn version_banner(version: &str) -> CommandOutput {
    CommandOutput::ok(
        "",
        format!(
            "openjdk version \"{}\" 2022-01-18\nOpenJDK Runtime Environment (build {}+8)\n",
            version, version
        ),
    )
}

fn resolver(store: MemoryStore, runner: ScriptedRunner) -> ActiveResolver {
    ActiveResolver::with_layout(Arc::new(store), Arc::new(runner), Layout::UNIX)
}

fn active_paths(records: &[InstallationRecord]) -> Vec<&Path> {
    records
        .iter()
        .filter(|r| r.is_active())
        .map(|r| r.install_path())
        .collect()
}

#[test]
fn interpreter_version_picks_matching_candidate() {
    let mut records = vec![record("11.0.15", "/opt/jdk-11"), record("17.0.2", "/opt/jdk-17")];
    let runner = ScriptedRunner::new().on(&["java -version"], version_banner("17.0.2"));

    let resolution = resolver(MemoryStore::new(), runner)
        .resolve(&mut records)
        .unwrap();

    assert_eq!(resolution.index, 1);
    assert_eq!(resolution.tier, Tier::Version);
    assert_eq!(active_paths(&records), vec![Path::new("/opt/jdk-17")]);
}

#[test]
fn configured_home_wins_over_interpreter_version() {
    let mut records = vec![record("11.0.15", "/opt/jdk-11"), record("17.0.2", "/opt/jdk-17")];
    let store = MemoryStore::new().with_value(Scope::User, "JAVA_HOME", "/opt/jdk-11");
    let runner = ScriptedRunner::new().on(&["java -version"], version_banner("17.0.2"));

    let resolution = resolver(store, runner).resolve(&mut records).unwrap();

    assert_eq!(resolution.tier, Tier::Configured(Scope::User));
    assert_eq!(active_paths(&records), vec![Path::new("/opt/jdk-11")]);
}

#[test]
fn system_home_used_when_user_unset() {
    let mut records = vec![record("11.0.15", "/opt/jdk-11"), record("17.0.2", "/opt/jdk-17")];
    let store = MemoryStore::new().with_value(Scope::System, "JAVA_HOME", "/opt/jdk-17/");

    let resolution = resolver(store, ScriptedRunner::new())
        .resolve(&mut records)
        .unwrap();

    assert_eq!(resolution.tier, Tier::Configured(Scope::System));
    assert_eq!(resolution.index, 1);
}

#[test]
fn unmatched_user_home_does_not_fall_through_to_system() {
    let mut records = vec![record("11.0.15", "/opt/jdk-11")];
    let store = MemoryStore::new()
        .with_value(Scope::User, "JAVA_HOME", "/somewhere/else")
        .with_value(Scope::System, "JAVA_HOME", "/opt/jdk-11");

    let resolution = resolver(store, ScriptedRunner::new()).resolve(&mut records);

    assert!(resolution.is_none());
    assert!(active_paths(&records).is_empty());
}

#[test]
fn unknown_versions_never_match() {
    let mut records = vec![record(UNKNOWN_VERSION, "/opt/mystery")];
    let runner = ScriptedRunner::new().on(&["java -version"], version_banner("17.0.2"));

    assert!(resolver(MemoryStore::new(), runner)
        .resolve(&mut records)
        .is_none());
}

#[test]
fn major_version_match_is_enough() {
    let mut records = vec![record("21.0.1", "/opt/jdk-21"), record("17.0.9", "/opt/jdk-17")];
    let runner = ScriptedRunner::new().on(&["java -version"], version_banner("17.0.2"));

    let resolution = resolver(MemoryStore::new(), runner)
        .resolve(&mut records)
        .unwrap();

    assert_eq!(resolution.index, 1);
}

#[test]
fn nothing_resolves_without_signals() {
    let mut records = vec![record("17.0.2", "/opt/jdk-17")];

    assert!(resolver(MemoryStore::new(), ScriptedRunner::new())
        .resolve(&mut records)
        .is_none());
}

#[test]
fn stale_active_flags_are_cleared() {
    let mut records = vec![record("11.0.15", "/opt/jdk-11"), record("17.0.2", "/opt/jdk-17")];
    let first = MemoryStore::new().with_value(Scope::User, "JAVA_HOME", "/opt/jdk-11");
    resolver(first, ScriptedRunner::new()).resolve(&mut records);
    assert!(records[0].is_active());

    let second = MemoryStore::new().with_value(Scope::User, "JAVA_HOME", "/opt/jdk-17");
    resolver(second, ScriptedRunner::new()).resolve(&mut records);

    assert_eq!(active_paths(&records), vec![Path::new("/opt/jdk-17")]);
}

#[cfg(unix)]
#[test]
fn resolved_binary_root_matches_candidate() {
    use std::fs;
    use tempfile::TempDir;

    let temp = TempDir::new().unwrap();
    let home = temp.path().join("jdk-17");
    fs::create_dir_all(home.join("bin")).unwrap();
    fs::write(home.join("bin/java"), "").unwrap();

    let mut records = vec![
        record("11.0.15", "/opt/jdk-11"),
        InstallationRecord::new("17.0.2", &home, Bitness::Bits64),
    ];
    let which_output = format!(
        "/home/dev/.sdkman/shims/java\n{}\n",
        home.join("bin/java").display()
    );
    let runner = ScriptedRunner::new()
        .on(&["which -a java"], CommandOutput::ok(which_output, ""))
        .on(&["-version"], version_banner("11.0.15"));

    let resolution = resolver(MemoryStore::new(), runner)
        .resolve(&mut records)
        .unwrap();

    assert_eq!(resolution.tier, Tier::ResolvedBinary);
    assert_eq!(resolution.index, 1);
}

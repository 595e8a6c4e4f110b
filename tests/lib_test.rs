//! Library integration tests.

use std::sync::Arc;

use jdkswitch::cli::commands::{select_target, Backends};
use jdkswitch::environment::{MemoryStore, NoopBroadcaster, Scope};
use jdkswitch::exec::ScriptedRunner;
use jdkswitch::JdkSwitchError;

#[test]
fn error_types_are_public() {
    let err = JdkSwitchError::Privilege {
        scope: Scope::System,
        variable: "PATH".into(),
        message: "Access is denied.".into(),
    };
    assert!(err.is_privilege());
    assert!(err.to_string().contains("system"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> jdkswitch::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use jdkswitch::cli::{Cli, Commands};

    let cli = Cli::parse_from(["jdkswitch", "current", "--json"]);

    if let Some(Commands::Current(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Current command");
    }
}

#[test]
fn targets_resolve_against_scan_results() {
    let backends = Backends::new(
        Arc::new(ScriptedRunner::new()),
        Arc::new(MemoryStore::new()),
        Arc::new(NoopBroadcaster),
    );
    let err = select_target(&[], "17", &backends.probe()).unwrap_err();
    assert!(matches!(err, JdkSwitchError::InstallationNotFound { .. }));
}

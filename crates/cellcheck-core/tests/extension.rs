//! The extension driven through a host's hook registry.

mod common;

use cellcheck_core::{CellCheckExtension, EventHooks, SessionConfig, MAGIC_NAME};
use cellcheck_types::CheckOutcome;
use common::{error_at, ScriptedChecker};

fn loaded(checker: &ScriptedChecker) -> (EventHooks, CellCheckExtension) {
    let mut hooks = EventHooks::new();
    let ext = CellCheckExtension::load_with_checker(&mut hooks, SessionConfig::default(), checker.boxed())
        .expect("extension should load");
    (hooks, ext)
}

#[test]
fn test_pre_run_checks_raw_cell() {
    let checker = ScriptedChecker::new();
    let (mut hooks, ext) = loaded(&checker);

    checker.respond(error_at(2, "Revealed type is \"builtins.int\""));
    hooks.fire_pre_run("reveal_type(1)");

    // The checker sees the call; execution does not
    assert!(checker.calls()[0].program.contains("reveal_type(1)"));
    assert_eq!(hooks.transform("reveal_type(1)"), "None");
    assert_eq!(ext.session().last_outcome().unwrap().diagnostics()[0].line, 1);

    ext.unload(&mut hooks);
}

#[test]
fn test_transformer_leaves_other_code_alone() {
    let checker = ScriptedChecker::new();
    let (mut hooks, ext) = loaded(&checker);

    let source = "def f(x: int) -> int:\n    return x\n";
    assert_eq!(hooks.transform(source), source);
    ext.unload(&mut hooks);
}

#[test]
fn test_magic_controls_session() {
    let checker = ScriptedChecker::new();
    let (mut hooks, ext) = loaded(&checker);

    hooks.run_line_magic(MAGIC_NAME, "mypy-options --strict");
    hooks.fire_pre_run("x = 1");
    assert!(checker.calls()[0].args.contains(&"--strict".to_string()));

    hooks.run_line_magic(MAGIC_NAME, "Off");
    hooks.fire_pre_run("y = 2");
    assert_eq!(checker.calls().len(), 1);
    assert_eq!(ext.session().last_outcome(), Some(&CheckOutcome::Disabled));

    // Unknown arguments are reported and change nothing
    hooks.run_line_magic(MAGIC_NAME, "Sometimes");
    assert!(!ext.session().state().enabled);

    ext.unload(&mut hooks);
}

#[test]
fn test_unload_stops_checking() {
    let checker = ScriptedChecker::new();
    let (mut hooks, ext) = loaded(&checker);

    ext.unload(&mut hooks);
    hooks.fire_pre_run("x = 1");
    assert!(checker.calls().is_empty());
    assert_eq!(hooks.transform("reveal_type(x)"), "reveal_type(x)");
}

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn workspace_root() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../.."))
}

/// A scratch working directory with `py/main.js` holding `source`.
fn scratch_with_main(source: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::create_dir(dir.path().join("py")).expect("failed to create py dir");
    fs::write(dir.path().join("py").join("main.js"), source).expect("failed to write main.js");
    dir
}

fn run_ember(cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ember"))
        .current_dir(cwd)
        .env_remove("EMBER_CONFIG")
        .output()
        .unwrap_or_else(|e| panic!("failed to run ember in {}: {e}", cwd.display()))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn function_that_ignores_its_argument_exits_zero() {
    let dir = scratch_with_main("export function hello_world(args) {}\n");
    let output = run_ember(dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "stdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
}

#[test]
fn missing_module_exits_one() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = run_ember(dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout(&output).contains("fail to load func"),
        "stdout:\n{}",
        stdout(&output)
    );
}

#[test]
fn missing_function_exits_one() {
    let dir = scratch_with_main("export function something_else(args) {}\n");
    let output = run_ember(dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("has no export named 'hello_world'"));
}

#[test]
fn throwing_function_exits_one_with_trace() {
    let dir = scratch_with_main(
        "export function hello_world(args) {\n    throw new Error(\"kaboom\");\n}\n",
    );
    let output = run_ember(dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("fail to invoke func"));
    assert!(
        stderr(&output).contains("Error: kaboom"),
        "stderr:\n{}",
        stderr(&output)
    );
}

#[test]
fn settings_file_selects_the_function() {
    let dir = scratch_with_main(
        "export function greet(args) {\n    print(`greeted ${args.length}`);\n}\n",
    );
    fs::write(dir.path().join("ember.json"), r#"{ "function": "greet" }"#)
        .expect("failed to write ember.json");
    let output = run_ember(dir.path());

    assert_eq!(output.status.code(), Some(0), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "greeted 2");
}

#[test]
fn demo_module_prints_both_records() {
    let output = run_ember(workspace_root());

    assert_eq!(output.status.code(), Some(0), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        ["value=0, opaque=\"opaque 0\"", "value=1, opaque=\"opaque 1\""]
    );
}

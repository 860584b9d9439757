//! Integration tests for the `tick` CLI.
//!
//! Each test creates a temp directory, runs `tick` as a subprocess inside it,
//! and verifies stdout and/or the task file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `tick` binary.
fn tick_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tick");
    path
}

/// Run `tick` with the given args in the given directory, returning (stdout, stderr, success).
fn run_tick(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tick_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run tick");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tick` expecting success, return stdout.
fn run_tick_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tick(dir, args);
    if !success {
        panic!(
            "tick {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `tick` expecting failure, return stderr.
fn run_tick_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tick(dir, args);
    if success {
        panic!("tick {:?} should have failed:\nstdout: {}", args, stdout);
    }
    stderr
}

fn write_tasks(dir: &Path, json: &str) {
    fs::write(dir.join("todo.json"), json).unwrap();
}

const TWO_TASKS: &str = r#"[
  {
    "task": "buy milk",
    "done": false
  },
  {
    "task": "walk dog",
    "done": true
  }
]
"#;

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_missing_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tick_ok(tmp.path(), &["list"]);
    assert_eq!(out, "Nothing in the list yet.\n");
    // Reading never creates the file
    assert!(!tmp.path().join("todo.json").exists());
}

#[test]
fn test_list_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_tasks(tmp.path(), TWO_TASKS);

    let out = run_tick_ok(tmp.path(), &["list"]);
    assert_eq!(out, "1. [ ] buy milk\n2. [x] walk dog\n");
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_tasks(tmp.path(), TWO_TASKS);

    let out = run_tick_ok(tmp.path(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[1]["position"], 2);
    assert_eq!(arr[1]["task"], "walk dog");
    assert_eq!(arr[1]["done"], true);
}

#[test]
fn test_list_corrupt_file_fails_without_touching_it() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_tasks(tmp.path(), "{ not json");

    let err = run_tick_err(tmp.path(), &["list"]);
    assert!(err.starts_with("error: "));
    assert!(err.contains("is not a valid task list"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("todo.json")).unwrap(),
        "{ not json"
    );
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_creates_file() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_tick_ok(tmp.path(), &["add", "buy", "milk"]);
    assert_eq!(out, "1. [ ] buy milk\n");

    let content = fs::read_to_string(tmp.path().join("todo.json")).unwrap();
    assert_eq!(
        content,
        "[\n  {\n    \"task\": \"buy milk\",\n    \"done\": false\n  }\n]\n"
    );
}

#[test]
fn test_add_blank_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_tick_err(tmp.path(), &["add", "   "]);
    assert_eq!(err, "error: task text is empty\n");
    assert!(!tmp.path().join("todo.json").exists());
}

#[test]
fn test_toggle_and_rm() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_tasks(tmp.path(), TWO_TASKS);

    let out = run_tick_ok(tmp.path(), &["toggle", "1"]);
    assert_eq!(out, "1. [x] buy milk\n");

    let out = run_tick_ok(tmp.path(), &["rm", "2"]);
    assert_eq!(out, "removed: walk dog\n");

    let out = run_tick_ok(tmp.path(), &["list"]);
    assert_eq!(out, "1. [x] buy milk\n");
}

#[test]
fn test_out_of_range_position() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_tasks(tmp.path(), TWO_TASKS);

    let err = run_tick_err(tmp.path(), &["toggle", "3"]);
    assert_eq!(err, "error: no task at position 3 (positions are 1 to 2)\n");
    let err = run_tick_err(tmp.path(), &["rm", "0"]);
    assert!(err.contains("no task at position 0"));

    // Nothing changed
    assert_eq!(
        fs::read_to_string(tmp.path().join("todo.json")).unwrap(),
        TWO_TASKS
    );
}

#[test]
fn test_file_flag_and_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("ticklist.toml"),
        "[store]\npath = \"lists/home.json\"\n",
    )
    .unwrap();
    fs::create_dir(tmp.path().join("lists")).unwrap();

    run_tick_ok(tmp.path(), &["add", "from config"]);
    assert!(tmp.path().join("lists/home.json").exists());

    run_tick_ok(tmp.path(), &["--file", "other.json", "add", "from flag"]);
    let out = run_tick_ok(tmp.path(), &["list", "--file", "other.json"]);
    assert_eq!(out, "1. [ ] from flag\n");
}

#[test]
fn test_write_failure_reports_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_tick_err(tmp.path(), &["--file", "missing/todo.json", "add", "x"]);
    // The recovery log sits in the same missing directory, so a warning comes first
    assert!(err.contains("error: could not write missing/todo.json"));
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[test]
fn test_recovery_records_deletions() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_tasks(tmp.path(), TWO_TASKS);

    let out = run_tick_ok(tmp.path(), &["recovery"]);
    assert_eq!(out, "No recovery entries.\n");

    run_tick_ok(tmp.path(), &["rm", "1"]);

    let out = run_tick_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("[delete]"));
    assert!(out.contains("buy milk"));

    let out = run_tick_ok(tmp.path(), &["recovery", "--json", "--limit", "1"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["category"], "delete");

    let out = run_tick_ok(tmp.path(), &["recovery", "path"]);
    assert_eq!(out.trim_end(), ".ticklist-recovery.log");
}

#[test]
fn test_recovery_prune() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_tasks(tmp.path(), TWO_TASKS);
    run_tick_ok(tmp.path(), &["rm", "1"]);
    run_tick_ok(tmp.path(), &["rm", "1"]);

    let out = run_tick_ok(tmp.path(), &["recovery", "prune", "--keep", "1"]);
    assert_eq!(out, "Removed 1 recovery entry.\n");

    let out = run_tick_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["body"], "walk dog");

    let out = run_tick_ok(tmp.path(), &["recovery", "prune", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["removed"], 1);
    assert_eq!(run_tick_ok(tmp.path(), &["recovery"]), "No recovery entries.\n");
}

#[test]
fn test_recovery_log_failure_is_a_warning() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tick(tmp.path(), &["--file", "missing/todo.json", "add", "x"]);
    assert!(!success);
    let warning = stderr.find("warning: could not write to recovery log").unwrap();
    let error = stderr.find("error: could not write missing/todo.json").unwrap();
    assert!(warning < error);
}

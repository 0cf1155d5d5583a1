//! End-to-end tests driving the seatplan binary
//!
//! These tests verify the command workflow, JSON output, dry-run mode and
//! the failure exits of auto-assign.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn seatplan(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_seatplan"));
    for var in [
        "SEATPLAN_PROXIMITY_THRESHOLD",
        "SEATPLAN_FILL_FROM_FRONT",
        "SEATPLAN_ALTERNATE_GENDER",
        "SEATPLAN_SEARCH_LIMIT",
        "SEATPLAN_SEED",
    ] {
        command.env_remove(var);
    }
    command
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute command")
}

fn run_ok(dir: &Path, args: &[&str]) -> Output {
    let output = seatplan(dir, args);
    assert!(
        output.status.success(),
        "seatplan {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
}

fn plan_json(dir: &Path) -> serde_json::Value {
    let content = fs::read_to_string(dir.join(".seatplan/plan.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// A 2x3 room with four students and one separation rule
fn classroom() -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    run_ok(path, &["init", "--preset", "rows", "--rows", "2", "--columns", "3", "--name", "Year 7"]);
    run_ok(path, &["students", "add", "Alice, f", "Bob, m", "Carol, female", "Dan, m, send"]);
    run_ok(path, &["rules", "add", "Alice", "Bob", "--description", "chatty"]);
    dir
}

#[test]
fn test_init_creates_workspace() {
    let dir = TempDir::new().unwrap();
    let output = run_ok(dir.path(), &["init", "--preset", "pairs", "--rows", "2", "--columns", "2", "--json"]);

    let parsed = json(&output);
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["desks"], 8);
    assert_eq!(parsed["data"]["groups"], 4);

    let config = fs::read_to_string(dir.path().join(".seatplan/config.toml")).unwrap();
    assert!(config.contains("Center-to-center distance"));
    assert!(!config.contains("neighbour"));
    assert_eq!(plan_json(dir.path())["desks"].as_array().unwrap().len(), 8);
}

#[test]
fn test_init_refuses_existing_workspace() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["init"]);

    let output = seatplan(dir.path(), &["init"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Workspace already exists"));

    run_ok(dir.path(), &["init", "--force"]);
}

#[test]
fn test_assign_and_status_workflow() {
    let dir = classroom();
    let path = dir.path();

    let output = run_ok(path, &["assign", "--seed", "7", "--json"]);
    let parsed = json(&output);
    assert_eq!(parsed["data"]["placed"], 4);
    assert_eq!(parsed["data"]["locked"], 0);
    assert_eq!(parsed["data"]["seed"], 7);
    assert_eq!(parsed["data"]["seats"].as_array().unwrap().len(), 4);

    let status = json(&run_ok(path, &["status", "--json"]));
    assert_eq!(status["data"]["name"], "Year 7");
    assert_eq!(status["data"]["desks"], 6);
    assert_eq!(status["data"]["students"], 4);
    assert_eq!(status["data"]["seated_students"], 4);
    assert_eq!(status["data"]["rules"], 1);
    assert!(status["data"]["violations"].as_array().unwrap().is_empty());
    assert!(status["data"].get("config").is_none());
}

#[test]
fn test_same_seed_same_plan() {
    let first = classroom();
    let second = classroom();

    run_ok(first.path(), &["assign", "--seed", "42"]);
    run_ok(second.path(), &["assign", "--seed", "42"]);

    assert_eq!(plan_json(first.path())["desks"], plan_json(second.path())["desks"]);
}

#[test]
fn test_locked_desk_survives_assign_and_clear() {
    let dir = classroom();
    let path = dir.path();
    run_ok(path, &["desk", "assign", "1", "Dan"]);
    run_ok(path, &["desk", "lock", "1"]);

    let parsed = json(&run_ok(path, &["assign", "--seed", "1", "--json"]));
    assert_eq!(parsed["data"]["placed"], 3);
    assert_eq!(parsed["data"]["locked"], 1);

    let cleared = json(&run_ok(path, &["clear", "--json"]));
    assert_eq!(cleared["data"]["cleared"], 3);

    let desks = plan_json(path)["desks"].clone();
    let first = &desks.as_array().unwrap()[0];
    assert_eq!(first["student"], "Dan");
    assert_eq!(first["is_locked"], true);
}

#[test]
fn test_not_enough_desks_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    run_ok(path, &["init"]);
    run_ok(path, &["desk", "add", "--x", "100", "--y", "100"]);
    run_ok(path, &["students", "add", "Alice", "Bob"]);
    let before = fs::read_to_string(path.join(".seatplan/plan.json")).unwrap();

    let output = seatplan(path, &["assign", "--seed", "3"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not enough desks"), "stderr: {}", stderr);
    assert_eq!(fs::read_to_string(path.join(".seatplan/plan.json")).unwrap(), before);
}

#[test]
fn test_impossible_rules_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    run_ok(path, &["init"]);
    for x in ["100", "500", "900"] {
        run_ok(path, &["desk", "add", "--x", x, "--y", "100"]);
    }
    run_ok(path, &["group", "create", "1", "2", "3", "--name", "Island"]);
    run_ok(path, &["students", "add", "Alice", "Bob", "Carol"]);
    run_ok(path, &["rules", "add", "Alice", "Bob"]);

    let output = seatplan(path, &["assign", "--seed", "5"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No valid seating arrangement"));
}

#[test]
fn test_dry_run_no_state_modification() {
    let dir = TempDir::new().unwrap();

    let output = run_ok(dir.path(), &["init", "--dry-run"]);
    assert!(!dir.path().join(".seatplan").exists(), "Dry-run should not create .seatplan");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Planned Actions"));
    assert!(stdout.contains("[mkdir]"), "stdout: {}", stdout);

    let dir = classroom();
    let before = fs::read_to_string(dir.path().join(".seatplan/plan.json")).unwrap();

    let output = run_ok(dir.path(), &["assign", "--seed", "2", "--dry-run", "--json"]);
    let parsed = json(&output);
    assert_eq!(parsed["data"]["dry_run"], true);
    run_ok(dir.path(), &["students", "add", "Erin", "--dry-run"]);

    let after = fs::read_to_string(dir.path().join(".seatplan/plan.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_duplicate_student_rejected() {
    let dir = classroom();
    let output = seatplan(dir.path(), &["students", "add", "Alice"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Alice"));
}

#[test]
fn test_status_outside_workspace_fails() {
    let dir = TempDir::new().unwrap();
    let output = seatplan(dir.path(), &["status"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not in a seatplan workspace"));
}

#[test]
fn test_status_shows_config_sources() {
    let dir = classroom();
    fs::write(dir.path().join(".seatplan/config.toml"), "alternate_gender = true\n").unwrap();

    let status = json(&run_ok(dir.path(), &["status", "--config", "--json"]));
    let rows = status["data"]["config"].as_array().unwrap();
    let alternate = rows.iter().find(|r| r["key"] == "alternate_gender").unwrap();
    assert_eq!(alternate["value"], "true");
    assert_eq!(alternate["source"], "File");
}

#[test]
fn test_bad_desk_geometry_keeps_plan_loadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    run_ok(path, &["init"]);
    let before = fs::read_to_string(path.join(".seatplan/plan.json")).unwrap();

    let output = seatplan(path, &["desk", "add", "--x", "NaN", "--y", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid desk geometry"));

    let output = seatplan(path, &["desk", "add", "--x", "10", "--y", "10", "--width", "0"]);
    assert!(!output.status.success());

    assert_eq!(fs::read_to_string(path.join(".seatplan/plan.json")).unwrap(), before);
    run_ok(path, &["status"]);
}

#[test]
fn test_missing_plan_file_reported() {
    let dir = classroom();
    fs::remove_file(dir.path().join(".seatplan/plan.json")).unwrap();

    let output = seatplan(dir.path(), &["status"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Seating plan not found"), "stderr: {}", stderr);
}

#[test]
fn test_oversized_preset_rejected() {
    let dir = TempDir::new().unwrap();
    let output = seatplan(
        dir.path(),
        &["init", "--preset", "rows", "--rows", "100000", "--columns", "100000"],
    );
    assert!(!output.status.success());
    assert!(!dir.path().join(".seatplan").exists());

    let output = seatplan(dir.path(), &["init", "--preset", "rows", "--rows", "0"]);
    assert!(!output.status.success());
    assert!(!dir.path().join(".seatplan").exists());
}

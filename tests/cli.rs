use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

fn roster(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("ROSTER_ROOT", root.path());
    cmd.env_remove("ROSTER_BACKEND");
    cmd.env_remove("ROSTER_CONFIG");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// The canonical scenario, once per backend: insert Alice and Bob, list,
/// delete Alice, list again, delete Alice again.
fn scenario(backend: &str) {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["--backend", backend, "add", "1", "Alice", "20", "A+"])
        .assert()
        .success();
    roster(&root)
        .args(["--backend", backend, "add", "2", "Bob", "19", "B"])
        .assert()
        .success();

    roster(&root)
        .args(["--backend", backend, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice").and(predicate::str::contains("Bob")));

    roster(&root)
        .args(["--backend", backend, "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    roster(&root)
        .args(["--backend", backend, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob").and(predicate::str::contains("Alice").not()));

    // Deleting again is not an error, just "nothing removed".
    roster(&root)
        .args(["--backend", backend, "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No student with id 1 found."));
}

#[test]
fn test_scenario_text_backend() {
    scenario("text");
}

#[test]
fn test_scenario_sqlite_backend() {
    scenario("sqlite");
}

#[test]
fn test_duplicate_add_fails_with_robot_code() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["add", "1", "Alice", "20", "A+"])
        .assert()
        .success();

    let output = roster(&root)
        .args(["--robot", "add", "1", "Alias", "21", "C"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"], Value::Bool(true));
    assert_eq!(json["code"], "duplicate_id");
}

#[test]
fn test_robot_list_envelope() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["add", "1", "Alice", "20", "A+"])
        .assert()
        .success();

    let output = roster(&root).args(["--robot", "list"]).output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"][0]["name"], "Alice");
    assert_eq!(json["data"][0]["grade"], "A+");
}

#[test]
fn test_update_grade_on_sqlite_backend() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["--backend", "sqlite", "add", "1", "Alice", "20", "A+"])
        .assert()
        .success();
    roster(&root)
        .args(["--backend", "sqlite", "update-grade", "1", "B-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade updated"));
    roster(&root)
        .args(["--backend", "sqlite", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B-"));
}

#[test]
fn test_update_grade_rejected_on_text_backend() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["add", "1", "Alice", "20", "A+"])
        .assert()
        .success();
    roster(&root)
        .args(["update-grade", "1", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sqlite backend"));
}

#[test]
fn test_init_seed_sqlite() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["--backend", "sqlite", "init", "--seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded"));

    roster(&root)
        .args(["--backend", "sqlite", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"));

    // Seeding is idempotent: a second init leaves the store alone.
    roster(&root)
        .args(["--backend", "sqlite", "init", "--seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded").not());
}

#[test]
fn test_read_demo_renders_table_per_reader() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["--backend", "sqlite", "add", "1", "Alice", "20", "A+"])
        .assert()
        .success();

    let output = roster(&root)
        .args(["--backend", "sqlite", "read-demo"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Alice").count(), 2);
}

#[test]
fn test_read_demo_robot_counts() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["add", "1", "Alice", "20", "A+"])
        .assert()
        .success();

    let output = roster(&root)
        .args(["--robot", "read-demo", "--readers", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"]["rows_read"], serde_json::json!([1, 1, 1]));
}

#[test]
fn test_menu_scripted_session() {
    let root = tempdir().unwrap();

    let mut cmd = roster(&root);
    cmd.arg("menu")
        .write_stdin("1\n1\nAlice\n20\nA+\n2\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added.").and(predicate::str::contains("Alice")));
}

#[test]
fn test_text_store_skips_malformed_lines() {
    let root = tempdir().unwrap();

    roster(&root)
        .args(["add", "1", "Alice", "20", "A+"])
        .assert()
        .success();

    // Corrupt the store by hand with a short line.
    let path = root.path().join("students.txt");
    let mut raw = std::fs::read_to_string(&path).unwrap();
    raw.push_str("2,Bob\n");
    std::fs::write(&path, raw).unwrap();

    roster(&root)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice").and(predicate::str::contains("Bob").not()));
}

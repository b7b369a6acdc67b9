use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn mx_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mx").expect("Failed to find mx binary");
    cmd.arg("--no-color");
    cmd
}

/// Extracts the first row id from rendered board output
fn first_row_id(output: &str) -> String {
    output
        .lines()
        .find_map(|line| {
            let rest = line.split("Row ID: `").nth(1)?;
            rest.split('`').next().map(str::to_string)
        })
        .expect("board output should contain a row id")
}

fn login(db_arg: &str) {
    mx_cmd()
        .args([
            "--database-file",
            db_arg,
            "board",
            "login",
            "Dev",
            "dev@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in to board 'Dev'"));
}

#[test]
fn test_cli_help_lists_commands() {
    mx_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("board"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_cli_requires_login() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mx_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "board", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active session"));
}

#[test]
fn test_cli_login_and_show_board() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args(["--database-file", db_arg, "board", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Weekly Matrix Board: Dev"))
        .stdout(predicate::str::contains("STRATEGIC INITIATIVES"))
        .stdout(predicate::str::contains("## Meeting Priority Section"));
}

#[test]
fn test_cli_bare_invocation_shows_board() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args(["--database-file", db_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Weekly Matrix Board: Dev"));
}

#[test]
fn test_cli_add_row() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args([
            "--database-file",
            db_arg,
            "row",
            "add",
            "p2",
            "--label",
            "Importer rework",
            "--effort",
            "20%",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added row 'Importer rework'"))
        .stdout(predicate::str::contains("P2 / 20%"));
}

#[test]
fn test_cli_set_and_toggle_cell() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    let output = mx_cmd()
        .args(["--database-file", db_arg, "board", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let row_id = first_row_id(&String::from_utf8(output).expect("Invalid UTF-8"));

    mx_cmd()
        .args([
            "--database-file",
            db_arg,
            "cell",
            "set",
            &row_id,
            "monday",
            "Ship the release",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set monday cell to 'Ship the release'",
        ));

    mx_cmd()
        .args(["--database-file", db_arg, "cell", "toggle", &row_id, "monday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked monday cell complete"));

    mx_cmd()
        .args(["--database-file", db_arg, "board", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday: [x] Ship the release"));
}

#[test]
fn test_cli_deploy_and_history() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args([
            "--database-file",
            db_arg,
            "deploy",
            "--start",
            "2026-01-12",
            "--end",
            "2026-01-16",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Archived week '2026-01-12 TO 2026-01-16' as week 1",
        ));

    mx_cmd()
        .args(["--database-file", db_arg, "history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Archived Weeks"))
        .stdout(predicate::str::contains("Week 1: 2026-01-12 TO 2026-01-16"));

    mx_cmd()
        .args(["--database-file", db_arg, "history", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Week 1: 2026-01-12 TO 2026-01-16"))
        .stdout(predicate::str::contains("Total tasks: 0"));
}

#[test]
fn test_cli_duplicate_deploy_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    let deploy = [
        "--database-file",
        db_arg,
        "deploy",
        "--start",
        "2026-01-12",
        "--end",
        "2026-01-16",
    ];
    mx_cmd().args(deploy).assert().success();
    mx_cmd()
        .args(deploy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already been archived"));
}

#[test]
fn test_cli_history_show_missing_week() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args(["--database-file", db_arg, "history", "show", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Week 5 not found"));
}

#[test]
fn test_cli_settings_show_and_set() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args(["--database-file", db_arg, "settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DevOps PAT: not set"))
        .stdout(predicate::str::contains("Email: dev@example.com"));

    mx_cmd()
        .args([
            "--database-file",
            db_arg,
            "settings",
            "set",
            "--organization",
            "Aptean",
            "--project",
            "EDIOne",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    mx_cmd()
        .args(["--database-file", db_arg, "settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Organization: Aptean"))
        .stdout(predicate::str::contains("Project: EDIOne"));
}

#[test]
fn test_cli_settings_set_requires_a_change() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args(["--database-file", db_arg, "settings", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one setting"));
}

#[test]
fn test_cli_sync_requires_pat() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args(["--database-file", db_arg, "sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("personal access token"));
}

#[test]
fn test_cli_drop_ignores_malformed_payload() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    let output = mx_cmd()
        .args(["--database-file", db_arg, "board", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let row_id = first_row_id(&String::from_utf8(output).expect("Invalid UTF-8"));

    mx_cmd()
        .args([
            "--database-file",
            db_arg,
            "cell",
            "drop",
            &row_id,
            "friday",
            "{not json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignored malformed work-item payload"));
}

#[test]
fn test_cli_logout_clears_session() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    login(db_arg);

    mx_cmd()
        .args(["--database-file", db_arg, "board", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    mx_cmd()
        .args(["--database-file", db_arg, "board", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active session"));
}

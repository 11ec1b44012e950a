use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".aitrade").join("config.json")
}

const BINARY_NAME: &str = "aitrade";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"));
}

#[test]
/// Start should reject a malformed time range before touching the terminal.
fn start_rejects_unknown_time_range() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("start").arg("--time-range").arg("2w");
    cmd.assert()
        .failure()
        .stderr(contains("unknown time range"));
}

#[test]
/// Reset command should delete an existing config file.
fn reset_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    // Run the command
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Clearing client configuration"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
#[ignore] // Requires a reachable trading server.
fn check_update_reports_version_state() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("check-update")
        .env("AITRADE_SERVER", "http://localhost:5000")
        .assert()
        .success();
}

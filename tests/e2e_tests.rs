//! End-to-end tests running the klupd binary
//!
//! The binary is pointed at empty temp directories with --offline, so
//! every check resolves locally and deterministically: git components
//! read as not installed, web clients as tool missing, and the system
//! pseudo-component is excluded to keep apt out of the picture.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn klupd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("klupd").unwrap();
    // isolate from any real ~/.config/klupd.toml
    cmd.env("HOME", home.path())
        .arg("--home")
        .arg(home.path())
        .arg("--systemd-dir")
        .arg(home.path().join("systemd"))
        .arg("--offline");
    cmd
}

#[test]
fn help_shows_usage() {
    Command::cargo_bin("klupd")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update status checker"))
        .stdout(predicate::str::contains("--offline"));
}

#[test]
fn empty_home_renders_placeholders_and_no_actions() {
    let home = TempDir::new().unwrap();

    klupd(&home)
        .args(["--exclude", "system", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Component"))
        .stdout(predicate::str::contains("--------"))
        .stdout(predicate::str::contains("not installed"))
        .stdout(predicate::str::contains(
            "5 components checked, 0 update(s) available",
        ))
        .stdout(predicate::str::contains("Update actions:").not());
}

#[test]
fn offline_web_client_reports_tool_missing() {
    let home = TempDir::new().unwrap();

    klupd(&home)
        .args(["--only", "mainsail", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mainsail"))
        .stdout(predicate::str::contains("tool missing"))
        .stdout(predicate::str::contains(
            "1 components checked, 0 update(s) available",
        ));
}

#[test]
fn json_output_is_machine_readable() {
    let home = TempDir::new().unwrap();

    let output = klupd(&home)
        .args(["--exclude", "system", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let components = value["components"].as_array().unwrap();
    assert_eq!(components.len(), 5);
    for component in components {
        assert_eq!(component["status"], "unknown");
    }
    assert_eq!(value["actions"].as_array().unwrap().len(), 0);
}

#[test]
fn local_web_client_version_survives_offline_mode() {
    let home = TempDir::new().unwrap();
    let mainsail = home.path().join("mainsail");
    std::fs::create_dir(&mainsail).unwrap();
    std::fs::write(mainsail.join(".version"), "v2.12.0\n").unwrap();

    klupd(&home)
        .args(["--only", "mainsail", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v2.12.0"));
}

#[test]
fn unknown_component_filter_is_rejected() {
    let home = TempDir::new().unwrap();

    klupd(&home)
        .args(["--only", "octopi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown component 'octopi'"));
}

#[test]
fn quiet_and_verbose_conflict() {
    let home = TempDir::new().unwrap();

    klupd(&home).args(["--quiet", "--verbose"]).assert().failure();
}

#[test]
fn missing_explicit_config_file_is_fatal() {
    let home = TempDir::new().unwrap();

    klupd(&home)
        .args(["--config", "/nonexistent/klupd.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("settings file not found"));
}

#[test]
fn config_file_overrides_are_honored() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("klupd.toml");
    std::fs::write(
        &config,
        "[components.mainsail]\nversion_file = \"/nonexistent/.version\"\n",
    )
    .unwrap();

    klupd(&home)
        .arg("--config")
        .arg(&config)
        .args(["--only", "mainsail", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--------"));
}

//! End-to-end tests of the `folio` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn folio() -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    for key in ["FOLIO_PORT", "FOLIO_BUILD_DIR", "FOLIO_SOURCE_DIR", "RUST_LOG"] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

fn create_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("index.html"), "<p>Hello   there</p>").unwrap();
    temp
}

#[test]
fn test_help_lists_commands() {
    folio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_build_prints_summary() {
    let site = create_site();

    folio()
        .args(["build", "--cwd"])
        .arg(site.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Build Summary"))
        .stderr(predicate::str::contains("index.html"));

    assert_eq!(
        fs::read_to_string(site.path().join("dist").join("index.html")).unwrap(),
        "<p>Hello there</p>"
    );
}

#[test]
fn test_build_dir_from_environment() {
    let site = create_site();

    folio()
        .args(["build", "--cwd"])
        .arg(site.path())
        .env("FOLIO_BUILD_DIR", "from-env")
        .assert()
        .success();

    assert!(site.path().join("from-env").join("index.html").is_file());
}

#[test]
fn test_invalid_config_fails() {
    let site = create_site();
    fs::write(site.path().join("folio.config.json"), r#"{ "outDir": "x" }"#).unwrap();

    folio()
        .args(["build", "--cwd"])
        .arg(site.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_dev_without_root_document_fails_before_binding() {
    let temp = TempDir::new().unwrap();

    folio()
        .args(["dev", "--no-browser", "--cwd"])
        .arg(temp.path())
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("index.html"));
}

#[test]
fn test_dev_rejects_port_zero() {
    folio()
        .args(["dev", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Port must be between 1 and 65535"));
}

#[test]
fn test_info_schema_is_json() {
    let output = folio().args(["info", "--schema"]).output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"]["buildDir"].is_object());
}

#[test]
fn test_check_fails_on_incomplete_site() {
    let site = create_site();

    folio()
        .args(["check", "--cwd"])
        .arg(site.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("css/style.css: required file is missing"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    folio()
        .args(["-v", "-q", "status"])
        .assert()
        .failure();
}

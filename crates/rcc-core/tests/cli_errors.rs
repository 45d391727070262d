//! CLI error handling tests.
//!
//! Covers: argument errors, missing and malformed config files,
//! conversion failures and their exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rcc(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rcc").expect("rcc binary should exist");
    cmd.env_clear()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg"));
    cmd
}

// ============================================================================
// Argument errors
// ============================================================================

mod arguments {
    use super::*;

    #[test]
    fn unknown_command_fails() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .arg("nonexistent-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn client_requires_identity() {
        let home = TempDir::new().unwrap();
        rcc(&home).arg("client").assert().code(2);
    }

    #[test]
    fn key_and_type_conflict() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .args(["client", "--key", "a", "--type", "com.acme.A"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("cannot be used with"));
    }

    #[test]
    fn unknown_field_is_usage_error() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .args(["explain", "--key", "api", "--field", "timeout"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("unknown field 'timeout'"))
            .stderr(predicate::str::contains("connect-timeout"));
    }

    #[test]
    fn override_without_equals_is_usage_error() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .args(["--set", "quarkus.rest-client.api.url", "list"])
            .assert()
            .code(10);
    }

    #[test]
    fn invalid_format_rejected() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .args(["--format", "xml", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("xml"));
    }
}

// ============================================================================
// Config file errors
// ============================================================================

mod config_files {
    use super::*;

    #[test]
    fn missing_explicit_file_is_io_error() {
        let home = TempDir::new().unwrap();
        let missing = home.path().join("missing.yaml");
        rcc(&home)
            .arg("--config")
            .arg(&missing)
            .arg("list")
            .assert()
            .code(21)
            .stderr(predicate::str::contains("\"category\": \"io\""));
    }

    #[test]
    fn unsupported_extension() {
        let home = TempDir::new().unwrap();
        let path = home.path().join("application.ini");
        fs::write(&path, "[x]\n").unwrap();
        rcc(&home)
            .arg("--config")
            .arg(&path)
            .args(["-f", "summary", "list"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("Unsupported Config Format"));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let home = TempDir::new().unwrap();
        let path = home.path().join("application.toml");
        fs::write(&path, "[quarkus\nbroken = \n").unwrap();
        rcc(&home)
            .arg("--config")
            .arg(&path)
            .arg("list")
            .assert()
            .code(11)
            .stderr(predicate::str::contains("\"code\": 61"));
    }
}

// ============================================================================
// Conversion errors
// ============================================================================

mod conversion {
    use super::*;

    #[test]
    fn bad_boolean_names_the_key() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .args(["--set", "quarkus.rest-client.api.follow-redirects=notabool"])
            .args(["client", "--key", "api"])
            .assert()
            .code(12)
            .stderr(predicate::str::contains("quarkus.rest-client.api.follow-redirects"))
            .stderr(predicate::str::contains("\"value\": \"notabool\""));
    }

    #[test]
    fn explain_reports_conversion_failure() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .args(["--set", "quarkus.rest-client.api.connect-timeout=soon"])
            .args(["-f", "summary", "explain", "--key", "api", "--field", "connect-timeout"])
            .assert()
            .code(12)
            .stdout(predicate::str::contains("error:"));
    }

    #[test]
    fn bad_envers_boolean() {
        let home = TempDir::new().unwrap();
        rcc(&home)
            .args(["--set", "quarkus.hibernate-envers.store-data-at-delete=maybe"])
            .args(["-f", "summary", "envers"])
            .assert()
            .code(12)
            .stderr(predicate::str::contains("Invalid Configuration Value"));
    }
}

//! Integration tests for the AQPulse CLI
//!
//! Only offline commands are exercised here.

use std::process::{Command, Output};

fn aqpulse(args: &[&str]) -> Output {
    let missing_config = std::env::temp_dir().join("aqpulse-tests-no-such-config.toml");
    Command::new(env!("CARGO_BIN_EXE_aqpulse"))
        .args(args)
        .env("AQPULSE_CONFIG", missing_config)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute aqpulse")
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = aqpulse(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("aqpulse"));
    assert!(stdout.contains("Real-time air quality"));
    assert!(stdout.contains("fetch"));
    assert!(stdout.contains("classify"));
}

#[test]
fn test_cli_without_subcommand_fails() {
    let output = aqpulse(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_classify_command() {
    let output = aqpulse(&["classify", "180"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Unhealthy (severity 4, red)");
}

#[test]
fn test_classify_boundaries_and_negatives() {
    let stdout = String::from_utf8_lossy(&aqpulse(&["classify", "50"]).stdout).to_string();
    assert!(stdout.starts_with("Good"));

    let stdout = String::from_utf8_lossy(&aqpulse(&["classify", "301"]).stdout).to_string();
    assert!(stdout.starts_with("Hazardous"));

    let stdout = String::from_utf8_lossy(&aqpulse(&["classify", "-5"]).stdout).to_string();
    assert!(stdout.starts_with("Good"));
}

#[test]
fn test_classify_without_value_is_no_data() {
    for args in [&["classify"][..], &["classify", "NaN"][..], &["classify", "abc"][..]] {
        let output = aqpulse(args);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.trim(), "No data (severity 0, zinc)");
    }
}

#[test]
fn test_cities_command() {
    let output = aqpulse(&["cities"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let cities: Vec<&str> = stdout.lines().collect();
    assert_eq!(cities.len(), 12);
    assert_eq!(cities.first(), Some(&"Delhi"));
    assert_eq!(cities.last(), Some(&"Patna"));
}

#[test]
fn test_fetch_rejects_unknown_city() {
    let output = aqpulse(&["fetch", "--city", "Gotham"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown city 'Gotham'"));
}

#[test]
fn test_watch_rejects_out_of_range_interval() {
    for interval in ["0", "1", "86401"] {
        let output = aqpulse(&["watch", "--city", "Delhi", "--interval", interval]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Watch interval must be between 10 and 86400 seconds"));
    }
}

#[test]
fn test_invalid_config_from_environment() {
    let missing_config = std::env::temp_dir().join("aqpulse-tests-no-such-config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_aqpulse"))
        .args(["cities"])
        .env("AQPULSE_CONFIG", missing_config)
        .env("AQPULSE_LOGGING__LEVEL", "loud")
        .output()
        .expect("Failed to execute aqpulse");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid log level"));
}

//! CLI Integration Tests
//!
//! These tests run the `luxon` binary and check output formats and command
//! behaviors. Readings come from `--lux` or the demo sensor, so no light
//! sensor is needed. Tests that read real hardware are marked #[ignore].
//!
//! Run:
//! ```
//! cargo test --package luxon-cli --test cli_integration
//! ```
//!
//! Run hardware tests:
//! ```
//! cargo test --package luxon-cli --test cli_integration -- --ignored --nocapture
//! ```

use std::process::Command;

use tempfile::TempDir;

/// Get path to the luxon binary
fn get_binary_path() -> String {
    // Try release first, then debug
    let release_path = env!("CARGO_MANIFEST_DIR").to_string() + "/../../target/release/luxon";
    let debug_path = env!("CARGO_MANIFEST_DIR").to_string() + "/../../target/debug/luxon";

    if std::path::Path::new(&release_path).exists() {
        release_path
    } else if std::path::Path::new(&debug_path).exists() {
        debug_path
    } else {
        // Fall back to cargo run
        "cargo".to_string()
    }
}

/// Run luxon with an isolated config directory and return output
fn run_luxon(args: &[&str]) -> std::process::Output {
    let binary = get_binary_path();
    let home = TempDir::new().expect("Failed to create temp home");

    let mut cmd = if binary == "cargo" {
        let mut cmd = Command::new("cargo");
        cmd.args(["run", "--quiet", "--package", "luxon-cli", "--"]);
        cmd
    } else {
        Command::new(&binary)
    };
    cmd.args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("LUXON_SENSOR")
        .env_remove("NO_COLOR")
        .output()
        .expect("Failed to run luxon")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = run_luxon(&["--help"]);
    assert!(output.status.success(), "Help should succeed");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("luxon"), "Help should mention luxon");
    for command in ["read", "watch", "recommend", "info", "config"] {
        assert!(stdout.contains(command), "Help should list {command}");
    }
}

#[test]
fn test_version_command() {
    let output = run_luxon(&["--version"]);
    assert!(output.status.success(), "Version should succeed");
    assert!(stdout_of(&output).contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_lux_text() {
    let output = run_luxon(&["read", "--lux", "100", "--no-color"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("100 lux  [LOW]  (test)"), "got: {stdout}");
    assert!(stdout.contains("Ortam ışığı yetersiz"));
}

#[test]
fn test_read_lux_json() {
    let output = run_luxon(&["read", "--lux", "700", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("read should print valid JSON");
    assert_eq!(json["lux"], 700.0);
    assert_eq!(json["category"], "high");
    assert_eq!(json["message"], "Ortam ışığı fazla parlak");
    assert_eq!(json["color"], "#D4AF63");
    assert_eq!(json["mode"], "test");
    assert!((json["progress"].as_f64().unwrap() - 0.7).abs() < 1e-6);
}

#[test]
fn test_read_boundaries_are_ideal() {
    for lux in ["150", "600"] {
        let output = run_luxon(&["read", "--lux", lux, "--format", "json"]);
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["category"], "ideal", "{lux} lux should be ideal");
    }
}

#[test]
fn test_read_lux_csv() {
    let output = run_luxon(&["read", "--lux", "1200", "--format", "csv"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("timestamp,lux,category,progress,mode"));
    let row = lines.next().expect("CSV should have a data row");
    assert!(row.ends_with(",1200.0,high,1.000,test"), "got: {row}");
}

#[test]
fn test_read_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reading.json");
    let path_str = path.to_str().unwrap();

    let output = run_luxon(&["read", "--lux", "300", "-f", "json", "-o", path_str]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"ideal\""));
}

#[test]
fn test_read_demo_sensor() {
    let output = run_luxon(&["read", "--demo", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mode"], "live");
    assert!(json["lux"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_read_invalid_format() {
    let output = run_luxon(&["read", "--lux", "100", "--format", "yaml"]);
    assert!(!output.status.success(), "Unknown format should fail");
}

// =============================================================================
// Watch Tests
// =============================================================================

#[test]
fn test_watch_demo_csv_count() {
    let output = run_luxon(&[
        "watch", "--demo", "-n", "3", "-i", "20", "--format", "csv", "--quiet",
    ]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "header plus three rows, got: {stdout}");
    assert_eq!(lines[0], "timestamp,lux,category,progress,mode");
    assert!(lines[1..].iter().all(|line| line.ends_with(",live")));
}

// =============================================================================
// Recommend and Info Tests
// =============================================================================

#[test]
fn test_recommend_high() {
    let output = run_luxon(&["recommend", "--lux", "700", "--no-color"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Mevcut ışık seviyesi: 700 lux"));
    assert!(stdout.contains("perdeleri kapatın"));
}

#[test]
fn test_recommend_rejects_csv() {
    let output = run_luxon(&["recommend", "--lux", "100", "--format", "csv"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CSV"));
}

#[test]
fn test_info() {
    let output = run_luxon(&["info", "--no-color"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("LUXON - Smart Light Assistant"));
    assert!(stdout.contains("Çalışma için: 300-500 lux"));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_path() {
    let output = run_luxon(&["config", "path"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).trim().ends_with("config.toml"));
}

// =============================================================================
// Hardware Tests
// =============================================================================

#[test]
#[ignore]
fn test_read_hardware_sensor() {
    let output = run_luxon(&["read", "--format", "json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mode"], "live");
}

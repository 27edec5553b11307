//! Smoke tests for argument wiring and pre-connection validation.
//!
//! None of these reach a database: either clap rejects the input, the
//! entity fails validation, or configuration cannot be resolved.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `wms` with an empty environment and a HOME that has no config file.
fn wms(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wms").unwrap();
    cmd.env_clear()
        .env("HOME", home.path())
        .current_dir(home.path());
    cmd
}

// === Help Tests ===

#[test]
fn test_top_level_help_lists_entities() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("warehouse"))
        .stdout(predicate::str::contains("shelf-block"))
        .stdout(predicate::str::contains("product"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_shelf_block_create_help() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .args(["shelf-block", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--warehouse-id"))
        .stdout(predicate::str::contains("--storage-type"));
}

#[test]
fn test_product_create_help() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .args(["product", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--perishable"))
        .stdout(predicate::str::contains("Maximum retail price"));
}

// === Validation Tests ===

#[test]
fn test_warehouse_create_rejects_empty_name() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .args(["warehouse", "create", "--name", "", "--latitude", "12.97", "--longitude", "77.59"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("name cannot be empty"));
}

#[test]
fn test_warehouse_create_rejects_out_of_range_coordinates() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .args(["warehouse", "create", "--name", "Main", "--latitude", "91", "--longitude", "-181"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("latitude has to be in the range"))
        .stderr(predicate::str::contains("longitude has to be in the range"));
}

#[test]
fn test_product_create_rejects_negative_weight() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .args([
            "product", "create", "SKU-1", "--name", "Milk", "--mrp", "56", "--length", "7.5",
            "--width", "7.5", "--height", "20", "--weight", "-1",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("weightKg has to be a non-negative number"));
}

#[test]
fn test_shelf_create_requires_shelf_block_id() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .args(["shelf", "create", "--label", "A-1", "--section", "north", "--level", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--shelf-block-id"));
}

// === Configuration Tests ===

#[test]
fn test_missing_configuration_is_reported() {
    let home = TempDir::new().unwrap();
    wms(&home)
        .args(["warehouse", "get", "W1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("unable to read environment variable"));
}

#[test]
fn test_unreadable_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.toml");
    wms(&home)
        .arg("--config")
        .arg(&missing)
        .args(["product", "get", "SKU-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn test_config_file_log_level_enables_debug_output() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("wms.toml");
    std::fs::write(
        &config,
        r#"
logLevel = "debug"

[postgres]
host = "127.0.0.1"
username = "wms"
password = "hunter2"
dbName = "wms"
sslMode = "sometimes"
"#,
    )
    .unwrap();

    wms(&home)
        .arg("--config")
        .arg(&config)
        .args(["warehouse", "get", "W1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration loaded"))
        .stderr(predicate::str::contains("ssl_mode"))
        .stderr(predicate::str::contains("hunter2").not());
}

#[test]
fn test_default_log_level_hides_debug_output() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("wms.toml");
    std::fs::write(
        &config,
        r#"
[postgres]
host = "127.0.0.1"
username = "wms"
password = "hunter2"
dbName = "wms"
sslMode = "sometimes"
"#,
    )
    .unwrap();

    wms(&home)
        .arg("--config")
        .arg(&config)
        .args(["warehouse", "get", "W1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration loaded").not());
}

// Configuration loading tests
// Feature: job-search

use common::config::Settings;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_empty_directory_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::load_from_path(temp_dir.path()).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8080);
    assert!(settings.catalog.path.is_none());
    assert_eq!(settings.observability.log_level, "info");
    assert!(settings.validate().is_ok());
}

#[test]
fn test_local_file_overrides_default_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("default.toml"),
        r#"
[server]
host = "127.0.0.1"
port = 3000

[catalog]
path = "data/jobs.json"

[observability]
log_level = "debug"
"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("local.toml"),
        r#"
[server]
port = 3100
"#,
    )
    .unwrap();

    let settings = Settings::load_from_path(temp_dir.path()).unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 3100);
    assert_eq!(settings.catalog.path.as_deref(), Some("data/jobs.json"));
    assert_eq!(settings.observability.log_level, "debug");
}

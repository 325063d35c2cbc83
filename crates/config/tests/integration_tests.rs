//! Integration tests for the config crate

use chrono::NaiveDate;
use court_booker_config::{
    load_schedule_file, validate_config, AppConfig, ConfigError, ConfigLoader, ScheduleConfig,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_config_round_trip_through_file() {
    let file = write_file(
        ".toml",
        r#"
[portal]
sessions_url = "http://localhost:8080/sessions"
booking_url = "http://localhost:8080/book"
session_cookie = "sessionid=abc"

[schedule]
entries = ["Mon 18:00-20:00"]

[logging]
level = "debug"
"#,
    );

    let config = ConfigLoader::from_file(file.path()).expect("Failed to load config");

    assert!(validate_config(&config).is_ok());
    assert_eq!(config.portal.booking_url, "http://localhost:8080/book");
    assert_eq!(config.schedule.entries, vec!["Mon 18:00-20:00"]);
}

#[test]
fn test_load_tolerates_missing_file() {
    let config = ConfigLoader::load(
        std::path::Path::new("/nonexistent/court-booker.toml"),
        "COURT_BOOKER_TEST_MISSING",
    )
    .expect("Missing file should fall back to defaults");

    assert_eq!(config.portal.sessions_window, 3);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_applies_env_overrides() {
    let file = write_file(".toml", "[portal]\ntimeout_ms = 1000\n");

    std::env::set_var("COURT_BOOKER_TEST_ENV__PORTAL__TIMEOUT_MS", "2500");
    std::env::set_var("COURT_BOOKER_TEST_ENV__LOGGING__LEVEL", "warn");

    let config = ConfigLoader::load(file.path(), "COURT_BOOKER_TEST_ENV");

    std::env::remove_var("COURT_BOOKER_TEST_ENV__PORTAL__TIMEOUT_MS");
    std::env::remove_var("COURT_BOOKER_TEST_ENV__LOGGING__LEVEL");

    let config = config.expect("Failed to load config");
    assert_eq!(config.portal.timeout_ms, 2500);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_yaml_and_json_agree() {
    let yaml = write_file(
        ".yaml",
        "portal:\n  sessions_window: 4\nlogging:\n  json: true\n",
    );
    let json = write_file(
        ".json",
        r#"{"portal": {"sessions_window": 4}, "logging": {"json": true}}"#,
    );

    let from_yaml = ConfigLoader::from_file(yaml.path()).unwrap();
    let from_json = ConfigLoader::from_file(json.path()).unwrap();

    assert_eq!(from_yaml.portal.sessions_window, from_json.portal.sessions_window);
    assert_eq!(from_yaml.logging.json, from_json.logging.json);
}

#[test]
fn test_invalid_config_rejected() {
    let config = ConfigLoader::from_toml(
        r#"
[portal]
sessions_window = 0

[schedule]
entries = ["Mon 18:00"]
"#,
    )
    .unwrap();

    let err = validate_config(&config).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("portal.sessions_window"));
    assert!(message.contains("schedule.entries[0]"));
}

#[test]
fn test_schedule_file_to_requests() {
    let file = write_file(
        ".txt",
        "# gym nights\nMon 18:00-19:00\nFri 20:00-21:30\n",
    );

    let config = AppConfig {
        schedule: ScheduleConfig {
            path: Some(file.path().to_path_buf()),
            entries: vec![],
        },
        ..Default::default()
    };

    let path = config.schedule.path.as_deref().unwrap();
    let entries = load_schedule_file(path).unwrap();

    // Wednesday
    let today = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
    let requests: Vec<_> = entries.iter().map(|e| e.to_request(today)).collect();

    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].date.as_str(), "20240122");
    assert_eq!(requests[0].hours.len(), 2);
    assert_eq!(requests[1].date.as_str(), "20240119");
    assert_eq!(requests[1].hours.len(), 3);
}

#[test]
fn test_schedule_file_errors() {
    let missing = load_schedule_file(std::path::Path::new("/nonexistent/schedule.txt"));
    assert!(matches!(missing, Err(ConfigError::IoError(_))));

    let file = write_file(".txt", "Mon 18:00-19:00\nMon 19:00-19:00\n");
    let invalid = load_schedule_file(file.path());
    assert!(matches!(invalid, Err(ConfigError::ScheduleError(_))));
}

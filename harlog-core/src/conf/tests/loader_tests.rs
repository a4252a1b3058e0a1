use crate::conf::{ConfigError, DeliveryMode, load_options};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_a_metrics_block() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("harlog.hcl");
    fs::write(
        &path,
        r#"
metrics {
  deny_list       = ["password"]
  blocklist       = ["token"]
  development     = true
  fire_and_forget = false
  base_log_url    = "https://docs.example.com"
  collector_url   = "http://127.0.0.1:9000"
  timeout_ms      = 500
}
"#,
    )
    .unwrap();

    // Act
    let options = load_options(&path).unwrap();

    // Assert
    assert_eq!(
        options.redaction.deny_list(),
        &["password".to_owned(), "token".to_owned()]
    );
    assert!(options.is_development);
    assert_eq!(options.delivery.mode, DeliveryMode::Await);
    assert_eq!(options.delivery.collector_url.as_str(), "http://127.0.0.1:9000/");
    assert_eq!(
        options.base_log_url.map(String::from),
        Some("https://docs.example.com/".to_owned())
    );
}

#[test]
fn non_string_hcl_entries_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("harlog.hcl");
    fs::write(&path, "metrics {\n  allow_list = [\"ok\", true]\n}\n").unwrap();

    let err = load_options(&path).unwrap_err();

    assert!(matches!(err, ConfigError::NonStringListEntry { index: 1, .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let err = load_options(&dir.path().join("absent.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn syntax_errors_are_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.hcl");
    fs::write(&path, "metrics {\n  deny_list = [\n").unwrap();

    let err = load_options(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

//! Integration tests for the config file.
//!
//! These tests verify that:
//! - A written template loads back as the default config
//! - An existing config file is never overwritten
//! - Invalid JSON is reported with the file path

use yisu_config::Config;
use yisu_core::TieHandling;

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_template_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.json");

    Config::write_template(&path).expect("template written");
    let config = Config::load_from(&path).expect("template loads");

    assert_eq!(config, Config::default());
    assert_eq!(config.survival.tie_handling, TieHandling::PerRecord);
    assert_eq!(config.display.top_n, 10);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_existing_config_is_not_overwritten() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"corpus": {"path": "cohort.csv", "mock_seed": 7}}"#)
        .expect("write config");

    assert!(Config::write_template(&path).is_err());

    let config = Config::load_from(&path).expect("custom config loads");
    assert_eq!(config.corpus.path.as_deref(), Some("cohort.csv"));
    assert_eq!(config.corpus.mock_seed, Some(7));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_invalid_config_names_the_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write config");

    let err = Config::load_from(&path).expect_err("invalid json must fail");
    assert!(err.to_string().contains("config.json"));
}

//! Tests for configuration loading.

use noughts::{GameConfig, Mode};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(*config.mode(), Mode::TwoPlayer);
    assert_eq!(*config.ai_delay_ms(), 350);
    assert_eq!(config.ai_delay(), Duration::from_millis(350));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mode = \"single-ai\"\nai_delay_ms = 0").unwrap();

    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.mode(), Mode::SingleAi);
    assert_eq!(config.ai_delay(), Duration::ZERO);
}

#[test]
fn test_missing_keys_take_defaults() {
    let config = GameConfig::from_toml("ai_delay_ms = 10").unwrap();
    assert_eq!(*config.mode(), Mode::TwoPlayer);
    assert_eq!(*config.ai_delay_ms(), 10);

    assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
}

#[test]
fn test_bad_mode_rejected() {
    let err = GameConfig::from_toml("mode = \"three-player\"").unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

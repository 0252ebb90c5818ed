// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use capture_control::ControlConfig;
use capture_control::config::{load_from_path, max_video_length, save_to_path};
use capture_control::errors::ConfigError;
use tempfile::tempdir;

#[test]
fn test_config_default() {
    // Test that default config can be created and is usable as-is
    let config = ControlConfig::default();

    assert_eq!(config.video_length, 15.0, "Videos should be capped at 15s by default");
    assert!(config.validate().is_ok(), "Default config should be valid");
}

#[test]
fn test_config_round_trip() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("nested").join("config.toml");
    let config = ControlConfig {
        video_length: 30.0,
        camera_button_width: 72.0,
        long_press_duration_ms: 350,
        ..ControlConfig::default()
    };

    save_to_path(&config, &path).expect("save should create directories");
    let loaded = load_from_path(&path).expect("saved config should load");
    assert_eq!(loaded, config);
}

#[test]
fn test_config_rejects_oversized_button() {
    let config = ControlConfig {
        camera_button_width: 200.0,
        ..ControlConfig::default()
    };
    match config.validate() {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "camera_button_width"),
        other => panic!("expected an invalid button width, got {other:?}"),
    }
}

#[test]
fn test_config_rejects_non_finite_length() {
    let config = ControlConfig {
        video_length: f64::NAN,
        ..ControlConfig::default()
    };
    assert!(config.validate().is_err());

    let config = ControlConfig {
        long_press_duration_ms: 0,
        ..ControlConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_rejects_length_the_ticker_cannot_reach() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "video_length = 1e30\n").expect("failed to write config");

    match load_from_path(&path) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "video_length"),
        other => panic!("expected an invalid video_length, got {other:?}"),
    }

    // The last length the tick counter can still run past is accepted
    let config = ControlConfig {
        video_length: max_video_length().as_secs_f64() - 1.0,
        ..ControlConfig::default()
    };
    assert!(config.validate().is_ok());
}

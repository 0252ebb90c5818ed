// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as `config.toml` in the platform config directory, e.g.
//! `~/.config/capture-control/config.toml`. Missing keys fall back to the
//! defaults, a missing file means all defaults.

use crate::constants::{self, timing};
use crate::control::Rect;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Maximum video length in seconds
    pub video_length: f64,
    /// Shutter diameter in points
    pub camera_button_width: f64,
    /// Hold time before a press turns into recording
    pub long_press_duration_ms: u64,
    /// Widget frame width in points
    pub frame_width: f64,
    /// Widget frame height in points
    pub frame_height: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            video_length: constants::DEFAULT_VIDEO_LENGTH_SECS,
            camera_button_width: constants::DEFAULT_CAMERA_BUTTON_WIDTH,
            long_press_duration_ms: timing::DEFAULT_LONG_PRESS_MS,
            frame_width: constants::DEFAULT_FRAME_WIDTH,
            frame_height: constants::DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl ControlConfig {
    pub fn frame(&self) -> Rect {
        Rect::new(0.0, 0.0, self.frame_width, self.frame_height)
    }

    pub fn long_press_duration(&self) -> Duration {
        Duration::from_millis(self.long_press_duration_ms)
    }

    /// Reject values the control cannot be built with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("video_length", self.video_length)?;
        let max_length = max_video_length().as_secs_f64();
        if self.video_length >= max_length {
            return Err(ConfigError::Invalid {
                field: "video_length",
                reason: format!("must be below {} seconds", max_length),
            });
        }
        positive("camera_button_width", self.camera_button_width)?;
        positive("frame_width", self.frame_width)?;
        positive("frame_height", self.frame_height)?;

        if self.camera_button_width > self.frame_width
            || self.camera_button_width > self.frame_height
        {
            return Err(ConfigError::Invalid {
                field: "camera_button_width",
                reason: format!(
                    "{} does not fit a {}x{} frame",
                    self.camera_button_width, self.frame_width, self.frame_height
                ),
            });
        }
        if self.long_press_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "long_press_duration_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Longest recording the tick counter can run past
pub fn max_video_length() -> Duration {
    timing::TICK_INTERVAL * u32::MAX
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

/// Default location of the config file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(constants::APP_DIR_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load from the default location, or defaults when there is no file
pub fn load() -> Result<ControlConfig, ConfigError> {
    if let Some(path) = default_config_path()
        && path.exists()
    {
        return load_from_path(&path);
    }
    debug!("No config file found, using defaults");
    Ok(ControlConfig::default())
}

pub fn load_from_path(path: &Path) -> Result<ControlConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ControlConfig = toml::from_str(&content)?;
    config.validate()?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

pub fn save_to_path(config: &ControlConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// SPDX-License-Identifier: MPL-2.0

//! Error types for the capture control application
//!
//! The control itself has no recoverable errors; these cover the
//! configuration file, gesture scripts and the terminal host.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug)]
pub enum AppError {
    /// Configuration errors
    Config(ConfigError),
    /// Gesture script could not be read or parsed
    Script(String),
    /// Terminal setup or drawing failed
    Terminal(String),
    /// Filesystem errors
    Io(String),
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config file could not be read or written
    Io(String),
    /// Config file is not valid TOML for this schema
    Parse(String),
    /// A value is out of range
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Script(msg) => write!(f, "Script error: {}", msg),
            AppError::Terminal(msg) => write!(f, "Terminal error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Failed to access config file: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config file: {}", msg),
            ConfigError::Invalid { field, reason } => write!(f, "Invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ConfigError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Script(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

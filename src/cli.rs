// SPDX-License-Identifier: GPL-3.0-only

//! Command-line interface for headless operations

use capture_control::config::{self, ControlConfig};
use capture_control::constants;
use capture_control::errors::{AppError, AppResult, ConfigError};
use capture_control::replay::{self, ReplayOptions};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};

/// Load the config from `path`, or from the default location
pub fn load_config(path: Option<&Path>) -> AppResult<ControlConfig> {
    let config = match path {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    Ok(config)
}

/// Replay a script and print one JSON line per emitted event
pub fn replay_script(
    script: &Path,
    config: &ControlConfig,
    complete_after_capture: bool,
    tail_ms: u64,
) -> AppResult<()> {
    let steps = replay::load_script(script)?;
    info!(steps = steps.len(), script = %script.display(), "Replaying script");

    let options = ReplayOptions {
        complete_after_capture,
        tail: Duration::from_millis(tail_ms),
    };
    let report = replay::replay(&steps, config, options)?;

    for record in &report.records {
        println!("{}", serde_json::to_string(record)?);
    }

    println!(
        "{}",
        serde_json::json!({
            "final_state": report.final_state,
            "record_time_ms": report.record_time_ms,
        })
    );

    Ok(())
}

pub fn print_config(config: &ControlConfig) -> AppResult<()> {
    let content = toml::to_string_pretty(config).map_err(ConfigError::from)?;
    print!("{}", content);
    Ok(())
}

pub fn print_config_path(path: Option<&Path>) -> AppResult<()> {
    match path
        .map(Path::to_path_buf)
        .or_else(config::default_config_path)
    {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(AppError::Config(ConfigError::Io(
            "no configuration directory on this platform".to_string(),
        ))),
    }
}

/// Send logs to a file; the terminal host owns stdout and stderr
pub fn init_file_logging() {
    let Some(mut path) = dirs::cache_dir() else {
        return;
    };
    path.push(constants::APP_DIR_NAME);
    if let Err(e) = std::fs::create_dir_all(&path) {
        warn!("Failed to create log directory: {}", e);
        return;
    }
    path.push("terminal.log");

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Failed to create log file: {}", e);
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
}

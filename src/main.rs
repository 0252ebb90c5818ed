// SPDX-License-Identifier: GPL-3.0-only

use capture_control::errors::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "capture-control")]
#[command(about = "Shutter control for camera capture screens")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal control (default)
    Terminal,

    /// Replay a timed input script and print emitted events as JSON lines
    Replay {
        /// Script file (JSON array of steps)
        script: PathBuf,

        /// Reveal retake/confirm as soon as a photo or video is captured
        #[arg(long)]
        complete_after_capture: bool,

        /// Keep time running this many milliseconds after the last step
        #[arg(long, default_value = "0")]
        tail_ms: u64,
    },

    /// Print the effective configuration
    Config {
        /// Print the config file location instead
        #[arg(long)]
        path: bool,
    },
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Terminal) | None => {
            cli::init_file_logging();
            let config = cli::load_config(cli.config.as_deref())?;
            capture_control::terminal::run(&config)
        }
        Some(Commands::Replay {
            script,
            complete_after_capture,
            tail_ms,
        }) => {
            init_logging();
            let config = cli::load_config(cli.config.as_deref())?;
            cli::replay_script(&script, &config, complete_after_capture, tail_ms)
        }
        Some(Commands::Config { path }) => {
            init_logging();
            if path {
                cli::print_config_path(cli.config.as_deref())
            } else {
                let config = cli::load_config(cli.config.as_deref())?;
                cli::print_config(&config)
            }
        }
    }
}

fn init_logging() {
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=capture_control=trace, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

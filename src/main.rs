//! ffchat - AI-powered ffmpeg command generator
//!
//! Describe a media task in plain language and get a ready-to-run ffmpeg
//! command, confirmed before anything executes.
//!
//! # Usage
//!
//! ```bash
//! ffchat "convert video.mp4 to webm"
//! ffchat -y "extract audio from video.mp4 as mp3"
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use ffchat::adapters::{LogFormat, TracingLogAdapter};
use ffchat::cli::{commands, Cli};

/// Main entry point for the ffchat CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let format = if cli.logging.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(e) = TracingLogAdapter::init(&cli.logging.log_level, format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting ffchat");

    match commands::run(&cli).await {
        Ok(()) => {
            info!("ffchat completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}", commands::describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

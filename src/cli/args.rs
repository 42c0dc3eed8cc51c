//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Extra help shown after the option list
pub const AFTER_HELP: &str = "\
Examples:
  ffchat \"convert video.mp4 to webm\"
  ffchat -y \"extract audio from video.mp4 as mp3\"
  ffchat \"resize image.jpg to 800x600\"

Confirmation:
  y - execute
  e - edit (ask the model to modify the command)
  n - cancel

Configuration:
  Set environment variables or create ~/.ffchat.json:
    FFCHAT_LLM_BASE_URL    - LLM API endpoint (required)
    FFCHAT_LLM_MODEL       - Model name (required)
    FFCHAT_LLM_API_KEY     - API key (optional)
    FFCHAT_LLM_TEMPERATURE - Generation temperature (default 0.1)
    FFCHAT_FFMPEG_PATH     - Custom ffmpeg path";

/// Configuration file options
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config file to use instead of ~/.ffchat.json
    #[arg(long, env = "FFCHAT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Save the effective configuration (file merged with environment) and exit
    #[arg(long)]
    pub write_config: bool,
}

/// Logging options
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Logging level or filter directive (RUST_LOG takes precedence)
    #[arg(long, env = "FFCHAT_LOG", default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

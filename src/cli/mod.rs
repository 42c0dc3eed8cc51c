//! CLI module for ffchat
//!
//! This module handles command-line argument parsing and command execution.

use clap::Parser;

pub mod args;
pub mod commands;

/// ffchat - AI-powered ffmpeg command generator
///
/// Describe a media task in plain language; ffchat asks a chat model for the
/// matching ffmpeg command, shows it, and runs it once you approve.
#[derive(Parser, Debug)]
#[command(name = "ffchat")]
#[command(about = "ffchat - AI-powered ffmpeg command generator")]
#[command(version)]
#[command(after_help = args::AFTER_HELP)]
pub struct Cli {
    /// Task description, e.g. "convert video.mp4 to webm"
    #[arg(value_name = "PROMPT", trailing_var_arg = true)]
    pub prompt: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    #[command(flatten)]
    pub config: args::ConfigArgs,

    #[command(flatten)]
    pub logging: args::LogArgs,
}

impl Cli {
    /// Positional words joined into one prompt; `None` when empty
    pub fn prompt_text(&self) -> Option<String> {
        let prompt = self.prompt.join(" ");
        let prompt = prompt.trim();
        if prompt.is_empty() {
            None
        } else {
            Some(prompt.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_words_are_joined() {
        let cli = Cli::try_parse_from(["ffchat", "convert", "video.mp4", "to", "webm"]).unwrap();
        assert_eq!(cli.prompt_text().as_deref(), Some("convert video.mp4 to webm"));
        assert!(!cli.yes);
    }

    #[test]
    fn test_skip_confirmation_flag() {
        let cli = Cli::try_parse_from(["ffchat", "-y", "extract audio from video.mp4"]).unwrap();
        assert!(cli.yes);
        assert_eq!(cli.prompt_text().as_deref(), Some("extract audio from video.mp4"));

        let cli = Cli::try_parse_from(["ffchat", "--yes", "resize", "image.jpg"]).unwrap();
        assert!(cli.yes);
    }

    #[test]
    fn test_empty_prompt() {
        let cli = Cli::try_parse_from(["ffchat"]).unwrap();
        assert_eq!(cli.prompt_text(), None);

        let cli = Cli::try_parse_from(["ffchat", "  "]).unwrap();
        assert_eq!(cli.prompt_text(), None);
    }

    #[test]
    fn test_config_and_logging_flags() {
        let cli = Cli::try_parse_from([
            "ffchat",
            "--config",
            "/tmp/ffchat.json",
            "--log-level",
            "debug",
            "--log-json",
            "trim",
            "clip.mp4",
        ])
        .unwrap();
        assert_eq!(
            cli.config.config.as_deref(),
            Some(std::path::Path::new("/tmp/ffchat.json"))
        );
        assert_eq!(cli.logging.log_level, "debug");
        assert!(cli.logging.log_json);
        assert_eq!(cli.prompt_text().as_deref(), Some("trim clip.mp4"));
    }
}

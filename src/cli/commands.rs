//! Command implementations

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::{debug, info, warn};

use crate::adapters::{FfmpegLocator, JsonConfigAdapter};
use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::Cli;
use crate::domain::errors::DomainError;
use crate::domain::model::{SessionOptions, SessionOutcome};

/// Execute the invocation described by `cli`
pub async fn run(cli: &Cli) -> Result<()> {
    let config_adapter = match &cli.config.config {
        Some(path) => JsonConfigAdapter::with_path(path),
        None => JsonConfigAdapter::new(),
    };

    if cli.config.write_config {
        return write_config(&config_adapter);
    }

    let Some(prompt) = cli.prompt_text() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = config_adapter.load()?;
    info!(model = %config.llm.model, base_url = %config.llm.base_url, "Configuration loaded");

    let locator = FfmpegLocator::locate(config.ffmpeg.path.as_deref())?;
    match locator.version().await {
        Ok(version) => debug!("{}", version),
        Err(e) => warn!("Could not read ffmpeg version: {}", e),
    }

    let container = DefaultAppContainer::new(&config, &locator, SessionOptions::new(cli.yes));
    let outcome = container
        .session_interactor()
        .run(&prompt)
        .await
        .context("Request failed")?;

    match outcome {
        SessionOutcome::Executed { command, result } => info!(
            command = %command,
            exit_code = ?result.exit_code,
            "Command completed"
        ),
        SessionOutcome::Cancelled => info!("Nothing executed"),
    }
    Ok(())
}

/// Save the effective configuration to the adapter's file
fn write_config(adapter: &JsonConfigAdapter) -> Result<()> {
    let config = adapter.load()?;
    let path = adapter
        .save(&config)
        .context("Failed to write configuration")?;
    println!("Configuration written to {}", path.display());
    Ok(())
}

/// User-facing rendering of a failed invocation
pub fn describe_error(error: &anyhow::Error) -> String {
    let Some(domain) = error.downcast_ref::<DomainError>() else {
        return format!("Error: {:#}", error);
    };

    match domain {
        DomainError::ConfigInvalid(_) => format!(
            "Error loading config: {}\n\
             Please set up your configuration using environment variables or ~/.ffchat.json\n\
             Required: FFCHAT_LLM_BASE_URL, FFCHAT_LLM_MODEL",
            domain
        ),
        DomainError::NotMediaTask(reason) => reason.clone(),
        DomainError::NotCandidate { response } => format!(
            "Warning: Response doesn't appear to be an ffmpeg command.\nResponse: {}",
            response
        ),
        DomainError::NotFound => format!("Error parsing command: {}", domain),
        DomainError::ExecutionFailed { .. } => format!("Error executing command: {}", domain),
        other => format!("Error: {}", other),
    }
}

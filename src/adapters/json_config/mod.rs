// JSON config adapter - Configuration from ~/.ffchat.json and FFCHAT_* variables

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::*;

/// File name looked up in the user's home directory
pub const CONFIG_FILE_NAME: &str = ".ffchat.json";

/// Environment variables overriding file values
pub const ENV_BASE_URL: &str = "FFCHAT_LLM_BASE_URL";
pub const ENV_API_KEY: &str = "FFCHAT_LLM_API_KEY";
pub const ENV_MODEL: &str = "FFCHAT_LLM_MODEL";
pub const ENV_TEMPERATURE: &str = "FFCHAT_LLM_TEMPERATURE";
pub const ENV_FFMPEG_PATH: &str = "FFCHAT_FFMPEG_PATH";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub ffmpeg: FfmpegConfig,
}

/// Chat model endpoint settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub temperature: f64,
}

/// Media tool settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FfmpegConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl AppConfig {
    /// Check fields without which no model call can be made
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.llm.base_url.trim().is_empty() {
            return Err(DomainError::ConfigInvalid(
                "LLM base URL is required".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(DomainError::ConfigInvalid("LLM model is required".to_string()));
        }
        if !self.llm.temperature.is_finite() || self.llm.temperature < 0.0 {
            return Err(DomainError::ConfigInvalid(format!(
                "LLM temperature must be a non-negative number, got {}",
                self.llm.temperature
            )));
        }
        Ok(())
    }

    /// Apply overrides from an environment lookup; set variables win over file values
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = var(ENV_BASE_URL) {
            self.llm.base_url = url;
        }
        if let Some(key) = var(ENV_API_KEY) {
            self.llm.api_key = key;
        }
        if let Some(model) = var(ENV_MODEL) {
            self.llm.model = model;
        }
        if let Some(temperature) = var(ENV_TEMPERATURE) {
            self.llm.temperature = temperature.trim().parse::<f64>().map_err(|e| {
                DomainError::ConfigInvalid(format!(
                    "{} is not a number ({}): {}",
                    ENV_TEMPERATURE, temperature, e
                ))
            })?;
        }
        if let Some(path) = var(ENV_FFMPEG_PATH) {
            self.ffmpeg.path = Some(path);
        }
        Ok(())
    }
}

/// Loads and saves [`AppConfig`] as a JSON document
pub struct JsonConfigAdapter {
    path: Option<PathBuf>,
}

impl JsonConfigAdapter {
    /// Adapter for the default per-user location
    pub fn new() -> Self {
        Self {
            path: Self::default_config_path(),
        }
    }

    /// Adapter for an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `~/.ffchat.json`, if a home directory is known
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the file (if any) without environment overrides or validation
    pub fn read_file(&self) -> Result<AppConfig, DomainError> {
        let Some(path) = self.path.as_deref() else {
            debug!("No home directory; skipping config file");
            return Ok(AppConfig::default());
        };

        if !path.exists() {
            debug!("Config file {} not found", path.display());
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::ConfigInvalid(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!("Loaded configuration from {}", path.display());
        serde_json::from_str(&content).map_err(|e| {
            DomainError::ConfigInvalid(format!(
                "failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Read the file, apply overrides from `lookup`, and validate
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.read_file()?;
        config.merge_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load using the process environment
    pub fn load(&self) -> Result<AppConfig, DomainError> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Write `config` as pretty JSON, creating parent directories
    pub fn save(&self, config: &AppConfig) -> Result<PathBuf, DomainError> {
        let path = self.path.clone().ok_or_else(|| {
            DomainError::ConfigInvalid("no home directory to store the config file in".to_string())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config).map_err(|e| {
            DomainError::ConfigInvalid(format!("failed to serialize config: {}", e))
        })?;
        std::fs::write(&path, content)?;
        restrict_permissions(&path)?;

        info!("Saved configuration to {}", path.display());
        Ok(path)
    }
}

impl Default for JsonConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// The file may hold an API key
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), DomainError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), DomainError> {
    Ok(())
}

// FFmpeg locator - Finds the media tool before any model call is made

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::TOOL_NAME;

/// Resolved location of the ffmpeg executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegLocator {
    path: PathBuf,
}

impl FfmpegLocator {
    /// Resolve a configured path, or search `PATH` for the tool
    pub fn locate(configured: Option<&str>) -> Result<Self, DomainError> {
        let path = match configured.map(str::trim).filter(|p| !p.is_empty()) {
            Some(configured) => which::which(configured)
                .map_err(|e| DomainError::ToolNotFound(format!("{}: {}", configured, e)))?,
            None => which::which(TOOL_NAME).map_err(|e| DomainError::ToolNotFound(e.to_string()))?,
        };

        debug!("Using ffmpeg at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the executable
    pub fn directory(&self) -> Option<&Path> {
        self.path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }

    /// First line of `ffmpeg -version`
    pub async fn version(&self) -> Result<String, DomainError> {
        let output = Command::new(&self.path).arg("-version").output().await?;
        if !output.status.success() {
            return Err(DomainError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string()))
    }
}

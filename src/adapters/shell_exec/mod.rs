//! Shell execution adapter
//!
//! Runs approved commands through `sh -c`, so the string gets full shell
//! semantics (globbing, redirection, chaining). When a tool directory is
//! set it is searched first, so `ffmpeg …` resolves to the located binary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Executes commands with the system shell, capturing stdout and stderr
pub struct ShellExecAdapter {
    shell: String,
    tool_dir: Option<PathBuf>,
}

impl ShellExecAdapter {
    /// Create adapter using `sh`
    pub fn new() -> Self {
        Self::with_shell("sh")
    }

    /// Create adapter using a specific shell binary
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            tool_dir: None,
        }
    }

    /// Put `dir` in front of the child's `PATH`
    pub fn with_tool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool_dir = Some(dir.into());
        self
    }

    fn search_path(dir: &Path) -> Result<OsString, DomainError> {
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = std::iter::once(dir.to_path_buf()).chain(std::env::split_paths(&inherited));
        std::env::join_paths(dirs).map_err(|e| DomainError::ExecutionFailed {
            exit_code: None,
            stderr: format!("cannot add {} to PATH: {}", dir.display(), e),
        })
    }
}

impl Default for ShellExecAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutePort for ShellExecAdapter {
    async fn execute(&self, command: &CandidateCommand) -> Result<ExecutionResult, DomainError> {
        info!(shell = %self.shell, command = %command, "Executing command");
        let started = Instant::now();

        let mut child = Command::new(&self.shell);
        child.arg("-c").arg(command.as_str()).stdin(Stdio::null());
        if let Some(dir) = &self.tool_dir {
            debug!("Searching {} first", dir.display());
            child.env("PATH", Self::search_path(dir)?);
        }

        let output = child
            .output()
            .await
            .map_err(|e| {
                error!("Failed to spawn {}: {}", self.shell, e);
                DomainError::ExecutionFailed {
                    exit_code: None,
                    stderr: e.to_string(),
                }
            })?;

        let result = ExecutionResult {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed: started.elapsed(),
        };

        info!(
            success = result.success,
            exit_code = ?result.exit_code,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Command finished"
        );

        result.into_checked()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn command(text: &str) -> CandidateCommand {
        CandidateCommand::new(text).unwrap()
    }

    #[tokio::test]
    async fn test_execute_captures_stdout_and_stderr_separately() {
        let adapter = ShellExecAdapter::new();
        let result = adapter
            .execute(&command("echo out; echo err 1>&2"))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_execute_nonzero_exit_carries_stderr() {
        let adapter = ShellExecAdapter::new();
        match adapter
            .execute(&command("echo 'input.mp4: No such file' 1>&2; exit 3"))
            .await
        {
            Err(DomainError::ExecutionFailed { exit_code, stderr }) => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr, "input.mp4: No such file\n");
            }
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_uses_shell_semantics() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        let line = format!("echo converted > '{}' && cat '{}'", target.display(), target.display());

        let result = ShellExecAdapter::new().execute(&command(&line)).await.unwrap();
        assert_eq!(result.stdout, "converted\n");
        assert!(target.exists());
    }

    #[tokio::test]
    async fn test_execute_finds_tool_in_tool_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let tool = dir.path().join("ffmpeg");
        std::fs::write(&tool, "#!/bin/sh\necho \"located $@\"\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let adapter = ShellExecAdapter::new().with_tool_dir(dir.path());
        let result = adapter.execute(&command("ffmpeg -i a b")).await.unwrap();
        assert_eq!(result.stdout, "located -i a b\n");
    }

    #[tokio::test]
    async fn test_execute_spawn_failure() {
        let adapter = ShellExecAdapter::with_shell("/nonexistent/shell-for-tests");
        match adapter.execute(&command("true")).await {
            Err(DomainError::ExecutionFailed { exit_code, stderr }) => {
                assert_eq!(exit_code, None);
                assert!(!stderr.is_empty());
            }
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }
}

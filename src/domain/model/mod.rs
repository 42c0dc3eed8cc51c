// Domain models - Core types and data structures

use std::fmt;
use std::time::Duration;

use crate::domain::errors::DomainError;

/// Name of the executable every generated command must invoke
pub const TOOL_NAME: &str = "ffmpeg";

/// Prefix the model is told to emit when a request is not a media task
pub const REFUSAL_TOKEN: &str = "NOT_FFMPEG:";

/// Unprocessed text returned by the model for a single turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub content: String,
}

impl RawResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A command line believed to be directly executable.
///
/// Always trimmed and never empty. Revisions produce a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCommand(String);

impl CandidateCommand {
    /// Build a candidate from extracted text, trimming surrounding whitespace
    pub fn new(command: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = command.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::NotFound);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CandidateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CandidateCommand {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of running a command through the shell
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ExecutionResult {
    /// Turn a failed run into `ExecutionFailed`, keeping the captured stderr
    pub fn into_checked(self) -> Result<Self, DomainError> {
        if self.success {
            Ok(self)
        } else {
            Err(DomainError::ExecutionFailed {
                exit_code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Per-invocation options for the confirm-and-run session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Treat the first extracted command as approved without asking
    pub skip_confirmation: bool,
}

impl SessionOptions {
    pub fn new(skip_confirmation: bool) -> Self {
        Self { skip_confirmation }
    }
}

/// How a session ended when it did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Executed {
        command: CandidateCommand,
        result: ExecutionResult,
    },
    Cancelled,
}

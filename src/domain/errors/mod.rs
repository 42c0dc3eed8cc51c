// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Required configuration is missing or unreadable
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// HTTP, network or non-2xx failure talking to the model
    #[error("{0}")]
    ModelTransport(String),

    /// The model declined because the request is not a media task
    #[error("{0}")]
    NotMediaTask(String),

    /// The model answered with something that does not look like a command
    #[error("Response doesn't appear to be an ffmpeg command")]
    NotCandidate { response: String },

    /// No command line could be isolated from the response
    #[error("no ffmpeg command found in response")]
    NotFound,

    /// The shell command could not be spawned or exited non-zero
    #[error("command failed ({}): {stderr}", describe_exit(.exit_code))]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The media tool is not installed
    #[error("ffmpeg is not installed or not in PATH: {0}")]
    ToolNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainError {
    /// Errors the edit step reports and recovers from instead of aborting
    pub fn is_recoverable_in_edit(&self) -> bool {
        matches!(
            self,
            DomainError::ModelTransport(_)
                | DomainError::NotMediaTask(_)
                | DomainError::NotCandidate { .. }
                | DomainError::NotFound
        )
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_embeds_stderr() {
        let err = DomainError::ExecutionFailed {
            exit_code: Some(1),
            stderr: "video.mp4: No such file or directory".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("exit status 1"));
        assert!(message.contains("No such file or directory"));
    }

    #[test]
    fn test_execution_failed_without_status() {
        let err = DomainError::ExecutionFailed {
            exit_code: None,
            stderr: "killed".to_string(),
        };
        assert_eq!(err.to_string(), "command failed (no exit status): killed");
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(DomainError::NotFound.is_recoverable_in_edit());
        assert!(DomainError::ModelTransport("boom".into()).is_recoverable_in_edit());
        assert!(!DomainError::ConfigInvalid("x".into()).is_recoverable_in_edit());
        assert!(!DomainError::ExecutionFailed {
            exit_code: Some(2),
            stderr: String::new()
        }
        .is_recoverable_in_edit());
    }
}

// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for the chat model that writes and revises commands
#[async_trait]
pub trait ModelPort: Send + Sync {
    /// Ask for a command accomplishing a plain-language task
    async fn generate_command(&self, prompt: &str) -> Result<RawResponse, DomainError>;

    /// Ask for a revision of `previous` following a free-text instruction
    async fn modify_command(
        &self,
        previous: &CandidateCommand,
        instruction: &str,
    ) -> Result<RawResponse, DomainError>;
}

/// Port for running an approved command
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run the command through the system shell, capturing its output.
    ///
    /// A non-zero exit or a spawn failure is reported as
    /// `DomainError::ExecutionFailed` carrying the captured stderr.
    async fn execute(&self, command: &CandidateCommand) -> Result<ExecutionResult, DomainError>;
}

/// Port for the interactive terminal
#[async_trait]
pub trait ConsolePort: Send + Sync {
    /// Show `prompt` without a newline and read one line of input.
    ///
    /// End of input yields an empty string.
    async fn read_line(&self, prompt: &str) -> Result<String, DomainError>;

    /// Show a message followed by a newline
    async fn print(&self, message: &str);
}

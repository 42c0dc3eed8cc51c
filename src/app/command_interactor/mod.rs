// Command interactor - Turns model replies into candidate commands

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for generating and revising commands with the model
pub struct CommandInteractor {
    model_port: Arc<dyn ModelPort>,
}

impl CommandInteractor {
    /// Create new command interactor with injected model port
    pub fn new(model_port: Arc<dyn ModelPort>) -> Self {
        Self { model_port }
    }

    /// Ask the model for a command accomplishing `prompt`
    pub async fn generate(&self, prompt: &str) -> Result<CandidateCommand, DomainError> {
        info!("Generating command for prompt: {}", prompt);
        let response = self.model_port.generate_command(prompt).await?;
        Self::interpret(response)
    }

    /// Ask the model to revise `current` following `instruction`
    pub async fn revise(
        &self,
        current: &CandidateCommand,
        instruction: &str,
    ) -> Result<CandidateCommand, DomainError> {
        info!("Revising command with instruction: {}", instruction);
        let response = self.model_port.modify_command(current, instruction).await?;
        Self::interpret(response)
    }

    /// Refusal check, then classification, then extraction
    pub fn interpret(response: RawResponse) -> Result<CandidateCommand, DomainError> {
        debug!("Raw model response: {:?}", response.content);

        if let Some(reason) = RefusalDetector::refusal_reason(&response.content) {
            info!("Model declined the request");
            return Err(DomainError::NotMediaTask(reason));
        }

        if !CommandClassifier::is_candidate(&response.content) {
            warn!("Model response was not recognised as a command");
            return Err(DomainError::NotCandidate {
                response: response.content,
            });
        }

        let command = CommandExtractor::extract(&response.content)?;
        info!("Extracted command: {}", command);
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(text: &str) -> Result<CandidateCommand, DomainError> {
        CommandInteractor::interpret(RawResponse::new(text))
    }

    #[test]
    fn test_interpret_backticked_command() {
        let command = interpret("`ffmpeg -i video.mp4 output.webm`").unwrap();
        assert_eq!(command.as_str(), "ffmpeg -i video.mp4 output.webm");
    }

    #[test]
    fn test_interpret_refusal_short_circuits() {
        match interpret("NOT_FFMPEG: ffmpeg -i is not for cooking") {
            Err(DomainError::NotMediaTask(reason)) => {
                assert_eq!(reason, "ffmpeg -i is not for cooking")
            }
            other => panic!("expected NotMediaTask, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_prose_is_not_candidate() {
        match interpret("I would need more details about the file.") {
            Err(DomainError::NotCandidate { response }) => {
                assert_eq!(response, "I would need more details about the file.")
            }
            other => panic!("expected NotCandidate, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_candidate_without_tool_line() {
        // Accepted by the substring fallback, but no line starts with the tool
        let result = interpret("Use: nice ffmpeg -i a.mp4 b.mp4");
        assert!(matches!(result, Err(DomainError::NotFound)));
    }
}

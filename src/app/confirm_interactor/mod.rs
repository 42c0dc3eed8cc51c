// Confirm interactor - Drives the approve / edit / cancel dialogue

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::command_interactor::CommandInteractor;
use crate::domain::confirmation::*;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

pub const DECISION_PROMPT: &str = "Execute this command? (y/N/e): ";
pub const INSTRUCTION_PROMPT: &str = "How do you want to modify the command? ";

/// Interactor gating execution behind user approval
pub struct ConfirmInteractor {
    console_port: Arc<dyn ConsolePort>,
    commands: Arc<CommandInteractor>,
    options: SessionOptions,
}

impl ConfirmInteractor {
    /// Create new confirm interactor with injected ports
    pub fn new(
        console_port: Arc<dyn ConsolePort>,
        commands: Arc<CommandInteractor>,
        options: SessionOptions,
    ) -> Self {
        Self {
            console_port,
            commands,
            options,
        }
    }

    /// Run the dialogue until the command is approved or cancelled.
    ///
    /// Returns the terminal state: `Approved` with the command to run, or
    /// `Cancelled`. Failed revisions are reported and leave the command as is.
    pub async fn confirm(
        &self,
        command: CandidateCommand,
    ) -> Result<ConfirmationState, DomainError> {
        if self.options.skip_confirmation {
            info!("Confirmation skipped");
            return Ok(ConfirmationState::Approved(command));
        }

        let mut state = ConfirmationState::new(command);
        let mut prompt = DECISION_PROMPT;

        loop {
            let input = self.console_port.read_line(prompt).await?;
            let (next, effect) = step(state, &input);
            state = next;

            match effect {
                SideEffect::AskInstruction => prompt = INSTRUCTION_PROMPT,
                SideEffect::Revise {
                    current,
                    instruction,
                } => {
                    state = self.apply_revision(state, &current, &instruction).await?;
                    prompt = DECISION_PROMPT;
                }
                SideEffect::Execute(command) => {
                    info!("Command approved: {}", command);
                    return Ok(ConfirmationState::Approved(command));
                }
                SideEffect::Abort => {
                    info!("Command cancelled by user");
                    return Ok(ConfirmationState::Cancelled);
                }
                SideEffect::None => return Ok(state),
            }
        }
    }

    async fn apply_revision(
        &self,
        state: ConfirmationState,
        current: &CandidateCommand,
        instruction: &str,
    ) -> Result<ConfirmationState, DomainError> {
        match self.commands.revise(current, instruction).await {
            Ok(revised) => {
                self.console_port
                    .print(&format!("\nUpdated command:\n{}\n", revised))
                    .await;
                Ok(state.with_revision(revised))
            }
            Err(e) if e.is_recoverable_in_edit() => {
                warn!("Revision failed: {}", e);
                self.console_port
                    .print(&format!("Error modifying command: {}", describe_revision_error(&e)))
                    .await;
                Ok(state)
            }
            Err(e) => Err(e),
        }
    }
}

fn describe_revision_error(error: &DomainError) -> String {
    match error {
        DomainError::NotCandidate { response } => {
            format!("{}\nResponse: {}", error, response)
        }
        DomainError::NotMediaTask(reason) => format!("model declined: {}", reason),
        other => other.to_string(),
    }
}

// Session interactor - Generate, confirm and run one command

use std::sync::Arc;

use tracing::info;

use crate::app::command_interactor::CommandInteractor;
use crate::app::confirm_interactor::ConfirmInteractor;
use crate::domain::confirmation::ConfirmationState;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor for the whole prompt-to-execution pipeline
pub struct SessionInteractor {
    commands: Arc<CommandInteractor>,
    confirm: ConfirmInteractor,
    execute_port: Arc<dyn ExecutePort>,
    console_port: Arc<dyn ConsolePort>,
}

impl SessionInteractor {
    /// Create new session interactor with injected ports
    pub fn new(
        model_port: Arc<dyn ModelPort>,
        execute_port: Arc<dyn ExecutePort>,
        console_port: Arc<dyn ConsolePort>,
        options: SessionOptions,
    ) -> Self {
        let commands = Arc::new(CommandInteractor::new(model_port));
        let confirm = ConfirmInteractor::new(
            Arc::clone(&console_port),
            Arc::clone(&commands),
            options,
        );

        Self {
            commands,
            confirm,
            execute_port,
            console_port,
        }
    }

    /// Run one request end to end.
    ///
    /// Any error is terminal for the invocation; cancellation is not an error.
    pub async fn run(&self, prompt: &str) -> Result<SessionOutcome, DomainError> {
        self.console_port.print("Thinking...").await;

        let command = self.commands.generate(prompt).await?;
        self.console_port
            .print(&format!("Generated command:\n{}\n", command))
            .await;

        let command = match self.confirm.confirm(command).await? {
            ConfirmationState::Approved(command) => command,
            _ => {
                self.console_port.print("Command cancelled.").await;
                return Ok(SessionOutcome::Cancelled);
            }
        };

        self.console_port.print("Executing command...").await;
        let result = self.execute_port.execute(&command).await?;

        if !result.stdout.trim().is_empty() {
            self.console_port.print(result.stdout.trim_end()).await;
        }
        self.console_port.print("Command executed successfully.").await;
        info!(
            "Session finished in {:.2}s",
            result.elapsed.as_secs_f64()
        );

        Ok(SessionOutcome::Executed { command, result })
    }
}

//! Approve / edit / cancel state machine
//!
//! The transition function is pure: it never touches the terminal or the
//! model. The driver in `app::confirm_interactor` reads input, calls [`step`]
//! and carries out the returned [`SideEffect`].

use crate::domain::model::CandidateCommand;

/// Where the confirmation dialogue currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Showing the command and waiting for y / e / anything else
    AwaitingDecision(CandidateCommand),
    /// Waiting for a free-text correction of the command
    Editing(CandidateCommand),
    /// Terminal: the command may run
    Approved(CandidateCommand),
    /// Terminal: nothing runs
    Cancelled,
}

/// Work the driver must do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    None,
    /// Prompt for a correction instruction
    AskInstruction,
    /// Ask the model to revise `current` according to `instruction`
    Revise {
        current: CandidateCommand,
        instruction: String,
    },
    /// Run the approved command
    Execute(CandidateCommand),
    /// Stop without running anything
    Abort,
}

/// User answer to the decision prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Edit,
    Cancel,
}

impl Decision {
    /// Interpret a raw line of input; case and surrounding whitespace are ignored
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Decision::Approve,
            "e" | "edit" => Decision::Edit,
            _ => Decision::Cancel,
        }
    }
}

impl ConfirmationState {
    /// Initial state for a freshly extracted command
    pub fn new(command: CandidateCommand) -> Self {
        ConfirmationState::AwaitingDecision(command)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConfirmationState::Approved(_) | ConfirmationState::Cancelled
        )
    }

    /// The command currently on display, if any
    pub fn command(&self) -> Option<&CandidateCommand> {
        match self {
            ConfirmationState::AwaitingDecision(command)
            | ConfirmationState::Editing(command)
            | ConfirmationState::Approved(command) => Some(command),
            ConfirmationState::Cancelled => None,
        }
    }

    /// Replace the displayed command after a successful revision.
    ///
    /// Only meaningful while awaiting a decision; other states are returned
    /// unchanged.
    pub fn with_revision(self, revised: CandidateCommand) -> Self {
        match self {
            ConfirmationState::AwaitingDecision(_) => {
                ConfirmationState::AwaitingDecision(revised)
            }
            other => other,
        }
    }
}

/// Advance the dialogue by one line of user input
pub fn step(state: ConfirmationState, input: &str) -> (ConfirmationState, SideEffect) {
    match state {
        ConfirmationState::AwaitingDecision(command) => match Decision::parse(input) {
            Decision::Approve => (
                ConfirmationState::Approved(command.clone()),
                SideEffect::Execute(command),
            ),
            Decision::Edit => (
                ConfirmationState::Editing(command),
                SideEffect::AskInstruction,
            ),
            Decision::Cancel => (ConfirmationState::Cancelled, SideEffect::Abort),
        },
        ConfirmationState::Editing(command) => (
            ConfirmationState::AwaitingDecision(command.clone()),
            SideEffect::Revise {
                current: command,
                instruction: input.trim().to_string(),
            },
        ),
        terminal => (terminal, SideEffect::None),
    }
}

//! ffchat Library
//!
//! Turns a plain-language media request into an ffmpeg command through an
//! OpenAI-compatible chat model, confirms it with the user, and runs it.
//!
//! The crate follows a ports-and-adapters layout: `domain` holds the pure
//! recognition rules and the confirmation state machine, `ports` the traits
//! at each boundary, `adapters` the HTTP, shell, terminal and config
//! implementations, and `app` the interactors tying them together.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::confirmation::{step, ConfirmationState, SideEffect};
pub use domain::errors::DomainError;
pub use domain::model::{
    CandidateCommand, ExecutionResult, RawResponse, SessionOptions, SessionOutcome,
};
pub use domain::rules::{CommandClassifier, CommandExtractor, RefusalDetector};

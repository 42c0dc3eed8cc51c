// Application layer - Use case interactors

pub mod command_interactor;
pub mod confirm_interactor;
pub mod container;
pub mod session_interactor;

// Re-export interactors
pub use command_interactor::CommandInteractor;
pub use confirm_interactor::ConfirmInteractor;
pub use container::{AppContainer, DefaultAppContainer};
pub use session_interactor::SessionInteractor;

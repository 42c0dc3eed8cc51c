// Adapters - External system implementations

pub mod ffmpeg_locator;
pub mod json_config;
pub mod openai_chat;
pub mod shell_exec;
pub mod terminal_console;
pub mod tracing_log;

// Re-export adapters
pub use ffmpeg_locator::FfmpegLocator;
pub use json_config::{AppConfig, JsonConfigAdapter};
pub use openai_chat::OpenAiChatAdapter;
pub use shell_exec::ShellExecAdapter;
pub use terminal_console::TerminalConsoleAdapter;
pub use tracing_log::{LogFormat, TracingLogAdapter};

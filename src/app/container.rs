use std::sync::Arc;

use crate::adapters::{
    AppConfig, FfmpegLocator, OpenAiChatAdapter, ShellExecAdapter, TerminalConsoleAdapter,
};
use crate::app::session_interactor::SessionInteractor;
use crate::domain::model::SessionOptions;
use crate::ports::{ConsolePort, ExecutePort, ModelPort};

pub trait AppContainer: Send + Sync {
    fn session_interactor(&self) -> Arc<SessionInteractor>;
}

pub struct DefaultAppContainer {
    session_interactor: Arc<SessionInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig, tool: &FfmpegLocator, options: SessionOptions) -> Self {
        let model_port = Arc::new(OpenAiChatAdapter::from_config(&config.llm));
        let execute_port = Arc::new(match tool.directory() {
            Some(dir) => ShellExecAdapter::new().with_tool_dir(dir),
            None => ShellExecAdapter::new(),
        });
        let console_port = Arc::new(TerminalConsoleAdapter::new());

        let session_interactor = Arc::new(SessionInteractor::new(
            model_port as Arc<dyn ModelPort>,
            execute_port as Arc<dyn ExecutePort>,
            console_port as Arc<dyn ConsolePort>,
            options,
        ));

        Self { session_interactor }
    }
}

impl AppContainer for DefaultAppContainer {
    fn session_interactor(&self) -> Arc<SessionInteractor> {
        Arc::clone(&self.session_interactor)
    }
}

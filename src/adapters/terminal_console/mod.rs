// Terminal console adapter - stdin/stdout interaction

use std::io::{self, BufRead, Write};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Console backed by the process's standard streams
pub struct TerminalConsoleAdapter;

impl TerminalConsoleAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConsolePort for TerminalConsoleAdapter {
    async fn read_line(&self, prompt: &str) -> Result<String, DomainError> {
        {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }

        // The shared stdin buffer keeps piped lines that arrive together
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn print(&self, message: &str) {
        println!("{}", message);
    }
}

// Domain rules - Recognising and isolating commands in model output

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Shapes a model commonly uses when it answers with a command: bare,
/// quoted absolute path, or inline code.
static CANDIDATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let tool = regex::escape(TOOL_NAME);
    [
        format!(r"^{tool}\s"),
        format!(r#"^"/.*{tool}.*"\s"#),
        format!(r"`[^`]*{tool}[^`]*`"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static pattern compiles"))
    .collect()
});

/// Line opening with a quoted absolute path to the tool
static QUOTED_TOOL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let tool = regex::escape(TOOL_NAME);
    Regex::new(&format!(r#"^"/[^"]*{tool}[^"]*"\s"#)).expect("static pattern compiles")
});

const FENCE: &str = "```";
const INPUT_FLAG: &str = "-i ";
const WRAPPERS: [char; 2] = ['`', '"'];

/// Cheap gate deciding whether model output looks like a tool invocation
pub struct CommandClassifier;

impl CommandClassifier {
    /// Check whether `text` is shaped like an ffmpeg command
    pub fn is_candidate(text: &str) -> bool {
        let content = text.trim();
        if content.is_empty() {
            return false;
        }

        if CANDIDATE_PATTERNS
            .iter()
            .any(|pattern| pattern.is_match(content))
        {
            return true;
        }

        content.contains(TOOL_NAME) && content.contains(INPUT_FLAG)
    }
}

/// Pulls a single command line out of formatted model output
pub struct CommandExtractor;

impl CommandExtractor {
    /// Extract the command, stripping fences, backticks or quotes
    pub fn extract(text: &str) -> Result<CandidateCommand, DomainError> {
        let content = text.trim();

        let command = if content.starts_with(FENCE) {
            Self::first_tool_line(content)
        } else {
            Self::unwrap_layers(content).or_else(|| Self::first_tool_line(content))
        };

        CandidateCommand::new(command.ok_or(DomainError::NotFound)?)
    }

    /// First trimmed line invoking the tool, ignoring fence lines
    fn first_tool_line(content: &str) -> Option<&str> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with(FENCE))
            .find(|line| line.starts_with(TOOL_NAME) || QUOTED_TOOL_LINE.is_match(line))
    }

    /// Peel backtick and quote pairs spanning the whole text, outermost first.
    ///
    /// A layer is only removed when its delimiter does not reappear inside,
    /// unless the inside is itself a wrapped layer. Quoted arguments such as
    /// `"/usr/bin/ffmpeg" -i "a b.mp4" out.mp4` are therefore left intact.
    fn unwrap_layers(content: &str) -> Option<&str> {
        for delimiter in WRAPPERS {
            let Some(inner) = Self::unwrap_pair(content, delimiter) else {
                continue;
            };
            let inner = inner.trim();
            if let Some(deeper) = Self::unwrap_layers(inner) {
                return Some(deeper);
            }
            if !inner.contains(delimiter) {
                return Some(inner);
            }
        }
        None
    }

    /// Remainder of `content` when one `delimiter` opens and closes it
    fn unwrap_pair(content: &str, delimiter: char) -> Option<&str> {
        if content.len() < 2 * delimiter.len_utf8() {
            return None;
        }
        content
            .strip_prefix(delimiter)
            .and_then(|rest| rest.strip_suffix(delimiter))
    }
}

/// Detects the model's explicit "not a media task" answer
pub struct RefusalDetector;

impl RefusalDetector {
    /// Explanation following the refusal token, if the text is a refusal
    pub fn refusal_reason(text: &str) -> Option<String> {
        text.trim()
            .strip_prefix(REFUSAL_TOKEN)
            .map(|reason| reason.trim().to_string())
    }
}

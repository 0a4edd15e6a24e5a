//! Typed errors that callers need to recognise after propagation.
//!
//! Everything else travels as a plain `eyre::Report` with context attached.

use std::fmt;

/// An external command ran to completion but reported failure.
#[derive(Debug, Clone)]
pub struct CommandError {
    /// Exit status; `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    /// Shell-quoted reconstruction of the command line.
    pub command_line: String,
    /// Everything the child wrote to standard error.
    pub stderr: Vec<u8>,
}

impl CommandError {
    pub fn new(code: Option<i32>, command_line: impl Into<String>, stderr: Vec<u8>) -> Self {
        Self {
            code,
            command_line: command_line.into(),
            stderr,
        }
    }

    /// Status text for diagnostics: the numeric code or `signal`.
    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed ({}): {}", self.status_label(), self.command_line)
    }
}

impl std::error::Error for CommandError {}

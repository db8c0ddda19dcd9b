use inquire::{Confirm, Text};
use sitekit_core::error::{Result, SitekitError};
use sitekit_core::prompt::Prompt;

/// Terminal prompts backed by inquire.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask_text(&mut self, message: &str, default: &str) -> Result<String> {
        Text::new(message)
            .with_default(default)
            .prompt()
            .map_err(|e| SitekitError::Prompt(e.to_string()))
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(|e| SitekitError::Prompt(e.to_string()))
    }
}

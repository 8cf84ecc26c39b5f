//! Interactive prompts for first-run setup
//!
//! Uses dialoguer for terminal input.

use bosun_core::{Error, Prompter, Result};
use dialoguer::{Confirm, Input};

/// Answer taken when enter is pressed on a yes/no question.
const CONFIRM_DEFAULT: bool = false;

/// Asks questions on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(CONFIRM_DEFAULT)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Prompt(e.to_string())
}

//! Interactive input.
//!
//! Commands ask for input through [`Prompter`] so the login and scan flows can
//! be exercised without a terminal.

use dialoguer::{Input, Password};

use crate::error::AppError;

pub trait Prompter {
    /// Read a secret with masked echo.
    fn secret(&mut self, prompt: &str) -> Result<String, AppError>;

    /// Read a line of text; an empty answer selects `default` when one is given.
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, AppError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn secret(&mut self, prompt: &str) -> Result<String, AppError> {
        Ok(Password::new().with_prompt(prompt).interact()?)
    }

    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, AppError> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        match default {
            Some(value) => input = input.default(value.to_string()),
            None => input = input.allow_empty(true),
        }
        Ok(input.interact_text()?)
    }
}

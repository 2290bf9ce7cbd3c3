//! Validated prompt engine.
//!
//! A `PromptSpec` bundles a message with its validator and error line; the
//! engine re-prompts until the validator passes. Retries are unbounded but
//! iterative, and a Ctrl-C at any prompt propagates immediately as
//! [`AppError::Interrupted`].

use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError, Input, Password, Select};

use crate::error::AppError;
use crate::ui::Ui;

/// One validated free-text prompt. Immutable once constructed.
pub struct PromptSpec<'a> {
    pub message: &'a str,
    pub default: Option<&'a str>,
    pub secret: bool,
    pub validator: fn(&str) -> bool,
    pub error_message: &'a str,
}

impl<'a> PromptSpec<'a> {
    pub fn new(message: &'a str, validator: fn(&str) -> bool, error_message: &'a str) -> Self {
        Self { message, default: None, secret: false, validator, error_message }
    }

    pub fn with_default(mut self, default: &'a str) -> Self {
        self.default = Some(default);
        self
    }
}

/// Source of interactive answers. The real adapter wraps dialoguer; tests
/// supply scripted answers.
pub trait Prompter {
    /// Read one line of input, applying default and masking.
    fn input(&mut self, message: &str, default: Option<&str>, secret: bool)
    -> Result<String, AppError>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, AppError>;

    /// Pick one of `items`; returns the chosen index.
    fn select(&mut self, message: &str, items: &[&str], default: usize)
    -> Result<usize, AppError>;
}

/// Prompt until the spec's validator accepts the input.
///
/// Validation failures print the spec's error line and re-prompt; there is no
/// retry limit. Interrupts and read failures propagate unchanged.
pub fn prompt_until_valid(
    prompter: &mut dyn Prompter,
    ui: &Ui,
    spec: &PromptSpec<'_>,
) -> Result<String, AppError> {
    loop {
        let value = prompter.input(spec.message, spec.default, spec.secret)?;
        if (spec.validator)(&value) {
            return Ok(value);
        }
        ui.error(spec.error_message);
    }
}

/// Terminal-backed prompter.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn map_dialoguer_error(err: DialoguerError) -> AppError {
    match err {
        DialoguerError::IO(io_err) if io_err.kind() == ErrorKind::Interrupted => {
            AppError::Interrupted
        }
        DialoguerError::IO(io_err) => AppError::PromptFailed(io_err.to_string()),
    }
}

impl Prompter for DialoguerPrompter {
    fn input(
        &mut self,
        message: &str,
        default: Option<&str>,
        secret: bool,
    ) -> Result<String, AppError> {
        if secret {
            return Password::new()
                .with_prompt(message)
                .interact()
                .map_err(map_dialoguer_error);
        }
        let mut input = Input::<String>::new().with_prompt(message);
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(true);
        }
        input.interact_text().map_err(map_dialoguer_error)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(map_dialoguer_error)
    }

    fn select(
        &mut self,
        message: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, AppError> {
        Select::new()
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact()
            .map_err(map_dialoguer_error)
    }
}

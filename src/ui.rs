//! Styled output sink for wizard and pipeline progress.
//!
//! Constructed once per invocation and passed explicitly; no component writes
//! to the terminal on its own.

use console::style;

/// Console reporter with the color conventions of the generator:
/// yellow for in-progress steps, green for completed ones, red for errors.
#[derive(Debug, Clone, Default)]
pub struct Ui {
    quiet: bool,
}

impl Ui {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// A sink that swallows everything. Used by tests exercising full flows.
    pub fn silent() -> Self {
        Self { quiet: true }
    }

    /// An in-progress step ("Creating project skeleton...").
    pub fn step(&self, message: &str) {
        if !self.quiet {
            println!("{}", style(message).yellow());
        }
    }

    /// A completed step ("Dependencies installed successfully").
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{}", style(message).green());
        }
    }

    /// A recoverable problem (failed uninstall during rollback).
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", style(message).yellow());
        }
    }

    /// A fatal or validation error.
    pub fn error(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", style(message).red());
        }
    }
}

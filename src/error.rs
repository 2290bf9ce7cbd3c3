use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for fastapi-create operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Project name rejected before any side effect.
    #[error("Invalid project name '{0}'. Must be '.' or a valid identifier (letters, digits, '_', '-').")]
    InvalidProjectName(String),

    /// Target directory already exists and holds files.
    #[error("Directory '{0}' already exists and is not empty. Aborting.")]
    TargetNotEmpty(PathBuf),

    /// Target path exists but is a regular file.
    #[error("'{0}' is a file, not a directory. Aborting.")]
    TargetIsFile(PathBuf),

    /// A prompt could not be read from the terminal.
    #[error("Failed to read input: {0}")]
    PromptFailed(String),

    /// The operator cancelled an interactive prompt or build step.
    #[error("Input interrupted by user.")]
    Interrupted,

    /// A package install command failed.
    #[error("Error installing {dependency}: {details}")]
    InstallFailed { dependency: String, details: String },

    /// The migration tool could not initialize its directory.
    #[error("Error initializing Alembic: {0}")]
    MigrationInitFailed(String),

    /// Template lookup or rendering failed.
    #[error("Template error for '{name}': {details}")]
    Template { name: String, details: String },

    /// A wizard step finished without producing its value.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub(crate) fn internal<S: Into<String>>(message: S) -> Self {
        AppError::Internal(message.into())
    }
}

//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use boundaries_core::{CoreError, RepositoryError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Requested set or boundary doesn't exist.
    #[error("{0}")]
    NotFound(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,  // EX_USAGE
            Self::NotFound(_) => 66,  // EX_NOINPUT
            Self::Io(_) => 74,        // EX_IOERR
            Self::Config(_) => 78,    // EX_CONFIG
            Self::Database(_) => 73,  // EX_CANTCREAT (closest fit)
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(what)) => {
                Self::NotFound(format!("Not found: {what}"))
            }
            CoreError::Repository(RepositoryError::AlreadyExists(what)) => {
                Self::Arguments(format!("Already exists: {what}"))
            }
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Validation(err) => Self::Arguments(err.to_string()),
            CoreError::Settings(err) => Self::Config(err.to_string()),
            err @ CoreError::TooManyResults { .. } => Self::Core(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error escaping `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

//! Error types for CLI commands
//!
//! Structured errors for the command layer; `run` turns them into
//! `anyhow::Error` at the top.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Task file could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error raised by the command stack itself
    #[error(transparent)]
    StackError(#[from] dcstack_core::Error),

    /// A queued Drupal Console command failed
    #[error("Command stack failed with exit code {exit_code}")]
    CommandFailed {
        /// Exit code of the failing command
        exit_code: i32,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// Create a `ConfigError` from any error type
    pub fn config<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::ConfigError(Box::new(err))
    }

    /// Process exit code to report for this error, if it carries one
    ///
    /// Only positive codes of a failed command are passed through.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code } if *exit_code > 0 => Some(*exit_code),
            _ => None,
        }
    }
}

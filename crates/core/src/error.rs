//! Base error types for dcstack
//!
//! Composition never fails and a command that runs but exits non-zero is
//! reported through [`crate::ExecutionResult`], so this enum only covers what
//! cannot be expressed as a result: spawn failures, empty stacks and
//! configuration problems.

use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The shell could not be started for a command line
    #[error("Failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// `run` was called before anything was submitted
    #[error("You must add at least one command")]
    EmptyStack,

    /// Task file or option configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

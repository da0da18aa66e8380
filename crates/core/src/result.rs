//! Outcome of executing one command line (or a whole stack)

use std::fmt;

/// Exit code reported when the process could not be started at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = -1;

/// Result of executing a command line
///
/// Produced by a [`crate::CommandExecutor`]; the stack only inspects and
/// aggregates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the command exited successfully
    pub success: bool,
    /// Combined stdout/stderr of the command
    pub message: String,
    /// Process exit code (-1 when terminated by signal or never started)
    pub exit_code: i32,
}

impl ExecutionResult {
    /// A successful result with the given output
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            exit_code: 0,
        }
    }

    /// A failed result with the given output and exit code
    pub fn failure(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            success: false,
            message: message.into(),
            exit_code,
        }
    }

    /// Result used in place of an executor error, so callers only ever see
    /// a failed result
    pub fn spawn_failure(error: &crate::Error) -> Self {
        Self::failure(error.to_string(), SPAWN_FAILURE_EXIT_CODE)
    }

    /// Returns true if the command exited successfully.
    pub fn was_successful(&self) -> bool {
        self.success
    }

    /// Output trimmed of surrounding whitespace.
    pub fn message_trimmed(&self) -> &str {
        self.message.trim()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "succeeded")
        } else {
            write!(f, "failed with exit code {}", self.exit_code)
        }
    }
}

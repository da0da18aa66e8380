//! Behavioral traits for dcstack components
//!
//! The command stack composes command lines but never spawns processes
//! itself. It depends on this trait instead of a concrete process runner, so
//! the real shell, a dry run and test doubles are interchangeable.

use crate::{ExecutionResult, Result};

/// Executes a fully composed command line
///
/// # Errors contract
///
/// `Err` means the command could not be started at all. A command that ran
/// and exited non-zero is `Ok` with `success == false`.
///
/// # Examples
///
/// ```ignore
/// fn status(executor: &dyn CommandExecutor) -> Result<bool> {
///     Ok(executor.execute("drupal site:status --yes")?.was_successful())
/// }
/// ```
pub trait CommandExecutor {
    /// Execute `command_line` and capture its combined output
    fn execute(&self, command_line: &str) -> Result<ExecutionResult>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &E {
    fn execute(&self, command_line: &str) -> Result<ExecutionResult> {
        (**self).execute(command_line)
    }
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for Box<E> {
    fn execute(&self, command_line: &str) -> Result<ExecutionResult> {
        (**self).execute(command_line)
    }
}

//! Command executors
//!
//! - `ShellExecutor`: runs command lines through the platform shell
//! - `DryRunExecutor`: records command lines without running anything

use dcstack_core::{CommandExecutor, Error, ExecutionResult, Result};
use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

/// Exit code reported when a command is killed after its timeout
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Executes command lines with the platform shell
///
/// Stderr is merged into stdout and captured as the result message. A
/// non-zero exit status is reported as a failed result, never as an error.
///
/// # Examples
///
/// ```ignore
/// let executor = ShellExecutor::new()
///     .working_dir("/var/www/html")
///     .timeout(Duration::from_secs(600));
/// let result = executor.execute("drupal site:status --yes")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ShellExecutor {
    /// Create an executor that runs in the current directory without timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command in `dir`
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill commands that run longer than `timeout`
    ///
    /// A zero duration disables the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    fn expression(&self, command_line: &str) -> duct::Expression {
        #[cfg(windows)]
        let expression = duct::cmd("cmd", ["/C", command_line]);
        #[cfg(not(windows))]
        let expression = duct::cmd("sh", ["-c", command_line]);

        let expression = expression.stderr_to_stdout().stdout_capture().unchecked();
        match &self.working_dir {
            Some(dir) => expression.dir(dir),
            None => expression,
        }
    }
}

impl CommandExecutor for ShellExecutor {
    #[tracing::instrument(skip(self), fields(working_dir = ?self.working_dir, timeout = ?self.timeout))]
    fn execute(&self, command_line: &str) -> Result<ExecutionResult> {
        let spawn_error = |source| Error::Spawn {
            command: command_line.to_string(),
            source,
        };

        let expression = self.expression(command_line);
        let output = if let Some(timeout) = self.timeout {
            let handle = expression.start().map_err(spawn_error)?;
            match handle.wait_timeout(timeout).map_err(spawn_error)? {
                Some(output) => output.clone(),
                None => {
                    if let Err(e) = handle.kill() {
                        tracing::warn!("Failed to kill timed out command: {e}");
                    }
                    return Ok(ExecutionResult::failure(
                        format!("Command timed out after {timeout:?}"),
                        TIMEOUT_EXIT_CODE,
                    ));
                }
            }
        } else {
            expression.run().map_err(spawn_error)?
        };

        let message = String::from_utf8_lossy(&output.stdout).into_owned();
        let result = if output.status.success() {
            ExecutionResult::success(message)
        } else {
            ExecutionResult::failure(message, output.status.code().unwrap_or(-1))
        };

        tracing::debug!(exit_code = result.exit_code, "Command finished");
        Ok(result)
    }
}

/// Records command lines instead of running them
///
/// Every line is reported as a success with empty output.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    executed: RefCell<Vec<String>>,
}

impl DryRunExecutor {
    /// Create an executor with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Command lines seen so far, in execution order
    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl CommandExecutor for DryRunExecutor {
    fn execute(&self, command_line: &str) -> Result<ExecutionResult> {
        self.executed.borrow_mut().push(command_line.to_string());
        Ok(ExecutionResult::success(String::new()))
    }
}

//! Version command implementation
//!
//! Detect the Drupal Console version, `unknown` when it cannot be found.

use clap::Args;
use dcstack_engine::{ConsoleStack, UNKNOWN_VERSION};
use owo_colors::OwoColorize;
use std::env;
use tracing::{debug, warn};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Print the Drupal Console version
#[derive(Debug, Default, Args)]
pub struct VersionCommand {
    /// Executable to query instead of the task file's
    #[arg(long, value_name = "PATH")]
    pub executable: Option<String>,
}

impl Command for VersionCommand {
    type Output = String;

    fn execute(&self, context: &RuntimeContext) -> Result<String> {
        let executable = self
            .executable
            .as_deref()
            .unwrap_or(&context.task_file.executable);

        // Only the program name is looked up; the rest may be arguments.
        // Relative paths resolve where the commands run.
        let program = executable.split_whitespace().next().unwrap_or_default();
        let cwd = match &context.task_file.working_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        let version = match which::which_in(program, env::var_os("PATH"), &cwd) {
            Ok(resolved) => {
                debug!(path = %resolved.display(), "Resolved Drupal Console executable");
                let mut stack =
                    ConsoleStack::with_executor(executable, context.task_file.shell_executor());
                stack.version().to_string()
            }
            Err(e) => {
                warn!("Cannot find {program}: {e}");
                UNKNOWN_VERSION.to_string()
            }
        };

        println!("{} {}", executable.bold(), version.green());
        Ok(version)
    }
}

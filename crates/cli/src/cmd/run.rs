//! Run command implementation
//!
//! Submit every step of the task file and execute the stack.

use clap::Args;
use dcstack_engine::ExecutionResult;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};

/// Run the task file's steps
#[derive(Debug, Default, Args)]
pub struct RunCommand {
    /// Keep going after a failing step
    #[arg(long)]
    pub keep_going: bool,

    /// Do not print progress lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Command for RunCommand {
    type Output = ExecutionResult;

    fn execute(&self, context: &RuntimeContext) -> Result<ExecutionResult> {
        debug!(source = %context.source_label(), "Running task file");

        let mut stack = context.shell_stack();
        if self.keep_going {
            stack.stop_on_fail(false);
        }
        if self.quiet {
            stack.printed(false);
        }

        let result = stack.run()?;

        let output = result.message_trimmed();
        if !output.is_empty() {
            println!("{output}");
        }

        if result.was_successful() {
            println!(
                "{} {} command(s) succeeded",
                "✓".green(),
                stack.commands().len()
            );
            Ok(result)
        } else {
            println!("{} {}", "✗".red(), result.to_string().red());
            Err(CommandError::CommandFailed {
                exit_code: result.exit_code,
            })
        }
    }
}

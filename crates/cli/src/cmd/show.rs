//! Show command implementation
//!
//! Print the composed command lines without running anything.

use clap::Args;
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Print the composed command lines
#[derive(Debug, Default, Args)]
pub struct ShowCommand {
    /// Print the stack as one `&&`-joined line
    #[arg(long)]
    pub joined: bool,
}

impl Command for ShowCommand {
    type Output = Vec<String>;

    fn execute(&self, context: &RuntimeContext) -> Result<Vec<String>> {
        let mut stack = context.dry_run_stack();
        stack.printed(false);

        let lines = if self.joined {
            let joined = stack.composed_command();
            if joined.is_empty() {
                Vec::new()
            } else {
                vec![joined]
            }
        } else {
            stack
                .commands()
                .iter()
                .map(ToString::to_string)
                .collect()
        };

        if lines.is_empty() {
            println!(
                "{} no steps in {}",
                "!".yellow(),
                context.source_label().bold()
            );
        }
        for line in &lines {
            println!("{line}");
        }

        Ok(lines)
    }
}

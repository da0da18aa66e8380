//! Command trait for the dcstack CLI
//!
//! Every subcommand implements `Command`, so they share one way to receive
//! the loaded task file and report errors.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all dcstack commands
///
/// The `execute` method receives a `RuntimeContext` holding the loaded task
/// file. Commands choose what they hand back through `Output`, which keeps
/// them testable without capturing stdout.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Args)]
/// pub struct MyCommand {
///     #[arg(long)]
///     pub some_flag: bool,
/// }
///
/// impl Command for MyCommand {
///     type Output = ();
///
///     fn execute(&self, context: &RuntimeContext) -> Result<()> {
///         let stack = context.dry_run_stack();
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}

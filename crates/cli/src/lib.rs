//! dcstack CLI library
//!
//! This library contains all the CLI logic for dcstack, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// dcstack - Drupal Console command stacks
#[derive(Parser)]
#[command(name = "dcstack")]
#[command(about = "Compose and run Drupal Console command stacks")]
#[command(version)]
#[command(long_about = "Compose and run Drupal Console command stacks

A task file lists global options and the commands to run, in order.
Every command gets the global options, its own one-shot options and --yes.

Examples:
  • dcstack show
      → Print the command lines from ./dcstack.toml

  • dcstack --file deploy.toml run
      → Run the steps of deploy.toml, stopping at the first failure

  • dcstack version
      → Print the installed Drupal Console version")]
pub struct Cli {
    /// Path to the task file
    #[arg(long, env = "DCSTACK_FILE", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "DCSTACK_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the dcstack CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Run every step of the task file
    Run(cmd::run::RunCommand),

    /// Print the composed command lines without running them
    Show(cmd::show::ShowCommand),

    /// Print the Drupal Console version
    Version(cmd::version::VersionCommand),
}

/// Main entry point for the CLI logic
///
/// # Errors
///
/// Returns error if logging cannot be initialized, the task file cannot be
/// loaded, or the command fails
pub fn run(cli: Cli) -> Result<()> {
    dcstack_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let context = RuntimeContext::load(cli.file.as_deref())?;
    execute_command(cli.command, &context)
}

fn execute_command(command: Commands, context: &RuntimeContext) -> Result<()> {
    match command {
        Commands::Run(run_cmd) => {
            run_cmd.execute(context)?;
        }
        Commands::Show(show_cmd) => {
            show_cmd.execute(context)?;
        }
        Commands::Version(version_cmd) => {
            version_cmd.execute(context)?;
        }
    }
    Ok(())
}

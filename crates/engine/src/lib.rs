//! # dcstack engine
//!
//! Composes and runs Drupal Console command lines.
//!
//! - **Escaping**: POSIX shell quoting for option values and positional tokens
//! - **Arguments**: persistent options repeated on every command
//! - **Options**: the one-shot option buffer consumed by the next submission
//! - **Stack**: fluent setters, the verb catalog, queued submissions and `run`
//! - **Executors**: the platform shell and a recording dry run

pub mod args;
pub mod escape;
pub mod executor;
pub mod options;
pub mod printer;
pub mod stack;
pub mod verbs;
pub mod version;

// Re-export error types from core
pub use dcstack_core::{CommandExecutor, Error, ExecutionResult, Result};

// Re-export commonly used types
pub use args::ArgumentAccumulator;
pub use executor::{DryRunExecutor, ShellExecutor};
pub use options::{CommandOption, NextCommandOptions, Verbosity};
pub use stack::{CONFIRMATION_FLAG, ComposedCommand, ConsoleStack, DEFAULT_EXECUTABLE};
pub use version::UNKNOWN_VERSION;

//! Core types for dcstack
//!
//! This is the foundation crate (Layer 0) that all other dcstack crates depend on.
//! It provides:
//! - Base error types
//! - The execution result reported for every command line
//! - The executor seam (`CommandExecutor`) the command stack delegates to
//!
//! This crate has no dependencies on other dcstack crates.

pub mod error;
pub mod result;
pub mod traits;

pub use error::{Error, Result};
pub use result::ExecutionResult;
pub use traits::CommandExecutor;

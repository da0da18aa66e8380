//! Configuration management for dcstack
//!
//! This crate handles:
//! - Task file loading and validation
//! - Logging initialization

pub mod config;
pub mod logging;

// Re-export error types from core
pub use dcstack_core::{Error, Result};

// Re-export main types
pub use config::{
    DEFAULT_TASK_FILE, GlobalOptions, MigrationId, Step, StepAction, StepOptions, TaskFile,
};

//! Common types shared across CLI commands

use crate::error::{CommandError, Result};
use dcstack_config::{DEFAULT_TASK_FILE, TaskFile};
use dcstack_engine::{ConsoleStack, DryRunExecutor, ShellExecutor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runtime context for CLI commands
///
/// Holds the loaded task file and where it came from. The task file is
/// shared via Arc so commands never clone it.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Loaded task file
    pub task_file: Arc<TaskFile>,
    /// Path the task file was read from, `None` when defaults are in use
    pub source: Option<PathBuf>,
}

impl RuntimeContext {
    /// Create a context around an already loaded task file
    pub fn new(task_file: TaskFile) -> Self {
        Self {
            task_file: Arc::new(task_file),
            source: None,
        }
    }

    /// Load the task file
    ///
    /// An explicit `file` must exist. Without one, `dcstack.toml` in the
    /// current directory is used if present, otherwise an empty task file.
    ///
    /// # Errors
    ///
    /// Returns error if the task file cannot be read or is invalid
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let path = match file {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_TASK_FILE);
                if !default.exists() {
                    tracing::debug!("No {DEFAULT_TASK_FILE} found, using defaults");
                    return Ok(Self::new(TaskFile::default()));
                }
                default
            }
        };

        tracing::debug!(path = %path.display(), "Loading task file");
        let task_file = TaskFile::load(&path).map_err(CommandError::config)?;
        Ok(Self {
            task_file: Arc::new(task_file),
            source: Some(path),
        })
    }

    /// Stack that runs commands through the shell
    pub fn shell_stack(&self) -> ConsoleStack<ShellExecutor> {
        self.task_file.build_stack(self.task_file.shell_executor())
    }

    /// Stack that only records command lines
    pub fn dry_run_stack(&self) -> ConsoleStack<DryRunExecutor> {
        self.task_file.build_stack(DryRunExecutor::new())
    }

    /// Human-readable origin of the task file
    pub fn source_label(&self) -> String {
        self.source
            .as_deref()
            .map_or_else(|| "defaults".to_string(), |path| path.display().to_string())
    }
}

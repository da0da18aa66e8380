//! Best-effort progress tracing for a stack
//!
//! Progress lines go through `tracing` at info level. Printing can be turned
//! off for a whole stack or suppressed for a scope with [`TaskPrinter::suppress`].

use std::cell::Cell;
use std::fmt;

/// Progress printer owned by a command stack
#[derive(Debug)]
pub struct TaskPrinter {
    enabled: Cell<bool>,
}

impl Default for TaskPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskPrinter {
    /// Create an enabled printer
    pub fn new() -> Self {
        Self {
            enabled: Cell::new(true),
        }
    }

    /// Returns true if progress lines are currently emitted
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Turn printing on or off
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Emit a progress line if printing is enabled
    pub fn info(&self, message: fmt::Arguments<'_>) {
        if self.is_enabled() {
            tracing::info!("{message}");
        }
    }

    /// Disable printing until the returned guard is dropped
    ///
    /// The previous state is restored on every exit path, including early
    /// returns and unwinding.
    pub fn suppress(&self) -> SuppressGuard<'_> {
        let previous = self.enabled.replace(false);
        SuppressGuard {
            printer: self,
            previous,
        }
    }
}

/// Restores the printer state captured by [`TaskPrinter::suppress`]
#[must_use = "printing is restored as soon as the guard is dropped"]
pub struct SuppressGuard<'a> {
    printer: &'a TaskPrinter,
    previous: bool,
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.printer.enabled.set(self.previous);
    }
}

//! Drupal Console version detection

use crate::stack::ConsoleStack;
use dcstack_core::CommandExecutor;
use regex::Regex;
use std::sync::LazyLock;

/// Reported when the version cannot be detected
pub const UNKNOWN_VERSION: &str = "unknown";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)*").expect("version pattern is valid"));

/// First dotted-numeric token in `output`
pub fn extract_version(output: &str) -> Option<&str> {
    VERSION_PATTERN.find(output).map(|m| m.as_str())
}

impl<E: CommandExecutor> ConsoleStack<E> {
    /// Returns the Drupal Console version
    ///
    /// Runs `<executable> --version` once, without any stack options and with
    /// progress printing suppressed. Later calls return the cached value.
    /// Failures are reported as `unknown`, never as an error.
    pub fn version(&mut self) -> &str {
        if self.version.is_none() {
            let detected = {
                let _quiet = self.printer.suppress();
                let result = self.execute_line(&format!("{} --version", self.executable));
                if result.was_successful() {
                    extract_version(&result.message).map(str::to_string)
                } else {
                    tracing::debug!(exit_code = result.exit_code, "Version command failed");
                    None
                }
            };
            self.version = Some(detected.unwrap_or_else(|| UNKNOWN_VERSION.to_string()));
        }

        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }
}

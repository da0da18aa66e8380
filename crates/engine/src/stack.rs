//! Drupal Console command stack
//!
//! A [`ConsoleStack`] composes Drupal Console command lines from three parts
//! and queues them for a later [`ConsoleStack::run`]:
//!
//! 1. the command text (`site:install minimal`)
//! 2. persistent options, applied to every command (root, uri, env, ...)
//! 3. next-command options, applied to the next submission only
//!
//! followed by `--yes` when prompts should be assumed confirmed.
//!
//! # Examples
//!
//! ```ignore
//! let mut stack = ConsoleStack::default();
//! stack
//!     .root("/var/www/html/some-site")
//!     .uri("sub.example.com")
//!     .maintenance(true)
//!     .update_db(None, None)
//!     .config_import()
//!     .maintenance(false);
//! let result = stack.run()?;
//! ```

use crate::args::ArgumentAccumulator;
use crate::executor::ShellExecutor;
use crate::options::{CommandOption, NextCommandOptions, Verbosity};
use crate::printer::TaskPrinter;
use dcstack_core::{CommandExecutor, Error, ExecutionResult, Result};
use std::fmt;
use std::path::Path;

/// Executable used when none is given
pub const DEFAULT_EXECUTABLE: &str = "drupal";

/// Flag that suppresses interactive prompts, always the last token
pub const CONFIRMATION_FLAG: &str = "--yes";

/// One submitted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedCommand {
    executable: String,
    arguments: String,
}

impl ComposedCommand {
    /// Executable the command runs with
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Command text, options and confirmation flag (without the executable)
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    /// Full command line as handed to the executor
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ComposedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.executable, self.arguments)
    }
}

/// Runs Drupal Console commands in a stack
///
/// Global options set through [`root`](Self::root), [`uri`](Self::uri) and
/// friends are repeated on every command. Per-command options such as
/// [`site_name`](Self::site_name) are consumed by the next submission. With
/// [`stop_on_fail`](Self::stop_on_fail) the run ends at the first failing
/// command.
///
/// A stack is single-threaded: it is `!Sync` and expects exclusive access.
pub struct ConsoleStack<E = ShellExecutor>
where
    E: CommandExecutor,
{
    pub(crate) executable: String,
    pub(crate) executor: E,
    arguments: ArgumentAccumulator,
    next_command: NextCommandOptions,
    commands: Vec<ComposedCommand>,
    pub(crate) version: Option<String>,
    stop_on_fail: bool,
    pub(crate) printer: TaskPrinter,
    last_result: Option<ExecutionResult>,
}

impl ConsoleStack<ShellExecutor> {
    /// Create a stack that runs `executable` through the platform shell
    pub fn new(executable: impl Into<String>) -> Self {
        Self::with_executor(executable, ShellExecutor::new())
    }
}

impl Default for ConsoleStack<ShellExecutor> {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE)
    }
}

impl<E: CommandExecutor> fmt::Debug for ConsoleStack<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleStack")
            .field("executable", &self.executable)
            .field("arguments", &self.arguments)
            .field("next_command", &self.next_command)
            .field("commands", &self.commands)
            .field("version", &self.version)
            .field("stop_on_fail", &self.stop_on_fail)
            .finish_non_exhaustive()
    }
}

impl<E: CommandExecutor> ConsoleStack<E> {
    /// Create a stack that hands its command lines to `executor`
    pub fn with_executor(executable: impl Into<String>, executor: E) -> Self {
        Self {
            executable: executable.into(),
            executor,
            arguments: ArgumentAccumulator::new(),
            next_command: NextCommandOptions::default(),
            commands: Vec::new(),
            version: None,
            stop_on_fail: false,
            printer: TaskPrinter::new(),
            last_result: None,
        }
    }

    /// Path or name of the Drupal Console executable
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The executor command lines are handed to
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// End the run at the first failing command
    pub fn stop_on_fail(&mut self, stop_on_fail: bool) -> &mut Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    /// Turn progress printing on or off
    pub fn printed(&mut self, printed: bool) -> &mut Self {
        self.printer.set_enabled(printed);
        self
    }

    /// Returns true if progress lines are printed
    pub fn is_printed(&self) -> bool {
        self.printer.is_enabled()
    }

    /// Pass a persistent option to every command; the value is escaped
    pub fn option(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.arguments.option(name, value);
        self
    }

    /// Append already-formed argument text to every command
    pub fn raw_arguments(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.arguments.raw(text);
        self
    }

    // ------------------------------------------------------------------
    // Global options
    // ------------------------------------------------------------------

    /// Sets the Drupal root directory
    pub fn root(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref().to_string_lossy();
        warn_if_empty("root", &path);
        self.printer.info(format_args!("Drupal root: {path}"));
        self.arguments.option("root", Some(&*path));
        self
    }

    /// Sets the URI of the Drupal site (multi-site or alternate port)
    pub fn uri(&mut self, uri: &str) -> &mut Self {
        warn_if_empty("uri", uri);
        self.printer.info(format_args!("URI: {uri}"));
        self.arguments.option("uri", Some(uri));
        self
    }

    /// Sets the environment name (`prod` is what Drupal Console defaults to)
    pub fn environment(&mut self, environment: &str) -> &mut Self {
        warn_if_empty("env", environment);
        self.printer.info(format_args!("Environment: {environment}"));
        self.arguments.option("env", Some(environment));
        self
    }

    /// Switches off debug mode
    pub fn no_debug(&mut self) -> &mut Self {
        self.printer.info(format_args!("Debug: off"));
        self.arguments.option("no-debug", None);
        self
    }

    /// Sets the verbosity level
    pub fn verbosity(&mut self, level: Verbosity) -> &mut Self {
        self.printer.info(format_args!("Verbosity: {level}"));
        self.arguments
            .option("verbose", Some(level.to_string().as_str()));
        self
    }

    // ------------------------------------------------------------------
    // Options for the next command
    // ------------------------------------------------------------------

    fn stage(&mut self, option: CommandOption, value: Option<String>) -> &mut Self {
        tracing::trace!(option = %option, "Staged option for next command");
        self.next_command.stage(option, value);
        self
    }

    /// Sets the site name
    pub fn site_name(&mut self, site_name: &str) -> &mut Self {
        self.stage(CommandOption::SiteName, Some(site_name.to_string()))
    }

    /// Sets the site mail
    pub fn site_mail(&mut self, site_mail: &str) -> &mut Self {
        self.stage(CommandOption::SiteMail, Some(site_mail.to_string()))
    }

    /// Sets the file to use, e.g. for database dump/restore
    pub fn file(&mut self, file: impl AsRef<Path>) -> &mut Self {
        let file = file.as_ref().to_string_lossy().into_owned();
        self.stage(CommandOption::File, Some(file))
    }

    /// Sets the directory to use, e.g. for config import/export
    pub fn directory(&mut self, directory: impl AsRef<Path>) -> &mut Self {
        let directory = directory.as_ref().to_string_lossy().into_owned();
        self.stage(CommandOption::Directory, Some(directory))
    }

    /// Sets the tar flag, e.g. for `config:export`
    pub fn tar(&mut self) -> &mut Self {
        self.stage(CommandOption::Tar, None)
    }

    /// Sets the default site language
    pub fn langcode(&mut self, langcode: &str) -> &mut Self {
        self.stage(CommandOption::Langcode, Some(langcode.to_string()))
    }

    /// Sets the database type to use for initial install
    pub fn db_type(&mut self, db_type: &str) -> &mut Self {
        self.stage(CommandOption::DbType, Some(db_type.to_string()))
    }

    /// Sets the database file to use for initial install
    pub fn db_file(&mut self, db_file: impl AsRef<Path>) -> &mut Self {
        let db_file = db_file.as_ref().to_string_lossy().into_owned();
        self.stage(CommandOption::DbFile, Some(db_file))
    }

    /// Sets the database host to use for initial install
    pub fn db_host(&mut self, db_host: &str) -> &mut Self {
        self.stage(CommandOption::DbHost, Some(db_host.to_string()))
    }

    /// Sets the database name to use for initial install
    pub fn db_name(&mut self, db_name: &str) -> &mut Self {
        self.stage(CommandOption::DbName, Some(db_name.to_string()))
    }

    /// Sets the database user to use for initial install
    pub fn db_user(&mut self, db_user: &str) -> &mut Self {
        self.stage(CommandOption::DbUser, Some(db_user.to_string()))
    }

    /// Sets the database password to use for initial install
    pub fn db_pass(&mut self, db_pass: &str) -> &mut Self {
        self.stage(CommandOption::DbPass, Some(db_pass.to_string()))
    }

    /// Sets the table prefix to use for initial install
    pub fn db_prefix(&mut self, db_prefix: &str) -> &mut Self {
        self.stage(CommandOption::DbPrefix, Some(db_prefix.to_string()))
    }

    /// Sets the database port to use for initial install
    pub fn db_port(&mut self, db_port: impl fmt::Display) -> &mut Self {
        self.stage(CommandOption::DbPort, Some(db_port.to_string()))
    }

    /// Sets the e-mail address for the account with uid 1
    pub fn account_mail(&mut self, account_mail: &str) -> &mut Self {
        self.stage(CommandOption::AccountMail, Some(account_mail.to_string()))
    }

    /// Sets the username for the account with uid 1
    pub fn account_name(&mut self, account_name: &str) -> &mut Self {
        self.stage(CommandOption::AccountName, Some(account_name.to_string()))
    }

    /// Sets the password for the account with uid 1
    pub fn account_pass(&mut self, account_pass: &str) -> &mut Self {
        self.stage(CommandOption::AccountPass, Some(account_pass.to_string()))
    }

    /// Returns true if per-command options are waiting for a submission
    pub fn has_staged_options(&self) -> bool {
        self.next_command.is_staged()
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Compose a command line for `command` and queue it
    ///
    /// The line is built as: command text, persistent options in the order
    /// they were set, staged options in the order they were staged, then
    /// `--yes` if `assume_yes`. Staged options are cleared here, whatever
    /// the outcome of the command.
    pub fn submit(&mut self, command: impl AsRef<str>, assume_yes: bool) -> &mut Self {
        let mut arguments = command.as_ref().trim().to_string();
        self.arguments.append_to(&mut arguments);
        for fragment in self.next_command.take() {
            arguments.push(' ');
            arguments.push_str(&fragment);
        }
        if assume_yes {
            arguments.push(' ');
            arguments.push_str(CONFIRMATION_FLAG);
        }

        let composed = ComposedCommand {
            executable: self.executable.clone(),
            arguments,
        };
        tracing::debug!(command = %composed, "Queued command");
        self.commands.push(composed);
        self
    }

    /// Commands submitted so far, in order
    pub fn commands(&self) -> &[ComposedCommand] {
        &self.commands
    }

    /// The most recent submission
    pub fn last_command(&self) -> Option<&ComposedCommand> {
        self.commands.last()
    }

    /// The whole stack as a single command line, joined with `&&`
    pub fn composed_command(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" && ")
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Execute one line, turning spawn errors into a failed result
    pub(crate) fn execute_line(&self, command_line: &str) -> ExecutionResult {
        self.printer.info(format_args!("Running {command_line}"));
        match self.executor.execute(command_line) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("{e}");
                ExecutionResult::spawn_failure(&e)
            }
        }
    }

    /// Execute every queued command in order
    ///
    /// With stop-on-fail, the remaining commands are skipped after the first
    /// failure. Otherwise everything runs. The combined result carries the
    /// output of every command that ran, and fails with the last non-zero
    /// exit code if any command failed.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        if self.commands.is_empty() {
            return Err(Error::EmptyStack);
        }

        let lines: Vec<String> = self.commands.iter().map(ToString::to_string).collect();
        let mut messages = Vec::with_capacity(lines.len());
        let mut exit_code = 0;
        let mut any_failed = false;

        for line in &lines {
            let result = self.execute_line(line);
            let failed = !result.was_successful();
            if failed {
                any_failed = true;
                exit_code = result.exit_code;
            }
            if !result.message.is_empty() {
                messages.push(result.message);
            }

            if failed {
                if self.stop_on_fail {
                    tracing::error!(command = %line, exit_code, "Command failed, stopping");
                    break;
                }
                tracing::warn!(command = %line, exit_code, "Command failed");
            }
        }

        let message = messages.join("\n");
        let result = if any_failed {
            ExecutionResult::failure(message, exit_code)
        } else {
            ExecutionResult::success(message)
        };
        self.last_result = Some(result.clone());
        Ok(result)
    }

    /// Result of the latest [`run`](Self::run)
    pub fn last_result(&self) -> Option<&ExecutionResult> {
        self.last_result.as_ref()
    }
}

fn warn_if_empty(option: &str, value: &str) {
    if value.trim().is_empty() {
        tracing::warn!("Empty value for --{option}, passing it through");
    }
}

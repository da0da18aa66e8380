//! Task file configuration
//!
//! A task file is the declarative form of a command stack: which executable
//! to run, the global options every command receives and the ordered list of
//! steps to submit.
//!
//! ```toml
//! executable = "vendor/bin/drupal"
//! stop_on_fail = true
//!
//! [global]
//! root = "/var/www/html/web"
//! uri = "example.com"
//!
//! [[steps]]
//! command = "site-install"
//! profile = "minimal"
//! [steps.options]
//! site_name = "Site Name"
//! db_type = "sqlite"
//! ```

use crate::Result;
use dcstack_core::{CommandExecutor, Error};
use dcstack_engine::{ConsoleStack, DEFAULT_EXECUTABLE, ShellExecutor, Verbosity};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Task file looked up in the current directory when none is given
pub const DEFAULT_TASK_FILE: &str = "dcstack.toml";

/// Root of a task file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    /// Path or name of the Drupal Console executable
    #[serde(default = "default_executable")]
    pub executable: String,

    /// End the run at the first failing step
    #[serde(default = "default_stop_on_fail")]
    pub stop_on_fail: bool,

    /// Directory commands run in (relative paths resolve against the task file)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Per-command timeout in seconds (0 or absent disables it)
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Options applied to every command
    #[serde(default)]
    pub global: GlobalOptions,

    /// Commands to submit, in order
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

fn default_stop_on_fail() -> bool {
    true
}

fn default_true() -> bool {
    true
}

impl Default for TaskFile {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            stop_on_fail: default_stop_on_fail(),
            working_dir: None,
            timeout: None,
            global: GlobalOptions::default(),
            steps: Vec::new(),
        }
    }
}

/// Global options, applied once before the first step
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalOptions {
    /// Drupal root directory (`--root`)
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Site URI (`--uri`)
    #[serde(default)]
    pub uri: Option<String>,
    /// Environment name (`--env`)
    #[serde(default)]
    pub environment: Option<String>,
    /// Switch off debug mode (`--no-debug`)
    #[serde(default)]
    pub no_debug: bool,
    /// Verbosity level (`--verbose`)
    #[serde(default)]
    pub verbosity: Option<Verbosity>,
}

/// One submitted command with its one-shot options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    /// Which command to submit
    #[serde(flatten)]
    pub action: StepAction,
    /// Options for this command only
    #[serde(default)]
    pub options: StepOptions,
}

/// Commands a step can submit, tagged by `command`
///
/// Every variant is a struct variant, so misspelled keys on a step are
/// rejected rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case", deny_unknown_fields)]
pub enum StepAction {
    /// `cache:rebuild`, `all` when no cache is named
    CacheRebuild {
        /// Cache bin to rebuild
        #[serde(default)]
        cache: Option<String>,
    },
    /// `update:execute`
    UpdateDb {
        /// Module to update, `all` when absent
        #[serde(default)]
        module: Option<String>,
        /// Single update function to run
        #[serde(default)]
        update_n: Option<String>,
    },
    /// `site:maintenance on|off`
    Maintenance {
        /// Turn maintenance mode on
        on: bool,
    },
    /// `cron:execute`
    ExecuteCron {
        /// Module whose cron runs
        module: String,
    },
    /// `site:install`
    SiteInstall {
        /// Installation profile
        #[serde(default)]
        profile: Option<String>,
    },
    /// `config:export`
    ConfigExport {},
    /// `config:import`
    ConfigImport {},
    /// `database:dump`
    DbDump {
        /// Database key
        database: String,
    },
    /// `database:restore`
    DbRestore {
        /// Database key
        database: String,
    },
    /// `database:drop`
    DbDrop {
        /// Database key
        database: String,
    },
    /// `migrate:execute` with comma-joined ids
    Migrate {
        /// Migrations to execute
        ids: Vec<MigrationId>,
    },
    /// `list`
    List {},
    /// `site:status`
    SiteStatus {},
    /// Arbitrary command text
    Raw {
        /// Command text after the executable
        line: String,
        /// Append `--yes`
        #[serde(default = "default_true")]
        assume_yes: bool,
    },
}

/// Migration id, written either as a number or a name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MigrationId {
    /// Numeric id, `ids = [1, 2]`
    Number(i64),
    /// Machine name, `ids = ["d7_user"]`
    Name(String),
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Per-command options, staged in the order listed here
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StepOptions {
    /// `--site-name`
    pub site_name: Option<String>,
    /// `--site-mail`
    pub site_mail: Option<String>,
    /// `--file`
    pub file: Option<PathBuf>,
    /// `--directory`
    pub directory: Option<PathBuf>,
    /// `--tar`
    pub tar: bool,
    /// `--langcode`
    pub langcode: Option<String>,
    /// `--db-type`
    pub db_type: Option<String>,
    /// `--db-file`
    pub db_file: Option<PathBuf>,
    /// `--db-host`
    pub db_host: Option<String>,
    /// `--db-name`
    pub db_name: Option<String>,
    /// `--db-user`
    pub db_user: Option<String>,
    /// `--db-pass`
    pub db_pass: Option<String>,
    /// `--db-prefix`
    pub db_prefix: Option<String>,
    /// `--db-port`
    pub db_port: Option<u16>,
    /// `--account-mail`
    pub account_mail: Option<String>,
    /// `--account-name`
    pub account_name: Option<String>,
    /// `--account-pass`
    pub account_pass: Option<String>,
}

impl TaskFile {
    /// Load a task file from disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read task file {}: {e}", path.display()))
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&content, base_dir).map_err(|e| {
            Error::Config(format!("Invalid task file {}: {e}", path.display()))
        })
    }

    /// Parse a task file from a TOML string
    ///
    /// Relative `working_dir` values resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing or validation fails
    pub fn from_toml_str(toml_content: &str, base_dir: &Path) -> Result<Self> {
        let mut task_file: Self =
            toml::from_str(toml_content).map_err(|e| Error::Config(e.to_string()))?;

        if let Some(dir) = &task_file.working_dir
            && dir.is_relative()
        {
            task_file.working_dir = Some(base_dir.join(dir));
        }

        task_file.validate()?;
        Ok(task_file)
    }

    /// Check values that TOML types alone cannot enforce
    pub fn validate(&self) -> Result<()> {
        if self.executable.trim().is_empty() {
            return Err(Error::Config("executable must not be empty".to_string()));
        }

        for (index, step) in self.steps.iter().enumerate() {
            let number = index + 1;
            match &step.action {
                StepAction::Migrate { ids } if ids.is_empty() => {
                    return Err(Error::Config(format!(
                        "step {number}: migrate needs at least one id"
                    )));
                }
                StepAction::Raw { line, .. } if line.trim().is_empty() => {
                    return Err(Error::Config(format!(
                        "step {number}: raw command line must not be empty"
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Timeout per command, if one is configured
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Shell executor honoring `working_dir` and `timeout`
    pub fn shell_executor(&self) -> ShellExecutor {
        let mut executor = ShellExecutor::new();
        if let Some(dir) = &self.working_dir {
            executor = executor.working_dir(dir.clone());
        }
        if let Some(timeout) = self.timeout_duration() {
            executor = executor.timeout(timeout);
        }
        executor
    }

    /// Build a stack with every step submitted, ready to run
    pub fn build_stack<E: CommandExecutor>(&self, executor: E) -> ConsoleStack<E> {
        let mut stack = ConsoleStack::with_executor(self.executable.clone(), executor);
        stack.stop_on_fail(self.stop_on_fail);
        self.global.apply(&mut stack);
        for step in &self.steps {
            step.apply(&mut stack);
        }
        stack
    }
}

impl GlobalOptions {
    /// Set every configured global option on `stack`
    ///
    /// Order is fixed: root, uri, environment, no-debug, verbosity.
    pub fn apply<E: CommandExecutor>(&self, stack: &mut ConsoleStack<E>) {
        if let Some(root) = &self.root {
            stack.root(root);
        }
        if let Some(uri) = &self.uri {
            stack.uri(uri);
        }
        if let Some(environment) = &self.environment {
            stack.environment(environment);
        }
        if self.no_debug {
            stack.no_debug();
        }
        if let Some(verbosity) = self.verbosity {
            stack.verbosity(verbosity);
        }
    }
}

impl Step {
    /// Stage this step's options and submit its command
    pub fn apply<E: CommandExecutor>(&self, stack: &mut ConsoleStack<E>) {
        self.options.apply(stack);
        self.action.apply(stack);
    }
}

impl StepOptions {
    /// Stage every configured option on `stack`
    pub fn apply<E: CommandExecutor>(&self, stack: &mut ConsoleStack<E>) {
        if let Some(v) = &self.site_name {
            stack.site_name(v);
        }
        if let Some(v) = &self.site_mail {
            stack.site_mail(v);
        }
        if let Some(v) = &self.file {
            stack.file(v);
        }
        if let Some(v) = &self.directory {
            stack.directory(v);
        }
        if self.tar {
            stack.tar();
        }
        if let Some(v) = &self.langcode {
            stack.langcode(v);
        }
        if let Some(v) = &self.db_type {
            stack.db_type(v);
        }
        if let Some(v) = &self.db_file {
            stack.db_file(v);
        }
        if let Some(v) = &self.db_host {
            stack.db_host(v);
        }
        if let Some(v) = &self.db_name {
            stack.db_name(v);
        }
        if let Some(v) = &self.db_user {
            stack.db_user(v);
        }
        if let Some(v) = &self.db_pass {
            stack.db_pass(v);
        }
        if let Some(v) = &self.db_prefix {
            stack.db_prefix(v);
        }
        if let Some(v) = self.db_port {
            stack.db_port(v);
        }
        if let Some(v) = &self.account_mail {
            stack.account_mail(v);
        }
        if let Some(v) = &self.account_name {
            stack.account_name(v);
        }
        if let Some(v) = &self.account_pass {
            stack.account_pass(v);
        }
    }
}

impl StepAction {
    /// Submit the command on `stack`
    pub fn apply<E: CommandExecutor>(&self, stack: &mut ConsoleStack<E>) {
        match self {
            Self::CacheRebuild { cache } => {
                stack.cache_rebuild(cache.as_deref());
            }
            Self::UpdateDb { module, update_n } => {
                stack.update_db(module.as_deref(), update_n.as_deref());
            }
            Self::Maintenance { on } => {
                stack.maintenance(*on);
            }
            Self::ExecuteCron { module } => {
                stack.execute_cron(module);
            }
            Self::SiteInstall { profile } => {
                stack.site_install(profile.as_deref());
            }
            Self::ConfigExport {} => {
                stack.config_export();
            }
            Self::ConfigImport {} => {
                stack.config_import();
            }
            Self::DbDump { database } => {
                stack.db_dump(database);
            }
            Self::DbRestore { database } => {
                stack.db_restore(database);
            }
            Self::DbDrop { database } => {
                stack.db_drop(database);
            }
            Self::Migrate { ids } => {
                stack.execute_migrate(ids);
            }
            Self::List {} => {
                stack.list_commands();
            }
            Self::SiteStatus {} => {
                stack.site_status();
            }
            Self::Raw { line, assume_yes } => {
                stack.submit(line, *assume_yes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use dcstack_engine::DryRunExecutor;

    fn parse(toml: &str) -> TaskFile {
        TaskFile::from_toml_str(toml, Path::new("/project")).unwrap()
    }

    #[test]
    fn test_defaults() {
        let task_file = parse("");
        assert_eq!(task_file.executable, "drupal");
        assert!(task_file.stop_on_fail);
        assert!(task_file.steps.is_empty());
        assert_eq!(task_file.global, GlobalOptions::default());
        assert!(task_file.timeout_duration().is_none());
    }

    #[test]
    fn test_site_install_step() {
        let task_file = parse(
            r#"
[[steps]]
command = "site-install"
profile = "minimal"
[steps.options]
site_name = "Site Name"
db_type = "sqlite"
db_file = "sites/default/.ht.sqlite"
"#,
        );

        let step = &task_file.steps[0];
        assert_eq!(
            step.action,
            StepAction::SiteInstall {
                profile: Some("minimal".to_string())
            }
        );
        assert_eq!(step.options.site_name.as_deref(), Some("Site Name"));
        assert_eq!(step.options.db_type.as_deref(), Some("sqlite"));
    }

    #[test]
    fn test_unit_and_struct_steps() {
        let task_file = parse(
            r#"
[[steps]]
command = "config-import"

[[steps]]
command = "update-db"
module = "system"
update_n = "8001"

[[steps]]
command = "maintenance"
on = false

[[steps]]
command = "raw"
line = "state:debug"
assume_yes = false
"#,
        );

        assert_eq!(task_file.steps[0].action, StepAction::ConfigImport {});
        assert_eq!(
            task_file.steps[1].action,
            StepAction::UpdateDb {
                module: Some("system".to_string()),
                update_n: Some("8001".to_string()),
            }
        );
        assert_eq!(task_file.steps[2].action, StepAction::Maintenance { on: false });
        assert_eq!(
            task_file.steps[3].action,
            StepAction::Raw {
                line: "state:debug".to_string(),
                assume_yes: false,
            }
        );
    }

    #[test]
    fn test_migration_ids_accept_numbers_and_names() {
        let task_file = parse(
            r#"
[[steps]]
command = "migrate"
ids = [1, "d7_user", 3]
"#,
        );

        let mut stack = task_file.build_stack(DryRunExecutor::new());
        assert_eq!(
            stack.last_command().unwrap().arguments(),
            "migrate:execute 1,d7_user,3 --yes"
        );
        assert!(stack.run().unwrap().was_successful());
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result = TaskFile::from_toml_str(
            r#"
[[steps]]
command = "list"
[steps.options]
site_nam = "typo"
"#,
            Path::new("/"),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_misspelled_step_key_is_rejected() {
        let result = TaskFile::from_toml_str(
            "[[steps]]\ncommand = \"site-install\"\nprofle = \"minimal\"\n",
            Path::new("/"),
        );
        let Err(Error::Config(message)) = result else {
            panic!("expected config error");
        };
        assert!(message.contains("profle"));
    }

    #[test]
    fn test_extra_key_on_bare_command_is_rejected() {
        let result = TaskFile::from_toml_str(
            "[[steps]]\ncommand = \"config-import\"\ndirectory = \"sync\"\n",
            Path::new("/"),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let result = TaskFile::from_toml_str(
            "[[steps]]\ncommand = \"explode\"\n",
            Path::new("/"),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_migrate_is_rejected() {
        let result = TaskFile::from_toml_str(
            "[[steps]]\ncommand = \"migrate\"\nids = []\n",
            Path::new("/"),
        );
        let Err(Error::Config(message)) = result else {
            panic!("expected config error");
        };
        assert!(message.contains("step 1"));
    }

    #[test]
    fn test_empty_executable_is_rejected() {
        let result = TaskFile::from_toml_str("executable = \"  \"\n", Path::new("/"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_relative_working_dir_resolves_against_base() {
        let task_file = parse("working_dir = \"web\"\ntimeout = 30\n");
        assert_eq!(task_file.working_dir, Some(PathBuf::from("/project/web")));
        assert_eq!(task_file.timeout_duration(), Some(Duration::from_secs(30)));

        let task_file = parse("working_dir = \"/srv/www\"\ntimeout = 0\n");
        assert_eq!(task_file.working_dir, Some(PathBuf::from("/srv/www")));
        assert!(task_file.timeout_duration().is_none());
    }

    #[test]
    fn test_build_stack_applies_globals_then_steps() {
        let task_file = parse(
            r#"
executable = "vendor/bin/drupal"
stop_on_fail = false

[global]
verbosity = "debug"
no_debug = true
environment = "prod"
uri = "example.com"
root = "/var/www/html"

[[steps]]
command = "config-export"
[steps.options]
directory = "/tmp/export"
tar = true

[[steps]]
command = "cache-rebuild"
"#,
        );

        let stack = task_file.build_stack(DryRunExecutor::new());
        assert_eq!(
            stack.composed_command(),
            "vendor/bin/drupal config:export --root=/var/www/html --uri=example.com --env=prod \
             --no-debug --verbose=3 --directory=/tmp/export --tar --yes \
             && vendor/bin/drupal cache:rebuild all --root=/var/www/html --uri=example.com \
             --env=prod --no-debug --verbose=3 --yes"
        );
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TASK_FILE);
        fs::write(&path, "working_dir = \"web\"\n[[steps]]\ncommand = \"site-status\"\n").unwrap();

        let task_file = TaskFile::load(&path).unwrap();
        assert_eq!(task_file.working_dir, Some(dir.path().join("web")));
        assert_eq!(task_file.steps[0].action, StepAction::SiteStatus {});
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TaskFile::load(dir.path().join("missing.toml"));
        let Err(Error::Config(message)) = result else {
            panic!("expected config error");
        };
        assert!(message.contains("missing.toml"));
    }
}

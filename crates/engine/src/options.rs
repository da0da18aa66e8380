//! Option catalog and the next-command option buffer
//!
//! Per-command options live in a two-state buffer: `Idle` while nothing is
//! staged, `Staged` once a setter has been called. The only way back to
//! `Idle` is [`NextCommandOptions::take`], which a submission calls exactly
//! once, whether or not the command later succeeds.

use crate::escape::option_fragment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options that apply to the next submitted command only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandOption {
    /// Site name for `site:install`
    SiteName,
    /// Site email address
    SiteMail,
    /// Archive or dump file path
    File,
    /// Configuration directory
    Directory,
    /// Export configuration as a tarball (flag only)
    Tar,
    /// Default language code
    Langcode,
    /// Database driver, e.g. `mysql` or `sqlite`
    DbType,
    /// SQLite database file
    DbFile,
    /// Database host
    DbHost,
    /// Database name
    DbName,
    /// Database user
    DbUser,
    /// Database password
    DbPass,
    /// Table prefix
    DbPrefix,
    /// Database port
    DbPort,
    /// Admin account email
    AccountMail,
    /// Admin account name
    AccountName,
    /// Admin account password
    AccountPass,
}

impl CommandOption {
    /// Flag name as understood by Drupal Console (without the `--` prefix)
    pub const fn name(self) -> &'static str {
        match self {
            Self::SiteName => "site-name",
            Self::SiteMail => "site-mail",
            Self::File => "file",
            Self::Directory => "directory",
            Self::Tar => "tar",
            Self::Langcode => "langcode",
            Self::DbType => "db-type",
            Self::DbFile => "db-file",
            Self::DbHost => "db-host",
            Self::DbName => "db-name",
            Self::DbUser => "db-user",
            Self::DbPass => "db-pass",
            Self::DbPrefix => "db-prefix",
            Self::DbPort => "db-port",
            Self::AccountMail => "account-mail",
            Self::AccountName => "account-name",
            Self::AccountPass => "account-pass",
        }
    }

    /// Whether the flag carries a value
    pub const fn takes_value(self) -> bool {
        !matches!(self, Self::Tar)
    }
}

impl fmt::Display for CommandOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verbosity levels accepted by `--verbose`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Normal output
    #[default]
    Normal = 1,
    /// More verbose output
    Verbose = 2,
    /// Debug output
    Debug = 3,
}

impl Verbosity {
    /// Numeric level passed on the command line
    pub const fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Buffer of options staged for the next submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NextCommandOptions {
    /// Nothing staged
    #[default]
    Idle,
    /// Options waiting for the next submission, in staging order
    Staged(IndexMap<CommandOption, Option<String>>),
}

impl NextCommandOptions {
    /// Stage an option for the next submission
    ///
    /// Staging a flag that is already staged replaces its value and keeps
    /// its original position.
    pub fn stage(&mut self, option: CommandOption, value: Option<String>) {
        match self {
            Self::Idle => {
                let mut staged = IndexMap::new();
                staged.insert(option, value);
                *self = Self::Staged(staged);
            }
            Self::Staged(staged) => {
                staged.insert(option, value);
            }
        }
    }

    /// Returns true if at least one option is waiting for a submission
    pub fn is_staged(&self) -> bool {
        matches!(self, Self::Staged(_))
    }

    /// Number of staged options
    pub fn len(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Staged(staged) => staged.len(),
        }
    }

    /// Returns true if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush the staged options as escaped fragments and return to `Idle`
    pub fn take(&mut self) -> Vec<String> {
        match std::mem::take(self) {
            Self::Idle => Vec::new(),
            Self::Staged(staged) => staged
                .into_iter()
                .map(|(option, value)| option_fragment(option.name(), value.as_deref()))
                .collect(),
        }
    }
}

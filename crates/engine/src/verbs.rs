//! Drupal Console verb catalog
//!
//! Each verb builds its command text, escapes any positional arguments and
//! submits it with `--yes`.

use crate::escape::escape;
use crate::stack::ConsoleStack;
use dcstack_core::CommandExecutor;
use std::fmt::Display;

/// Cache and module name meaning "everything"
pub const ALL: &str = "all";

impl<E: CommandExecutor> ConsoleStack<E> {
    /// Rebuilds the given cache (`all` when `None`)
    pub fn cache_rebuild(&mut self, cache: Option<&str>) -> &mut Self {
        self.printer.info(format_args!("Cache rebuild"));
        let cache = cache.unwrap_or(ALL);
        self.submit(format!("cache:rebuild {}", escape(cache)), true)
    }

    /// Executes a specific update N function in a module, or all pending updates
    ///
    /// `module` defaults to `all`; `update_n` is omitted when `None` or empty.
    pub fn update_db(&mut self, module: Option<&str>, update_n: Option<&str>) -> &mut Self {
        self.printer.info(format_args!("Perform database updates"));
        let mut command = format!("update:execute {}", escape(module.unwrap_or(ALL)));
        if let Some(update_n) = update_n.filter(|n| !n.is_empty()) {
            command.push(' ');
            command.push_str(&escape(update_n));
        }
        self.submit(command, true)
    }

    /// Turns maintenance mode on or off
    pub fn maintenance(&mut self, on: bool) -> &mut Self {
        let mode = if on { "on" } else { "off" };
        self.printer
            .info(format_args!("Set maintenance mode: {mode}"));
        self.submit(format!("site:maintenance {mode}"), true)
    }

    /// Executes the cron implementation of a module
    pub fn execute_cron(&mut self, module: &str) -> &mut Self {
        self.printer.info(format_args!("Execute cron"));
        self.submit(format!("cron:execute {}", escape(module)), true)
    }

    /// Executes `site:install`, with the installation profile if given
    pub fn site_install(&mut self, profile: Option<&str>) -> &mut Self {
        match profile.filter(|p| !p.is_empty()) {
            Some(profile) => self.submit(format!("site:install {}", escape(profile)), true),
            None => self.submit("site:install", true),
        }
    }

    /// Exports configuration
    pub fn config_export(&mut self) -> &mut Self {
        self.printer.info(format_args!("Export configuration"));
        self.submit("config:export", true)
    }

    /// Imports configuration
    pub fn config_import(&mut self) -> &mut Self {
        self.printer.info(format_args!("Import configuration"));
        self.submit("config:import", true)
    }

    /// Dumps the database
    pub fn db_dump(&mut self, database: &str) -> &mut Self {
        self.printer.info(format_args!("Dump database: {database}"));
        self.submit(format!("database:dump {}", escape(database)), true)
    }

    /// Restores the database
    pub fn db_restore(&mut self, database: &str) -> &mut Self {
        self.printer
            .info(format_args!("Restore database: {database}"));
        self.submit(format!("database:restore {}", escape(database)), true)
    }

    /// Drops the database
    pub fn db_drop(&mut self, database: &str) -> &mut Self {
        self.printer.info(format_args!("Drop database: {database}"));
        self.submit(format!("database:drop {}", escape(database)), true)
    }

    /// Executes migrations, ids are comma-joined without spaces
    pub fn execute_migrate<I, S>(&mut self, migration_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        let ids = migration_ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.printer.info(format_args!("Execute migrations: {ids}"));
        self.submit(format!("migrate:execute {}", escape(&ids)), true)
    }

    /// Executes `list`
    pub fn list_commands(&mut self) -> &mut Self {
        self.submit("list", true)
    }

    /// Executes `site:status`
    pub fn site_status(&mut self) -> &mut Self {
        self.submit("site:status", true)
    }
}

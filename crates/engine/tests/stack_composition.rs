//! Integration tests for command composition and stack execution
//!
//! These tests drive a `ConsoleStack` end to end through a scripted
//! executor, so they never spawn the real Drupal Console.

#![allow(clippy::unwrap_used, clippy::panic)]

use dcstack_engine::{
    CommandExecutor, ConsoleStack, Error, ExecutionResult, Result, UNKNOWN_VERSION, Verbosity,
};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays queued responses and records every command line
#[derive(Default)]
struct ScriptedExecutor {
    responses: RefCell<VecDeque<Result<ExecutionResult>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedExecutor {
    fn with_responses(responses: impl IntoIterator<Item = Result<ExecutionResult>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, command_line: &str) -> Result<ExecutionResult> {
        self.calls.borrow_mut().push(command_line.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ExecutionResult::success("")))
    }
}

fn stack_with(executor: ScriptedExecutor) -> ConsoleStack<ScriptedExecutor> {
    ConsoleStack::with_executor("drupal", executor)
}

fn tokens(line: &str) -> Vec<String> {
    shell_words::split(line).unwrap()
}

#[test]
fn test_site_install_command() {
    let mut stack = stack_with(ScriptedExecutor::default());
    stack
        .site_name("Site Name")
        .site_mail("site-mail@example.com")
        .langcode("de")
        .account_mail("mail@example.com")
        .account_name("admin")
        .account_pass("pw")
        .db_prefix("drupal_")
        .db_type("sqlite")
        .db_file("sites/default/.ht.sqlite")
        .site_install(Some("minimal"));

    assert_eq!(
        stack.composed_command(),
        "drupal site:install minimal --site-name='Site Name' --site-mail=site-mail@example.com \
         --langcode=de --account-mail=mail@example.com --account-name=admin --account-pass=pw \
         --db-prefix=drupal_ --db-type=sqlite --db-file=sites/default/.ht.sqlite --yes"
    );
}

#[test]
fn test_site_install_with_mysql_and_globals() {
    let mut stack = stack_with(ScriptedExecutor::default());
    stack
        .root("/var/www/html/app")
        .uri("sub.example.com")
        .db_type("mysql")
        .db_host("localhost")
        .db_name("testdb")
        .db_user("dbuser")
        .db_pass("test db pw")
        .db_port(3306)
        .site_install(Some("standard"));

    let arguments = stack.last_command().unwrap().arguments().to_string();
    assert!(arguments.starts_with("site:install standard --root=/var/www/html/app --uri=sub.example.com"));
    assert!(arguments.ends_with(" --yes"));

    let parsed = tokens(&arguments);
    let db_pass = parsed.iter().position(|t| t == "--db-pass=test db pw").unwrap();
    let root = parsed.iter().position(|t| t == "--root=/var/www/html/app").unwrap();
    assert!(root < db_pass, "global options come before staged options");
}

#[test]
fn test_persistent_options_repeat_on_every_submission() {
    let mut stack = stack_with(ScriptedExecutor::default());
    stack
        .root("/var/www/html/app")
        .environment("prod")
        .cache_rebuild(None)
        .update_db(None, None)
        .config_import();

    for command in stack.commands() {
        let arguments = command.arguments();
        assert_eq!(arguments.matches("--root=/var/www/html/app").count(), 1);
        assert_eq!(arguments.matches("--env=prod").count(), 1);
    }
    assert_eq!(
        stack
            .composed_command()
            .matches("--root=/var/www/html/app")
            .count(),
        3
    );
}

#[test]
fn test_confirmation_flag_is_always_last() {
    let mut stack = stack_with(ScriptedExecutor::default());
    stack
        .root("/srv")
        .no_debug()
        .verbosity(Verbosity::Verbose)
        .directory("/tmp/export")
        .tar()
        .config_export();

    let parsed = tokens(stack.last_command().unwrap().arguments());
    assert_eq!(parsed.last().map(String::as_str), Some("--yes"));
    assert_eq!(parsed.iter().filter(|t| *t == "--yes").count(), 1);

    stack.submit("list", false);
    assert!(!tokens(stack.last_command().unwrap().arguments()).contains(&"--yes".to_string()));
}

#[test]
fn test_staged_options_do_not_leak_into_next_submission() {
    let mut stack = stack_with(ScriptedExecutor::default());
    stack.file("/tmp/dump.sql").db_dump("default");
    stack.db_dump("default");

    let commands = stack.commands();
    assert_eq!(
        commands[0].arguments(),
        "database:dump default --file=/tmp/dump.sql --yes"
    );
    assert_eq!(commands[1].arguments(), "database:dump default --yes");
}

#[test]
fn test_options_staged_across_setters_flush_on_first_submission() {
    let mut stack = stack_with(ScriptedExecutor::default());
    stack.account_name("admin");
    stack.account_pass("pw");
    stack.site_status();
    stack.site_status();

    let commands = stack.commands();
    assert_eq!(
        commands[0].arguments(),
        "site:status --account-name=admin --account-pass=pw --yes"
    );
    assert_eq!(commands[1].arguments(), "site:status --yes");
}

#[test]
fn test_values_survive_shell_round_trip() {
    let values = [
        "Site Name",
        "it's a \"quoted\" name",
        "a;rm -rf /",
        "$(whoami) `id`",
        "tab\tand\nnewline",
        "",
    ];

    for value in values {
        let mut stack = stack_with(ScriptedExecutor::default());
        stack.uri(value).site_name(value).submit("list", true);

        let parsed = tokens(stack.last_command().unwrap().arguments());
        assert_eq!(
            parsed,
            vec![
                "list".to_string(),
                format!("--uri={value}"),
                format!("--site-name={value}"),
                "--yes".to_string(),
            ],
            "value {value:?} did not round-trip"
        );
    }
}

#[test]
fn test_execute_migrate_scenario() {
    let mut stack = stack_with(ScriptedExecutor::default());
    stack.execute_migrate([1, 2, 3]);
    assert_eq!(
        stack.last_command().unwrap().arguments(),
        "migrate:execute 1,2,3 --yes"
    );
}

#[test]
fn test_run_stops_on_first_failure() {
    let executor = ScriptedExecutor::with_responses([
        Ok(ExecutionResult::success("maintenance on")),
        Ok(ExecutionResult::failure("update failed", 2)),
        Ok(ExecutionResult::success("never")),
    ]);
    let mut stack = stack_with(executor);
    stack
        .stop_on_fail(true)
        .maintenance(true)
        .update_db(None, None)
        .maintenance(false);

    let result = stack.run().unwrap();
    assert!(!result.was_successful());
    assert_eq!(result.exit_code, 2);
    assert_eq!(result.message, "maintenance on\nupdate failed");
    assert_eq!(stack.executor().calls().len(), 2);
    assert_eq!(stack.last_result(), Some(&result));
}

#[test]
fn test_run_without_stop_on_fail_runs_everything() {
    let executor = ScriptedExecutor::with_responses([
        Ok(ExecutionResult::failure("first failed", 1)),
        Ok(ExecutionResult::success("second ok")),
    ]);
    let mut stack = stack_with(executor);
    stack.cache_rebuild(None).site_status();

    let result = stack.run().unwrap();
    assert!(!result.was_successful());
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.message, "first failed\nsecond ok");
    assert_eq!(
        stack.executor().calls(),
        [
            "drupal cache:rebuild all --yes",
            "drupal site:status --yes"
        ]
    );
}

#[test]
fn test_spawn_error_becomes_failed_result() {
    let executor = ScriptedExecutor::with_responses([Err(Error::Spawn {
        command: "drupal list --yes".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "sh missing"),
    })]);
    let mut stack = stack_with(executor);
    stack.stop_on_fail(true).list_commands();

    let result = stack.run().unwrap();
    assert!(!result.was_successful());
    assert_eq!(result.exit_code, -1);
    assert!(result.message.contains("sh missing"));
}

#[test]
fn test_failed_submission_still_clears_staged_options() {
    let executor = ScriptedExecutor::with_responses([Ok(ExecutionResult::failure("boom", 1))]);
    let mut stack = stack_with(executor);
    stack.directory("/tmp/config").config_import();
    let _ = stack.run().unwrap();

    assert!(!stack.has_staged_options());
    stack.config_import();
    assert_eq!(stack.last_command().unwrap().arguments(), "config:import --yes");
}

#[test]
fn test_version_is_detected_once() {
    let executor = ScriptedExecutor::with_responses([Ok(ExecutionResult::success(
        "Drupal Console Launcher 1.9.7\n",
    ))]);
    let mut stack = stack_with(executor);
    stack.root("/srv").site_name("ignored");

    assert_eq!(stack.version(), "1.9.7");
    assert_eq!(stack.version(), "1.9.7");
    assert_eq!(stack.executor().calls(), ["drupal --version"]);
    assert!(stack.has_staged_options(), "version does not consume staged options");
    assert!(stack.commands().is_empty(), "version is not queued");
}

#[test]
fn test_version_unknown_when_command_fails() {
    let executor = ScriptedExecutor::with_responses([Ok(ExecutionResult::failure(
        "sh: 1: drupal: not found 127",
        127,
    ))]);
    let mut stack = stack_with(executor);

    assert_eq!(stack.version(), UNKNOWN_VERSION);
    assert_eq!(stack.version(), UNKNOWN_VERSION);
    assert_eq!(stack.executor().calls().len(), 1);
}

#[test]
fn test_version_unknown_without_numeric_output() {
    let executor =
        ScriptedExecutor::with_responses([Ok(ExecutionResult::success("Drupal Console\n"))]);
    let mut stack = stack_with(executor);

    assert_eq!(stack.version(), UNKNOWN_VERSION);
    assert_eq!(stack.version(), UNKNOWN_VERSION);
    assert_eq!(stack.executor().calls().len(), 1);
}

#[test]
fn test_version_unknown_when_tool_unreachable() {
    let executor = ScriptedExecutor::with_responses([Err(Error::Spawn {
        command: "drupal --version".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no shell"),
    })]);
    let mut stack = stack_with(executor);

    assert_eq!(stack.version(), UNKNOWN_VERSION);
    assert_eq!(stack.version(), UNKNOWN_VERSION);
    assert_eq!(stack.executor().calls().len(), 1);
}

#[test]
fn test_version_restores_printing_state() {
    let mut stack = stack_with(ScriptedExecutor::default());
    let _ = stack.version();
    assert!(stack.is_printed());

    let mut quiet = stack_with(ScriptedExecutor::default());
    quiet.printed(false);
    let _ = quiet.version();
    assert!(!quiet.is_printed());
}

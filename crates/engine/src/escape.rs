//! Shell escaping for composed command lines
//!
//! Values are quoted with POSIX shell rules (via `shell-words`), so a
//! fragment can be pasted unmodified into a single `sh -c` command line and
//! re-parsing that line yields the original value back.
//!
//! Plain tokens such as `sqlite`, `site-mail@example.com` or
//! `sites/default/.ht.sqlite` are left untouched; anything containing
//! whitespace, quotes or shell metacharacters is single-quoted.

use std::borrow::Cow;

/// Escape a single value for inclusion in a shell command line
///
/// # Examples
///
/// ```
/// use dcstack_engine::escape::escape;
///
/// assert_eq!(escape("sqlite"), "sqlite");
/// assert_eq!(escape("Site Name"), "'Site Name'");
/// ```
pub fn escape(value: &str) -> Cow<'_, str> {
    shell_words::quote(value)
}

/// Normalize an option name into a flag token
///
/// Names that already start with `-` are kept as they are; anything else
/// gets the `--` prefix. The name itself is never escaped.
pub fn flag(name: &str) -> Cow<'_, str> {
    if name.starts_with('-') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("--{name}"))
    }
}

/// Build an escaped `--name` or `--name=<value>` fragment
pub fn option_fragment(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{}={}", flag(name), escape(value)),
        None => flag(name).into_owned(),
    }
}

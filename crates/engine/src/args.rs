//! Persistent argument accumulator
//!
//! Holds the escaped `--option[=value]` fragments that are appended to every
//! command a stack submits (root directory, URI, environment, ...).

use crate::escape::option_fragment;

/// Ordered, append-only buffer of escaped fragments
///
/// Fragments are stored in their final textual form and never re-escaped.
/// There is no deduplication: appending the same option twice emits it twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentAccumulator {
    fragments: Vec<String>,
}

impl ArgumentAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `--name` or `--name=<escaped value>`
    pub fn option(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.fragments.push(option_fragment(name, value));
        self
    }

    /// Append already-formed argument text verbatim
    ///
    /// Blank text is ignored.
    pub fn raw(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref().trim();
        if !text.is_empty() {
            self.fragments.push(text.to_string());
        }
        self
    }

    /// Fragments in insertion order
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Returns true if nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of fragments
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Append every fragment to `line`, each preceded by a single space
    pub fn append_to(&self, line: &mut String) {
        for fragment in &self.fragments {
            line.push(' ');
            line.push_str(fragment);
        }
    }
}

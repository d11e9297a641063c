//! Run-list parsing.
//!
//! The run list is an ordered, duplicate-permitting sequence of test
//! names: each occurrence of a name triggers a separate execution. Order
//! comes entirely from here; the registry makes no ordering promise.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::SELF_CHECK_TEST;

/// Matches the first identifier on a line, with an optional qualifying
/// `suites::` prefix. Anything after the identifier (parentheses, a comma,
/// trailing commentary) is ignored. The identifier grammar approximates
/// Rust's: a letter or underscore, then letters, digits, or underscores.
static RUN_LIST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:suites::)?(?P<name>[\p{L}_][\p{L}\p{N}_]*)").expect("run-list pattern compiles")
});

/// The ordered sequence of test names configured to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunList {
    entries: Vec<String>,
}

impl RunList {
    /// Parse configuration text into a run list.
    ///
    /// Lines whose trimmed content starts with `//` never contribute a
    /// name, even when the rest of the line would match. Lines that do not
    /// match the identifier grammar are silently excluded; if such a name
    /// was meant to run, it surfaces through the consistency report. The
    /// self-check test is appended once at the end, whether or not it
    /// appears literally in the text.
    pub fn parse(text: &str) -> Self {
        let mut entries: Vec<String> = text
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .filter_map(|line| RUN_LIST_LINE.captures(line))
            .map(|caps| caps["name"].to_string())
            .collect();
        entries.push(SELF_CHECK_TEST.to_string());
        Self { entries }
    }

    /// Entries in execution order, duplicates preserved.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Deduplicated names, for set comparison against the registry.
    pub fn unique_names(&self) -> BTreeSet<&str> {
        self.entries.iter().map(String::as_str).collect()
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when only the appended self-check is present.
    pub fn is_empty(&self) -> bool {
        // The self-check is always appended, so "empty" means exactly one.
        self.entries.len() <= 1
    }
}

//! Source-unit manifest parsing.
//!
//! Each line names one suite file, stem plus extension. The stems anchor
//! the symbol catalog: a registered flag named `<flag>_<stem>` belongs to
//! that unit.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a file stem and dot-extension at the start of a line. Text
/// after the extension is ignored, so `smoke.rs.orig` parses as stem
/// `smoke` with extension `.rs`.
static SOURCE_UNIT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<stem>[\p{L}_][\p{L}\p{N}_]*)(?P<ext>\.[\p{L}\p{N}]+)")
        .expect("source-unit pattern compiles")
});

/// One suite file named in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// File stem, e.g. `smoke`
    pub stem: String,
    /// Extension with leading dot, e.g. `.rs`
    pub ext: String,
}

impl SourceUnit {
    /// Full file name, stem plus extension.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.stem, self.ext)
    }
}

/// Parse the manifest text into source units, in listed order. Commented
/// (`//`) lines and lines without a stem-plus-extension token contribute
/// nothing.
pub fn parse_source_units(text: &str) -> Vec<SourceUnit> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .filter_map(|line| SOURCE_UNIT_LINE.captures(line))
        .map(|caps| SourceUnit {
            stem: caps["stem"].to_string(),
            ext: caps["ext"].to_string(),
        })
        .collect()
}

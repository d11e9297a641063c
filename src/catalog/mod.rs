//! Symbol catalog: compile-time flags reported per source unit.
//!
//! Each suite file registers boolean constants reflecting the crate
//! features it was compiled with, named `<flag>_<unit-stem>` (for example
//! `selected_data_only_smoke`). The builder matches registered names
//! against the unit manifest by suffix, strips the suffix, and records one
//! [`SymbolInfo`] per flag. The catalog is built once per session and is
//! read-only afterward.

use std::collections::BTreeMap;

use log::warn;

use crate::config::SourceUnit;
use crate::error::{Result, TestrigError};

/// Flag meaning "this unit may skip some of its test cases". The
/// self-check test fails while it is active anywhere.
pub const SELECTED_DATA_FLAG: &str = "selected_data_only";

/// Mutually exclusive platform-selector flags. A unit with neither active
/// runs under the host platform.
pub const PLATFORM_FLAGS: [&str; 2] = ["standalone_platform", "libtest_platform"];

/// Platform implied when no selector flag is active in a unit.
pub const HOST_PLATFORM: &str = "host_platform";

/// A registered compile-time flag constant, submitted by each suite file.
#[derive(Debug, Clone, Copy)]
pub struct SymbolEntry {
    /// Flag name carrying the `_<unit-stem>` suffix
    pub name: &'static str,
    /// Whether the flag was active when the crate was compiled
    pub active: bool,
}

impl SymbolEntry {
    /// Const constructor usable inside `inventory::submit!`.
    pub const fn new(name: &'static str, active: bool) -> Self {
        Self { name, active }
    }
}

inventory::collect!(SymbolEntry);

/// One flag resolved to its source unit.
///
/// Invariant: `flag` never contains the `_<unit>` suffix; it is stripped
/// during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    /// Flag name without the unit suffix, e.g. `selected_data_only`
    pub flag: String,
    /// Unit stem, e.g. `smoke`
    pub unit: String,
    /// Unit file extension, e.g. `.rs`
    pub ext: String,
    /// Whether the flag is active in this build
    pub active: bool,
}

impl SymbolInfo {
    /// File name of the owning unit, stem plus extension.
    pub fn unit_file(&self) -> String {
        format!("{}{}", self.unit, self.ext)
    }
}

/// The resolved mapping of flags to source units for one session.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    symbols: Vec<SymbolInfo>,
    units_without_flags: Vec<String>,
    platform: String,
}

impl SymbolCatalog {
    /// Build the catalog from every registered [`SymbolEntry`].
    ///
    /// Soft failure: units with no matching flags are recorded for the
    /// report, not fatal (usually a missing or misspelled flag block in
    /// that suite file). Hard failure: the units must agree on a single
    /// platform selector; disagreement is a configuration error raised
    /// before any test executes.
    pub fn build(units: &[SourceUnit]) -> Result<Self> {
        let entries: Vec<SymbolEntry> = inventory::iter::<SymbolEntry>.into_iter().copied().collect();
        Self::from_entries(&entries, units)
    }

    /// Build from explicit entries; `build` feeds the registered set
    /// through here, and engine tests supply their own.
    pub fn from_entries(entries: &[SymbolEntry], units: &[SourceUnit]) -> Result<Self> {
        let mut symbols = Vec::new();
        for unit in units {
            let suffix = format!("_{}", unit.stem);
            for entry in entries {
                if let Some(flag) = entry.name.strip_suffix(&suffix) {
                    if flag.is_empty() {
                        continue;
                    }
                    symbols.push(SymbolInfo {
                        flag: flag.to_string(),
                        unit: unit.stem.clone(),
                        ext: unit.ext.clone(),
                        active: entry.active,
                    });
                }
            }
        }

        let units_without_flags: Vec<String> = units
            .iter()
            .filter(|unit| !symbols.iter().any(|s| s.unit == unit.stem))
            .map(SourceUnit::file_name)
            .collect();
        for file in &units_without_flags {
            warn!("source unit {} registered no compile-time flags", file);
        }

        let platform = check_platform_consistency(&symbols, units)?;

        Ok(Self {
            symbols,
            units_without_flags,
            platform,
        })
    }

    /// All resolved symbols, in unit-manifest order.
    pub fn symbols(&self) -> &[SymbolInfo] {
        &self.symbols
    }

    /// File names of units that registered no flags at all.
    pub fn units_without_flags(&self) -> &[String] {
        &self.units_without_flags
    }

    /// The single platform the unit set agreed on.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Active flags grouped by unit file, both levels sorted, units with
    /// no active flags omitted. Used for the report header.
    pub fn active_by_unit(&self) -> Vec<(String, Vec<String>)> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for symbol in self.symbols.iter().filter(|s| s.active) {
            grouped.entry(symbol.unit_file()).or_default().push(symbol.flag.clone());
        }
        grouped
            .into_iter()
            .map(|(file, mut flags)| {
                flags.sort();
                (file, flags)
            })
            .collect()
    }

    /// File names of units where the given flag is active, sorted.
    pub fn units_with_flag_active(&self, flag: &str) -> Vec<String> {
        let mut files: Vec<String> = self
            .symbols
            .iter()
            .filter(|s| s.flag == flag && s.active)
            .map(SymbolInfo::unit_file)
            .collect();
        files.sort();
        files.dedup();
        files
    }
}

/// Resolve the platform choice across units, or fail when more than one
/// mutually exclusive selector is active over the whole set.
fn check_platform_consistency(symbols: &[SymbolInfo], units: &[SourceUnit]) -> Result<String> {
    let mut by_platform: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for unit in units {
        let mut chosen: Vec<&str> = symbols
            .iter()
            .filter(|s| s.unit == unit.stem && s.active && PLATFORM_FLAGS.contains(&s.flag.as_str()))
            .map(|s| s.flag.as_str())
            .collect();
        if chosen.is_empty() {
            chosen.push(HOST_PLATFORM);
        }
        for platform in chosen {
            by_platform.entry(platform).or_default().push(unit.file_name());
        }
    }

    if by_platform.len() <= 1 {
        return Ok(by_platform
            .keys()
            .next()
            .copied()
            .unwrap_or(HOST_PLATFORM)
            .to_string());
    }

    let listing = by_platform
        .iter()
        .map(|(platform, files)| format!("  {} (used in {})", platform, files.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    Err(TestrigError::Config(format!(
        "Only one of the following platforms should be selected across the source units:\n{}",
        listing
    )))
}

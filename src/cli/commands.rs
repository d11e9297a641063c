//! CLI command definitions using clap.
//!
//! The default action (no subcommand) runs the configured test session.
//! Subcommands:
//! - list: show the configured run list against the registered tests

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// testrig - run the configured test suite and report the results
#[derive(Parser, Debug)]
#[command(name = "testrig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Write the full report to this new .txt file instead of the terminal
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Read the run list from this file instead of the embedded manifest
    #[arg(long)]
    pub run_list: Option<PathBuf>,

    /// Print a JSON session summary after the report
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the configured run list against the registered tests
    List,
}

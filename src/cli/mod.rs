//! CLI module for testrig - command-line interface and subcommands.
//!
//! Provides the main entry point: a default run action with report and
//! run-list overrides, plus a `list` subcommand for inspecting the
//! configured and registered test sets.

pub mod commands;

pub use commands::Cli;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;

use testrig::config;
use testrig::registry::TestRegistry;
use testrig::report::SessionStatus;
use testrig::session::{self, SessionOptions};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("testrig")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("testrig.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn status_label(status: SessionStatus) -> ColoredString {
    match status {
        SessionStatus::AllPassed => status.label().green(),
        SessionStatus::Inconclusive => status.label().yellow(),
        SessionStatus::ListMismatch | SessionStatus::NothingRan | SessionStatus::Failure => {
            status.label().red()
        }
    }
}

fn handle_list_command(run_list_path: Option<&PathBuf>) -> Result<()> {
    let run_list = config::load_run_list(run_list_path.map(PathBuf::as_path))?;
    let registry = TestRegistry::discover();
    let listed = run_list.unique_names();

    println!("{}", "Configured run list (execution order):".cyan());
    for name in run_list.entries() {
        let marker = if registry.contains(name) {
            "registered".green()
        } else {
            "not registered".red()
        };
        println!("  {}  [{}]", name, marker);
    }

    println!("{}", "Registered tests:".cyan());
    for name in registry.names() {
        let marker = if listed.contains(name) {
            "listed".green()
        } else {
            "not listed".red()
        };
        println!("  {}  [{}]", name, marker);
    }
    Ok(())
}

fn run_session(cli: &Cli) -> i32 {
    let options = SessionOptions {
        report_path: cli.report.clone(),
        run_list_path: cli.run_list.clone(),
    };

    match session::run(&options) {
        Ok(report) => {
            info!(
                "session finished: {} (exit code {})",
                report.status(),
                report.exit_code()
            );

            if cli.json {
                match serde_json::to_string_pretty(&report.summary()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{} {}", "Error:".red(), e);
                        return 3;
                    }
                }
            }

            if cli.report.is_some() {
                // The full report went to the file; leave one status line
                // on the terminal.
                println!("{} {}", "Session status:".cyan(), status_label(report.status()));
            }

            report.exit_code()
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            3
        }
    }
}

fn main() {
    // A logging failure should not keep the tests from running.
    if let Err(e) = setup_logging() {
        eprintln!("{} {:#}", "Warning:".yellow(), e);
    }

    let cli = Cli::parse();

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let exit_code = match &cli.command {
        Some(Commands::List) => match handle_list_command(cli.run_list.as_ref()) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red(), e);
                3
            }
        },
        None => run_session(&cli),
    };

    std::process::exit(exit_code);
}

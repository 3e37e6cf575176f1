//! progen - project generator
//!
//! CLI entry point: load a template, collect parameters, render.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use progen::cli::{Cli, Command};
use progen::commands;
use progen::config::Config;
use progen::params::{LinePrompter, Prompter, ReadlinePrompter};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("progen")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("progen.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::List { template_dir }) => {
            let templates = commands::list(&config, template_dir.as_deref())?;
            if templates.is_empty() {
                println!("No templates found");
            } else {
                for template in templates {
                    println!("{}", template);
                }
            }
        }
        Some(Command::GenerateTemplate { name }) => {
            commands::generate_template(&name)?;
            eprintln!("{} generate-template is not implemented yet", "!".yellow());
        }
        Some(Command::GetTemplate { name, url }) => {
            commands::get_template(&name, url.as_deref())?;
            eprintln!("{} get-template is not implemented yet", "!".yellow());
        }
        None => {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            let mut prompter: Box<dyn Prompter> = if io::stdin().is_terminal() {
                Box::new(ReadlinePrompter::new()?)
            } else {
                Box::new(LinePrompter::new(io::stdin().lock(), io::stderr()))
            };
            let outcome = commands::generate(&config, &cli.generate, &cwd, prompter.as_mut())?;
            println!(
                "{} Rendered {} files into {}",
                "✓".green(),
                outcome.files.len(),
                outcome.dest.display().to_string().cyan()
            );
        }
    }

    Ok(())
}

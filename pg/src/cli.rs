//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// progen - project generator
#[derive(Parser, Debug)]
#[command(
    name = "progen",
    version,
    about = "Bootstrap a project from a template directory",
    subcommand_negates_reqs = true
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Arguments for rendering a template (the default action)
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Template category, e.g. `latex`
    #[arg(value_name = "TYPE", required = true)]
    pub template_type: Option<String>,

    /// Template name within the category, e.g. `letter`
    #[arg(value_name = "NAME", required = true)]
    pub name: Option<String>,

    /// Base dir where to search for templates
    #[arg(long, value_name = "PATH")]
    pub template_dir: Option<PathBuf>,

    /// Destination path where to bootstrap the template (default: ./NAME)
    #[arg(long, value_name = "PATH")]
    pub dest: Option<PathBuf>,

    /// YAML file with pre-answered parameter values
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Set a parameter value; dotted keys address group members
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available templates
    List {
        /// Base dir where to search for templates
        #[arg(long, value_name = "PATH")]
        template_dir: Option<PathBuf>,
    },

    /// Create a new template skeleton (not implemented yet)
    GenerateTemplate {
        /// Name of the new template
        name: String,
    },

    /// Fetch a template from a remote location (not implemented yet)
    GetTemplate {
        /// Name of the template to fetch
        name: String,

        /// URL to fetch the template from
        #[arg(long)]
        url: Option<String>,
    },
}

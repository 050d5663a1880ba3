//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Agentation - annotate live UI and turn the markers into agent-ready reports
#[derive(Parser, Debug)]
#[command(name = "agentation")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scripted annotation session against the built-in fixture page
    Demo {
        /// Output tier for the printed report
        #[arg(short, long)]
        detail: Option<String>,

        /// Save the recorded session as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a report from a saved session
    Report {
        /// Input session file
        #[arg(short, long)]
        input: PathBuf,

        /// Output tier (overrides config)
        #[arg(short, long)]
        detail: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query a remote annotation collector
    Collector {
        /// Collector base URL
        #[arg(short, long)]
        url: String,

        #[command(subcommand)]
        action: CollectorAction,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Collector subcommands
#[derive(Subcommand, Debug)]
pub enum CollectorAction {
    /// Check collector reachability
    Status,

    /// Fetch annotations for a collector session
    Annotations {
        /// Collector session id
        #[arg(short, long)]
        session: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Validate the configuration file
    Validate,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

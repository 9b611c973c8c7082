//! Command-line argument parsing for Loanwise
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Loanwise - Train and serve a loan approval classifier
#[derive(Parser, Debug)]
#[command(name = "loanwise")]
#[command(version)]
#[command(about = "Train a loan approval classifier from CSV and serve predictions over HTTP", long_about = None)]
pub struct Args {
    /// Path to the training dataset (CSV)
    #[arg(short, long, env = "DATASET_PATH")]
    pub dataset: Option<PathBuf>,

    /// Bind host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Train the initial model and start the HTTP service
    Serve,

    /// Run the training pipeline once and report the model metadata
    Train,

    /// Train, then predict a single applicant given as JSON
    Predict {
        /// Applicant record, e.g. '{"Age":35,"Annual_Income":50000,...}'
        #[arg(value_name = "APPLICANT_JSON")]
        applicant: String,
    },

    /// Display the effective configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Resolved subcommand (`serve` when none was given)
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }

    /// Dataset path, required by every command except `config`
    pub fn require_dataset(&self) -> Result<PathBuf, String> {
        self.dataset.clone().ok_or_else(|| {
            "The DATASET_PATH environment variable is not set (or pass --dataset).".to_string()
        })
    }
}

impl Verbosity {
    /// Tracing filter directive for this verbosity
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::VeryVerbose => "trace",
        }
    }
}

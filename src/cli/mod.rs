//! CLI module for Loanwise
//!
//! Handles command-line argument parsing and configuration management.

pub mod config;
pub mod args;

pub use config::{Config, ServerConfig, TelemetryConfig, TrainingConfig};
pub use args::{Args, Commands, Verbosity};

//! Configuration management for Loanwise
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.loanwise/config.toml (or `--config <path>`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::errors::{ServiceError, Result};

/// Complete configuration for Loanwise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// HTTP bind configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Training pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of rows set aside as the held-out partition
    pub test_size: f64,
    /// Seed for the deterministic shuffle
    pub seed: u64,
    /// Optimizer iteration cap for the logistic regression
    pub max_iterations: u64,
    /// L2 penalty strength
    pub alpha: f64,
    /// Standardize features before fitting
    pub standardize: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default `tracing` filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.01,
            seed: 42,
            max_iterations: 100,
            alpha: 1.0,
            standardize: true,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".loanwise").join("config.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(self.training.test_size > 0.0 && self.training.test_size < 1.0) {
            return Err(ServiceError::ConfigError(format!(
                "test_size must be between 0.0 and 1.0 (exclusive), got {}",
                self.training.test_size
            )));
        }

        if self.training.max_iterations == 0 {
            return Err(ServiceError::ConfigError(
                "max_iterations must be greater than 0".to_string()
            ));
        }

        if !self.training.alpha.is_finite() || self.training.alpha < 0.0 {
            return Err(ServiceError::ConfigError(format!(
                "alpha must be a finite, non-negative number, got {}",
                self.training.alpha
            )));
        }

        if self.server.port == 0 {
            return Err(ServiceError::ConfigError(
                "port must be greater than 0".to_string()
            ));
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

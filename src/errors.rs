//! Error types for Loanwise
//!
//! One taxonomy shared by the training pipeline, the model registry and the
//! HTTP surface. Handlers return these directly; `IntoResponse` turns them
//! into structured JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the loan approval service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Dataset could not be read or contains malformed values
    #[error("Dataset error: {0}")]
    DatasetError(String),

    /// Dataset columns do not match the expected shape
    #[error("Schema mismatch: {0}")]
    SchemaError(String),

    /// Dataset contained a header but no rows
    #[error("Dataset at {path} contains no rows")]
    EmptyDataset { path: String },

    /// Classifier fitting failed
    #[error("Training failed: {0}")]
    TrainingError(String),

    /// Prediction requested before any model was installed
    #[error("No trained model is available yet")]
    ModelNotReady,

    /// Request payload failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown background job
    #[error("Retrain job {0} not found")]
    JobNotFound(String),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("Service error: {0}")]
    Generic(String),
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Convert anyhow errors to ServiceError
impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        ServiceError::Generic(err.to_string())
    }
}

impl ServiceError {
    /// Short machine-readable kind used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::ConfigError(_) => "config",
            ServiceError::DatasetError(_) | ServiceError::CsvError(_) => "dataset",
            ServiceError::SchemaError(_) => "schema",
            ServiceError::EmptyDataset { .. } => "empty_dataset",
            ServiceError::TrainingError(_) => "training",
            ServiceError::ModelNotReady => "model_not_ready",
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::JobNotFound(_) => "job_not_found",
            ServiceError::SerializationError(_) => "serialization",
            ServiceError::IoError(_) => "io",
            ServiceError::Generic(_) => "internal",
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::ModelNotReady => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::JobNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.kind(),
            "detail": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

//! Type definitions module
//!
//! Request and response payloads plus the feature schema shared by
//! training and prediction.

pub mod applicant;
pub mod messages;

// Re-export commonly used types
pub use applicant::{LoanApplication, FEATURE_COLUMNS, FEATURE_COUNT, LABEL_COLUMN};
pub use messages::{HealthResponse, PredictionResponse, RetrainResponse, RETRAIN_SUCCESS_MESSAGE};

//! Response payloads for the HTTP surface

use serde::{Deserialize, Serialize};

/// Message returned by every successful retrain
pub const RETRAIN_SUCCESS_MESSAGE: &str = "Model retrained successfully";

/// `GET /health` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// `POST /predict` body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "Loan_Approval_Prediction")]
    pub loan_approval_prediction: u8,
}

/// `POST /retrain` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrainResponse {
    pub message: String,
}

impl RetrainResponse {
    pub fn success() -> Self {
        Self {
            message: RETRAIN_SUCCESS_MESSAGE.to_string(),
        }
    }
}

//! Type definitions for trained model versions
//!
//! A `ModelVersion` is immutable once built: retraining produces a new one
//! and the registry swaps the reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::classifier::LoanModel;
use crate::types::FEATURE_COLUMNS;

/// Output of one training pipeline run, before it is installed
#[derive(Debug)]
pub struct TrainedModel {
    pub model: LoanModel,
    pub training_rows: usize,
    pub held_out_rows: usize,
    pub duration_ms: u64,
}

/// An installed, immutable model
#[derive(Debug)]
pub struct ModelVersion {
    /// Monotonic version number, starting at 1
    pub version: u64,
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub training_rows: usize,
    /// Size of the held-out partition (computed, never evaluated)
    pub held_out_rows: usize,
    pub duration_ms: u64,
    pub model: LoanModel,
}

impl ModelVersion {
    /// Public metadata for this version
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            version: self.version,
            id: self.id,
            trained_at: self.trained_at,
            training_rows: self.training_rows,
            held_out_rows: self.held_out_rows,
            duration_ms: self.duration_ms,
            standardized: self.model.is_standardized(),
            features: FEATURE_COLUMNS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Metadata about the active model, returned by `GET /model`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub version: u64,
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub training_rows: usize,
    pub held_out_rows: usize,
    pub duration_ms: u64,
    pub standardized: bool,
    pub features: Vec<String>,
}

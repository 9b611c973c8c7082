//! Trained model management
//!
//! - `classifier`: the fitted logistic regression and its feature transform
//! - `types`: model versions and their public metadata
//! - `registry`: the holder of the active version shared by all handlers

pub mod classifier;
pub mod registry;
pub mod types;

// Re-export key types for convenience
pub use classifier::{LoanModel, Standardizer};
pub use registry::ModelRegistry;
pub use types::{ModelInfo, ModelVersion, TrainedModel};

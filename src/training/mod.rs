//! Training pipeline
//!
//! - `split`: deterministic train / held-out partitioning
//! - `trainer`: fits the classifier and runs the full load-to-model pipeline

pub mod split;
pub mod trainer;

pub use split::{train_test_split, Split};
pub use trainer::{run_pipeline, train};

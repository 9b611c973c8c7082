//! Dataset loading and preprocessing
//!
//! - `loader`: reads the CSV at the configured path into a `RawTable`
//! - `preprocess`: imputes, drops the index column and splits features from labels

pub mod loader;
pub mod preprocess;

pub use loader::{load_dataset, RawTable};
pub use preprocess::{preprocess, TrainingSet, INDEX_COLUMN_NAMES};

//! Training pipeline: load -> preprocess -> split -> fit
//!
//! Everything here is blocking CPU and file work. Async callers run it on
//! the blocking pool (see `server::handlers` and `jobs`).

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::cli::TrainingConfig;
use crate::dataset::{load_dataset, preprocess, TrainingSet};
use crate::errors::Result;
use crate::models::{LoanModel, TrainedModel};
use crate::training::split::train_test_split;

/// Split a prepared training set and fit the classifier on the training partition.
///
/// The held-out partition is only counted.
pub fn train(set: &TrainingSet, settings: &TrainingConfig) -> Result<TrainedModel> {
    let started = Instant::now();
    let split = train_test_split(set, settings.test_size, settings.seed)?;

    debug!(
        train_rows = split.train.len(),
        held_out_rows = split.held_out.len(),
        seed = settings.seed,
        "Dataset split"
    );

    let model = LoanModel::fit(&split.train, settings)?;

    Ok(TrainedModel {
        model,
        training_rows: split.train.len(),
        held_out_rows: split.held_out.len(),
        duration_ms: started.elapsed().as_millis() as u64,
    })
}

/// Run the full pipeline against the dataset at `path`.
pub fn run_pipeline(path: &Path, settings: &TrainingConfig) -> Result<TrainedModel> {
    let started = Instant::now();
    info!(dataset = %path.display(), "Training started");

    let table = load_dataset(path)?;
    let set = preprocess(table)?;
    let mut trained = train(&set, settings)?;
    trained.duration_ms = started.elapsed().as_millis() as u64;

    info!(
        training_rows = trained.training_rows,
        held_out_rows = trained.held_out_rows,
        duration_ms = trained.duration_ms,
        "Training finished"
    );
    Ok(trained)
}

//! Deterministic train / held-out split

use ndarray::Axis;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::TrainingSet;
use crate::errors::{Result, ServiceError};

/// Training partition plus the rows set aside from it
#[derive(Debug, Clone)]
pub struct Split {
    pub train: TrainingSet,
    pub held_out: TrainingSet,
}

/// Number of held-out rows for `n` samples: `ceil(n * test_size)`, leaving
/// at least one row on each side.
pub fn held_out_count(n: usize, test_size: f64) -> usize {
    let raw = (n as f64 * test_size).ceil() as usize;
    raw.clamp(1, n.saturating_sub(1).max(1))
}

/// Shuffle row indices with a seeded RNG and cut off the held-out partition.
///
/// The same `(set, test_size, seed)` always yields the same partitions.
pub fn train_test_split(set: &TrainingSet, test_size: f64, seed: u64) -> Result<Split> {
    let n = set.len();
    if n < 2 {
        return Err(ServiceError::TrainingError(format!(
            "need at least 2 rows to split, got {}",
            n
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = held_out_count(n, test_size);
    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(Split {
        train: select(set, train_idx),
        held_out: select(set, test_idx),
    })
}

fn select(set: &TrainingSet, rows: &[usize]) -> TrainingSet {
    TrainingSet {
        features: set.features.select(Axis(0), rows),
        labels: set.labels.select(Axis(0), rows),
    }
}

//! Fitted loan approval classifier
//!
//! Wraps a binary `linfa-logistic` model together with the optional feature
//! standardizer fitted on the same training partition, so that prediction
//! always applies the training-time transform.

use std::fmt;

use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2, Axis};

use crate::cli::TrainingConfig;
use crate::dataset::TrainingSet;
use crate::errors::{Result, ServiceError};
use crate::types::FEATURE_COUNT;

/// Column-wise z-score transform
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl Standardizer {
    /// Fit on a feature matrix. Constant columns keep a scale of 1.
    pub fn fit(features: &Array2<f64>) -> Result<Self> {
        let mean = features
            .mean_axis(Axis(0))
            .ok_or_else(|| ServiceError::TrainingError("cannot standardize zero rows".to_string()))?;
        let scale = features
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });
        Ok(Self { mean, scale })
    }

    pub fn transform(&self, features: &Array2<f64>) -> Array2<f64> {
        (features - &self.mean) / &self.scale
    }
}

/// Trained classifier ready for prediction
pub struct LoanModel {
    scaler: Option<Standardizer>,
    classifier: FittedLogisticRegression<f64, usize>,
}

impl LoanModel {
    /// Fit a binary logistic regression on the training partition.
    pub fn fit(train: &TrainingSet, settings: &TrainingConfig) -> Result<Self> {
        if train.features.ncols() != FEATURE_COUNT {
            return Err(ServiceError::SchemaError(format!(
                "expected {} feature columns, got {}",
                FEATURE_COUNT,
                train.features.ncols()
            )));
        }

        let scaler = if settings.standardize {
            Some(Standardizer::fit(&train.features)?)
        } else {
            None
        };

        let records = match &scaler {
            Some(s) => s.transform(&train.features),
            None => train.features.clone(),
        };

        let dataset = Dataset::new(records, train.labels.clone());
        let classifier = LogisticRegression::default()
            .alpha(settings.alpha)
            .max_iterations(settings.max_iterations)
            .fit(&dataset)
            .map_err(|e| ServiceError::TrainingError(e.to_string()))?;

        Ok(Self { scaler, classifier })
    }

    fn prepare(&self, features: &Array2<f64>) -> Array2<f64> {
        match &self.scaler {
            Some(s) => s.transform(features),
            None => features.clone(),
        }
    }

    /// Predicted labels for every row of `features`
    pub fn predict_batch(&self, features: &Array2<f64>) -> Result<Array1<usize>> {
        if features.ncols() != FEATURE_COUNT {
            return Err(ServiceError::SchemaError(format!(
                "expected {} feature columns, got {}",
                FEATURE_COUNT,
                features.ncols()
            )));
        }
        Ok(self.classifier.predict(&self.prepare(features)))
    }

    /// Predict a single applicant row given in `FEATURE_COLUMNS` order
    pub fn predict_one(&self, features: &[f64; FEATURE_COUNT]) -> Result<u8> {
        let row = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| ServiceError::Generic(e.to_string()))?;
        let labels = self.predict_batch(&row)?;
        Ok(if labels[0] == 1 { 1 } else { 0 })
    }

    /// Probability of approval (label 1) for a single applicant row
    pub fn approval_probability(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64> {
        let row = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| ServiceError::Generic(e.to_string()))?;
        // linfa reports P(positive class), where positive is the first label it saw
        let p = self.classifier.predict_probabilities(&self.prepare(&row))[0];
        Ok(if self.classifier.labels().pos.class == 1 { p } else { 1.0 - p })
    }

    pub fn is_standardized(&self) -> bool {
        self.scaler.is_some()
    }
}

impl fmt::Debug for LoanModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoanModel")
            .field("standardized", &self.scaler.is_some())
            .field("weights", &self.classifier.params().len())
            .finish()
    }
}

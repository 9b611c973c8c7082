//! Shared application state
//!
//! Handed to every handler through axum's `State` extractor.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::cli::TrainingConfig;
use crate::errors::{Result, ServiceError};
use crate::jobs::JobTracker;
use crate::models::{ModelRegistry, ModelVersion};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use crate::training::run_pipeline;

/// Application context shared by all requests
pub struct AppState {
    pub dataset_path: PathBuf,
    pub training: TrainingConfig,
    pub registry: ModelRegistry,
    pub telemetry: TelemetryCollector,
    pub jobs: JobTracker,
    /// Serializes training runs; predictions never take it
    training_lock: Mutex<()>,
}

impl AppState {
    pub fn new(dataset_path: PathBuf, training: TrainingConfig) -> Self {
        Self {
            dataset_path,
            training,
            registry: ModelRegistry::new(),
            telemetry: TelemetryCollector::new(),
            jobs: JobTracker::new(),
            training_lock: Mutex::new(()),
        }
    }

    /// Run the training pipeline on the blocking pool and install the result.
    ///
    /// On failure the previously active model stays installed. The run is a
    /// detached task: dropping the returned future does not abandon it, and
    /// its model is still installed.
    pub async fn retrain(self: &Arc<Self>) -> Result<Arc<ModelVersion>> {
        let state = Arc::clone(self);
        tokio::spawn(async move { state.retrain_serialized().await })
            .await
            .map_err(|e| ServiceError::TrainingError(format!("training task aborted: {}", e)))?
    }

    async fn retrain_serialized(&self) -> Result<Arc<ModelVersion>> {
        let _guard = self.training_lock.lock().await;

        let path = self.dataset_path.clone();
        let settings = self.training.clone();
        let outcome = tokio::task::spawn_blocking(move || run_pipeline(&path, &settings))
            .await
            .map_err(|e| ServiceError::TrainingError(format!("training task aborted: {}", e)))
            .and_then(|result| result);

        match outcome {
            Ok(trained) => {
                let version = self.registry.install(trained).await;
                info!(version = version.version, id = %version.id, "Model installed");
                self.telemetry.record(TelemetryEvent::ModelTrained {
                    version: version.version,
                    duration_ms: version.duration_ms,
                });
                Ok(version)
            }
            Err(e) => {
                error!(error = %e, "Retrain failed");
                self.telemetry.record(TelemetryEvent::TrainingFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

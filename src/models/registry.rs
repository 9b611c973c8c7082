//! Model registry holding the active classifier
//!
//! Replaces a process-global model slot with an explicit object owned by
//! the application state. Readers clone the `Arc` under a short read lock
//! and predict without holding it; installs swap the whole version under
//! the write lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{Result, ServiceError};
use crate::models::types::{ModelInfo, ModelVersion, TrainedModel};

/// Holder of the currently active model version
pub struct ModelRegistry {
    current: RwLock<Option<Arc<ModelVersion>>>,
    next_version: AtomicU64,
}

impl ModelRegistry {
    /// Create an empty registry (no model installed)
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            next_version: AtomicU64::new(1),
        }
    }

    /// Active model version, or `ModelNotReady` before the first install
    pub async fn current(&self) -> Result<Arc<ModelVersion>> {
        self.current
            .read()
            .await
            .clone()
            .ok_or(ServiceError::ModelNotReady)
    }

    /// Whether a model has been installed
    pub async fn is_ready(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Metadata of the active model
    pub async fn info(&self) -> Result<ModelInfo> {
        Ok(self.current().await?.info())
    }

    /// Wrap a freshly trained model in a new version and make it active
    pub async fn install(&self, trained: TrainedModel) -> Arc<ModelVersion> {
        let version = Arc::new(ModelVersion {
            version: self.next_version.fetch_add(1, Ordering::SeqCst),
            id: Uuid::new_v4(),
            trained_at: Utc::now(),
            training_rows: trained.training_rows,
            held_out_rows: trained.held_out_rows,
            duration_ms: trained.duration_ms,
            model: trained.model,
        });

        let mut current = self.current.write().await;
        *current = Some(Arc::clone(&version));
        version
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Telemetry for Loanwise
//!
//! Counts training runs and predictions. A snapshot is served at `GET /stats`;
//! individual events are also emitted through `tracing`.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::debug;

/// Telemetry event types
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    ModelTrained { version: u64, duration_ms: u64 },
    TrainingFailed { reason: String },
    PredictionServed { label: u8 },
    PredictionFailed { reason: String },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetryStats {
    pub trainings_completed: usize,
    pub trainings_failed: usize,
    pub predictions_served: usize,
    pub predictions_failed: usize,
    pub approvals_predicted: usize,
    pub last_training_ms: Option<u64>,
    pub model_version: Option<u64>,
}

/// Snapshot returned over HTTP
#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySnapshot {
    pub uptime_secs: u64,
    #[serde(flatten)]
    pub stats: TelemetryStats,
    pub approval_rate: f64,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        let mut stats = lock(&self.stats);
        match event {
            TelemetryEvent::ModelTrained { version, duration_ms } => {
                stats.trainings_completed += 1;
                stats.last_training_ms = Some(duration_ms);
                stats.model_version = Some(version);
            }
            TelemetryEvent::TrainingFailed { reason } => {
                stats.trainings_failed += 1;
                debug!(reason = %reason, "Training failure recorded");
            }
            TelemetryEvent::PredictionServed { label } => {
                stats.predictions_served += 1;
                if label == 1 {
                    stats.approvals_predicted += 1;
                }
            }
            TelemetryEvent::PredictionFailed { reason } => {
                stats.predictions_failed += 1;
                debug!(reason = %reason, "Prediction failure recorded");
            }
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        lock(&self.stats).clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Share of served predictions that were approvals
    pub fn approval_rate(&self) -> f64 {
        let stats = lock(&self.stats);
        if stats.predictions_served == 0 {
            0.0
        } else {
            stats.approvals_predicted as f64 / stats.predictions_served as f64
        }
    }

    /// Snapshot for `GET /stats`
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            uptime_secs: self.elapsed().as_secs(),
            stats: self.get_stats(),
            approval_rate: self.approval_rate(),
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

//! Background retrain jobs
//!
//! `POST /retrain/background` enqueues a retrain and returns at once; the
//! caller polls `GET /retrain/jobs/:id` for the outcome. At most one job is
//! pending at a time: while a job is queued or running, further submissions
//! get that job back.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{Result, ServiceError};
use crate::server::AppState;

/// Finished jobs kept for polling; older ones are evicted first
pub const MAX_FINISHED_JOBS: usize = 32;

/// Lifecycle of a retrain job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// Record of one retrain job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrainJob {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Installed model version on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// In-memory table of submitted jobs
pub struct JobTracker {
    jobs: RwLock<HashMap<Uuid, RetrainJob>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Register a queued job, or return the one still pending.
    ///
    /// The flag is true when a new job was created.
    pub async fn submit(&self) -> (RetrainJob, bool) {
        let mut jobs = self.jobs.write().await;
        if let Some(pending) = jobs.values().find(|job| !job.status.is_finished()) {
            return (pending.clone(), false);
        }

        evict_finished(&mut jobs, MAX_FINISHED_JOBS.saturating_sub(1));

        let job = RetrainJob {
            job_id: Uuid::new_v4(),
            status: JobStatus::Queued,
            submitted_at: Utc::now(),
            finished_at: None,
            model_version: None,
            error: None,
        };
        jobs.insert(job.job_id, job.clone());
        (job, true)
    }

    pub async fn get(&self, id: &Uuid) -> Result<RetrainJob> {
        self.jobs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::JobNotFound(id.to_string()))
    }

    /// Look up a job by its string id as it arrives in a URL
    pub async fn get_by_str(&self, id: &str) -> Result<RetrainJob> {
        let parsed = Uuid::parse_str(id).map_err(|_| ServiceError::JobNotFound(id.to_string()))?;
        self.get(&parsed).await
    }

    pub async fn mark_running(&self, id: &Uuid) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Running;
        }
    }

    pub async fn mark_succeeded(&self, id: &Uuid, model_version: u64) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Succeeded;
            job.model_version = Some(model_version);
            job.finished_at = Some(Utc::now());
        }
    }

    pub async fn mark_failed(&self, id: &Uuid, error: String) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Failed;
            job.error = Some(error);
            job.finished_at = Some(Utc::now());
        }
    }
}

/// Drop the oldest finished jobs until at most `keep` remain.
fn evict_finished(jobs: &mut HashMap<Uuid, RetrainJob>, keep: usize) {
    let mut finished: Vec<(DateTime<Utc>, Uuid)> = jobs
        .values()
        .filter(|job| job.status.is_finished())
        .map(|job| (job.finished_at.unwrap_or(job.submitted_at), job.job_id))
        .collect();
    if finished.len() <= keep {
        return;
    }
    finished.sort();
    for (_, id) in finished.iter().take(finished.len() - keep) {
        jobs.remove(id);
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue a retrain on a background task and return its job record.
///
/// If a retrain job is already pending, no new run is started.
pub async fn spawn_retrain(state: Arc<AppState>) -> RetrainJob {
    let (job, created) = state.jobs.submit().await;
    if !created {
        debug!(job_id = %job.job_id, "Retrain already pending");
        return job;
    }
    let id = job.job_id;

    tokio::spawn(async move {
        state.jobs.mark_running(&id).await;
        match state.retrain().await {
            Ok(version) => state.jobs.mark_succeeded(&id, version.version).await,
            Err(e) => state.jobs.mark_failed(&id, e.to_string()).await,
        }
    });

    job
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_job_lifecycle() {
        let tracker = JobTracker::new();
        let (job, created) = tracker.submit().await;
        assert!(created);
        assert_eq!(job.status, JobStatus::Queued);

        tracker.mark_running(&job.job_id).await;
        assert_eq!(tracker.get(&job.job_id).await.unwrap().status, JobStatus::Running);

        tracker.mark_succeeded(&job.job_id, 3).await;
        let done = tracker.get(&job.job_id).await.unwrap();
        assert!(done.status.is_finished());
        assert_eq!(done.model_version, Some(3));
        assert!(done.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_job_keeps_error() {
        let tracker = JobTracker::new();
        let (job, _) = tracker.submit().await;
        tracker.mark_failed(&job.job_id, "dataset missing".to_string()).await;

        let failed = tracker.get_by_str(&job.job_id.to_string()).await.unwrap();
        assert_eq!(failed.status, JobStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("dataset missing"));
    }

    #[tokio::test]
    async fn test_pending_job_is_reused() {
        let tracker = JobTracker::new();
        let (first, _) = tracker.submit().await;
        let (again, created) = tracker.submit().await;
        assert!(!created);
        assert_eq!(again.job_id, first.job_id);

        tracker.mark_running(&first.job_id).await;
        let (still, created) = tracker.submit().await;
        assert!(!created);
        assert_eq!(still.job_id, first.job_id);

        tracker.mark_succeeded(&first.job_id, 1).await;
        let (next, created) = tracker.submit().await;
        assert!(created);
        assert_ne!(next.job_id, first.job_id);
    }

    #[tokio::test]
    async fn test_finished_jobs_are_capped() {
        let tracker = JobTracker::new();
        let (oldest, _) = tracker.submit().await;
        tracker.mark_succeeded(&oldest.job_id, 1).await;

        let mut last = oldest.job_id;
        for version in 2..=(MAX_FINISHED_JOBS as u64 + 5) {
            let (job, created) = tracker.submit().await;
            assert!(created);
            tracker.mark_failed(&job.job_id, format!("run {}", version)).await;
            last = job.job_id;
        }

        assert_eq!(tracker.jobs.read().await.len(), MAX_FINISHED_JOBS);
        assert!(tracker.get(&last).await.is_ok());
        assert!(matches!(
            tracker.get(&oldest.job_id).await,
            Err(ServiceError::JobNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let tracker = JobTracker::new();
        assert!(matches!(
            tracker.get_by_str("not-a-uuid").await,
            Err(ServiceError::JobNotFound(_))
        ));
        assert!(matches!(
            tracker.get(&Uuid::new_v4()).await,
            Err(ServiceError::JobNotFound(_))
        ));
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&JobStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }
}

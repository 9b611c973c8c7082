//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::errors::{Result, ServiceError};
use crate::jobs::{spawn_retrain, RetrainJob};
use crate::models::ModelInfo;
use crate::server::AppState;
use crate::telemetry::{TelemetryEvent, TelemetrySnapshot};
use crate::types::{HealthResponse, LoanApplication, PredictionResponse, RetrainResponse};

/// `GET /health`: always healthy, independent of model state
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// `POST /predict`
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoanApplication>, JsonRejection>,
) -> Result<Json<PredictionResponse>> {
    let result = predict_inner(&state, payload).await;

    match &result {
        Ok(label) => state
            .telemetry
            .record(TelemetryEvent::PredictionServed { label: *label }),
        Err(e) => state.telemetry.record(TelemetryEvent::PredictionFailed {
            reason: e.to_string(),
        }),
    }

    result.map(|label| {
        Json(PredictionResponse {
            loan_approval_prediction: label,
        })
    })
}

async fn predict_inner(
    state: &AppState,
    payload: std::result::Result<Json<LoanApplication>, JsonRejection>,
) -> Result<u8> {
    let Json(applicant) = payload.map_err(|rejection| ServiceError::InvalidInput(rejection.body_text()))?;
    applicant.validate()?;

    let current = state.registry.current().await?;
    let label = current.model.predict_one(&applicant.to_features())?;

    debug!(version = current.version, label, "Prediction served");
    Ok(label)
}

/// `POST /retrain`: retrain and swap before answering
pub async fn retrain(State(state): State<Arc<AppState>>) -> Result<Json<RetrainResponse>> {
    state.retrain().await?;
    Ok(Json(RetrainResponse::success()))
}

/// `POST /retrain/background`: queue a retrain and answer immediately
pub async fn retrain_background(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RetrainJob>) {
    let job = spawn_retrain(state).await;
    (StatusCode::ACCEPTED, Json(job))
}

/// `GET /retrain/jobs/:id`
pub async fn retrain_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RetrainJob>> {
    Ok(Json(state.jobs.get_by_str(&id).await?))
}

/// `GET /model`
pub async fn model_info(State(state): State<Arc<AppState>>) -> Result<Json<ModelInfo>> {
    Ok(Json(state.registry.info().await?))
}

/// `GET /stats`
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<TelemetrySnapshot> {
    Json(state.telemetry.snapshot())
}

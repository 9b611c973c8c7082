//! HTTP integration tests for the loan approval service
//!
//! Drives the axum router in-process against the CSV fixture; no socket is bound.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use loanwise::cli::TrainingConfig;
use loanwise::server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/loan_data.csv")
}

fn untrained_state(path: PathBuf) -> Arc<AppState> {
    Arc::new(AppState::new(path, TrainingConfig::default()))
}

async fn trained_state() -> Arc<AppState> {
    let state = untrained_state(fixture());
    state.retrain().await.expect("fixture trains");
    state
}

fn applicant() -> Value {
    json!({
        "Age": 35,
        "Annual_Income": 50000,
        "Credit_Score": 700,
        "Loan_Amount": 10000,
        "Loan_Duration_Years": 5,
        "Number_of_Open_Accounts": 3,
        "Had_Past_Default": 0
    })
}

async fn send(state: &Arc<AppState>, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_without_model() {
    let state = untrained_state(fixture());
    let (status, body) = send(&state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_health_with_model() {
    let state = trained_state().await;
    let (status, body) = send(&state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_predict_before_training_fails() {
    let state = untrained_state(fixture());
    let (status, body) = send(&state, "POST", "/predict", Some(applicant())).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "model_not_ready");
    assert!(body.get("Loan_Approval_Prediction").is_none());
}

#[tokio::test]
async fn test_predict_after_training() {
    let state = trained_state().await;
    let (status, body) = send(&state, "POST", "/predict", Some(applicant())).await;

    assert_eq!(status, StatusCode::OK);
    let label = body["Loan_Approval_Prediction"].as_u64().unwrap();
    assert!(label == 0 || label == 1);
}

#[tokio::test]
async fn test_predict_missing_field_rejected() {
    let state = trained_state().await;
    let mut payload = applicant();
    payload.as_object_mut().unwrap().remove("Credit_Score");

    let (status, body) = send(&state, "POST", "/predict", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_predict_wrong_type_rejected() {
    let state = trained_state().await;
    let mut payload = applicant();
    payload["Age"] = json!("thirty five");

    let (status, _) = send(&state, "POST", "/predict", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_retrain_is_repeatable() {
    let state = untrained_state(fixture());

    let (status, first) = send(&state, "POST", "/retrain", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, json!({"message": "Model retrained successfully"}));
    let (_, before) = send(&state, "POST", "/predict", Some(applicant())).await;

    let (status, second) = send(&state, "POST", "/retrain", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    let (_, after) = send(&state, "POST", "/predict", Some(applicant())).await;

    assert_eq!(before, after);
    assert_eq!(state.registry.current().await.unwrap().version, 2);
}

#[tokio::test]
async fn test_failed_retrain_keeps_previous_model() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::copy(fixture(), file.path()).unwrap();

    let state = untrained_state(file.path().to_path_buf());
    state.retrain().await.unwrap();

    // drop the index column: preprocessing must now fail
    std::fs::write(file.path(), "Age,Loan_Approval\n35,1\n").unwrap();
    let (status, body) = send(&state, "POST", "/retrain", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "schema");

    let (status, _) = send(&state, "POST", "/predict", Some(applicant())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.registry.current().await.unwrap().version, 1);
}

#[tokio::test]
async fn test_model_info() {
    let state = untrained_state(fixture());
    let (status, _) = send(&state, "GET", "/model", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    state.retrain().await.unwrap();
    let (status, body) = send(&state, "GET", "/model", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 1);
    // 240 fixture rows: ceil(2.4) = 3 held out
    assert_eq!(body["held_out_rows"], 3);
    assert_eq!(body["training_rows"], 237);
    assert_eq!(body["features"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_background_retrain() {
    let state = untrained_state(fixture());
    let (status, job) = send(&state, "POST", "/retrain/background", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let id = job["job_id"].as_str().unwrap().to_string();

    let mut finished = Value::Null;
    for _ in 0..200 {
        let (status, body) = send(&state, "GET", &format!("/retrain/jobs/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        if body["status"] == "succeeded" || body["status"] == "failed" {
            finished = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(finished["status"], "succeeded");
    assert_eq!(finished["model_version"], 1);
    assert!(state.registry.is_ready().await);
}

#[tokio::test]
async fn test_background_retrain_not_queued_twice() {
    let state = untrained_state(fixture());
    let (status, first) = send(&state, "POST", "/retrain/background", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (status, second) = send(&state, "POST", "/retrain/background", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(first["job_id"], second["job_id"]);

    let id = first["job_id"].as_str().unwrap().to_string();
    for _ in 0..200 {
        let (_, body) = send(&state, "GET", &format!("/retrain/jobs/{}", id), None).await;
        if body["status"] == "succeeded" || body["status"] == "failed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // give any second run time to surface before counting
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(state.registry.current().await.unwrap().version, 1);
    assert_eq!(state.telemetry.get_stats().trainings_completed, 1);
}

#[tokio::test]
async fn test_abandoned_retrain_still_installs() {
    let state = untrained_state(fixture());

    // poll the retrain once so its run starts, then drop the caller
    tokio::select! {
        biased;
        _ = state.retrain() => panic!("retrain finished on first poll"),
        _ = std::future::ready(()) => {}
    }

    // runs are serialized, so this one trains after the abandoned one
    let version = state.retrain().await.unwrap();
    assert_eq!(version.version, 2);
    assert_eq!(state.telemetry.get_stats().trainings_completed, 2);
}

#[tokio::test]
async fn test_unknown_job_not_found() {
    let state = untrained_state(fixture());
    let (status, body) = send(&state, "GET", "/retrain/jobs/00000000-0000-0000-0000-000000000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "job_not_found");
}

#[tokio::test]
async fn test_stats_track_requests() {
    let state = trained_state().await;
    send(&state, "POST", "/predict", Some(applicant())).await;
    send(&state, "POST", "/predict", Some(json!({"Age": 1}))).await;

    let (status, body) = send(&state, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trainings_completed"], 1);
    assert_eq!(body["predictions_served"], 1);
    assert_eq!(body["predictions_failed"], 1);
}

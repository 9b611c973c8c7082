//! Loanwise - Loan approval classifier service
//!
//! Trains a logistic-regression loan-approval classifier from a CSV dataset
//! and serves predictions over HTTP.
//!
//! # Architecture
//!
//! - **dataset**: CSV loading, imputation, feature/label separation
//! - **training**: deterministic split + classifier fitting
//! - **models**: fitted model versions and the registry holding the active one
//! - **server**: axum routes for health, predict and retrain
//! - **jobs**: background retrains with pollable status

pub mod errors;
pub mod types;

pub use errors::{ServiceError, Result};

pub mod dataset;
pub mod training;
pub mod models;

pub mod jobs;
pub mod server;

pub mod cli;
pub mod telemetry;

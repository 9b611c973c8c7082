//! Applicant record and feature schema
//!
//! The same seven fields are used as a training row (minus the label) and as
//! a prediction payload. `FEATURE_COLUMNS` fixes the column order of the
//! feature matrix on both paths.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ServiceError};

/// Feature columns in matrix order (the dataset's on-disk order)
pub const FEATURE_COLUMNS: [&str; 7] = [
    "Age",
    "Annual_Income",
    "Credit_Score",
    "Loan_Amount",
    "Number_of_Open_Accounts",
    "Had_Past_Default",
    "Loan_Duration_Years",
];

/// Number of features the classifier is fitted on
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Target column name
pub const LABEL_COLUMN: &str = "Loan_Approval";

/// A loan applicant as submitted to `/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Annual_Income")]
    pub annual_income: f64,
    #[serde(rename = "Credit_Score")]
    pub credit_score: f64,
    #[serde(rename = "Loan_Amount")]
    pub loan_amount: f64,
    #[serde(rename = "Loan_Duration_Years")]
    pub loan_duration_years: i64,
    #[serde(rename = "Number_of_Open_Accounts")]
    pub number_of_open_accounts: f64,
    #[serde(rename = "Had_Past_Default")]
    pub had_past_default: i64,
}

impl LoanApplication {
    /// Reject values the classifier cannot consume
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("Age", self.age),
            ("Annual_Income", self.annual_income),
            ("Credit_Score", self.credit_score),
            ("Loan_Amount", self.loan_amount),
            ("Number_of_Open_Accounts", self.number_of_open_accounts),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ServiceError::InvalidInput(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        if !matches!(self.had_past_default, 0 | 1) {
            return Err(ServiceError::InvalidInput(format!(
                "Had_Past_Default must be 0 or 1, got {}",
                self.had_past_default
            )));
        }

        Ok(())
    }

    /// Feature vector in `FEATURE_COLUMNS` order
    pub fn to_features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.annual_income,
            self.credit_score,
            self.loan_amount,
            self.number_of_open_accounts,
            self.had_past_default as f64,
            self.loan_duration_years as f64,
        ]
    }
}

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid day context for {date}: {reason}")]
    Validation { date: NaiveDate, reason: String },

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlanError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PlanError::Validation { .. })
    }
}

pub type PlanResult<T> = Result<T, PlanError>;

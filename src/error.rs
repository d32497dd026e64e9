//! Error types for the housing simulator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown scenario '{name}'")]
    UnknownScenario { name: String },

    #[error("Invalid household {household_id}: {field} {reason}")]
    InvalidHousehold {
        household_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid run parameters: {reason}")]
    InvalidRun { reason: String },

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;

//! Household input record.
//!
//! Loaded from the population generator's JSON and validated once before any
//! trial runs.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

pub const MIN_CREDIT_SCORE: f64 = 550.0;
pub const MAX_CREDIT_SCORE: f64 = 850.0;

/// Household record supplied by the population generator. Read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub household_id: String,
    pub annual_income: f64,
    pub savings: f64,
    pub credit_score: f64,
    pub current_monthly_rent: f64,
    pub debt_to_income_ratio: f64,
    pub region: String,
}

impl Household {
    pub fn from_json(json: &str) -> SimResult<Self> {
        let household: Self = serde_json::from_str(json)?;
        household.validate()?;
        Ok(household)
    }

    /// Rejects non-finite or negative amounts and out-of-range credit scores
    /// before they can turn into NaN costs inside a trial.
    pub fn validate(&self) -> SimResult<()> {
        let amounts = [
            ("annual_income", self.annual_income),
            ("savings", self.savings),
            ("current_monthly_rent", self.current_monthly_rent),
            ("debt_to_income_ratio", self.debt_to_income_ratio),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(self.invalid(field, format!("must be finite, got {value}")));
            }
            if value < 0.0 {
                return Err(self.invalid(field, format!("must be non-negative, got {value}")));
            }
        }

        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&self.credit_score) {
            return Err(self.invalid(
                "credit_score",
                format!(
                    "must be within [{MIN_CREDIT_SCORE}, {MAX_CREDIT_SCORE}], got {}",
                    self.credit_score
                ),
            ));
        }

        Ok(())
    }

    fn invalid(&self, field: &'static str, reason: String) -> SimError {
        SimError::InvalidHousehold {
            household_id: self.household_id.clone(),
            field,
            reason,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_household() -> Household {
    Household {
        household_id: "HH-000001".to_string(),
        annual_income: 85_000.0,
        savings: 60_000.0,
        credit_score: 720.0,
        current_monthly_rent: 1_800.0,
        debt_to_income_ratio: 0.25,
        region: "Orlando".to_string(),
    }
}

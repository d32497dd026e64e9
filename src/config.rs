//! Simulator configuration.
//!
//! Set once at construction and immutable for the simulator's lifetime.
//! Deserialised from JSON with per-key defaults; unknown keys are ignored.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_INCOME_GROWTH: f64 = 0.04;
pub const DEFAULT_INSURANCE_INCREASE: f64 = 0.08;
pub const DEFAULT_AFFORDABILITY_THRESHOLD: f64 = 0.50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub random_seed: u64,
    pub income_growth: f64,      // Mean annual income change
    pub insurance_increase: f64, // Mode of the annual insurance increase
    pub affordability_threshold: f64,
    // Accepted but not consulted: trials always draw from the scenario catalog.
    pub appreciation_rate: Option<f64>,
    pub interest_rate: Option<f64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            random_seed: DEFAULT_SEED,
            income_growth: DEFAULT_INCOME_GROWTH,
            insurance_increase: DEFAULT_INSURANCE_INCREASE,
            affordability_threshold: DEFAULT_AFFORDABILITY_THRESHOLD,
            appreciation_rate: None,
            interest_rate: None,
        }
    }
}

impl SimulatorConfig {
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_income_growth(mut self, income_growth: f64) -> Self {
        self.income_growth = income_growth;
        self
    }

    pub fn with_insurance_increase(mut self, insurance_increase: f64) -> Self {
        self.insurance_increase = insurance_increase;
        self
    }

    pub fn with_affordability_threshold(mut self, threshold: f64) -> Self {
        self.affordability_threshold = threshold;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        let knobs = [
            ("income_growth", Some(self.income_growth)),
            ("insurance_increase", Some(self.insurance_increase)),
            ("affordability_threshold", Some(self.affordability_threshold)),
            ("appreciation_rate", self.appreciation_rate),
            ("interest_rate", self.interest_rate),
        ];
        for (field, value) in knobs {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(SimError::InvalidConfig {
                        field,
                        reason: format!("must be finite, got {value}"),
                    });
                }
            }
        }

        if self.affordability_threshold <= 0.0 || self.affordability_threshold > 1.0 {
            return Err(SimError::InvalidConfig {
                field: "affordability_threshold",
                reason: format!("must be within (0, 1], got {}", self.affordability_threshold),
            });
        }

        if self.appreciation_rate.is_some() || self.interest_rate.is_some() {
            warn!(
                "appreciation_rate/interest_rate overrides are set but trials draw from the scenario catalog"
            );
        }

        Ok(())
    }

    /// Insurance mode clamped into the support of Triangular(0.03, mode, 0.12).
    pub fn insurance_mode(&self) -> f64 {
        self.insurance_increase.clamp(0.03, 0.12)
    }
}

//! Housing Scenario Catalog
//!
//! Static economic parameters for each housing tier plus the per-region
//! multipliers applied to home price and hurricane insurance.
//!
//! ## Tiers
//! - Keep Renting (all purchase fields zero)
//! - Starter: $200k-$300k, 5% down (FHA)
//! - Standard: $300k-$500k, 10% down
//! - Premium: $500k-$800k, 20% down

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scenario {
    #[serde(rename = "Keep Renting")]
    Rent,
    #[serde(rename = "Buy Starter Home")]
    Starter,
    #[serde(rename = "Buy Standard Home")]
    Standard,
    #[serde(rename = "Buy Premium Home")]
    Premium,
}

impl Scenario {
    pub fn all() -> Vec<Self> {
        vec![Self::Rent, Self::Starter, Self::Standard, Self::Premium]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rent => "Keep Renting",
            Self::Starter => "Buy Starter Home",
            Self::Standard => "Buy Standard Home",
            Self::Premium => "Buy Premium Home",
        }
    }

    pub fn is_purchase(&self) -> bool {
        !matches!(self, Self::Rent)
    }

    pub fn parameters(&self) -> ScenarioParameters {
        match self {
            Self::Rent => ScenarioParameters::RENT,
            Self::Starter => ScenarioParameters {
                home_price_min: 200_000.0,
                home_price_max: 300_000.0,
                down_payment_pct: 0.05,
                interest_rate_mean: 0.065,
                interest_rate_std: 0.01,
                property_tax_rate: 0.009,
                hurricane_insurance_annual: 3_500.0,
                hoa_monthly: 150.0,
                maintenance_annual_pct: 0.015,
                appreciation_mean: 0.04,
                appreciation_std: 0.08,
                closing_costs_pct: 0.03,
            },
            Self::Standard => ScenarioParameters {
                home_price_min: 300_000.0,
                home_price_max: 500_000.0,
                down_payment_pct: 0.10,
                interest_rate_mean: 0.0625,
                interest_rate_std: 0.01,
                property_tax_rate: 0.009,
                hurricane_insurance_annual: 5_500.0,
                hoa_monthly: 250.0,
                maintenance_annual_pct: 0.015,
                appreciation_mean: 0.045,
                appreciation_std: 0.10,
                closing_costs_pct: 0.03,
            },
            Self::Premium => ScenarioParameters {
                home_price_min: 500_000.0,
                home_price_max: 800_000.0,
                down_payment_pct: 0.20,
                interest_rate_mean: 0.06,
                interest_rate_std: 0.008,
                property_tax_rate: 0.009,
                hurricane_insurance_annual: 8_500.0,
                hoa_monthly: 400.0,
                maintenance_annual_pct: 0.02,
                appreciation_mean: 0.05,
                appreciation_std: 0.12,
                closing_costs_pct: 0.03,
            },
        }
    }

    /// Stable stream index used to derive per-trial seeds. Append only.
    pub(crate) fn stream_index(&self) -> u64 {
        match self {
            Self::Rent => 0,
            Self::Starter => 1,
            Self::Standard => 2,
            Self::Premium => 3,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| SimError::UnknownScenario { name: s.to_string() })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScenarioParameters {
    pub home_price_min: f64,
    pub home_price_max: f64,
    pub down_payment_pct: f64,
    pub interest_rate_mean: f64,
    pub interest_rate_std: f64,
    pub property_tax_rate: f64,          // Annual fraction of home value
    pub hurricane_insurance_annual: f64, // Base annual premium, before region multiplier
    pub hoa_monthly: f64,
    pub maintenance_annual_pct: f64,
    pub appreciation_mean: f64,
    pub appreciation_std: f64,
    pub closing_costs_pct: f64,
}

impl ScenarioParameters {
    pub const RENT: Self = Self {
        home_price_min: 0.0,
        home_price_max: 0.0,
        down_payment_pct: 0.0,
        interest_rate_mean: 0.0,
        interest_rate_std: 0.0,
        property_tax_rate: 0.0,
        hurricane_insurance_annual: 0.0,
        hoa_monthly: 0.0,
        maintenance_annual_pct: 0.0,
        appreciation_mean: 0.0,
        appreciation_std: 0.0,
        closing_costs_pct: 0.0,
    };

    /// Savings needed to clear the entry gate at the cheapest price in range.
    pub fn min_upfront_cost(&self, region: RegionAdjustment) -> f64 {
        let price = self.home_price_min * region.price_multiplier;
        price * (self.down_payment_pct + self.closing_costs_pct)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RegionAdjustment {
    pub price_multiplier: f64,
    pub insurance_multiplier: f64,
}

impl Default for RegionAdjustment {
    fn default() -> Self {
        Self {
            price_multiplier: 1.0,
            insurance_multiplier: 1.0,
        }
    }
}

impl RegionAdjustment {
    pub const REGIONS: [&'static str; 6] = [
        "Miami-Dade",
        "Tampa Bay",
        "Orlando",
        "Jacksonville",
        "Southwest FL",
        "Panhandle",
    ];

    /// Unmapped regions fall back to neutral multipliers.
    pub fn for_region(region: &str) -> Self {
        let (price_multiplier, insurance_multiplier) = match region {
            "Miami-Dade" => (1.35, 1.40),
            "Tampa Bay" => (1.10, 1.20),
            "Orlando" => (1.05, 1.15),
            "Jacksonville" => (0.95, 1.10),
            "Southwest FL" => (1.20, 1.35),
            "Panhandle" => (0.85, 1.25),
            _ => return Self::default(),
        };
        Self {
            price_multiplier,
            insurance_multiplier,
        }
    }
}

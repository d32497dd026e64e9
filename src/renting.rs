//! Renting trial simulator.
//!
//! Rent escalates every year by Triangular(3%, 5%, 10%) while income moves
//! by Normal(income_growth, 8%). Renting builds no equity and has no
//! default: the trial ends the first month rent exceeds 35% of gross
//! monthly income.

use rand::Rng;
use rand_distr::{Distribution, Normal, Triangular};

use crate::config::SimulatorConfig;
use crate::error::SimResult;
use crate::household::Household;
use crate::rng;
use crate::trial::{monthly, rent_month, MonthStep, TrialOutcome, TrialState, MONTHS_PER_YEAR};

pub const RENT_AFFORDABILITY_LIMIT: f64 = 0.35;

pub const RENT_INCREASE_MIN: f64 = 0.03;
pub const RENT_INCREASE_MODE: f64 = 0.05;
pub const RENT_INCREASE_MAX: f64 = 0.10;

#[derive(Clone, Copy, Debug)]
pub struct RentYearShock {
    pub rent_increase: f64,
    pub income_change: f64,
}

pub struct RentingSimulator {
    rent_increase: Triangular<f64>,
    income_change: Normal<f64>,
}

impl RentingSimulator {
    pub fn new(config: &SimulatorConfig) -> SimResult<Self> {
        Ok(Self {
            rent_increase: rng::triangular(RENT_INCREASE_MIN, RENT_INCREASE_MODE, RENT_INCREASE_MAX)?,
            income_change: rng::income_shock(config.income_growth)?,
        })
    }

    /// Draw order is fixed: rent, then income.
    pub fn draw_year(&self, rng: &mut impl Rng) -> RentYearShock {
        let rent_increase = self.rent_increase.sample(rng);
        let income_change = self.income_change.sample(rng);
        RentYearShock {
            rent_increase,
            income_change,
        }
    }

    pub fn run_trial(
        &self,
        household: &Household,
        horizon_years: u32,
        rng: &mut impl Rng,
    ) -> TrialOutcome {
        let mut rent = household.current_monthly_rent;
        let mut income = household.annual_income;
        let mut total_paid = 0.0;
        let mut months_solvent = 0;
        let mut state = TrialState::Running;

        for _ in 0..horizon_years {
            let shock = self.draw_year(rng);
            rent *= 1.0 + shock.rent_increase;
            income *= 1.0 + shock.income_change;

            let ratio = rent / monthly(income);
            for _ in 0..MONTHS_PER_YEAR {
                match rent_month(ratio, RENT_AFFORDABILITY_LIMIT) {
                    MonthStep::Paid => {
                        months_solvent += 1;
                        total_paid += rent;
                    }
                    MonthStep::Skipped => {}
                    MonthStep::Terminated(next) => {
                        state = next;
                        break;
                    }
                }
            }

            if state.is_terminal() {
                break;
            }
        }

        TrialOutcome {
            state: state.finish(),
            initial_monthly_cost: household.current_monthly_rent,
            final_monthly_cost: rent,
            final_home_value: 0.0,
            final_loan_balance: 0.0,
            final_equity: 0.0,
            total_paid,
            months_solvent,
        }
    }
}

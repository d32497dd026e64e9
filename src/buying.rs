//! Home Purchase Trial Simulator
//!
//! One trial of buying a home under a scenario tier:
//!
//! 1. Entry gate: draw a price in the tier's range (scaled by region). If
//!    savings cannot cover down payment + closing costs the trial ends in
//!    `FailedEntry` and the household loses min(savings, closing costs).
//! 2. Rate: Normal(tier mean + credit adjustment, tier std) clipped to
//!    [3%, 10%]; the 30-year payment is then fixed for the trial.
//! 3. Each year: income, appreciation and insurance shocks, then property
//!    tax and noisy maintenance are recomputed from the home value.
//! 4. Each month: pay and amortize when the housing ratio is within the
//!    threshold; otherwise default with probability 0.3 or skip the month.

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal, Triangular, Uniform};

use crate::config::SimulatorConfig;
use crate::error::SimResult;
use crate::household::Household;
use crate::mortgage::{self, MAX_RATE, MIN_RATE};
use crate::rng;
use crate::scenario::{RegionAdjustment, Scenario, ScenarioParameters};
use crate::trial::{monthly, own_month, MonthStep, TrialOutcome, TrialState, MONTHS_PER_YEAR};

/// Share of everything paid so far that a defaulted owner forfeits on top
/// of the up-front costs.
pub const DEFAULT_LOSS_SHARE: f64 = 0.2;

pub const INSURANCE_INCREASE_MIN: f64 = 0.03;
pub const INSURANCE_INCREASE_MAX: f64 = 0.12;

pub const MAINTENANCE_NOISE_MIN: f64 = 0.8;
pub const MAINTENANCE_NOISE_MAX: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Purchase {
    pub home_price: f64,
    pub down_payment: f64,
    pub closing_costs: f64,
    pub loan_amount: f64,
    pub annual_rate: f64,
    pub monthly_mortgage: f64,
}

impl Purchase {
    pub fn upfront_cost(&self) -> f64 {
        self.down_payment + self.closing_costs
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Entry {
    Failed { lost_savings: f64 },
    Cleared(Purchase),
}

#[derive(Clone, Copy, Debug)]
pub struct OwnYearShock {
    pub income_change: f64,
    pub appreciation: f64,
    pub insurance_increase: f64,
}

pub struct BuyingSimulator {
    params: ScenarioParameters,
    region: RegionAdjustment,
    savings: f64,
    threshold: f64,
    price: Uniform<f64>,
    rate: Normal<f64>,
    income_change: Normal<f64>,
    appreciation: Normal<f64>,
    insurance_increase: Triangular<f64>,
    maintenance_noise: Uniform<f64>,
}

impl BuyingSimulator {
    /// Distributions are built once per (household, scenario) call; the
    /// rate distribution already carries the household's credit adjustment.
    pub fn new(
        config: &SimulatorConfig,
        scenario: Scenario,
        household: &Household,
    ) -> SimResult<Self> {
        let params = scenario.parameters();
        let region = RegionAdjustment::for_region(&household.region);
        let rate_mean = params.interest_rate_mean + mortgage::credit_adjustment(household.credit_score);

        let min_upfront = params.min_upfront_cost(region);
        if household.savings < min_upfront {
            debug!(
                "{}: savings {:.0} below the {} minimum up-front cost {:.0}, every entry fails",
                household.household_id, household.savings, scenario, min_upfront
            );
        }

        Ok(Self {
            params,
            region,
            savings: household.savings,
            threshold: config.affordability_threshold,
            price: rng::uniform(params.home_price_min, params.home_price_max)?,
            rate: rng::normal(rate_mean, params.interest_rate_std)?,
            income_change: rng::income_shock(config.income_growth)?,
            appreciation: rng::normal(params.appreciation_mean, params.appreciation_std)?,
            insurance_increase: rng::triangular(
                INSURANCE_INCREASE_MIN,
                config.insurance_mode(),
                INSURANCE_INCREASE_MAX,
            )?,
            maintenance_noise: rng::uniform(MAINTENANCE_NOISE_MIN, MAINTENANCE_NOISE_MAX)?,
        })
    }

    pub fn params(&self) -> &ScenarioParameters {
        &self.params
    }

    /// Price draw and feasibility gate. The rate is only drawn for
    /// households that clear the gate.
    pub fn enter(&self, rng: &mut impl Rng) -> Entry {
        let home_price = self.price.sample(rng) * self.region.price_multiplier;
        let down_payment = home_price * self.params.down_payment_pct;
        let closing_costs = home_price * self.params.closing_costs_pct;

        if self.savings < down_payment + closing_costs {
            return Entry::Failed {
                lost_savings: self.savings.min(closing_costs),
            };
        }

        let annual_rate = self.rate.sample(rng).clamp(MIN_RATE, MAX_RATE);
        let loan_amount = home_price - down_payment;

        Entry::Cleared(Purchase {
            home_price,
            down_payment,
            closing_costs,
            loan_amount,
            annual_rate,
            monthly_mortgage: mortgage::monthly_payment(loan_amount, annual_rate),
        })
    }

    /// Draw order is fixed: income, appreciation, insurance.
    pub fn draw_year(&self, rng: &mut impl Rng) -> OwnYearShock {
        let income_change = self.income_change.sample(rng);
        let appreciation = self.appreciation.sample(rng);
        let insurance_increase = self.insurance_increase.sample(rng);
        OwnYearShock {
            income_change,
            appreciation,
            insurance_increase,
        }
    }

    pub fn initial_monthly_insurance(&self) -> f64 {
        self.params.hurricane_insurance_annual * self.region.insurance_multiplier / 12.0
    }

    pub fn monthly_property_tax(&self, home_value: f64) -> f64 {
        home_value * self.params.property_tax_rate / 12.0
    }

    pub fn monthly_maintenance(&self, home_value: f64) -> f64 {
        home_value * self.params.maintenance_annual_pct / 12.0
    }

    pub fn run_trial(
        &self,
        household: &Household,
        horizon_years: u32,
        rng: &mut impl Rng,
    ) -> TrialOutcome {
        let purchase = match self.enter(rng) {
            Entry::Failed { lost_savings } => return failed_entry(lost_savings),
            Entry::Cleared(purchase) => purchase,
        };

        let hoa = self.params.hoa_monthly;
        let mut monthly_insurance = self.initial_monthly_insurance();
        let mut total_monthly = purchase.monthly_mortgage
            + self.monthly_property_tax(purchase.home_price)
            + monthly_insurance
            + hoa
            + self.monthly_maintenance(purchase.home_price);
        let initial_monthly_cost = total_monthly;

        let mut home_value = purchase.home_price;
        let mut loan_balance = purchase.loan_amount;
        let mut income = household.annual_income;
        let mut total_paid = purchase.upfront_cost();
        let mut months_solvent = 0;
        let mut state = TrialState::Running;

        for _ in 0..horizon_years {
            let shock = self.draw_year(rng);
            income *= 1.0 + shock.income_change;
            home_value *= 1.0 + shock.appreciation;
            monthly_insurance *= 1.0 + shock.insurance_increase;

            let maintenance = self.monthly_maintenance(home_value) * self.maintenance_noise.sample(rng);
            total_monthly = purchase.monthly_mortgage
                + self.monthly_property_tax(home_value)
                + monthly_insurance
                + hoa
                + maintenance;

            let ratio = total_monthly / monthly(income);
            for _ in 0..MONTHS_PER_YEAR {
                match own_month(ratio, self.threshold, rng) {
                    MonthStep::Paid => {
                        months_solvent += 1;
                        total_paid += total_monthly;
                        loan_balance = mortgage::amortize_month(
                            loan_balance,
                            purchase.annual_rate,
                            purchase.monthly_mortgage,
                        );
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

        let state = state.finish();
        let final_equity = if state == TrialState::Defaulted {
            -(purchase.upfront_cost() + total_paid * DEFAULT_LOSS_SHARE)
        } else {
            home_value - loan_balance.max(0.0)
        };

        TrialOutcome {
            state,
            initial_monthly_cost,
            final_monthly_cost: total_monthly,
            final_home_value: home_value,
            final_loan_balance: loan_balance,
            final_equity,
            total_paid,
            months_solvent,
        }
    }
}

fn failed_entry(lost_savings: f64) -> TrialOutcome {
    TrialOutcome {
        state: TrialState::FailedEntry,
        initial_monthly_cost: 0.0,
        final_monthly_cost: 0.0,
        final_home_value: 0.0,
        final_loan_balance: 0.0,
        final_equity: -lost_savings,
        total_paid: lost_savings,
        months_solvent: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::sample_household;
    use crate::rng::{trial_rng, StreamPath};
    use rand::rngs::mock::StepRng;

    fn rich_household() -> Household {
        let mut household = sample_household();
        household.annual_income = 400_000.0;
        household.savings = 2_000_000.0;
        household.credit_score = 800.0;
        household
    }

    #[test]
    fn test_poor_household_fails_entry() {
        let mut household = sample_household();
        household.savings = 5_000.0;
        household.region = "Unmapped".to_string();
        let sim = BuyingSimulator::new(&SimulatorConfig::default(), Scenario::Starter, &household)
            .unwrap();

        for trial in 0..100 {
            let mut rng = trial_rng(42, Scenario::Starter, StreamPath::Outcome, trial);
            let outcome = sim.run_trial(&household, 10, &mut rng);
            assert_eq!(outcome.state, TrialState::FailedEntry);
            assert!(outcome.defaulted());
            // Closing costs are at least $6,000, so all savings are lost.
            assert_eq!(outcome.final_equity, -5_000.0);
            assert_eq!(outcome.total_paid, 5_000.0);
            assert_eq!(outcome.months_solvent, 0);
        }
    }

    #[test]
    fn test_entry_prices_respect_region_multiplier() {
        let mut household = rich_household();
        household.region = "Miami-Dade".to_string();
        let sim = BuyingSimulator::new(&SimulatorConfig::default(), Scenario::Standard, &household)
            .unwrap();

        for trial in 0..200 {
            let mut rng = trial_rng(1, Scenario::Standard, StreamPath::Outcome, trial);
            match sim.enter(&mut rng) {
                Entry::Cleared(purchase) => {
                    assert!(purchase.home_price >= 300_000.0 * 1.35 - 1e-6);
                    assert!(purchase.home_price < 500_000.0 * 1.35 + 1e-6);
                    assert!((purchase.down_payment - purchase.home_price * 0.10).abs() < 1e-6);
                    assert!((MIN_RATE..=MAX_RATE).contains(&purchase.annual_rate));
                    assert!(
                        (purchase.loan_amount + purchase.down_payment - purchase.home_price).abs()
                            < 1e-6
                    );
                }
                Entry::Failed { .. } => panic!("rich household should clear the gate"),
            }
        }
    }

    #[test]
    fn test_zero_horizon_equity_is_down_payment() {
        let household = rich_household();
        let sim = BuyingSimulator::new(&SimulatorConfig::default(), Scenario::Premium, &household)
            .unwrap();

        let mut rng = trial_rng(3, Scenario::Premium, StreamPath::Outcome, 0);
        let outcome = sim.run_trial(&household, 0, &mut rng);

        assert_eq!(outcome.state, TrialState::HorizonCompleted);
        assert_eq!(outcome.months_solvent, 0);
        assert!((outcome.final_equity - outcome.final_home_value * 0.20).abs() < 1e-6);
        assert!((outcome.total_paid - outcome.final_home_value * 0.23).abs() < 1e-6);
        assert_eq!(outcome.initial_monthly_cost, outcome.final_monthly_cost);
    }

    #[test]
    fn test_affordable_owner_builds_equity() {
        let household = rich_household();
        let sim = BuyingSimulator::new(&SimulatorConfig::default(), Scenario::Starter, &household)
            .unwrap();

        let mut rng = trial_rng(5, Scenario::Starter, StreamPath::Outcome, 0);
        let outcome = sim.run_trial(&household, 10, &mut rng);

        assert_eq!(outcome.state, TrialState::HorizonCompleted);
        assert!(outcome.affordable_through(10));
        assert!(outcome.final_loan_balance > 0.0);
        assert!(
            (outcome.final_equity - (outcome.final_home_value - outcome.final_loan_balance)).abs()
                < 1e-6
        );
    }

    #[test]
    fn test_defaulted_equity_is_negative() {
        let mut household = sample_household();
        household.annual_income = 30_000.0;
        household.savings = 200_000.0;
        let sim = BuyingSimulator::new(&SimulatorConfig::default(), Scenario::Standard, &household)
            .unwrap();

        let mut defaults = 0;
        for trial in 0..500 {
            let mut rng = trial_rng(11, Scenario::Standard, StreamPath::Outcome, trial);
            let outcome = sim.run_trial(&household, 10, &mut rng);
            if outcome.state == TrialState::Defaulted {
                defaults += 1;
                assert!(outcome.final_equity <= 0.0);
                assert!(outcome.months_solvent < 120);
            }
        }
        assert!(defaults > 0);
    }

    #[test]
    fn test_insurance_scales_with_region() {
        let mut household = rich_household();
        household.region = "Miami-Dade".to_string();
        let config = SimulatorConfig::default();
        let miami = BuyingSimulator::new(&config, Scenario::Standard, &household).unwrap();
        household.region = "Unmapped".to_string();
        let base = BuyingSimulator::new(&config, Scenario::Standard, &household).unwrap();

        assert!((base.initial_monthly_insurance() - 5_500.0 / 12.0).abs() < 1e-9);
        assert!((miami.initial_monthly_insurance() - 5_500.0 * 1.40 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_skipped_months_leave_loan_untouched() {
        let mut household = sample_household();
        household.annual_income = 20_000.0;
        household.savings = 500_000.0;
        let sim = BuyingSimulator::new(&SimulatorConfig::default(), Scenario::Starter, &household)
            .unwrap();

        // Every uniform draw is 0.5: normals sit at their mean and the
        // default draw never falls below 0.3.
        let half = || StepRng::new(0x8000_0000_0000_0000, 0);
        let purchase = match sim.enter(&mut half()) {
            Entry::Cleared(purchase) => purchase,
            Entry::Failed { .. } => panic!("savings cover the up-front costs"),
        };
        let outcome = sim.run_trial(&household, 10, &mut half());

        assert!(outcome.initial_monthly_cost > 0.5 * 20_000.0 / 12.0);
        assert_eq!(outcome.state, TrialState::HorizonCompleted);
        assert!(!outcome.defaulted());
        assert_eq!(outcome.months_solvent, 0);
        assert!(!outcome.affordable_through(10));
        assert_eq!(outcome.total_paid, purchase.upfront_cost());
        assert_eq!(outcome.final_loan_balance, purchase.loan_amount);
        assert!(
            (outcome.final_equity - (outcome.final_home_value - purchase.loan_amount)).abs() < 1e-6
        );
    }
}

//! Timeline Projection
//!
//! Year-by-year projection of equity, monthly cost and cumulative cost,
//! summarised per year as {pessimistic, expected, optimistic} bands over
//! every trial. Year 0 is the state right after moving in.
//!
//! This is a projection, not a risk model: there is no stochastic default.
//! Only the entry gate can stop a purchase, and a trial that fails it
//! carries its flat loss across every year. Maintenance is not noised.

use rand::Rng;
use serde::Serialize;

use crate::buying::{BuyingSimulator, Entry};
use crate::mortgage;
use crate::renting::RentingSimulator;
use crate::scenario::Scenario;
use crate::stats::{percentile_sorted, sorted};
use crate::trial::MONTHS_PER_YEAR;

/// Which tail is bad news for a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileBand {
    pub pessimistic: Vec<f64>,
    pub expected: Vec<f64>,
    pub optimistic: Vec<f64>,
}

impl PercentileBand {
    /// `by_year[y]` holds every trial's value at year `y`.
    pub fn from_years(by_year: &[Vec<f64>], polarity: Polarity) -> Self {
        let mut p5 = Vec::with_capacity(by_year.len());
        let mut p50 = Vec::with_capacity(by_year.len());
        let mut p95 = Vec::with_capacity(by_year.len());

        for values in by_year {
            let sorted = sorted(values);
            p5.push(percentile_sorted(&sorted, 5.0));
            p50.push(percentile_sorted(&sorted, 50.0));
            p95.push(percentile_sorted(&sorted, 95.0));
        }

        match polarity {
            Polarity::HigherIsBetter => Self {
                pessimistic: p5,
                expected: p50,
                optimistic: p95,
            },
            Polarity::LowerIsBetter => Self {
                pessimistic: p95,
                expected: p50,
                optimistic: p5,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub household_id: String,
    pub scenario: Scenario,
    pub simulations: usize,
    pub years: Vec<u32>,
    pub equity: PercentileBand,
    pub monthly_costs: PercentileBand,
    pub cumulative_costs: PercentileBand,
}

/// One trial's end-of-year values, index 0 being the initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialPath {
    pub down_payment: f64,
    pub equity: Vec<f64>,
    pub monthly_cost: Vec<f64>,
    pub cumulative_cost: Vec<f64>,
}

impl TrialPath {
    fn with_capacity(years: usize) -> Self {
        Self {
            down_payment: 0.0,
            equity: Vec::with_capacity(years),
            monthly_cost: Vec::with_capacity(years),
            cumulative_cost: Vec::with_capacity(years),
        }
    }

    fn push(&mut self, equity: f64, monthly_cost: f64, cumulative_cost: f64) {
        self.equity.push(equity);
        self.monthly_cost.push(monthly_cost);
        self.cumulative_cost.push(cumulative_cost);
    }
}

pub fn project_renting_trial(
    sim: &RentingSimulator,
    current_rent: f64,
    horizon_years: u32,
    rng: &mut impl Rng,
) -> TrialPath {
    let mut path = TrialPath::with_capacity(horizon_years as usize + 1);
    let mut rent = current_rent;
    let mut cumulative = 0.0;
    path.push(0.0, rent, cumulative);

    for _ in 0..horizon_years {
        // Income is drawn but unused: the projection has no affordability cutoff.
        let shock = sim.draw_year(rng);
        rent *= 1.0 + shock.rent_increase;
        cumulative += rent * MONTHS_PER_YEAR as f64;
        path.push(0.0, rent, cumulative);
    }

    path
}

pub fn project_buying_trial(
    sim: &BuyingSimulator,
    horizon_years: u32,
    rng: &mut impl Rng,
) -> TrialPath {
    let years = horizon_years as usize + 1;
    let mut path = TrialPath::with_capacity(years);

    let purchase = match sim.enter(rng) {
        Entry::Failed { lost_savings } => {
            for _ in 0..years {
                path.push(-lost_savings, 0.0, lost_savings);
            }
            return path;
        }
        Entry::Cleared(purchase) => purchase,
    };

    let hoa = sim.params().hoa_monthly;
    let mut monthly_insurance = sim.initial_monthly_insurance();
    let mut home_value = purchase.home_price;
    let mut loan_balance = purchase.loan_amount;
    let mut cumulative = purchase.upfront_cost();

    path.down_payment = purchase.down_payment;
    path.push(
        purchase.down_payment,
        purchase.monthly_mortgage
            + sim.monthly_property_tax(purchase.home_price)
            + monthly_insurance
            + hoa,
        cumulative,
    );

    for _ in 0..horizon_years {
        let shock = sim.draw_year(rng);
        home_value *= 1.0 + shock.appreciation;
        monthly_insurance *= 1.0 + shock.insurance_increase;

        let total_monthly = purchase.monthly_mortgage
            + sim.monthly_property_tax(home_value)
            + monthly_insurance
            + hoa
            + sim.monthly_maintenance(home_value);

        for _ in 0..MONTHS_PER_YEAR {
            loan_balance = mortgage::amortize_month(
                loan_balance,
                purchase.annual_rate,
                purchase.monthly_mortgage,
            );
            cumulative += total_monthly;
        }

        path.push(home_value - loan_balance.max(0.0), total_monthly, cumulative);
    }

    path
}

fn by_year(
    paths: &[TrialPath],
    years: usize,
    select: impl Fn(&TrialPath) -> &[f64],
) -> Vec<Vec<f64>> {
    (0..years)
        .map(|y| paths.iter().map(|path| select(path)[y]).collect())
        .collect()
}

impl Timeline {
    pub fn from_paths(
        household_id: &str,
        scenario: Scenario,
        horizon_years: u32,
        paths: &[TrialPath],
    ) -> Self {
        let years: Vec<u32> = (0..=horizon_years).collect();
        let n = years.len();

        Self {
            household_id: household_id.to_string(),
            scenario,
            simulations: paths.len(),
            years,
            equity: PercentileBand::from_years(
                &by_year(paths, n, |p| p.equity.as_slice()),
                Polarity::HigherIsBetter,
            ),
            monthly_costs: PercentileBand::from_years(
                &by_year(paths, n, |p| p.monthly_cost.as_slice()),
                Polarity::LowerIsBetter,
            ),
            cumulative_costs: PercentileBand::from_years(
                &by_year(paths, n, |p| p.cumulative_cost.as_slice()),
                Polarity::LowerIsBetter,
            ),
        }
    }
}

//! Result records: per-trial outcomes collapsed into one summary per
//! (household, scenario, horizon) call.
//!
//! For purchases, terminal monthly cost and equity are only meaningful for
//! trials that did not default, so their mean/median come from the
//! non-defaulted subset while the 5th/95th percentiles span every trial.
//! Total money paid is well defined for every trial and always uses the
//! full set.

use serde::Serialize;

use crate::household::Household;
use crate::scenario::Scenario;
use crate::stats::{fraction, mean, Summary};
use crate::trial::{TrialOutcome, TrialState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub household_id: String,
    pub scenario: Scenario,
    pub simulations: usize,
    pub time_horizon_years: u32,
    pub initial_monthly_cost: f64,
    pub final_monthly_cost: Summary,
    pub total_cost_paid: Summary,
    pub equity_built: Summary,
    pub probability_affordable: f64,
    pub probability_unaffordable: f64,
    pub probability_default: f64,
    pub probability_negative_equity: f64,
    pub mean_affordable_months: f64,
}

struct Columns {
    monthly_cost: Vec<f64>,
    total_paid: Vec<f64>,
    equity: Vec<f64>,
    months_solvent: Vec<f64>,
}

impl Columns {
    fn collect(outcomes: &[TrialOutcome]) -> Self {
        Self {
            monthly_cost: outcomes.iter().map(|o| o.final_monthly_cost).collect(),
            total_paid: outcomes.iter().map(|o| o.total_paid).collect(),
            equity: outcomes.iter().map(|o| o.final_equity).collect(),
            months_solvent: outcomes.iter().map(|o| o.months_solvent as f64).collect(),
        }
    }
}

impl ResultRecord {
    pub fn from_renting(
        household: &Household,
        outcomes: &[TrialOutcome],
        horizon_years: u32,
    ) -> Self {
        let n = outcomes.len();
        let columns = Columns::collect(outcomes);
        let affordable = outcomes
            .iter()
            .filter(|o| o.affordable_through(horizon_years))
            .count();

        Self {
            household_id: household.household_id.clone(),
            scenario: Scenario::Rent,
            simulations: n,
            time_horizon_years: horizon_years,
            initial_monthly_cost: household.current_monthly_rent,
            final_monthly_cost: Summary::of(&columns.monthly_cost),
            total_cost_paid: Summary::of(&columns.total_paid),
            equity_built: Summary::ZERO,
            probability_affordable: fraction(affordable, n),
            probability_unaffordable: fraction(n - affordable, n),
            probability_default: 0.0,
            probability_negative_equity: 0.0,
            mean_affordable_months: mean(&columns.months_solvent),
        }
    }

    pub fn from_buying(
        household: &Household,
        scenario: Scenario,
        outcomes: &[TrialOutcome],
        horizon_years: u32,
    ) -> Self {
        let n = outcomes.len();
        let columns = Columns::collect(outcomes);

        let survivors: Vec<&TrialOutcome> = outcomes.iter().filter(|o| !o.defaulted()).collect();
        let survivor_costs: Vec<f64> = survivors.iter().map(|o| o.final_monthly_cost).collect();
        let survivor_equity: Vec<f64> = survivors.iter().map(|o| o.final_equity).collect();
        let entered: Vec<f64> = outcomes
            .iter()
            .filter(|o| o.state != TrialState::FailedEntry)
            .map(|o| o.initial_monthly_cost)
            .collect();

        let affordable = outcomes
            .iter()
            .filter(|o| o.affordable_through(horizon_years))
            .count();
        let defaulted = n - survivors.len();
        let negative_equity = outcomes.iter().filter(|o| o.final_equity < 0.0).count();

        Self {
            household_id: household.household_id.clone(),
            scenario,
            simulations: n,
            time_horizon_years: horizon_years,
            initial_monthly_cost: mean(&entered),
            final_monthly_cost: Summary::conditional(&columns.monthly_cost, &survivor_costs),
            total_cost_paid: Summary::of(&columns.total_paid),
            equity_built: Summary::conditional(&columns.equity, &survivor_equity),
            probability_affordable: fraction(affordable, n),
            probability_unaffordable: fraction(n - affordable, n),
            probability_default: fraction(defaulted, n),
            probability_negative_equity: fraction(negative_equity, n),
            mean_affordable_months: mean(&columns.months_solvent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::sample_household;

    fn outcome(state: TrialState, monthly: f64, paid: f64, equity: f64, months: u32) -> TrialOutcome {
        TrialOutcome {
            state,
            initial_monthly_cost: if state == TrialState::FailedEntry { 0.0 } else { 2_000.0 },
            final_monthly_cost: monthly,
            final_home_value: 0.0,
            final_loan_balance: 0.0,
            final_equity: equity,
            total_paid: paid,
            months_solvent: months,
        }
    }

    #[test]
    fn test_buying_aggregation_splits_subsets() {
        let outcomes = vec![
            outcome(TrialState::HorizonCompleted, 2_000.0, 100_000.0, 50_000.0, 12),
            outcome(TrialState::HorizonCompleted, 3_000.0, 110_000.0, 70_000.0, 12),
            outcome(TrialState::Defaulted, 9_000.0, 40_000.0, -30_000.0, 5),
            outcome(TrialState::FailedEntry, 0.0, 6_000.0, -6_000.0, 0),
        ];
        let record = ResultRecord::from_buying(&sample_household(), Scenario::Starter, &outcomes, 1);

        assert_eq!(record.simulations, 4);
        assert_eq!(record.probability_affordable, 0.5);
        assert_eq!(record.probability_unaffordable, 0.5);
        assert_eq!(record.probability_default, 0.5);
        assert_eq!(record.probability_negative_equity, 0.5);
        assert_eq!(record.mean_affordable_months, 29.0 / 4.0);

        // Center over survivors only.
        assert_eq!(record.final_monthly_cost.mean, 2_500.0);
        assert_eq!(record.equity_built.mean, 60_000.0);
        assert_eq!(record.equity_built.median, 60_000.0);
        // Tails over every trial.
        assert!(record.equity_built.percentile_5 < 0.0);
        assert!(record.final_monthly_cost.percentile_95 > 3_000.0);
        // Totals over every trial.
        assert_eq!(record.total_cost_paid.mean, 256_000.0 / 4.0);
        // Initial cost over trials that cleared the gate.
        assert_eq!(record.initial_monthly_cost, 2_000.0);
    }

    #[test]
    fn test_all_defaulted_falls_back_to_full_set() {
        let outcomes = vec![
            outcome(TrialState::FailedEntry, 0.0, 5_000.0, -5_000.0, 0),
            outcome(TrialState::FailedEntry, 0.0, 5_000.0, -5_000.0, 0),
        ];
        let record = ResultRecord::from_buying(&sample_household(), Scenario::Premium, &outcomes, 10);

        assert_eq!(record.probability_default, 1.0);
        assert_eq!(record.equity_built.mean, -5_000.0);
        assert_eq!(record.final_monthly_cost.mean, 0.0);
        assert_eq!(record.initial_monthly_cost, 0.0);
    }

    #[test]
    fn test_renting_has_zero_equity_and_no_default() {
        let outcomes = vec![
            outcome(TrialState::HorizonCompleted, 2_400.0, 250_000.0, 0.0, 120),
            outcome(TrialState::BecameUnaffordable, 2_900.0, 150_000.0, 0.0, 72),
        ];
        let record = ResultRecord::from_renting(&sample_household(), &outcomes, 10);

        assert_eq!(record.scenario, Scenario::Rent);
        assert_eq!(record.equity_built, Summary::ZERO);
        assert_eq!(record.probability_default, 0.0);
        assert_eq!(record.probability_affordable, 0.5);
        assert_eq!(record.probability_affordable + record.probability_unaffordable, 1.0);
        assert_eq!(record.initial_monthly_cost, 1_800.0);
        assert_eq!(record.mean_affordable_months, 96.0);
    }

    #[test]
    fn test_record_serializes_scenario_name() {
        let outcomes = vec![outcome(TrialState::HorizonCompleted, 2_000.0, 1.0, 0.0, 0)];
        let record = ResultRecord::from_renting(&sample_household(), &outcomes, 0);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["scenario"], "Keep Renting");
        assert_eq!(json["household_id"], "HH-000001");
        assert!(json["equity_built"]["percentile_95"].is_number());
    }
}

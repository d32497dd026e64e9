//! Housing Affordability Simulator
//!
//! Entry point for collaborators: runs N independent trials of one household
//! under a scenario and collapses them into a `ResultRecord`, compares every
//! catalog scenario for a single household, and projects yearly percentile
//! bands.
//!
//! The simulator holds no mutable state. Each trial seeds its own stream
//! from the configured seed, so every call is a pure function of
//! (household, scenario, config, trials, horizon).

use log::{debug, info, trace};
use std::collections::BTreeMap;

use crate::buying::BuyingSimulator;
use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::household::Household;
use crate::renting::RentingSimulator;
use crate::result::ResultRecord;
use crate::rng::{trial_rng, StreamPath};
use crate::scenario::Scenario;
use crate::timeline::{project_buying_trial, project_renting_trial, Timeline, TrialPath};
use crate::trial::{TrialOutcome, TrialState};

/// Caller-level cap on trials × horizon (20,000 trials over 30 years).
pub const MAX_TRIAL_YEARS: u64 = 20_000 * 30;

pub const DEFAULT_SIMULATIONS: usize = 10_000;
pub const DEFAULT_TIMELINE_SIMULATIONS: usize = 1_000;
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

pub fn check_run(simulations: usize, horizon_years: u32) -> SimResult<()> {
    if simulations == 0 {
        return Err(SimError::InvalidRun {
            reason: "simulation count must be positive".to_string(),
        });
    }
    let trial_years = u64::try_from(simulations)
        .ok()
        .and_then(|n| n.checked_mul(u64::from(horizon_years.max(1))));
    if trial_years.map_or(true, |n| n > MAX_TRIAL_YEARS) {
        return Err(SimError::InvalidRun {
            reason: format!(
                "{simulations} trials x {horizon_years} years exceeds the cap of {MAX_TRIAL_YEARS}"
            ),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct HousingSimulator {
    config: SimulatorConfig,
}

impl Default for HousingSimulator {
    fn default() -> Self {
        Self {
            config: SimulatorConfig::default(),
        }
    }
}

impl HousingSimulator {
    pub fn new(config: SimulatorConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Raw per-trial outcomes, in trial order.
    pub fn run_trials(
        &self,
        household: &Household,
        scenario: Scenario,
        simulations: usize,
        horizon_years: u32,
    ) -> SimResult<Vec<TrialOutcome>> {
        household.validate()?;
        check_run(simulations, horizon_years)?;

        debug!(
            "simulating {} for {}: {} trials over {} years",
            scenario, household.household_id, simulations, horizon_years
        );

        let seed = self.config.random_seed;
        let outcomes: Vec<TrialOutcome> = match scenario {
            Scenario::Rent => {
                let sim = RentingSimulator::new(&self.config)?;
                (0..simulations as u64)
                    .map(|trial| {
                        let mut rng = trial_rng(seed, scenario, StreamPath::Outcome, trial);
                        sim.run_trial(household, horizon_years, &mut rng)
                    })
                    .collect()
            }
            _ => {
                let sim = BuyingSimulator::new(&self.config, scenario, household)?;
                (0..simulations as u64)
                    .map(|trial| {
                        let mut rng = trial_rng(seed, scenario, StreamPath::Outcome, trial);
                        sim.run_trial(household, horizon_years, &mut rng)
                    })
                    .collect()
            }
        };

        let failed_entry = outcomes
            .iter()
            .filter(|o| o.state == TrialState::FailedEntry)
            .count();
        if failed_entry > 0 {
            trace!(
                "{}: {} of {} trials failed the entry gate for {}",
                household.household_id, failed_entry, simulations, scenario
            );
        }

        Ok(outcomes)
    }

    pub fn simulate(
        &self,
        household: &Household,
        scenario: Scenario,
        simulations: usize,
        horizon_years: u32,
    ) -> SimResult<ResultRecord> {
        let outcomes = self.run_trials(household, scenario, simulations, horizon_years)?;
        let record = match scenario {
            Scenario::Rent => ResultRecord::from_renting(household, &outcomes, horizon_years),
            _ => ResultRecord::from_buying(household, scenario, &outcomes, horizon_years),
        };
        Ok(record)
    }

    pub fn simulate_by_name(
        &self,
        household: &Household,
        scenario_name: &str,
        simulations: usize,
        horizon_years: u32,
    ) -> SimResult<ResultRecord> {
        let scenario: Scenario = scenario_name.parse()?;
        self.simulate(household, scenario, simulations, horizon_years)
    }

    pub fn compare_scenarios(
        &self,
        household: &Household,
        simulations: usize,
        horizon_years: u32,
    ) -> SimResult<BTreeMap<Scenario, ResultRecord>> {
        let mut comparison = BTreeMap::new();
        for scenario in Scenario::all() {
            let record = self.simulate(household, scenario, simulations, horizon_years)?;
            comparison.insert(scenario, record);
        }

        info!(
            "compared {} scenarios for {} ({} trials, {} years)",
            comparison.len(),
            household.household_id,
            simulations,
            horizon_years
        );

        Ok(comparison)
    }

    /// Per-trial yearly paths for the projection; index 0 is year 0.
    pub fn project_trials(
        &self,
        household: &Household,
        scenario: Scenario,
        simulations: usize,
        horizon_years: u32,
    ) -> SimResult<Vec<TrialPath>> {
        household.validate()?;
        check_run(simulations, horizon_years)?;

        let seed = self.config.random_seed;
        let paths = match scenario {
            Scenario::Rent => {
                let sim = RentingSimulator::new(&self.config)?;
                (0..simulations as u64)
                    .map(|trial| {
                        let mut rng = trial_rng(seed, scenario, StreamPath::Timeline, trial);
                        project_renting_trial(
                            &sim,
                            household.current_monthly_rent,
                            horizon_years,
                            &mut rng,
                        )
                    })
                    .collect()
            }
            _ => {
                let sim = BuyingSimulator::new(&self.config, scenario, household)?;
                (0..simulations as u64)
                    .map(|trial| {
                        let mut rng = trial_rng(seed, scenario, StreamPath::Timeline, trial);
                        project_buying_trial(&sim, horizon_years, &mut rng)
                    })
                    .collect()
            }
        };
        Ok(paths)
    }

    pub fn simulate_timeline(
        &self,
        household: &Household,
        scenario: Scenario,
        simulations: usize,
        horizon_years: u32,
    ) -> SimResult<Timeline> {
        let paths = self.project_trials(household, scenario, simulations, horizon_years)?;
        debug!(
            "projected {} timeline for {}: {} paths",
            scenario,
            household.household_id,
            paths.len()
        );
        Ok(Timeline::from_paths(
            &household.household_id,
            scenario,
            horizon_years,
            &paths,
        ))
    }
}

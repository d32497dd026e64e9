//! Trial state machine.
//!
//! A trial starts `Running` (or `FailedEntry` when savings cannot cover the
//! up-front costs) and moves to a terminal state at most once. Terminal
//! states never transition again.
//!
//! ```text
//! Running ──affordable──────────────▶ Running
//!    │  ├──unaffordable (rent)──────▶ BecameUnaffordable
//!    │  ├──unaffordable, u < 0.3 ───▶ Defaulted
//!    │  └──unaffordable, u >= 0.3 ──▶ Running (month skipped)
//!    └──horizon reached─────────────▶ HorizonCompleted
//! ```

use rand::Rng;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Chance that an unaffordable month of ownership ends in default.
pub const DEFAULT_PROBABILITY: f64 = 0.30;

pub fn monthly(annual: f64) -> f64 {
    annual / MONTHS_PER_YEAR as f64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrialState {
    Running,
    HorizonCompleted,
    BecameUnaffordable,
    Defaulted,
    FailedEntry,
}

impl TrialState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Failed entry is reported as a default.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Defaulted | Self::FailedEntry)
    }

    /// Closes a trial that ran to the end of the horizon.
    pub fn finish(self) -> Self {
        match self {
            Self::Running => Self::HorizonCompleted,
            terminal => terminal,
        }
    }
}

/// What happened to a single month of a trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthStep {
    Paid,
    Skipped,
    Terminated(TrialState),
}

/// Renting has no default: the first unaffordable month ends the trial.
pub fn rent_month(ratio: f64, threshold: f64) -> MonthStep {
    if ratio <= threshold {
        MonthStep::Paid
    } else {
        MonthStep::Terminated(TrialState::BecameUnaffordable)
    }
}

/// Ownership month: an unaffordable month either defaults or is skipped.
/// The default draw is only consumed when the month is unaffordable.
pub fn own_month(ratio: f64, threshold: f64, rng: &mut impl Rng) -> MonthStep {
    if ratio <= threshold {
        MonthStep::Paid
    } else if rng.gen::<f64>() < DEFAULT_PROBABILITY {
        MonthStep::Terminated(TrialState::Defaulted)
    } else {
        MonthStep::Skipped
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialOutcome {
    pub state: TrialState,
    pub initial_monthly_cost: f64,
    pub final_monthly_cost: f64,
    pub final_home_value: f64,
    pub final_loan_balance: f64,
    pub final_equity: f64,
    pub total_paid: f64,
    pub months_solvent: u32,
}

impl TrialOutcome {
    pub fn defaulted(&self) -> bool {
        self.state.is_default()
    }

    pub fn affordable_through(&self, horizon_years: u32) -> bool {
        self.months_solvent == horizon_years * MONTHS_PER_YEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{trial_rng, StreamPath};
    use crate::scenario::Scenario;

    #[test]
    fn test_finish_only_closes_running() {
        assert_eq!(TrialState::Running.finish(), TrialState::HorizonCompleted);
        assert_eq!(TrialState::Defaulted.finish(), TrialState::Defaulted);
        assert_eq!(TrialState::FailedEntry.finish(), TrialState::FailedEntry);
        assert_eq!(
            TrialState::BecameUnaffordable.finish(),
            TrialState::BecameUnaffordable
        );
    }

    #[test]
    fn test_default_flags() {
        assert!(TrialState::Defaulted.is_default());
        assert!(TrialState::FailedEntry.is_default());
        assert!(!TrialState::BecameUnaffordable.is_default());
        assert!(!TrialState::HorizonCompleted.is_default());
        assert!(!TrialState::Running.is_terminal());
    }

    #[test]
    fn test_monthly_splits_annual_amount() {
        assert!((monthly(60_000.0) - 5_000.0).abs() < 1e-9);
        assert_eq!(monthly(0.0), 0.0);
    }

    #[test]
    fn test_rent_month_threshold_is_inclusive() {
        assert_eq!(rent_month(0.35, 0.35), MonthStep::Paid);
        assert_eq!(
            rent_month(0.351, 0.35),
            MonthStep::Terminated(TrialState::BecameUnaffordable)
        );
    }

    #[test]
    fn test_affordable_month_never_defaults() {
        let mut rng = trial_rng(9, Scenario::Starter, StreamPath::Outcome, 0);
        for _ in 0..1_000 {
            assert_eq!(own_month(0.4, 0.5, &mut rng), MonthStep::Paid);
        }
    }

    #[test]
    fn test_unaffordable_month_default_rate() {
        let mut rng = trial_rng(9, Scenario::Starter, StreamPath::Outcome, 1);
        let draws = 20_000;
        let defaults = (0..draws)
            .filter(|_| own_month(0.9, 0.5, &mut rng) == MonthStep::Terminated(TrialState::Defaulted))
            .count();
        let rate = defaults as f64 / draws as f64;
        assert!((rate - DEFAULT_PROBABILITY).abs() < 0.02, "rate {rate}");
    }
}

//! Deterministic random streams.
//!
//! Every trial owns its own `Pcg64Mcg` stream derived from
//! (master seed, scenario, path, trial index). No trial ever shares a
//! generator with another, so results do not depend on trial order and a
//! repeated call with the same inputs is bit-identical.

use rand::SeedableRng;
use rand_distr::{Normal, Triangular, Uniform};
use rand_pcg::Pcg64Mcg;

use crate::error::{SimError, SimResult};
use crate::scenario::Scenario;

pub type TrialRng = Pcg64Mcg;

/// Annual income shock std dev, shared by every scenario.
pub const INCOME_VOLATILITY: f64 = 0.08;

const STREAM_MIX: u64 = 0x9e37_79b9_7f4a_7c15;
const TRIAL_MIX: u64 = 0xbf58_476d_1ce4_e5b9;

/// Which simulation path consumes the stream. Append only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamPath {
    Outcome = 0,
    Timeline = 1,
}

pub fn derive_seed(master_seed: u64, scenario: Scenario, path: StreamPath, trial: u64) -> u64 {
    let stream = ((path as u64) << 8) | scenario.stream_index();
    (master_seed ^ stream.wrapping_mul(STREAM_MIX)).wrapping_add(trial.wrapping_mul(TRIAL_MIX))
}

pub fn trial_rng(master_seed: u64, scenario: Scenario, path: StreamPath, trial: u64) -> TrialRng {
    Pcg64Mcg::seed_from_u64(derive_seed(master_seed, scenario, path, trial))
}

/// `Normal::new` mirrors a negative std dev instead of rejecting it, so the
/// parameters are checked first.
pub fn normal(mean: f64, std_dev: f64) -> SimResult<Normal<f64>> {
    if !(mean.is_finite() && std_dev.is_finite() && std_dev >= 0.0) {
        return Err(SimError::Distribution(format!(
            "Normal({mean}, {std_dev}): std dev must be finite and non-negative"
        )));
    }
    Normal::new(mean, std_dev)
        .map_err(|e| SimError::Distribution(format!("Normal({mean}, {std_dev}): {e}")))
}

pub fn triangular(min: f64, mode: f64, max: f64) -> SimResult<Triangular<f64>> {
    Triangular::new(min, max, mode)
        .map_err(|e| SimError::Distribution(format!("Triangular({min}, {mode}, {max}): {e}")))
}

/// Half-open uniform on [low, high). `Uniform::new` panics on an empty
/// range, so the range is checked first.
pub fn uniform(low: f64, high: f64) -> SimResult<Uniform<f64>> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(SimError::Distribution(format!(
            "Uniform({low}, {high}): empty or non-finite range"
        )));
    }
    Ok(Uniform::new(low, high))
}

pub fn income_shock(income_growth: f64) -> SimResult<Normal<f64>> {
    normal(income_growth, INCOME_VOLATILITY)
}

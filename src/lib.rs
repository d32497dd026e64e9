//! Florida Housing Affordability Simulation Library
//!
//! Monte Carlo projection of whether a household can sustain housing costs
//! over a multi-year horizon, renting versus buying one of three home tiers,
//! under stochastic income, appreciation, insurance and rate shocks.
//!
//! ## Modules
//!
//! - `scenario`: housing tiers and regional multipliers
//! - `renting` / `buying`: per-trial simulators
//! - `timeline`: yearly percentile bands for projection charts
//! - `simulator`: `HousingSimulator`, the entry point (simulate, compare, timeline)
//! - `result` / `stats`: aggregation into `ResultRecord`s
//! - `recommend`: pick the best scenario from a comparison
//!
//! ## Usage
//!
//! ```bash
//! # Compare every scenario for the sample households
//! cargo run --bin compare --release
//!
//! # Compare every scenario for a household stored as JSON
//! cargo run --bin compare --release -- household.json
//!
//! # Print yearly percentile bands
//! cargo run --bin timeline --release
//! ```

pub mod buying;
pub mod config;
pub mod error;
pub mod household;
pub mod mortgage;
pub mod recommend;
pub mod renting;
pub mod result;
pub mod rng;
pub mod scenario;
pub mod simulator;
pub mod stats;
pub mod timeline;
pub mod trial;

pub use config::SimulatorConfig;
pub use error::{SimError, SimResult};
pub use household::Household;
pub use result::ResultRecord;
pub use scenario::{RegionAdjustment, Scenario, ScenarioParameters};
pub use simulator::HousingSimulator;
pub use timeline::Timeline;

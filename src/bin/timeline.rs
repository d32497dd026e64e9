//! Timeline Projection Binary
//!
//! Prints pessimistic / expected / optimistic bands per year for every
//! scenario of a sample household.
//!
//! ## Usage
//! ```bash
//! cargo run --bin timeline --release
//! ```

use anyhow::Result;

use housing_simulation::simulator::{DEFAULT_HORIZON_YEARS, DEFAULT_TIMELINE_SIMULATIONS};
use housing_simulation::{Household, HousingSimulator, Scenario};

fn main() -> Result<()> {
    env_logger::init();

    let household = Household {
        household_id: "HH-TIMELINE".to_string(),
        annual_income: 110_000.0,
        savings: 120_000.0,
        credit_score: 745.0,
        current_monthly_rent: 2_100.0,
        debt_to_income_ratio: 0.2,
        region: "Jacksonville".to_string(),
    };
    let simulator = HousingSimulator::default();

    println!("=======================================================");
    println!("  Housing Timeline Projection");
    println!("  {} paths, {} years", DEFAULT_TIMELINE_SIMULATIONS, DEFAULT_HORIZON_YEARS);
    println!("=======================================================");
    println!();

    for scenario in Scenario::all() {
        let timeline = simulator.simulate_timeline(
            &household,
            scenario,
            DEFAULT_TIMELINE_SIMULATIONS,
            DEFAULT_HORIZON_YEARS,
        )?;

        println!("Scenario: {}", scenario.name());
        println!("{}", "-".repeat(50));
        println!("| Year | Equity P5 | Equity P50 | Equity P95 | Cost P50 | Paid P50 |");
        println!("|------|-----------|------------|------------|----------|----------|");
        for (i, year) in timeline.years.iter().enumerate() {
            println!(
                "| {:4} | ${:8.0} | ${:9.0} | ${:9.0} | ${:7.0} | ${:7.0} |",
                year,
                timeline.equity.pessimistic[i],
                timeline.equity.expected[i],
                timeline.equity.optimistic[i],
                timeline.monthly_costs.expected[i],
                timeline.cumulative_costs.expected[i],
            );
        }
        println!();
    }

    Ok(())
}

//! Scenario Comparison Binary
//!
//! Runs every housing scenario for a household and prints the comparison
//! plus a recommendation.
//!
//! ## Usage
//! ```bash
//! cargo run --bin compare --release
//! cargo run --bin compare --release -- household.json [config.json]
//! ```

use anyhow::{Context, Result};
use std::env;
use std::fs;

use housing_simulation::recommend::recommend;
use housing_simulation::simulator::{DEFAULT_HORIZON_YEARS, DEFAULT_SIMULATIONS};
use housing_simulation::{Household, HousingSimulator, SimulatorConfig};

fn sample_households() -> Vec<Household> {
    vec![
        Household {
            household_id: "HH-STRETCHED".to_string(),
            annual_income: 60_000.0,
            savings: 5_000.0,
            credit_score: 640.0,
            current_monthly_rent: 1_500.0,
            debt_to_income_ratio: 0.35,
            region: "Tampa Bay".to_string(),
        },
        Household {
            household_id: "HH-MIDDLE".to_string(),
            annual_income: 95_000.0,
            savings: 55_000.0,
            credit_score: 720.0,
            current_monthly_rent: 1_900.0,
            debt_to_income_ratio: 0.22,
            region: "Orlando".to_string(),
        },
        Household {
            household_id: "HH-AFFLUENT".to_string(),
            annual_income: 150_000.0,
            savings: 100_000.0,
            credit_score: 780.0,
            current_monthly_rent: 2_800.0,
            debt_to_income_ratio: 0.15,
            region: "Miami-Dade".to_string(),
        },
    ]
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let households = match args.get(1) {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            vec![Household::from_json(&json)?]
        }
        None => sample_households(),
    };
    let config = match args.get(2) {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            SimulatorConfig::from_json(&json)?
        }
        None => SimulatorConfig::default(),
    };

    println!("=======================================================");
    println!("  Florida Housing Affordability");
    println!("  Monte Carlo Scenario Comparison");
    println!("=======================================================");
    println!();
    println!("Parameters:");
    println!("  Runs per scenario:       {}", DEFAULT_SIMULATIONS);
    println!("  Horizon:                 {} years", DEFAULT_HORIZON_YEARS);
    println!("  Income growth:           {:.1}%", config.income_growth * 100.0);
    println!("  Insurance increase mode: {:.1}%", config.insurance_increase * 100.0);
    println!("  Affordability threshold: {:.0}%", config.affordability_threshold * 100.0);
    println!("  Seed:                    {}", config.random_seed);
    println!();

    let simulator = HousingSimulator::new(config)?;

    for household in &households {
        println!("=======================================================");
        println!(
            "Household {} (${:.0} income, ${:.0} savings, {:.0} credit, {})",
            household.household_id,
            household.annual_income,
            household.savings,
            household.credit_score,
            household.region
        );
        println!("=======================================================");
        println!();

        let comparison =
            simulator.compare_scenarios(household, DEFAULT_SIMULATIONS, DEFAULT_HORIZON_YEARS)?;

        println!("| Scenario          | Affordable | Default | Mean Equity | Mean Total Cost | Months |");
        println!("|-------------------|------------|---------|-------------|-----------------|--------|");
        for (scenario, record) in &comparison {
            println!(
                "| {:17} | {:9.1}% | {:6.1}% | ${:10.0} | ${:14.0} | {:6.0} |",
                scenario.name(),
                record.probability_affordable * 100.0,
                record.probability_default * 100.0,
                record.equity_built.mean,
                record.total_cost_paid.mean,
                record.mean_affordable_months,
            );
        }
        println!();

        if let Some(rec) = recommend(&comparison) {
            println!("Recommendation:");
            println!("  Most affordable:         {}", rec.most_affordable);
            match rec.lowest_default_risk {
                Some(scenario) => println!("  Lowest default risk:     {}", scenario),
                None => println!("  Lowest default risk:     n/a"),
            }
            println!("  Highest equity:          {}", rec.highest_equity);
            println!();
        }
    }

    Ok(())
}

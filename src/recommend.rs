//! Single-household recommendation over a scenario comparison.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::result::ResultRecord;
use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub most_affordable: Scenario,
    /// Renting carries no default model, so only purchases compete here.
    pub lowest_default_risk: Option<Scenario>,
    pub highest_equity: Scenario,
}

/// Ties keep the earlier scenario in catalog order. `None` for an empty
/// comparison.
pub fn recommend(comparison: &BTreeMap<Scenario, ResultRecord>) -> Option<Recommendation> {
    let most_affordable = best_by(comparison.values(), |r| r.probability_affordable)?;
    let highest_equity = best_by(comparison.values(), |r| r.equity_built.mean)?;
    let lowest_default_risk = best_by(
        comparison.values().filter(|r| r.scenario.is_purchase()),
        |r| -r.probability_default,
    );

    Some(Recommendation {
        most_affordable,
        lowest_default_risk,
        highest_equity,
    })
}

fn best_by<'a>(
    records: impl Iterator<Item = &'a ResultRecord>,
    score: impl Fn(&ResultRecord) -> f64,
) -> Option<Scenario> {
    let mut best: Option<(Scenario, f64)> = None;
    for record in records {
        let value = score(record);
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((record.scenario, value)),
        }
    }
    best.map(|(scenario, _)| scenario)
}

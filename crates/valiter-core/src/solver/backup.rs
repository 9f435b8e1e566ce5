use serde::{Deserialize, Serialize};
use valiter_model::{NodeKind, State};

use crate::solver::config::{Objective, SolverConfig};

/// Which Bellman update a sweep applies to non-terminal states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backup {
    /// Every out-edge is its own action:
    /// `best over (s -> s', p) of reward(s) + df * p * value(s')`.
    #[default]
    EdgeMax,
    /// Chance nodes take the expectation over their edges. Decision nodes
    /// pick the primary edge that gives the best expectation when the
    /// success rate goes to it and the remainder is split over the rest.
    Expected,
}

/// Compute the next value of `state` from the previous sweep's `values`.
pub(crate) fn backup(state: &State, values: &[f64], config: &SolverConfig) -> f64 {
    match (state.kind(), config.backup) {
        (NodeKind::Terminal, _) => state.reward(),
        (_, Backup::EdgeMax) => edge_max(state, values, config),
        (NodeKind::Chance, Backup::Expected) => {
            let expected: f64 = state
                .transitions()
                .iter()
                .map(|t| t.probability * values[t.target.index()])
                .sum();
            state.reward() + config.discount_factor * expected
        }
        (NodeKind::Decision { success }, Backup::Expected) => {
            decision_expected(state, success, values, config)
        }
    }
}

fn edge_max(state: &State, values: &[f64], config: &SolverConfig) -> f64 {
    // reward(s) sits inside each candidate, so it does not change which edge wins.
    let candidates = state.transitions().iter().map(|t| {
        state.reward() + config.discount_factor * t.probability * values[t.target.index()]
    });
    best(config.objective, candidates).unwrap_or_else(|| state.reward())
}

fn decision_expected(state: &State, success: f64, values: &[f64], config: &SolverConfig) -> f64 {
    let transitions = state.transitions();
    let others = transitions.len().saturating_sub(1);
    let failure = if others == 0 {
        0.0
    } else {
        (1.0 - success) / others as f64
    };
    let total: f64 = transitions.iter().map(|t| values[t.target.index()]).sum();

    let candidates = transitions.iter().map(|t| {
        let chosen = values[t.target.index()];
        success * chosen + failure * (total - chosen)
    });
    match best(config.objective, candidates) {
        Some(expected) => state.reward() + config.discount_factor * expected,
        None => state.reward(),
    }
}

/// First best candidate under `objective`.
pub(crate) fn best(objective: Objective, candidates: impl IntoIterator<Item = f64>) -> Option<f64> {
    candidates.into_iter().fold(None, |incumbent, candidate| match incumbent {
        Some(current) if !objective.prefers(candidate, current) => Some(current),
        _ => Some(candidate),
    })
}

use std::collections::BTreeMap;

use valiter_model::{Model, StateKey};

use crate::solver::config::Objective;

/// Recommended successor for every non-terminal state.
///
/// Terminal states have no entry. A non-terminal entry is `None` when no
/// successor had a comparable value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Policy {
    actions: BTreeMap<StateKey, Option<StateKey>>,
}

impl Policy {
    /// Return the chosen successor of `state`, if any.
    pub fn action(&self, state: StateKey) -> Option<StateKey> {
        self.actions.get(&state).copied().flatten()
    }

    /// Whether `state` has an entry (every non-terminal state does).
    pub fn contains(&self, state: StateKey) -> bool {
        self.actions.contains_key(&state)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate entries in model order.
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, Option<StateKey>)> + '_ {
        self.actions.iter().map(|(state, action)| (*state, *action))
    }
}

/// Pick, for each non-terminal state, the successor whose own value is best.
///
/// This is a greedy one-step lookahead on successor values; transition
/// probabilities and the state's reward play no part. Ties go to the edge
/// declared first.
pub fn extract_policy(model: &Model, objective: Objective) -> Policy {
    let mut actions = BTreeMap::new();

    for (key, state) in model.iter() {
        if state.is_terminal() {
            continue;
        }

        let mut best: Option<(StateKey, f64)> = None;
        for transition in state.transitions() {
            let Some(next) = model.state(transition.target) else {
                continue;
            };
            let value = next.value();
            if value.is_nan() {
                continue;
            }
            best = match best {
                Some((_, current)) if !objective.prefers(value, current) => best,
                _ => Some((transition.target, value)),
            };
        }

        actions.insert(key, best.map(|(target, _)| target));
    }

    Policy { actions }
}

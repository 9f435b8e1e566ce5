use std::fmt;

use serde::Serialize;
use valiter_model::{Model, NodeKind};

use crate::solver::{config::SolverConfig, iteration::SolveOutcome, policy::Policy};

/// Per-state line of a [`SolveReport`].
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    pub name: String,
    pub reward: f64,
    pub value: f64,
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Recommended successor; absent for terminal states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

/// Serializable summary of one solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub config: SolverConfig,
    pub outcome: SolveOutcome,
    pub states: Vec<StateReport>,
}

impl SolveReport {
    pub fn new(model: &Model, config: &SolverConfig, outcome: SolveOutcome, policy: &Policy) -> Self {
        let states = model
            .iter()
            .map(|(key, state)| StateReport {
                name: state.name().to_string(),
                reward: state.reward(),
                value: state.value(),
                kind: state.kind(),
                policy: policy
                    .action(key)
                    .and_then(|next| model.name(next))
                    .map(str::to_string),
            })
            .collect();

        SolveReport {
            config: config.clone(),
            outcome,
            states,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One `state -> next` line per policy entry, `None` when unset.
pub fn format_policy(model: &Model, policy: &Policy) -> String {
    policy
        .iter()
        .map(|(state, action)| {
            let from = model.name(state).unwrap_or("?");
            let to = action.and_then(|a| model.name(a)).unwrap_or("None");
            format!("{from} -> {to}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `name=value` pairs to three decimals, space separated, in model order.
pub fn format_values(model: &Model) -> String {
    model
        .iter()
        .map(|(_, state)| format!("{}={:.3}", state.name(), state.value()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Displays every state with its reward and transitions, one per line.
pub struct ModelDump<'a>(pub &'a Model);

impl fmt::Display for ModelDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;
        for (_, state) in model.iter() {
            write!(
                f,
                "State: {}, Reward: {:?}, Transitions: {{",
                state.name(),
                state.reward()
            )?;
            for transition in state.transitions() {
                let target = model.name(transition.target).unwrap_or("?");
                write!(f, " [{target} -> {:?}]", transition.probability)?;
            }
            writeln!(f, " }}")?;
        }
        Ok(())
    }
}

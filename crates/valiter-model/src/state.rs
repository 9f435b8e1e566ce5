use serde::Serialize;

use crate::StateKey;

#[derive(Debug, Clone, Copy, PartialEq)]
/// One outgoing edge of a state.
pub struct Transition {
    pub target: StateKey,
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// The last probability record applied to a state.
pub enum ProbabilityRecord {
    /// Single success rate on the primary edge, failure spread over the rest.
    Decision { success: f64 },
    /// One probability per edge, assigned in declaration order.
    Chance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
/// Role of a state in the graph, derived from its edges and probability record.
pub enum NodeKind {
    Terminal,
    /// A state with edges but no probability record is a deterministic
    /// decision (`success == 1.0`).
    Decision { success: f64 },
    Chance,
}

#[derive(Debug, Clone)]
/// A named node with a declared reward, a solved value and ordered out-edges.
pub struct State {
    name: String,
    reward: f64,
    value: f64,
    transitions: Vec<Transition>,
    record: Option<ProbabilityRecord>,
}

impl State {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        State {
            name: name.into(),
            reward: 0.0,
            value: 0.0,
            transitions: Vec::new(),
            record: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reward declared by the input; never touched by the solver.
    pub fn reward(&self) -> f64 {
        self.reward
    }

    /// Latest value estimate. Equals the reward until a solver writes it.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Outgoing edges in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn probability_record(&self) -> Option<ProbabilityRecord> {
        self.record
    }

    /// A state without out-edges is terminal.
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn kind(&self) -> NodeKind {
        if self.is_terminal() {
            return NodeKind::Terminal;
        }
        match self.record {
            Some(ProbabilityRecord::Chance) => NodeKind::Chance,
            Some(ProbabilityRecord::Decision { success }) => NodeKind::Decision { success },
            None => NodeKind::Decision { success: 1.0 },
        }
    }

    /// The edge a decision record applies its success rate to: the first
    /// edge declared for this state.
    pub fn primary_edge(&self) -> Option<&Transition> {
        self.transitions.first()
    }

    /// Probability of the edge to `target`, if such an edge exists.
    pub fn probability_to(&self, target: StateKey) -> Option<f64> {
        self.transitions
            .iter()
            .find(|t| t.target == target)
            .map(|t| t.probability)
    }

    /// Sum of all outgoing probabilities.
    pub fn outgoing_mass(&self) -> f64 {
        self.transitions.iter().map(|t| t.probability).sum()
    }

    pub(crate) fn set_reward(&mut self, reward: f64) {
        self.reward = reward;
        self.value = reward;
    }

    /// Append an edge at probability 0.0. A repeated target keeps its
    /// position and has its probability reset.
    pub(crate) fn add_edge(&mut self, target: StateKey) {
        match self.transitions.iter_mut().find(|t| t.target == target) {
            Some(existing) => existing.probability = 0.0,
            None => self.transitions.push(Transition {
                target,
                probability: 0.0,
            }),
        }
    }

    pub(crate) fn apply_decision(&mut self, success: f64) {
        let others = self.transitions.len().saturating_sub(1);
        let failure = if others == 0 {
            0.0
        } else {
            (1.0 - success) / others as f64
        };
        for (idx, transition) in self.transitions.iter_mut().enumerate() {
            transition.probability = if idx == 0 { success } else { failure };
        }
        self.record = Some(ProbabilityRecord::Decision { success });
    }

    pub(crate) fn apply_chance(&mut self, probabilities: &[f64]) {
        for (transition, p) in self.transitions.iter_mut().zip(probabilities) {
            transition.probability = *p;
        }
        self.record = Some(ProbabilityRecord::Chance);
    }
}

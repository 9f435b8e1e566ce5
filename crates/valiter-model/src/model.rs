use tracing::trace;

use crate::{RecordError, State, interner::NameInterner};

/// Default tolerance for [`Model::check_distributions`].
pub const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Dense index of a state, assigned in first-mention order.
pub struct StateKey(usize);

impl StateKey {
    /// Return the underlying state index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A state whose outgoing probabilities do not sum to 1.0.
pub struct DistributionMismatch {
    pub state: StateKey,
    pub name: String,
    pub sum: f64,
}

#[derive(Debug, Clone, Default)]
/// Graph of named states with rewards and ordered transition probabilities.
pub struct Model {
    states: Vec<State>,
    interner: NameInterner,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, key: StateKey) -> Option<&State> {
        self.states.get(key.index())
    }

    pub fn state_mut(&mut self, key: StateKey) -> Option<&mut State> {
        self.states.get_mut(key.index())
    }

    /// Look up a state by name.
    pub fn get(&self, name: &str) -> Option<&State> {
        self.key_of(name).and_then(|key| self.state(key))
    }

    /// Convert a state name into its key.
    pub fn key_of(&self, name: &str) -> Option<StateKey> {
        self.interner.key_of(name)
    }

    /// Convert a key back to its state name.
    pub fn name(&self, key: StateKey) -> Option<&str> {
        self.interner.get(key)
    }

    /// Iterate states in first-mention order.
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (StateKey::from(idx), state))
    }

    pub fn keys(&self) -> impl Iterator<Item = StateKey> + '_ {
        (0..self.states.len()).map(StateKey::from)
    }

    /// Return the key of `name`, creating the state if it does not exist yet.
    pub fn ensure_state(&mut self, name: &str) -> Result<StateKey, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyStateName);
        }
        let (key, created) = self.interner.intern(name);
        if created {
            trace!(state = name, key = key.index(), "created state");
            self.states.push(State::new(name));
        }
        Ok(key)
    }

    /// Apply a reward record.
    pub fn set_reward(&mut self, name: &str, reward: f64) -> Result<StateKey, RecordError> {
        ensure_finite(reward)?;
        let key = self.ensure_state(name)?;
        self.states[key.index()].set_reward(reward);
        Ok(key)
    }

    /// Apply an edge record. Edges accumulate across records and start at
    /// probability 0.0.
    pub fn add_edges<I, S>(&mut self, name: &str, targets: I) -> Result<StateKey, RecordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = self.ensure_state(name)?;
        for target in targets {
            let target = self.ensure_state(target.as_ref())?;
            self.states[key.index()].add_edge(target);
        }
        Ok(key)
    }

    /// Apply a probability record: one value makes a decision node, more
    /// make a chance node.
    pub fn assign_probabilities(
        &mut self,
        name: &str,
        probabilities: &[f64],
    ) -> Result<StateKey, RecordError> {
        match probabilities {
            [] => Err(RecordError::MissingProbabilities {
                state: name.trim().to_string(),
            }),
            [success] => self.assign_decision(name, *success),
            _ => self.assign_chance(name, probabilities),
        }
    }

    /// Give the primary edge `success` and split `1 - success` evenly over
    /// the remaining edges.
    pub fn assign_decision(&mut self, name: &str, success: f64) -> Result<StateKey, RecordError> {
        ensure_finite(success)?;
        let key = self.existing(name)?;
        let state = &mut self.states[key.index()];
        if state.is_terminal() {
            return Err(RecordError::NoEdges {
                state: state.name().to_string(),
            });
        }
        state.apply_decision(success);
        Ok(key)
    }

    /// Assign one probability per edge in declaration order.
    pub fn assign_chance(
        &mut self,
        name: &str,
        probabilities: &[f64],
    ) -> Result<StateKey, RecordError> {
        for p in probabilities {
            ensure_finite(*p)?;
        }
        let key = self.existing(name)?;
        let state = &mut self.states[key.index()];
        if state.transitions().len() != probabilities.len() {
            return Err(RecordError::ProbabilityCount {
                state: state.name().to_string(),
                edges: state.transitions().len(),
                probabilities: probabilities.len(),
            });
        }
        state.apply_chance(probabilities);
        Ok(key)
    }

    /// Report non-terminal states whose outgoing mass is further than
    /// `tolerance` from 1.0. Nothing is rejected.
    pub fn check_distributions(&self, tolerance: f64) -> Vec<DistributionMismatch> {
        self.iter()
            .filter(|(_, state)| !state.is_terminal())
            .filter_map(|(key, state)| {
                let sum = state.outgoing_mass();
                ((sum - 1.0).abs() > tolerance).then(|| DistributionMismatch {
                    state: key,
                    name: state.name().to_string(),
                    sum,
                })
            })
            .collect()
    }

    fn existing(&self, name: &str) -> Result<StateKey, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyStateName);
        }
        self.key_of(name).ok_or_else(|| RecordError::UnknownState {
            state: name.to_string(),
        })
    }
}

fn ensure_finite(value: f64) -> Result<(), RecordError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RecordError::InvalidNumber {
            token: value.to_string(),
        })
    }
}

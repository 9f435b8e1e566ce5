use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};
use valiter_model::{Model, StateKey};

use crate::solver::{backup::backup, config::SolverConfig};

/// Metrics emitted after every sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepMetrics {
    /// 1-based sweep number.
    pub sweep: usize,
    /// Largest `|new - old|` over all states in this sweep.
    pub max_delta: f64,
    pub converged: bool,
}

impl fmt::Display for SweepMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sweep {}: max delta {:.6}", self.sweep, self.max_delta)?;
        if self.converged {
            write!(f, " (converged)")?;
        }
        Ok(())
    }
}

/// Result of a solve. Hitting the sweep cap is reported here, not as an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolveOutcome {
    pub sweeps: usize,
    pub converged: bool,
    pub max_delta: f64,
}

/// Run value iteration and write the final values into `model`.
pub fn solve(model: &mut Model, config: &SolverConfig) -> SolveOutcome {
    solve_with_hook(model, config, |_| {})
}

/// Run value iteration and invoke a callback after each completed sweep.
///
/// Sweeps are synchronous: every new value is computed from the previous
/// sweep's values before any of them is committed. The model's declared
/// rewards are never modified; only each state's `value` is written.
pub fn solve_with_hook<F>(model: &mut Model, config: &SolverConfig, mut on_sweep: F) -> SolveOutcome
where
    F: FnMut(&SweepMetrics),
{
    let mut values: Vec<f64> = model
        .iter()
        .map(|(_, state)| config.initial_value(state.reward()))
        .collect();
    let mut next = vec![0.0; values.len()];
    let mut outcome = SolveOutcome {
        sweeps: 0,
        converged: false,
        max_delta: 0.0,
    };

    for sweep in 1..=config.max_iterations {
        let mut max_delta = 0.0_f64;
        let mut converged = true;

        for (key, state) in model.iter() {
            let old = values[key.index()];
            let new = backup(state, &values, config);
            let delta = (new - old).abs();
            // NaN deltas never count as converged.
            if !(delta <= config.tolerance) {
                converged = false;
            }
            max_delta = max_delta.max(delta);
            next[key.index()] = new;
            trace!(sweep, state = state.name(), old, new, "backup");
        }

        std::mem::swap(&mut values, &mut next);

        let metrics = SweepMetrics {
            sweep,
            max_delta,
            converged,
        };
        debug!(sweep, max_delta, converged, "value iteration sweep");
        on_sweep(&metrics);

        outcome = SolveOutcome {
            sweeps: sweep,
            converged,
            max_delta,
        };
        if converged {
            break;
        }
    }

    for (idx, value) in values.into_iter().enumerate() {
        if let Some(state) = model.state_mut(StateKey::from(idx)) {
            state.set_value(value);
        }
    }

    debug!(
        sweeps = outcome.sweeps,
        converged = outcome.converged,
        "value iteration finished"
    );
    outcome
}

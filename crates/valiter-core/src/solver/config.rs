use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::solver::backup::Backup;

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// Whether the solver looks for the highest or the lowest value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    #[default]
    Maximize,
    /// Treat values as costs.
    Minimize,
}

impl Objective {
    /// Return true if `candidate` should replace `incumbent`. Ties keep the incumbent.
    pub fn prefers(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }
}

/// Configuration for value iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub discount_factor: f64,
    pub objective: Objective,
    pub backup: Backup,
    /// Starting estimate for states whose reward is exactly zero.
    pub zero_reward_init: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 0.01,
            max_iterations: 100,
            discount_factor: 1.0,
            objective: Objective::Maximize,
            backup: Backup::EdgeMax,
            zero_reward_init: 0.1,
        }
    }
}

impl SolverConfig {
    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a solver config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolverConfigError> {
        let yaml = fs::read_to_string(path).map_err(SolverConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check value ranges. Called by every loader; call it again after
    /// overriding fields by hand.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(SolverConfigError::Invalid(
                "tolerance must be greater than 0".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SolverConfigError::Invalid(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if !self.discount_factor.is_finite() || self.discount_factor < 0.0 {
            return Err(SolverConfigError::Invalid(
                "discount_factor must be finite and >= 0".to_string(),
            ));
        }
        if !self.zero_reward_init.is_finite() {
            return Err(SolverConfigError::Invalid(
                "zero_reward_init must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Starting estimate for a state with the given reward.
    pub(crate) fn initial_value(&self, reward: f64) -> f64 {
        if reward != 0.0 {
            reward
        } else {
            self.zero_reward_init
        }
    }
}

/// Error type for loading and validating `SolverConfig`.
#[derive(Debug)]
pub enum SolverConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SolverConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolverConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
        }
    }
}

impl std::error::Error for SolverConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverConfigError::Io(err) => Some(err),
            SolverConfigError::Yaml(err) => Some(err),
            SolverConfigError::Invalid(_) => None,
        }
    }
}

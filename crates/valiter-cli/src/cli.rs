use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use valiter_core::{Backup, Objective, SolverConfig, SolverConfigError};

#[derive(Parser, Debug)]
#[command(name = "valiter")]
#[command(about = "Solve a text-defined MDP with value iteration")]
pub struct Cli {
    /// Model definition file, or `-` to read standard input
    pub input: PathBuf,

    /// Discount factor applied to successor values
    #[arg(long = "df")]
    pub discount_factor: Option<f64>,

    /// Minimize instead of maximize
    #[arg(long = "min")]
    pub minimize: bool,

    /// Convergence tolerance on per-state value change
    #[arg(long = "tol")]
    pub tolerance: Option<f64>,

    /// Maximum number of sweeps
    #[arg(long = "iter")]
    pub max_iterations: Option<usize>,

    /// Bellman update used for non-terminal states
    #[arg(long, value_enum)]
    pub backup: Option<BackupArg>,

    /// Base solver config (YAML); flags above override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Print one line per sweep
    #[arg(long)]
    pub trace: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackupArg {
    EdgeMax,
    Expected,
}

impl From<BackupArg> for Backup {
    fn from(value: BackupArg) -> Self {
        match value {
            BackupArg::EdgeMax => Backup::EdgeMax,
            BackupArg::Expected => Backup::Expected,
        }
    }
}

impl Cli {
    /// Resolve the solver config: YAML file or built-in defaults, then flags.
    pub fn solver_config(&self) -> Result<SolverConfig, SolverConfigError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::from_yaml_path(path)?,
            None => SolverConfig::from_default_yaml()?,
        };

        if let Some(df) = self.discount_factor {
            config.discount_factor = df;
        }
        if let Some(tol) = self.tolerance {
            config.tolerance = tol;
        }
        if let Some(iter) = self.max_iterations {
            config.max_iterations = iter;
        }
        if let Some(backup) = self.backup {
            config.backup = backup.into();
        }
        if self.minimize {
            config.objective = Objective::Minimize;
        }

        config.validate()?;
        Ok(config)
    }

    /// Default log level for the verbosity count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

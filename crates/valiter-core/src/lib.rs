mod solver;

pub use solver::backup::Backup;
pub use solver::config::{Objective, SolverConfig, SolverConfigError};
pub use solver::iteration::{SolveOutcome, SweepMetrics, solve, solve_with_hook};
pub use solver::policy::{Policy, extract_policy};
pub use solver::report::{ModelDump, SolveReport, StateReport, format_policy, format_values};

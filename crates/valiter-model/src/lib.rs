mod builder;
mod error;
mod interner;
mod io;
mod model;
mod parser;
mod state;

pub use builder::ModelBuilder;
pub use error::{ModelError, RecordError};
pub use io::load_path;
pub use model::{DistributionMismatch, Model, PROB_TOLERANCE, StateKey};
pub use parser::{parse_reader, parse_str};
pub use state::{NodeKind, ProbabilityRecord, State, Transition};

#[cfg(test)]
mod tests;

use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for model loading and builder operations.
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source} in `{content}`")]
    Malformed {
        line: usize,
        content: String,
        #[source]
        source: RecordError,
    },

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl ModelError {
    /// Return the record-level reason, if this error came from a record.
    pub fn reason(&self) -> Option<&RecordError> {
        match self {
            ModelError::Io(_) => None,
            ModelError::Malformed { source, .. } => Some(source),
            ModelError::Record(reason) => Some(reason),
        }
    }

    /// Return the 1-based input line of a malformed record.
    pub fn line(&self) -> Option<usize> {
        match self {
            ModelError::Malformed { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
/// Why a single reward, edge, or probability record was rejected.
pub enum RecordError {
    #[error("expected one of '=', ':' or '%'")]
    UnrecognizedRecord,

    #[error("record mixes delimiters '{first}' and '{second}'")]
    AmbiguousRecord { first: char, second: char },

    #[error("missing state name")]
    EmptyStateName,

    #[error("invalid number '{token}'")]
    InvalidNumber { token: String },

    #[error("probability record references undeclared state '{state}'")]
    UnknownState { state: String },

    #[error("probability record for state '{state}' has no values")]
    MissingProbabilities { state: String },

    #[error("state '{state}' has no edges to assign a success rate to")]
    NoEdges { state: String },

    #[error("state '{state}' declares {edges} edges but {probabilities} probabilities were given")]
    ProbabilityCount {
        state: String,
        edges: usize,
        probabilities: usize,
    },
}

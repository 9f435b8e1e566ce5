use std::io::BufRead;

use tracing::debug;

use crate::{Model, ModelError, RecordError};

/// One non-comment line of the model format.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Record<'a> {
    /// `name = number`
    Reward { name: &'a str, reward: f64 },
    /// `name : [a, b, c]`
    Edges { name: &'a str, targets: Vec<&'a str> },
    /// `name % p` or `name % p1 p2 ...`
    Probabilities { name: &'a str, values: Vec<f64> },
}

/// Delimiters in the order they decide a record's kind.
const DELIMITERS: [char; 3] = ['=', ':', '%'];

/// Parse a whole model definition held in memory.
pub fn parse_str(input: &str) -> Result<Model, ModelError> {
    let mut model = Model::new();
    for (idx, line) in input.lines().enumerate() {
        apply_line(&mut model, idx + 1, line)?;
    }
    debug!(states = model.len(), "model parsed");
    Ok(model)
}

/// Parse a model definition line by line from any buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Model, ModelError> {
    let mut model = Model::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        apply_line(&mut model, idx + 1, &line)?;
    }
    debug!(states = model.len(), "model parsed");
    Ok(model)
}

fn apply_line(model: &mut Model, line_no: usize, line: &str) -> Result<(), ModelError> {
    let text = strip_comment(line);
    if text.is_empty() {
        return Ok(());
    }

    parse_record(text)
        .and_then(|record| apply_record(model, record))
        .map_err(|source| ModelError::Malformed {
            line: line_no,
            content: line.trim().to_string(),
            source,
        })
}

/// Drop everything from the first `#` and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    match line.split_once('#') {
        Some((before, _)) => before.trim(),
        None => line.trim(),
    }
}

pub(crate) fn parse_record(text: &str) -> Result<Record<'_>, RecordError> {
    let mut present = DELIMITERS.iter().copied().filter(|d| text.contains(*d));
    let delimiter = present.next().ok_or(RecordError::UnrecognizedRecord)?;
    if let Some(second) = present.next() {
        return Err(RecordError::AmbiguousRecord {
            first: delimiter,
            second,
        });
    }

    let (name, body) = text
        .split_once(delimiter)
        .ok_or(RecordError::UnrecognizedRecord)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(RecordError::EmptyStateName);
    }

    match delimiter {
        '=' => Ok(Record::Reward {
            name,
            reward: parse_number(body.trim())?,
        }),
        ':' => Ok(Record::Edges {
            name,
            targets: body
                .split(',')
                .map(|t| t.trim().trim_matches(['[', ']']).trim())
                .filter(|t| !t.is_empty())
                .collect(),
        }),
        _ => Ok(Record::Probabilities {
            name,
            values: body
                .split_whitespace()
                .map(parse_number)
                .collect::<Result<_, _>>()?,
        }),
    }
}

fn apply_record(model: &mut Model, record: Record<'_>) -> Result<(), RecordError> {
    match record {
        Record::Reward { name, reward } => {
            model.set_reward(name, reward)?;
            debug!(state = name, reward, "reward record");
        }
        Record::Edges { name, targets } => {
            model.add_edges(name, &targets)?;
            debug!(state = name, edges = targets.len(), "edge record");
        }
        Record::Probabilities { name, values } => {
            model.assign_probabilities(name, &values)?;
            debug!(state = name, values = values.len(), "probability record");
        }
    }
    Ok(())
}

fn parse_number(token: &str) -> Result<f64, RecordError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber {
            token: token.to_string(),
        })
}

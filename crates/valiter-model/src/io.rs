use std::{fs, path::Path};

use crate::{Model, ModelError, parse_str};

/// Load and parse a model definition from disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<Model, ModelError> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

use crate::{Model, ModelError};

#[derive(Debug, Clone, Default)]
/// Builds a model in code with the same semantics as the text records.
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as a `name = reward` record.
    pub fn reward(&mut self, name: impl AsRef<str>, reward: f64) -> Result<&mut Self, ModelError> {
        self.model.set_reward(name.as_ref(), reward)?;
        Ok(self)
    }

    /// Same as a `name : [targets]` record.
    /// Calling it again for the same state appends more edges.
    pub fn edges<I, S>(&mut self, name: impl AsRef<str>, targets: I) -> Result<&mut Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.model.add_edges(name.as_ref(), targets)?;
        Ok(self)
    }

    /// Same as a `name % success` record.
    pub fn decision(&mut self, name: impl AsRef<str>, success: f64) -> Result<&mut Self, ModelError> {
        self.model.assign_decision(name.as_ref(), success)?;
        Ok(self)
    }

    /// Same as a `name % p1 p2 ...` record.
    pub fn chance(
        &mut self,
        name: impl AsRef<str>,
        probabilities: impl IntoIterator<Item = f64>,
    ) -> Result<&mut Self, ModelError> {
        let probabilities: Vec<f64> = probabilities.into_iter().collect();
        self.model.assign_chance(name.as_ref(), &probabilities)?;
        Ok(self)
    }

    pub fn build(self) -> Model {
        self.model
    }
}

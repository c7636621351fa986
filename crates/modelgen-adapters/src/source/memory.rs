//! In-memory model source for testing and embedding.

use modelgen_core::{application::ports::ModelSource, domain::Model, error::ModelgenResult};

/// Serves an already-built model.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    model: Model,
    label: String,
}

impl InMemorySource {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            label: "<memory>".into(),
        }
    }

    /// Override the label returned by `describe`.
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl ModelSource for InMemorySource {
    fn load(&self) -> ModelgenResult<Model> {
        Ok(self.model.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `modelgen-adapters` crate provides implementations.

use crate::domain::Model;
use crate::error::ModelgenResult;

/// Port for obtaining a model.
///
/// Implemented by:
/// - `modelgen_adapters::source::FileModelSource` (single TOML/JSON document)
/// - `modelgen_adapters::source::DirectoryModelSource` (tree of documents)
/// - `modelgen_adapters::source::InMemorySource` (testing, embedding)
#[cfg_attr(test, mockall::automock)]
pub trait ModelSource: Send + Sync {
    /// Load and build the model.
    ///
    /// The returned model has passed construction checks but not
    /// whole-model validation.
    fn load(&self) -> ModelgenResult<Model>;

    /// Human-readable description of where the model comes from.
    fn describe(&self) -> String;
}

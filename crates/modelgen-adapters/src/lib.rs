//! Infrastructure adapters for modelgen.
//!
//! This crate implements the ports defined in `modelgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod model_loader;
pub mod source;

// Re-export commonly used adapters
pub use model_loader::{DocumentFormat, ModelDocument};
pub use source::{DirectoryModelSource, FileModelSource, InMemorySource};

use std::path::Path;

use modelgen_core::application::ports::ModelSource;

/// Pick a source for `path`: a directory tree or a single document.
pub fn source_for(path: &Path) -> Box<dyn ModelSource> {
    if path.is_dir() {
        Box::new(DirectoryModelSource::new(path))
    } else {
        Box::new(FileModelSource::new(path))
    }
}

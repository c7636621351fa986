//! Application layer for modelgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ModelService, ResolveService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! model logic itself. All model rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services and their DTOs
pub use services::{
    EntityRelations, ModelReport, ModelService, ModuleInfo, RelationView, ResolveService,
    ResolvedEntity, ResolvedModule,
};

// Re-export port traits (for adapter implementation)
pub use ports::ModelSource;

pub use error::ApplicationError;

//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "load and check a model" or "resolve a module".

pub mod model_service;
pub mod resolve_service;

pub use model_service::{ModelReport, ModelService, ModuleInfo};
pub use resolve_service::{
    EntityRelations, RelationView, ResolveService, ResolvedEntity, ResolvedModule,
};

//! modelgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the modelgen
//! scaffolding generator: the model registry, relation resolution,
//! inheritance flattening and the graph utilities emitters rely on.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           modelgen-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ModelService, ResolveService)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (Driven: ModelSource)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    modelgen-adapters (Infrastructure)   │
//! │ (FileModelSource, DirectoryModelSource) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Model, RelationMap, flatten, graph)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use modelgen_core::prelude::*;
//!
//! let model = ModelBuilder::new()
//!     .module(
//!         ModuleDecl::new("Sales")
//!             .entity(EntityDecl::new("Order").relation(
//!                 "items",
//!                 Cardinality::OneToMany,
//!                 "LineItem",
//!             ))
//!             .entity(EntityDecl::new("LineItem")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let sales = model.find_module("Sales").unwrap();
//! let map = resolve_relations(&model, sales.entities());
//! assert_eq!(map.record_count(), 2);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ModelReport, ModelService, ModuleInfo, ResolveService, ResolvedEntity, ResolvedModule,
        ports::ModelSource,
    };
    pub use crate::domain::{
        Attribute, Cardinality, CycleError, DataType, Entity, EntityDecl, EntityId, Flattened,
        ImportDecl, Model, ModelBuilder, ModuleDecl, RelationInfo, RelationMap, dependency_order,
        flatten, has_cycle, resolve_relations, topological_sort,
    };
    pub use crate::error::{ModelgenError, ModelgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builder;
pub mod common;
pub mod model;

pub use crate::domain::DomainError;
pub use builder::{EntityDecl, ImportDecl, ModelBuilder, ModuleDecl, RelationDecl};
pub use model::{Entity, Model, Module};

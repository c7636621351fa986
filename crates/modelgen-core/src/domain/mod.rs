// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for modelgen.
//!
//! This module contains pure model logic with no I/O. Loading models from
//! files is handled via ports defined in the application layer.
//!
//! ## Pipeline
//!
//! ```text
//! ModelBuilder ──build──▶ Model ──resolve_relations──▶ RelationMap
//!                           │                              │
//!                           └──────────flatten─────────────┴──▶ Flattened
//! ```
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Immutable after build**: `Model` and `RelationMap` expose read-only views
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod graph;
pub mod inheritance;
pub mod ordering;
pub mod relations;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    builder::{EntityDecl, ImportDecl, ModelBuilder, ModuleDecl, RelationDecl},
    common::{EntityId, ImportId, ModuleId, validate_identifier},
    model::{
        Attribute, Entity, EntityOrigin, EnumAttribute, EnumDef, Model, Module, ModuleImport,
        Relation, UnresolvedReference,
    },
};

pub use error::{DomainError, ErrorCategory};
pub use graph::{CycleError, has_cycle, topological_sort};
pub use inheritance::{Flattened, flatten, supertype_chain};
pub use ordering::dependency_order;
pub use relations::{RelationInfo, RelationMap, resolve_relations};
pub use value_objects::{Cardinality, DataType};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // End-to-end: build → resolve → flatten
    // ========================================================================

    fn shop() -> Model {
        ModelBuilder::new()
            .module(
                ModuleDecl::new("Shop")
                    .enumeration("Status", ["Open", "Paid", "Shipped"])
                    .entity(
                        EntityDecl::new("Document")
                            .abstract_entity()
                            .attribute(Attribute::new("created_at", DataType::Datetime)),
                    )
                    .entity(
                        EntityDecl::new("Order")
                            .extends("Document")
                            .attribute(Attribute::new("total", DataType::Decimal))
                            .enum_attribute("status", "Status")
                            .relation("items", Cardinality::OneToMany, "LineItem")
                            .relation("buyer", Cardinality::ManyToOne, "Customer"),
                    )
                    .entity(
                        EntityDecl::new("LineItem")
                            .attribute(Attribute::new("qty", DataType::Integer))
                            .relation("tags", Cardinality::ManyToMany, "Tag"),
                    )
                    .entity(EntityDecl::new("Customer").attribute(
                        Attribute::new("email", DataType::Email).unique(),
                    ))
                    .entity(EntityDecl::new("Tag")),
            )
            .build()
            .unwrap()
    }

    fn id(model: &Model, name: &str) -> EntityId {
        model.find_entity(name).unwrap().id()
    }

    #[test]
    fn each_resolved_declaration_yields_two_records() {
        let model = shop();
        let module = model.find_module("Shop").unwrap();
        let map = resolve_relations(&model, module.entities());

        // items, buyer, tags
        assert_eq!(map.record_count(), 6);
        assert_eq!(map.len(), module.entities().len());
    }

    #[test]
    fn order_flattens_document_then_own_data() {
        let model = shop();
        let module = model.find_module("Shop").unwrap();
        let map = resolve_relations(&model, module.entities());
        let order = id(&model, "Shop.Order");

        let flat = flatten(&model, order, &map).unwrap();
        let attrs: Vec<&str> = flat.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(attrs, vec!["created_at", "total"]);

        assert_eq!(flat.relations.len(), 2);
        assert_eq!(
            flat.relations[0],
            RelationInfo {
                target: id(&model, "Shop.LineItem"),
                cardinality: Cardinality::OneToMany,
                owner: false,
            }
        );
        assert_eq!(
            flat.relations[1],
            RelationInfo {
                target: id(&model, "Shop.Customer"),
                cardinality: Cardinality::ManyToOne,
                owner: true,
            }
        );
    }

    #[test]
    fn dependency_order_puts_document_before_order() {
        let model = shop();
        let module = model.find_module("Shop").unwrap().id();
        let order = dependency_order(&model, module).unwrap();

        let pos = |name: &str| order.iter().position(|e| *e == id(&model, name)).unwrap();
        assert!(pos("Shop.Document") < pos("Shop.Order"));
        assert_eq!(order.len(), 5);
    }

    #[test]
    fn shop_model_is_valid() {
        assert!(DomainValidator::validate_model(&shop()).is_ok());
    }
}

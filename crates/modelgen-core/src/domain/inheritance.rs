//! Inheritance flattening.
//!
//! An entity's *effective* attributes and relations are those of its whole
//! local supertype chain, ancestors first, followed by its own. Emitters
//! consume the flattened view; they never walk the chain themselves.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{
    entities::{
        common::EntityId,
        model::{Attribute, Model},
    },
    error::DomainError,
    relations::{RelationInfo, RelationMap},
};

/// Effective attributes and relations of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flattened<'m> {
    pub attributes: Vec<&'m Attribute>,
    pub relations: Vec<RelationInfo>,
}

/// Local supertype chain of `entity`, from the entity itself up to the root.
///
/// The walk stops at the first supertype that is unset or not local.
///
/// # Errors
///
/// [`DomainError::CyclicSupertype`] if an entity appears twice on the chain.
pub fn supertype_chain(model: &Model, entity: EntityId) -> Result<Vec<EntityId>, DomainError> {
    let mut chain = vec![entity];
    let mut visited = HashSet::from([entity]);
    let mut current = entity;

    while let Some(parent) = model.local_supertype(current) {
        if !visited.insert(parent) {
            return Err(DomainError::CyclicSupertype {
                entity: model.qualified_name(entity),
            });
        }
        chain.push(parent);
        current = parent;
    }

    Ok(chain)
}

/// Compute the effective attributes and relations of `entity`.
///
/// Ancestors missing from `relation_map` contribute no relations; their
/// attributes are still included.
///
/// # Errors
///
/// [`DomainError::CyclicSupertype`] if the supertype chain loops.
pub fn flatten<'m>(
    model: &'m Model,
    entity: EntityId,
    relation_map: &RelationMap,
) -> Result<Flattened<'m>, DomainError> {
    let chain = supertype_chain(model, entity)?;

    let mut flattened = Flattened {
        attributes: Vec::new(),
        relations: Vec::new(),
    };
    for id in chain.into_iter().rev() {
        flattened
            .attributes
            .extend(model.entity(id).attributes().iter());
        flattened
            .relations
            .extend_from_slice(relation_map.get(id));
    }

    Ok(flattened)
}

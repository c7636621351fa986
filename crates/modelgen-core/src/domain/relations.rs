//! Relation resolution: who points at whom, with which cardinality, and
//! which side owns the association.
//!
//! Every declared relation between two entities of the input set produces
//! two [`RelationInfo`] records, one per endpoint:
//!
//! | Declared on `A` → `B` | Owner | `owner` entry              | other entry                 |
//! |-----------------------|-------|----------------------------|-----------------------------|
//! | `OneToOne`            | `A`   | `A: {B, OneToOne}`         | `B: {A, OneToOne}`          |
//! | `ManyToOne`           | `A`   | `A: {B, ManyToOne}`        | `B: {A, OneToMany}`         |
//! | `ManyToMany`          | `A`   | `A: {B, ManyToMany}`       | `B: {A, ManyToMany}`        |
//! | `OneToMany`           | `B`   | `B: {A, ManyToOne}`        | `A: {B, OneToMany}`         |
//!
//! Relations whose target is outside the input set (unresolved, imported,
//! or declared in another module) produce nothing.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{
    entities::{common::EntityId, model::Model},
    value_objects::Cardinality,
};

/// One endpoint's view of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RelationInfo {
    /// The entity at the other end.
    pub target: EntityId,
    /// Cardinality from this endpoint's point of view.
    pub cardinality: Cardinality,
    /// Whether this endpoint owns the association.
    pub owner: bool,
}

/// Per-entity relation lists, built once by [`resolve_relations`].
///
/// The map is a read-only value: there is no way to change a list once it
/// has been built, so every consumer sees the same data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RelationMap {
    entries: BTreeMap<EntityId, Vec<RelationInfo>>,
}

impl RelationMap {
    /// Relations touching `entity`; empty if the entity is not in the map.
    pub fn get(&self, entity: EntityId) -> &[RelationInfo] {
        self.entries.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &[RelationInfo])> {
        self.entries.iter().map(|(id, list)| (*id, list.as_slice()))
    }

    /// Total number of records across all entities.
    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    fn add_pair(&mut self, owner: EntityId, non_owner: EntityId, cardinality: Cardinality) {
        if let Some(list) = self.entries.get_mut(&owner) {
            list.push(RelationInfo {
                target: non_owner,
                cardinality,
                owner: true,
            });
        }
        if let Some(list) = self.entries.get_mut(&non_owner) {
            list.push(RelationInfo {
                target: owner,
                cardinality: cardinality.mirror(),
                owner: false,
            });
        }
    }
}

/// Build the relation map for `entities`.
///
/// Every id in `entities` gets an entry, possibly empty. Relations are
/// processed in entity order, then declaration order, so the result is
/// deterministic for a given input.
pub fn resolve_relations(model: &Model, entities: &[EntityId]) -> RelationMap {
    let mut map = RelationMap {
        entries: entities.iter().map(|id| (*id, Vec::new())).collect(),
    };
    let local: HashSet<EntityId> = entities.iter().copied().collect();

    for &declarer in entities {
        for relation in model.entity(declarer).relations() {
            let Some(target) = relation.target.filter(|t| local.contains(t)) else {
                trace!(
                    entity = %model.entity(declarer).name(),
                    relation = %relation.name,
                    target = %relation.target_ref,
                    "Skipping relation to non-local target"
                );
                continue;
            };

            if relation.kind.owner_is_declarer() {
                map.add_pair(declarer, target, relation.kind);
            } else {
                map.add_pair(target, declarer, relation.kind.mirror());
            }
        }
    }

    debug!(
        entities = map.len(),
        records = map.record_count(),
        "Relation map built"
    );
    map
}

//! Resolve Service - the view emitters consume.
//!
//! For each module it builds the relation map once, orders the entities so
//! supertypes come first, and flattens every entity against that map. The
//! result is a plain, serializable description with entity ids replaced by
//! qualified names.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ApplicationError,
    domain::{
        Attribute, Cardinality, EntityId, Model, Module, RelationInfo, RelationMap,
        dependency_order, flatten, resolve_relations,
    },
    error::ModelgenResult,
};

/// A relation endpoint with the target rendered by qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationView {
    pub target: String,
    pub cardinality: Cardinality,
    pub owner: bool,
}

/// One entity with its inherited data folded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntity {
    pub name: String,
    pub qualified_name: String,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub supertype: Option<String>,
    pub attributes: Vec<Attribute>,
    pub relations: Vec<RelationView>,
}

/// Entities of one module, supertypes before subtypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModule {
    pub name: String,
    pub entities: Vec<ResolvedEntity>,
}

/// Relation records of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRelations {
    pub entity: String,
    pub relations: Vec<RelationView>,
}

/// Produces resolved views of a validated model.
pub struct ResolveService {
    model: Model,
    include_abstract: bool,
}

impl ResolveService {
    /// Wrap a model that has passed `ModelService::load`.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            include_abstract: true,
        }
    }

    /// Whether abstract entities appear in resolved modules. Defaults to `true`.
    pub fn include_abstract(mut self, include: bool) -> Self {
        self.include_abstract = include;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Relation map of the named module's entities.
    pub fn relation_map(&self, module: &str) -> ModelgenResult<RelationMap> {
        let module = self.find_module(module)?;
        Ok(resolve_relations(&self.model, module.entities()))
    }

    /// Relation map of the named module, rendered by name, in declaration order.
    pub fn relation_table(&self, module: &str) -> ModelgenResult<Vec<EntityRelations>> {
        let module = self.find_module(module)?;
        let map = resolve_relations(&self.model, module.entities());

        Ok(module
            .entities()
            .iter()
            .map(|id| EntityRelations {
                entity: self.model.qualified_name(*id),
                relations: self.views(map.get(*id)),
            })
            .collect())
    }

    /// Qualified entity names of the named module in dependency order.
    pub fn dependency_order(&self, module: &str) -> ModelgenResult<Vec<String>> {
        let module = self.find_module(module)?;
        let order = dependency_order(&self.model, module.id())?;
        Ok(order
            .into_iter()
            .map(|id| self.model.qualified_name(id))
            .collect())
    }

    /// Resolve one module by plain or dotted name.
    #[instrument(skip(self))]
    pub fn resolve_module(&self, name: &str) -> ModelgenResult<ResolvedModule> {
        let module = self.find_module(name)?;
        self.resolve(module)
    }

    /// Resolve every module, in declaration order.
    #[instrument(skip(self))]
    pub fn resolve_all(&self) -> ModelgenResult<Vec<ResolvedModule>> {
        self.model.modules().map(|m| self.resolve(m)).collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn find_module(&self, name: &str) -> ModelgenResult<&Module> {
        self.model.find_module(name).ok_or_else(|| {
            ApplicationError::ModuleNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn resolve(&self, module: &Module) -> ModelgenResult<ResolvedModule> {
        let map = resolve_relations(&self.model, module.entities());
        let order = dependency_order(&self.model, module.id())?;

        let mut entities = Vec::with_capacity(order.len());
        for id in order {
            let entity = self.model.entity(id);
            if entity.is_abstract() && !self.include_abstract {
                continue;
            }
            entities.push(self.resolve_entity(id, &map)?);
        }

        let name = self.model.module_qualified_name(module.id());
        debug!(module = %name, entities = entities.len(), "Module resolved");
        Ok(ResolvedModule { name, entities })
    }

    fn resolve_entity(&self, id: EntityId, map: &RelationMap) -> ModelgenResult<ResolvedEntity> {
        let entity = self.model.entity(id);
        let flattened = flatten(&self.model, id, map)?;

        let supertype = match entity.supertype() {
            Some(parent) => Some(self.model.qualified_name(parent)),
            None => entity.supertype_ref().map(str::to_string),
        };

        Ok(ResolvedEntity {
            name: entity.name().to_string(),
            qualified_name: self.model.qualified_name(id),
            is_abstract: entity.is_abstract(),
            supertype,
            attributes: flattened.attributes.into_iter().cloned().collect(),
            relations: self.views(&flattened.relations),
        })
    }

    fn views(&self, relations: &[RelationInfo]) -> Vec<RelationView> {
        relations
            .iter()
            .map(|r| RelationView {
                target: self.model.qualified_name(r.target),
                cardinality: r.cardinality,
                owner: r.owner,
            })
            .collect()
    }
}

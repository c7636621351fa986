//! The domain model registry.
//!
//! A [`Model`] owns every module, import and entity of one generation run.
//! Cross references (supertype, relation target, module parent) are stored
//! as ids into the registry and resolved through it. The model is built once
//! by [`ModelBuilder`](super::builder::ModelBuilder) and is read-only after
//! that.

use serde::Serialize;

use super::common::{EntityId, ImportId, ModuleId};
use crate::domain::value_objects::{Cardinality, DataType};

// ── Leaf declarations ─────────────────────────────────────────────────────────

/// A primitive-typed field declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub data_type: DataType,
    pub unique: bool,
    pub blank: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            unique: false,
            blank: false,
            min: None,
            max: None,
            comment: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    pub fn bounds(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A field whose type is one of the model's enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumAttribute {
    pub name: String,
    pub enum_name: String,
}

/// An association declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: String,
    pub kind: Cardinality,
    /// Target as written in the declaration.
    pub target_ref: String,
    /// `None` when the reference did not resolve to any entity.
    pub target: Option<EntityId>,
}

/// An enumeration with ordered literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub literals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// Where an entity is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityOrigin {
    /// Fully declared inside a module of this model.
    Local(ModuleId),
    /// Only named by a module import; its shape is unknown.
    Imported(ImportId),
}

/// A declared domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) name: String,
    pub(crate) origin: EntityOrigin,
    pub(crate) is_abstract: bool,
    pub(crate) comment: Option<String>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) enum_attributes: Vec<EnumAttribute>,
    pub(crate) relations: Vec<Relation>,
    pub(crate) supertype_ref: Option<String>,
    pub(crate) supertype: Option<EntityId>,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> EntityOrigin {
        self.origin
    }

    pub fn is_local(&self) -> bool {
        matches!(self.origin, EntityOrigin::Local(_))
    }

    /// Module that declares this entity, if it is local.
    pub fn module(&self) -> Option<ModuleId> {
        match self.origin {
            EntityOrigin::Local(module) => Some(module),
            EntityOrigin::Imported(_) => None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Attributes declared on this entity itself, in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn enum_attributes(&self) -> &[EnumAttribute] {
        &self.enum_attributes
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Supertype as written in the declaration.
    pub fn supertype_ref(&self) -> Option<&str> {
        self.supertype_ref.as_deref()
    }

    /// Resolved supertype, local or imported.
    pub fn supertype(&self) -> Option<EntityId> {
        self.supertype
    }
}

// ── Containers ────────────────────────────────────────────────────────────────

/// A namespace of local entities and enums. Modules may nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub(crate) id: ModuleId,
    pub(crate) name: String,
    pub(crate) parent: Option<ModuleId>,
    pub(crate) comment: Option<String>,
    pub(crate) entities: Vec<EntityId>,
    pub(crate) enums: Vec<EnumDef>,
}

impl Module {
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ModuleId> {
        self.parent
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Local entities of this module, in declaration order.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn enums(&self) -> &[EnumDef] {
        &self.enums
    }
}

/// Entities borrowed from an external library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleImport {
    pub(crate) id: ImportId,
    pub(crate) name: String,
    pub(crate) library: String,
    pub(crate) package_path: String,
    pub(crate) entities: Vec<EntityId>,
}

impl ModuleImport {
    pub fn id(&self) -> ImportId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }
}

/// A reference that did not resolve to any entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    /// Qualified name of the declaring entity.
    pub entity: String,
    /// `"extends"` or the relation name.
    pub site: String,
    pub reference: String,
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// Registry of every module, import and entity in one model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    pub(crate) modules: Vec<Module>,
    pub(crate) imports: Vec<ModuleImport>,
    pub(crate) entities: Vec<Entity>,
}

impl Model {
    /// Look up an entity.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different model.
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Look up a module.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different model.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.0]
    }

    pub fn import(&self, id: ImportId) -> &ModuleImport {
        &self.imports[id.0]
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn imports(&self) -> impl Iterator<Item = &ModuleImport> {
        self.imports.iter()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn local_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_local())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.imports.is_empty()
    }

    /// Supertype of `id` if it resolves to a local entity.
    pub fn local_supertype(&self, id: EntityId) -> Option<EntityId> {
        self.entity(id)
            .supertype
            .filter(|parent| self.entity(*parent).is_local())
    }

    /// Dotted path of a module from the outermost module, e.g. `Store.Sales`.
    pub fn module_qualified_name(&self, id: ModuleId) -> String {
        let mut segments = vec![self.module(id).name.as_str()];
        let mut current = self.module(id).parent;
        while let Some(parent) = current {
            let module = self.module(parent);
            segments.push(module.name.as_str());
            current = module.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    /// Qualified name of an entity: `Module.Entity` for local entities,
    /// `import.Entity` for imported ones.
    pub fn qualified_name(&self, id: EntityId) -> String {
        let entity = self.entity(id);
        let container = match entity.origin {
            EntityOrigin::Local(module) => self.module_qualified_name(module),
            EntityOrigin::Imported(import) => self.import(import).name.clone(),
        };
        format!("{}.{}", container, entity.name)
    }

    /// Find a module by plain or qualified name.
    ///
    /// A plain name matches only if exactly one module carries it.
    pub fn find_module(&self, name: &str) -> Option<&Module> {
        if let Some(found) = self
            .modules
            .iter()
            .find(|m| self.module_qualified_name(m.id) == name)
        {
            return Some(found);
        }

        let mut by_plain = self.modules.iter().filter(|m| m.name == name);
        match (by_plain.next(), by_plain.next()) {
            (Some(single), None) => Some(single),
            _ => None,
        }
    }

    /// Find an entity by qualified name.
    pub fn find_entity(&self, qualified: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| self.qualified_name(e.id) == qualified)
    }

    /// Every supertype or relation reference that did not resolve.
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        let mut unresolved = Vec::new();
        for entity in self.local_entities() {
            if let (Some(reference), None) = (&entity.supertype_ref, entity.supertype) {
                unresolved.push(UnresolvedReference {
                    entity: self.qualified_name(entity.id),
                    site: "extends".into(),
                    reference: reference.clone(),
                });
            }
            for relation in entity.relations.iter().filter(|r| r.target.is_none()) {
                unresolved.push(UnresolvedReference {
                    entity: self.qualified_name(entity.id),
                    site: relation.name.clone(),
                    reference: relation.target_ref.clone(),
                });
            }
        }
        unresolved
    }
}

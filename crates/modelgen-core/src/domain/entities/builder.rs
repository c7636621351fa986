//! Name-based construction of a [`Model`].
//!
//! Upstream parsers describe a model with names (`extends = "Person"`,
//! `target = "Sales.Order"`). [`ModelBuilder`] turns those declarations into
//! the id-based registry, validating identifiers and uniqueness on the way.
//!
//! ## Reference resolution
//!
//! Supertype and relation targets are resolved in this order, first match
//! wins:
//!
//! 1. an entity with that name in the declaring module
//! 2. a qualified name: `Outer.Inner.Entity` or `import.Entity`
//! 3. an imported entity with that bare name, if exactly one import has it
//!
//! Anything else stays unresolved (`None`). That is not an error: relations
//! to unresolved targets are simply skipped by the resolver.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::common::{EntityId, ImportId, ModuleId, validate_identifier};
use super::model::{
    Attribute, EntityOrigin, EnumAttribute, EnumDef, Entity, Model, Module, ModuleImport, Relation,
};
use crate::domain::{error::DomainError, value_objects::Cardinality};

// ── Declarations ──────────────────────────────────────────────────────────────

/// A relation as written upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    pub name: String,
    pub kind: Cardinality,
    pub target: String,
}

/// An entity as written upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityDecl {
    pub name: String,
    pub is_abstract: bool,
    pub extends: Option<String>,
    pub comment: Option<String>,
    pub attributes: Vec<Attribute>,
    pub enum_attributes: Vec<EnumAttribute>,
    pub relations: Vec<RelationDecl>,
}

impl EntityDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn abstract_entity(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.extends = Some(supertype.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn enum_attribute(mut self, name: impl Into<String>, enum_name: impl Into<String>) -> Self {
        self.enum_attributes.push(EnumAttribute {
            name: name.into(),
            enum_name: enum_name.into(),
        });
        self
    }

    pub fn relation(
        mut self,
        name: impl Into<String>,
        kind: Cardinality,
        target: impl Into<String>,
    ) -> Self {
        self.relations.push(RelationDecl {
            name: name.into(),
            kind,
            target: target.into(),
        });
        self
    }
}

/// A module as written upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleDecl {
    pub name: String,
    pub comment: Option<String>,
    pub entities: Vec<EntityDecl>,
    pub enums: Vec<EnumDef>,
    pub modules: Vec<ModuleDecl>,
}

impl ModuleDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn entity(mut self, entity: EntityDecl) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn enumeration<I, S>(mut self, name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums.push(EnumDef {
            name: name.into(),
            literals: literals.into_iter().map(Into::into).collect(),
            comment: None,
        });
        self
    }

    pub fn submodule(mut self, module: ModuleDecl) -> Self {
        self.modules.push(module);
        self
    }
}

/// A module import as written upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportDecl {
    pub name: String,
    pub library: String,
    pub package_path: String,
    pub entities: Vec<String>,
}

impl ImportDecl {
    pub fn new(name: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            library: library.into(),
            ..Self::default()
        }
    }

    pub fn package_path(mut self, path: impl Into<String>) -> Self {
        self.package_path = path.into();
        self
    }

    pub fn entity(mut self, name: impl Into<String>) -> Self {
        self.entities.push(name.into());
        self
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Collects declarations and produces a validated [`Model`].
///
/// # Example
///
/// ```rust
/// use modelgen_core::domain::{
///     Attribute, Cardinality, DataType, EntityDecl, ModelBuilder, ModuleDecl,
/// };
///
/// let model = ModelBuilder::new()
///     .module(
///         ModuleDecl::new("Sales")
///             .entity(
///                 EntityDecl::new("Order")
///                     .attribute(Attribute::new("total", DataType::Decimal))
///                     .relation("items", Cardinality::OneToMany, "LineItem"),
///             )
///             .entity(EntityDecl::new("LineItem")),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(model.entity_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    modules: Vec<ModuleDecl>,
    imports: Vec<ImportDecl>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(mut self, module: ModuleDecl) -> Self {
        self.modules.push(module);
        self
    }

    pub fn import(mut self, import: ImportDecl) -> Self {
        self.imports.push(import);
        self
    }

    /// Append the declarations of another builder.
    pub fn merge(mut self, other: ModelBuilder) -> Self {
        self.modules.extend(other.modules);
        self.imports.extend(other.imports);
        self
    }

    pub fn build(self) -> Result<Model, DomainError> {
        let mut model = Model::default();
        let mut pending: Vec<PendingRefs> = Vec::new();

        for decl in &self.modules {
            register_module(&mut model, &mut pending, decl, None)?;
        }
        check_unique_modules(&model)?;
        check_enum_references(&model)?;

        for decl in &self.imports {
            register_import(&mut model, decl)?;
        }

        let index = ReferenceIndex::new(&model);
        for refs in pending {
            let module = refs.module;
            let supertype = refs
                .extends
                .as_deref()
                .and_then(|r| index.resolve(&model, module, r));
            let targets: Vec<Option<EntityId>> = refs
                .relation_targets
                .iter()
                .map(|r| index.resolve(&model, module, r))
                .collect();

            let entity = &mut model.entities[refs.entity.0];
            entity.supertype = supertype;
            for (relation, target) in entity.relations.iter_mut().zip(targets) {
                relation.target = target;
            }
        }

        Ok(model)
    }
}

/// References of one local entity waiting for the second pass.
struct PendingRefs {
    entity: EntityId,
    module: ModuleId,
    extends: Option<String>,
    relation_targets: Vec<String>,
}

fn register_module(
    model: &mut Model,
    pending: &mut Vec<PendingRefs>,
    decl: &ModuleDecl,
    parent: Option<ModuleId>,
) -> Result<ModuleId, DomainError> {
    validate_identifier("module", &decl.name)?;

    let module_id = ModuleId(model.modules.len());
    model.modules.push(Module {
        id: module_id,
        name: decl.name.clone(),
        parent,
        comment: decl.comment.clone(),
        entities: Vec::new(),
        enums: Vec::new(),
    });

    let mut enum_names = HashSet::new();
    for def in &decl.enums {
        validate_identifier("enum", &def.name)?;
        if !enum_names.insert(def.name.as_str()) {
            return Err(DomainError::InvalidName {
                kind: "enum",
                name: def.name.clone(),
                reason: "declared more than once in this module".into(),
            });
        }
    }
    model.modules[module_id.0].enums = decl.enums.clone();

    let mut entity_names = HashSet::new();
    for entity_decl in &decl.entities {
        validate_identifier("entity", &entity_decl.name)?;
        if !entity_names.insert(entity_decl.name.as_str()) {
            return Err(DomainError::DuplicateEntity {
                module: decl.name.clone(),
                entity: entity_decl.name.clone(),
            });
        }
        check_members(entity_decl)?;

        let id = EntityId(model.entities.len());
        model.entities.push(Entity {
            id,
            name: entity_decl.name.clone(),
            origin: EntityOrigin::Local(module_id),
            is_abstract: entity_decl.is_abstract,
            comment: entity_decl.comment.clone(),
            attributes: entity_decl.attributes.clone(),
            enum_attributes: entity_decl.enum_attributes.clone(),
            relations: entity_decl
                .relations
                .iter()
                .map(|r| Relation {
                    name: r.name.clone(),
                    kind: r.kind,
                    target_ref: r.target.clone(),
                    target: None,
                })
                .collect(),
            supertype_ref: entity_decl.extends.clone(),
            supertype: None,
        });
        model.modules[module_id.0].entities.push(id);

        pending.push(PendingRefs {
            entity: id,
            module: module_id,
            extends: entity_decl.extends.clone(),
            relation_targets: entity_decl
                .relations
                .iter()
                .map(|r| r.target.clone())
                .collect(),
        });
    }

    for child in &decl.modules {
        register_module(model, pending, child, Some(module_id))?;
    }

    Ok(module_id)
}

/// Attribute, enum-attribute and relation names share one namespace per
/// entity.
fn check_members(decl: &EntityDecl) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    let names = decl
        .attributes
        .iter()
        .map(|a| ("attribute", a.name.as_str()))
        .chain(
            decl.enum_attributes
                .iter()
                .map(|a| ("enum attribute", a.name.as_str())),
        )
        .chain(decl.relations.iter().map(|r| ("relation", r.name.as_str())));

    for (kind, name) in names {
        validate_identifier(kind, name)?;
        if !seen.insert(name) {
            return Err(DomainError::DuplicateAttribute {
                entity: decl.name.clone(),
                attribute: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Every enum attribute must name an enum visible from its module. Runs once
/// all modules are registered, so declaration order does not matter.
fn check_enum_references(model: &Model) -> Result<(), DomainError> {
    for entity in model.local_entities() {
        let Some(module) = entity.module() else {
            continue;
        };
        for attribute in entity.enum_attributes() {
            if !enum_visible(model, module, &attribute.enum_name) {
                return Err(DomainError::UnknownEnum {
                    entity: entity.name().to_string(),
                    attribute: attribute.name.clone(),
                    enum_name: attribute.enum_name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Enums are visible from the declaring module and its ancestors, or
/// anywhere by qualified name.
fn enum_visible(model: &Model, module: ModuleId, enum_name: &str) -> bool {
    let mut current = Some(module);
    while let Some(id) = current {
        let m = model.module(id);
        if m.enums.iter().any(|e| e.name == enum_name) {
            return true;
        }
        current = m.parent;
    }

    model.modules.iter().any(|m| {
        let prefix = model.module_qualified_name(m.id);
        m.enums
            .iter()
            .any(|e| format!("{}.{}", prefix, e.name) == enum_name)
    })
}

fn check_unique_modules(model: &Model) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for module in &model.modules {
        let qualified = model.module_qualified_name(module.id);
        if !seen.insert(qualified.clone()) {
            return Err(DomainError::DuplicateModule { name: qualified });
        }
    }
    Ok(())
}

fn register_import(model: &mut Model, decl: &ImportDecl) -> Result<ImportId, DomainError> {
    validate_identifier("import", &decl.name)?;
    if model.imports.iter().any(|i| i.name == decl.name) {
        return Err(DomainError::InvalidName {
            kind: "import",
            name: decl.name.clone(),
            reason: "declared more than once".into(),
        });
    }

    let import_id = ImportId(model.imports.len());
    let mut entities = Vec::with_capacity(decl.entities.len());
    let mut seen = HashSet::new();
    for name in &decl.entities {
        validate_identifier("entity", name)?;
        if !seen.insert(name.as_str()) {
            return Err(DomainError::DuplicateEntity {
                module: decl.name.clone(),
                entity: name.clone(),
            });
        }
        let id = EntityId(model.entities.len());
        model.entities.push(Entity {
            id,
            name: name.clone(),
            origin: EntityOrigin::Imported(import_id),
            is_abstract: false,
            comment: None,
            attributes: Vec::new(),
            enum_attributes: Vec::new(),
            relations: Vec::new(),
            supertype_ref: None,
            supertype: None,
        });
        entities.push(id);
    }

    model.imports.push(ModuleImport {
        id: import_id,
        name: decl.name.clone(),
        library: decl.library.clone(),
        package_path: decl.package_path.clone(),
        entities,
    });
    Ok(import_id)
}

/// Lookup tables for the second (reference) pass.
///
/// Lookup order: same module, qualified local name, `import.Entity`, then a
/// bare imported name that only one import provides.
struct ReferenceIndex {
    by_module: HashMap<(ModuleId, String), EntityId>,
    local_qualified: HashMap<String, EntityId>,
    imported_qualified: HashMap<String, EntityId>,
    imported_by_name: HashMap<String, Vec<EntityId>>,
}

impl ReferenceIndex {
    fn new(model: &Model) -> Self {
        let mut by_module = HashMap::new();
        let mut local_qualified = HashMap::new();
        let mut imported_qualified = HashMap::new();
        let mut imported_by_name: HashMap<String, Vec<EntityId>> = HashMap::new();

        for entity in &model.entities {
            let qualified = model.qualified_name(entity.id);
            match entity.origin {
                EntityOrigin::Local(module) => {
                    by_module.insert((module, entity.name.clone()), entity.id);
                    local_qualified.insert(qualified, entity.id);
                }
                EntityOrigin::Imported(_) => {
                    imported_qualified.insert(qualified, entity.id);
                    imported_by_name
                        .entry(entity.name.clone())
                        .or_default()
                        .push(entity.id);
                }
            }
        }

        Self {
            by_module,
            local_qualified,
            imported_qualified,
            imported_by_name,
        }
    }

    fn resolve(&self, model: &Model, module: ModuleId, reference: &str) -> Option<EntityId> {
        let resolved = self
            .by_module
            .get(&(module, reference.to_string()))
            .or_else(|| self.local_qualified.get(reference))
            .or_else(|| self.imported_qualified.get(reference))
            .copied()
            .or_else(|| match self.imported_by_name.get(reference) {
                Some(ids) if ids.len() == 1 => Some(ids[0]),
                _ => None,
            });

        if resolved.is_none() {
            debug!(
                module = %model.module_qualified_name(module),
                reference,
                "Reference left unresolved"
            );
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DataType;

    fn sales() -> ModuleDecl {
        ModuleDecl::new("Sales")
            .entity(
                EntityDecl::new("Order")
                    .attribute(Attribute::new("total", DataType::Decimal))
                    .relation("items", Cardinality::OneToMany, "LineItem")
                    .relation("customer", Cardinality::ManyToOne, "Crm.Customer"),
            )
            .entity(EntityDecl::new("LineItem").attribute(Attribute::new("qty", DataType::Integer)))
    }

    #[test]
    fn resolves_same_module_references() {
        let model = ModelBuilder::new().module(sales()).build().unwrap();
        let order = model.find_entity("Sales.Order").unwrap();
        let line_item = model.find_entity("Sales.LineItem").unwrap();

        assert_eq!(order.relations()[0].target, Some(line_item.id()));
    }

    #[test]
    fn resolves_qualified_references_across_modules() {
        let model = ModelBuilder::new()
            .module(sales())
            .module(ModuleDecl::new("Crm").entity(EntityDecl::new("Customer")))
            .build()
            .unwrap();
        let order = model.find_entity("Sales.Order").unwrap();
        let customer = model.find_entity("Crm.Customer").unwrap();

        assert_eq!(order.relations()[1].target, Some(customer.id()));
    }

    #[test]
    fn leaves_unknown_references_unresolved() {
        let model = ModelBuilder::new().module(sales()).build().unwrap();
        let order = model.find_entity("Sales.Order").unwrap();

        assert_eq!(order.relations()[1].target, None);
        let unresolved = model.unresolved_references();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].reference, "Crm.Customer");
        assert_eq!(unresolved[0].site, "customer");
    }

    #[test]
    fn resolves_imported_entities_by_bare_name() {
        let model = ModelBuilder::new()
            .module(ModuleDecl::new("Billing").entity(EntityDecl::new("Invoice").extends("Document")))
            .import(ImportDecl::new("docs", "acme-docs").entity("Document"))
            .build()
            .unwrap();
        let invoice = model.find_entity("Billing.Invoice").unwrap();
        let document = model.find_entity("docs.Document").unwrap();

        assert_eq!(invoice.supertype(), Some(document.id()));
        assert!(!document.is_local());
        assert_eq!(model.local_supertype(invoice.id()), None);
    }

    #[test]
    fn nested_modules_have_dotted_qualified_names() {
        let model = ModelBuilder::new()
            .module(
                ModuleDecl::new("Store")
                    .submodule(ModuleDecl::new("Catalog").entity(EntityDecl::new("Product"))),
            )
            .build()
            .unwrap();

        let product = model.find_entity("Store.Catalog.Product").unwrap();
        assert_eq!(model.qualified_name(product.id()), "Store.Catalog.Product");
        assert!(model.find_module("Catalog").is_some());
        assert!(model.find_module("Store.Catalog").is_some());
    }

    #[test]
    fn rejects_duplicate_entities() {
        let result = ModelBuilder::new()
            .module(
                ModuleDecl::new("Sales")
                    .entity(EntityDecl::new("Order"))
                    .entity(EntityDecl::new("Order")),
            )
            .build();

        assert!(matches!(result, Err(DomainError::DuplicateEntity { .. })));
    }

    #[test]
    fn rejects_duplicate_attribute_names() {
        let result = ModelBuilder::new()
            .module(
                ModuleDecl::new("Sales").entity(
                    EntityDecl::new("Order")
                        .attribute(Attribute::new("code", DataType::String))
                        .attribute(Attribute::new("code", DataType::Integer)),
                ),
            )
            .build();

        assert!(matches!(result, Err(DomainError::DuplicateAttribute { .. })));
    }

    #[test]
    fn rejects_duplicate_modules() {
        let result = ModelBuilder::new()
            .module(ModuleDecl::new("Sales"))
            .module(ModuleDecl::new("Sales"))
            .build();

        assert!(matches!(result, Err(DomainError::DuplicateModule { .. })));
    }

    #[test]
    fn enum_attributes_must_reference_visible_enum() {
        let ok = ModelBuilder::new()
            .module(
                ModuleDecl::new("Sales")
                    .enumeration("Status", ["Open", "Closed"])
                    .entity(EntityDecl::new("Order").enum_attribute("status", "Status")),
            )
            .build();
        assert!(ok.is_ok());

        let missing = ModelBuilder::new()
            .module(
                ModuleDecl::new("Sales")
                    .entity(EntityDecl::new("Order").enum_attribute("status", "Status")),
            )
            .build();
        assert!(matches!(missing, Err(DomainError::UnknownEnum { .. })));
    }

    #[test]
    fn merge_combines_builders() {
        let model = ModelBuilder::new()
            .module(sales())
            .merge(ModelBuilder::new().module(ModuleDecl::new("Crm").entity(EntityDecl::new("Customer"))))
            .build()
            .unwrap();

        assert_eq!(model.modules().count(), 2);
        let order = model.find_entity("Sales.Order").unwrap();
        assert!(order.relations()[1].target.is_some());
    }

    #[test]
    fn local_qualified_name_beats_same_named_import() {
        let model = ModelBuilder::new()
            .module(ModuleDecl::new("crm").entity(EntityDecl::new("Customer")))
            .module(
                ModuleDecl::new("Sales").entity(
                    EntityDecl::new("Order").relation("buyer", Cardinality::ManyToOne, "crm.Customer"),
                ),
            )
            .import(ImportDecl::new("crm", "crm-lib").entity("Customer"))
            .build()
            .unwrap();

        let order = model.find_entity("Sales.Order").unwrap();
        let target = order.relations()[0].target.unwrap();
        assert!(model.entity(target).is_local());
        assert_eq!(model.entity(target).module(), Some(model.find_module("crm").unwrap().id()));
    }

    #[test]
    fn qualified_enum_may_be_declared_in_a_later_module() {
        let model = ModelBuilder::new()
            .module(
                ModuleDecl::new("Sales")
                    .entity(EntityDecl::new("Order").enum_attribute("status", "Common.Status")),
            )
            .module(ModuleDecl::new("Common").enumeration("Status", ["Open", "Closed"]))
            .build();

        assert!(model.is_ok());
    }

    #[test]
    fn invalid_relation_name_reports_its_kind() {
        let result = ModelBuilder::new()
            .module(
                ModuleDecl::new("Sales").entity(
                    EntityDecl::new("Order").relation("1st", Cardinality::OneToOne, "Order"),
                ),
            )
            .build();

        assert!(matches!(
            result,
            Err(DomainError::InvalidName { kind: "relation", .. })
        ));
    }

    #[test]
    fn invalid_enum_attribute_name_reports_its_kind() {
        let result = ModelBuilder::new()
            .module(
                ModuleDecl::new("Sales")
                    .enumeration("Status", ["Open"])
                    .entity(EntityDecl::new("Order").enum_attribute("bad-name", "Status")),
            )
            .build();

        assert!(matches!(
            result,
            Err(DomainError::InvalidName { kind: "enum attribute", .. })
        ));
    }

    #[test]
    fn rejects_duplicate_entities_within_an_import() {
        let result = ModelBuilder::new()
            .import(
                ImportDecl::new("crm", "crm-lib")
                    .entity("Customer")
                    .entity("Customer"),
            )
            .build();

        assert!(matches!(
            result,
            Err(DomainError::DuplicateEntity { ref module, ref entity })
                if module == "crm" && entity == "Customer"
        ));
    }
}

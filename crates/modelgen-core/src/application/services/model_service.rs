//! Model Service - loading, validating and summarising models.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::ports::ModelSource,
    domain::{DomainValidator as validator, Model, UnresolvedReference},
    error::ModelgenResult,
};

/// Information about a module for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    /// Dotted name from the outermost module.
    pub name: String,
    pub entities: usize,
    pub enums: usize,
    pub comment: Option<String>,
}

/// Summary of a loaded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelReport {
    pub source: String,
    pub modules: usize,
    pub imports: usize,
    pub local_entities: usize,
    pub imported_entities: usize,
    pub declared_relations: usize,
    /// References that point nowhere. These are warnings; emitters skip them.
    pub unresolved: Vec<UnresolvedReference>,
}

impl ModelReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Loads models from a [`ModelSource`] and reports on them.
pub struct ModelService {
    source: Box<dyn ModelSource>,
}

impl std::fmt::Debug for ModelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelService").finish_non_exhaustive()
    }
}

impl ModelService {
    pub fn new(source: Box<dyn ModelSource>) -> Self {
        Self { source }
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Load the model and run whole-model validation.
    #[instrument(skip_all, fields(source = %self.source.describe()))]
    pub fn load(&self) -> ModelgenResult<Model> {
        let model = self.source.load()?;
        validator::validate_model(&model)?;

        info!(
            modules = model.modules().count(),
            entities = model.entity_count(),
            "Model loaded"
        );
        Ok(model)
    }

    /// List every module, nested ones included, in declaration order.
    pub fn modules(&self, model: &Model) -> Vec<ModuleInfo> {
        model
            .modules()
            .map(|m| ModuleInfo {
                name: model.module_qualified_name(m.id()),
                entities: m.entities().len(),
                enums: m.enums().len(),
                comment: m.comment().map(str::to_string),
            })
            .collect()
    }

    /// Summarise `model` and collect unresolved references.
    pub fn check(&self, model: &Model) -> ModelReport {
        let unresolved = model.unresolved_references();
        for reference in &unresolved {
            warn!(
                entity = %reference.entity,
                site = %reference.site,
                reference = %reference.reference,
                "Unresolved reference"
            );
        }

        let local_entities = model.local_entities().count();
        ModelReport {
            source: self.source.describe(),
            modules: model.modules().count(),
            imports: model.imports().count(),
            local_entities,
            imported_entities: model.entity_count() - local_entities,
            declared_relations: model.local_entities().map(|e| e.relations().len()).sum(),
            unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::MockModelSource,
        domain::{Cardinality, DomainError, EntityDecl, ImportDecl, ModelBuilder, ModuleDecl},
        error::ModelgenError,
    };

    fn service_for(model: Model) -> ModelService {
        let mut source = MockModelSource::new();
        source.expect_load().returning(move || Ok(model.clone()));
        source.expect_describe().return_const("mock".to_string());
        ModelService::new(Box::new(source))
    }

    fn sample() -> Model {
        ModelBuilder::new()
            .module(
                ModuleDecl::new("Shop")
                    .enumeration("Status", ["Open", "Closed"])
                    .entity(
                        EntityDecl::new("Order")
                            .relation("items", Cardinality::OneToMany, "LineItem")
                            .relation("buyer", Cardinality::ManyToOne, "crm.Customer")
                            .relation("ghost", Cardinality::OneToOne, "Missing"),
                    )
                    .entity(EntityDecl::new("LineItem"))
                    .submodule(ModuleDecl::new("Billing").entity(EntityDecl::new("Invoice"))),
            )
            .import(ImportDecl::new("crm", "crm-lib").entity("Customer"))
            .build()
            .unwrap()
    }

    #[test]
    fn load_returns_validated_model() {
        let service = service_for(sample());
        let model = service.load().unwrap();
        assert_eq!(model.local_entities().count(), 3);
    }

    #[test]
    fn load_rejects_cyclic_supertypes() {
        let model = ModelBuilder::new()
            .module(
                ModuleDecl::new("Loop")
                    .entity(EntityDecl::new("A").extends("B"))
                    .entity(EntityDecl::new("B").extends("A")),
            )
            .build()
            .unwrap();

        let err = service_for(model).load().unwrap_err();
        assert!(matches!(
            err,
            ModelgenError::Domain(DomainError::CyclicSupertype { .. })
        ));
    }

    #[test]
    fn load_propagates_source_errors() {
        let mut source = MockModelSource::new();
        source.expect_load().returning(|| {
            Err(crate::application::ApplicationError::ModuleNotFound {
                name: "x".into(),
            }
            .into())
        });
        source.expect_describe().return_const("broken".to_string());

        let service = ModelService::new(Box::new(source));
        assert!(service.load().is_err());
    }

    #[test]
    fn modules_lists_nested_modules_by_dotted_name() {
        let service = service_for(sample());
        let model = service.load().unwrap();

        let names: Vec<String> = service.modules(&model).into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Shop", "Shop.Billing"]);
        assert_eq!(service.modules(&model)[0].enums, 1);
    }

    #[test]
    fn check_counts_and_warns() {
        let service = service_for(sample());
        let model = service.load().unwrap();
        let report = service.check(&model);

        assert_eq!(report.source, "mock");
        assert_eq!(report.modules, 2);
        assert_eq!(report.imports, 1);
        assert_eq!(report.local_entities, 3);
        assert_eq!(report.imported_entities, 1);
        assert_eq!(report.declared_relations, 3);
        assert!(!report.is_clean());
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].reference, "Missing");
    }
}

use crate::domain::{entities::model::Model, error::DomainError, graph::has_cycle};

/// Centralized domain validation.
///
/// Construction-time rules (identifiers, duplicates, enum references) are
/// enforced by the builder. This covers whole-model shape rules.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_model(model: &Model) -> Result<(), DomainError> {
        Self::validate_supertypes(model)
    }

    /// Every local supertype chain must end.
    pub fn validate_supertypes(model: &Model) -> Result<(), DomainError> {
        for entity in model.local_entities() {
            if has_cycle(entity.id(), |id| model.local_supertype(*id)) {
                return Err(DomainError::CyclicSupertype {
                    entity: model.qualified_name(entity.id()),
                });
            }
        }
        Ok(())
    }
}

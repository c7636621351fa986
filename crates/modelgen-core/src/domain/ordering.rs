//! Declaration ordering for emitters that need parents before children
//! (ORM model files, for instance).

use crate::domain::{
    entities::common::{EntityId, ModuleId},
    entities::model::Model,
    error::DomainError,
    graph::topological_sort,
};

/// Entities of `module` ordered so that each local supertype declared in the
/// same module precedes its subtypes.
///
/// Entities without such a dependency keep their relative declaration
/// order.
///
/// # Errors
///
/// [`DomainError::DependencyCycle`] if same-module supertypes form a loop.
pub fn dependency_order(model: &Model, module: ModuleId) -> Result<Vec<EntityId>, DomainError> {
    let prerequisites = |id: &EntityId| -> Option<EntityId> {
        model
            .local_supertype(*id)
            .filter(|parent| model.entity(*parent).module() == Some(module))
    };

    topological_sort(
        model.module(module).entities().iter().copied(),
        prerequisites,
        false,
    )
    .map_err(|_| DomainError::DependencyCycle {
        module: model.module_qualified_name(module),
    })
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Index of an entity inside a [`Model`](super::model::Model) registry.
///
/// Supertypes and relation targets are stored as `EntityId`s rather than
/// pointers, so the model holds no ownership cycles. An id is only
/// meaningful for the model that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub(crate) usize);

impl EntityId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a module inside a model registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub(crate) usize);

impl ModuleId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a module import inside a model registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportId(pub(crate) usize);

impl ImportId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Check that `name` can be used as a module, entity, attribute, relation
/// or enum identifier.
///
/// Identifiers start with a letter or `_` and contain only ASCII
/// alphanumerics and `_`. Dots are reserved for qualified names.
pub fn validate_identifier(kind: &'static str, name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        kind,
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("name cannot be empty"));
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(invalid("must start with a letter or '_'"));
    }
    if name.contains('.') {
        return Err(invalid("'.' is reserved for qualified names"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("only letters, digits and '_' are allowed"));
    }
    Ok(())
}

// ============================================================================
// domain/error.rs - MODEL ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to hand across layers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (malformed declarations)
    // ========================================================================
    #[error("unknown data type '{value}'")]
    UnknownDataType { value: String },

    #[error("unknown relation kind '{value}'")]
    UnknownCardinality { value: String },

    #[error("invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("module '{name}' is declared more than once")]
    DuplicateModule { name: String },

    #[error("entity '{entity}' is declared more than once in module '{module}'")]
    DuplicateEntity { module: String, entity: String },

    #[error("attribute '{attribute}' is declared more than once on entity '{entity}'")]
    DuplicateAttribute { entity: String, attribute: String },

    #[error("attribute '{attribute}' on entity '{entity}' references unknown enum '{enum_name}'")]
    UnknownEnum {
        entity: String,
        attribute: String,
        enum_name: String,
    },

    // ========================================================================
    // Consistency Errors (graph shape violations)
    // ========================================================================
    #[error("supertype chain of entity '{entity}' loops back on itself")]
    CyclicSupertype { entity: String },

    #[error("entities of module '{module}' cannot be ordered: dependency cycle found")]
    DependencyCycle { module: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownDataType { value } => vec![
                format!("'{}' is not a primitive type", value),
                "Use one of: boolean, date, datetime, decimal, email, integer, string, uuid, ..."
                    .into(),
            ],
            Self::UnknownCardinality { value } => vec![
                format!("'{}' is not a relation kind", value),
                "Use one of: OneToOne, OneToMany, ManyToOne, ManyToMany".into(),
            ],
            Self::DuplicateEntity { module, entity } => vec![
                format!("Rename one of the '{}' entities in '{}'", entity, module),
            ],
            Self::DuplicateAttribute { entity, attribute } => vec![
                format!("Remove or rename the second '{}' on '{}'", attribute, entity),
                "Inherited attributes may be redeclared; own attributes may not".into(),
            ],
            Self::CyclicSupertype { entity } => vec![
                format!("Follow the 'extends' chain starting at '{}'", entity),
                "Break the loop so that the chain ends at an entity without a supertype".into(),
            ],
            Self::DependencyCycle { module } | Self::UnknownEnum { entity: module, .. } => vec![
                format!("Check the declarations in '{}'", module),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownDataType { .. }
            | Self::UnknownCardinality { .. }
            | Self::InvalidName { .. }
            | Self::DuplicateModule { .. }
            | Self::DuplicateEntity { .. }
            | Self::DuplicateAttribute { .. }
            | Self::UnknownEnum { .. } => ErrorCategory::Validation,
            Self::CyclicSupertype { .. } | Self::DependencyCycle { .. } => {
                ErrorCategory::Consistency
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Consistency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_shape_errors_are_consistency_errors() {
        let cycle = DomainError::DependencyCycle {
            module: "Hr".into(),
        };
        assert_eq!(cycle.category(), ErrorCategory::Consistency);
        assert!(cycle.suggestions().iter().any(|s| s.contains("Hr")));
    }

    #[test]
    fn declaration_errors_are_validation_errors() {
        let err = DomainError::InvalidName {
            kind: "relation",
            name: "1st".into(),
            reason: "must start with a letter or '_'".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(
            err.to_string(),
            "invalid relation name '1st': must start with a letter or '_'"
        );
    }
}

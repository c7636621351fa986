//! Application layer errors.
//!
//! These errors represent failures in orchestration, not model rules.
//! Model rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No module with the requested name exists in the model.
    #[error("Module not found: {name}")]
    ModuleNotFound { name: String },

    /// The model source could not be read.
    #[error("Cannot read model source {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// The model document is malformed.
    #[error("Failed to parse {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// File extension does not name a supported document format.
    #[error("Unsupported model format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// A model directory contains no model documents.
    #[error("No model documents found in {path}")]
    EmptySource { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ModuleNotFound { name } => vec![
                format!("No module named '{}'", name),
                "Try: modelgen modules <MODEL> to list available modules".into(),
                "Nested modules are addressed by dotted name, e.g. Shop.Billing".into(),
            ],
            Self::SourceUnavailable { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and is readable".into(),
            ],
            Self::ParseFailed { .. } => vec![
                "Check the document syntax near the reported location".into(),
            ],
            Self::UnsupportedFormat { .. } => vec![
                "Model files must end in .toml or .json".into(),
            ],
            Self::EmptySource { .. } => vec![
                "Model documents in a directory must be named *.model.toml or *.model.json"
                    .into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ModuleNotFound { .. } | Self::EmptySource { .. } => ErrorCategory::NotFound,
            Self::SourceUnavailable { .. } => ErrorCategory::NotFound,
            Self::ParseFailed { .. } | Self::UnsupportedFormat { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

//! Directory-tree model source.
//!
//! Every `*.model.toml` and `*.model.json` below the root is parsed and the
//! declarations are merged into one model. Files are visited in sorted path
//! order so entity ids are stable between runs.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use modelgen_core::{
    application::{ApplicationError, ports::ModelSource},
    domain::{Model, ModelBuilder},
    error::ModelgenResult,
};

use crate::model_loader::{DocumentFormat, ModelDocument};

/// Loads and merges every model document under a directory.
#[derive(Debug, Clone)]
pub struct DirectoryModelSource {
    root: PathBuf,
}

impl DirectoryModelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Model documents under the root, in sorted path order.
    pub fn documents(&self) -> ModelgenResult<Vec<(PathBuf, DocumentFormat)>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::SourceUnavailable {
                path: self.root.clone(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::SourceUnavailable {
                path: self.root.clone(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(format) = DocumentFormat::from_model_file_name(entry.path()) {
                documents.push((entry.into_path(), format));
            }
        }
        Ok(documents)
    }
}

impl ModelSource for DirectoryModelSource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self) -> ModelgenResult<Model> {
        let documents = self.documents()?;
        if documents.is_empty() {
            return Err(ApplicationError::EmptySource {
                path: self.root.clone(),
            }
            .into());
        }

        let mut builder = ModelBuilder::new();
        for (path, format) in &documents {
            debug!(document = %path.display(), "Merging model document");
            builder = builder.merge(ModelDocument::read(path, *format)?.into_builder()?);
        }

        Ok(builder.build()?)
    }

    fn describe(&self) -> String {
        format!("{}/", self.root.display())
    }
}

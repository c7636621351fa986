//! Single-document model source.

use std::path::{Path, PathBuf};

use modelgen_core::{
    application::{ApplicationError, ports::ModelSource},
    domain::Model,
    error::ModelgenResult,
};

use crate::model_loader::{DocumentFormat, ModelDocument};

/// Loads a model from one TOML or JSON document.
#[derive(Debug, Clone)]
pub struct FileModelSource {
    path: PathBuf,
}

impl FileModelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for FileModelSource {
    fn load(&self) -> ModelgenResult<Model> {
        let format = DocumentFormat::from_extension(&self.path).ok_or_else(|| {
            ApplicationError::UnsupportedFormat {
                path: self.path.clone(),
            }
        })?;

        let builder = ModelDocument::read(&self.path, format)?.into_builder()?;
        Ok(builder.build()?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_core::error::ModelgenError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_toml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shop.toml");
        fs::write(
            &path,
            "[[modules]]\nname = \"Shop\"\n[[modules.entities]]\nname = \"Order\"\n",
        )
        .unwrap();

        let model = FileModelSource::new(&path).load().unwrap();
        assert!(model.find_entity("Shop.Order").is_some());
    }

    #[test]
    fn loads_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shop.json");
        fs::write(&path, r#"{"modules": [{"name": "Shop", "entities": [{"name": "Order"}]}]}"#)
            .unwrap();

        let model = FileModelSource::new(&path).load().unwrap();
        assert_eq!(model.local_entities().count(), 1);
    }

    #[test]
    fn rejects_unknown_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shop.yaml");
        fs::write(&path, "modules: []").unwrap();

        let err = FileModelSource::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            ModelgenError::Application(ApplicationError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn construction_errors_are_domain_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dup.toml");
        fs::write(
            &path,
            "[[modules]]\nname = \"M\"\n[[modules.entities]]\nname = \"A\"\n[[modules.entities]]\nname = \"A\"\n",
        )
        .unwrap();

        let err = FileModelSource::new(&path).load().unwrap_err();
        assert!(matches!(err, ModelgenError::Domain(_)));
    }

    #[test]
    fn describes_itself_by_path() {
        let source = FileModelSource::new("models/shop.toml");
        assert_eq!(source.describe(), "models/shop.toml");
    }
}

//! Command handlers, one module per subcommand.
//!
//! Handlers receive parsed arguments plus the loaded [`AppConfig`] and write
//! through the [`OutputManager`]. Model access goes through the core services.

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod modules;
pub mod order;
pub mod relations;
pub mod resolve;

use std::path::Path;

use modelgen_core::domain::Model;
use modelgen_core::prelude::ModelService;
use tracing::debug;

use crate::{
    cli::ModuleArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Load and validate the model at `path`.
fn load_model(path: &Path) -> CliResult<(ModelService, Model)> {
    if !path.exists() {
        return Err(CliError::ModelNotFound {
            path: path.to_path_buf(),
        });
    }

    let service = ModelService::new(modelgen_adapters::source_for(path));
    debug!(source = %service.describe(), "Loading model");
    let model = service.load()?;
    Ok((service, model))
}

/// `-m` if given, else `resolve.default_module`.
fn module_name(
    args: &ModuleArgs,
    config: &AppConfig,
    command: &'static str,
) -> CliResult<String> {
    args.module
        .clone()
        .or_else(|| config.resolve.default_module.clone())
        .ok_or(CliError::MissingModule { command })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ModelArgs;
    use std::path::PathBuf;

    fn args(module: Option<&str>) -> ModuleArgs {
        ModuleArgs {
            source: ModelArgs {
                model: PathBuf::from("m.toml"),
            },
            module: module.map(str::to_string),
        }
    }

    #[test]
    fn flag_beats_default_module() {
        let mut config = AppConfig::default();
        config.resolve.default_module = Some("Hr".into());
        assert_eq!(module_name(&args(Some("Shop")), &config, "order").unwrap(), "Shop");
        assert_eq!(module_name(&args(None), &config, "order").unwrap(), "Hr");
    }

    #[test]
    fn no_module_anywhere_is_an_error() {
        let err = module_name(&args(None), &AppConfig::default(), "relations").unwrap_err();
        assert!(matches!(err, CliError::MissingModule { command: "relations" }));
    }

    #[test]
    fn missing_model_path_is_not_found() {
        let err = load_model(Path::new("/no/such/shop.model.toml")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}

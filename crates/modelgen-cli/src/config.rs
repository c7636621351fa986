//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `MODELGEN__SECTION__KEY`, e.g.
//!    `MODELGEN__OUTPUT__NO_COLOR=true`
//! 3. Config file: `--config FILE` if given, otherwise the platform config
//!    file and then `.modelgen.toml` in the current directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Environment variable prefix. Sections and keys are separated by `__`.
pub const ENV_PREFIX: &str = "MODELGEN";

/// File name of the per-project configuration.
pub const LOCAL_CONFIG_FILE: &str = ".modelgen.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Resolution settings.
    pub resolve: ResolveConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; used when `--output-format` is `auto`.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Module used by `relations`, `order` and `resolve` when `-m` is omitted.
    pub default_module: Option<String>,
    /// Whether `resolve` lists abstract entities.
    pub include_abstract: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            resolve: ResolveConfig {
                default_module: None,
                include_abstract: true,
            },
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file(s), then environment.
    ///
    /// The `config_file` parameter is the path the user passed via `--config`
    /// (or `None` to use the default locations). An explicit file must exist;
    /// default locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let files: Vec<(PathBuf, bool)> = match config_file {
            Some(path) => vec![(path.clone(), true)],
            None => vec![
                (Self::config_path(), false),
                (PathBuf::from(LOCAL_CONFIG_FILE), false),
            ],
        };
        Self::load_from(&files, true)
    }

    /// Build the layered configuration from explicit file sources.
    ///
    /// Each entry is `(path, required)`. Later files override earlier ones.
    pub fn load_from(files: &[(PathBuf, bool)], with_env: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise default config")?;

        let mut builder = Config::builder().add_source(defaults);
        for (path, required) in files {
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }
        if with_env {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));
        }

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.modelgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "modelgen", "modelgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `init` writes: local or platform location.
    pub fn init_path(local: bool) -> PathBuf {
        if local {
            Path::new(LOCAL_CONFIG_FILE).to_path_buf()
        } else {
            Self::config_path()
        }
    }
}

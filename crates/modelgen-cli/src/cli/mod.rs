//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No model logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "modelgen",
    bin_name = "modelgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Resolve domain models for code generators",
    long_about = "modelgen loads a domain model (modules, entities, relations), \
                  resolves relation ownership and flattens inheritance so that \
                  code emitters can consume a ready-made view.",
    after_help = "EXAMPLES:\n\
        \x20 modelgen check    models/\n\
        \x20 modelgen relations shop.model.toml -m Shop\n\
        \x20 modelgen resolve  shop.model.toml -m Shop --output-format json\n\
        \x20 modelgen completions bash > /usr/share/bash-completion/completions/modelgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load and validate a model.
    #[command(
        about = "Validate a model and report unresolved references",
        after_help = "EXAMPLES:\n\
            \x20 modelgen check shop.model.toml\n\
            \x20 modelgen check models/ --strict"
    )]
    Check(CheckArgs),

    /// List the modules of a model.
    #[command(
        visible_alias = "ls",
        about = "List modules",
        after_help = "EXAMPLES:\n\
            \x20 modelgen modules models/\n\
            \x20 modelgen modules shop.model.json --output-format json"
    )]
    Modules(ModelArgs),

    /// Print the relation map of a module.
    #[command(
        about = "Show resolved relations of a module",
        after_help = "EXAMPLES:\n\
            \x20 modelgen relations shop.model.toml -m Shop"
    )]
    Relations(ModuleArgs),

    /// Print flattened entities.
    #[command(
        about = "Show entities with inherited attributes and relations",
        after_help = "EXAMPLES:\n\
            \x20 modelgen resolve shop.model.toml            # every module\n\
            \x20 modelgen resolve shop.model.toml -m Shop    # one module"
    )]
    Resolve(ResolveArgs),

    /// Print entities in dependency order.
    #[command(
        about = "Show entities of a module, supertypes first",
        after_help = "EXAMPLES:\n\
            \x20 modelgen order shop.model.toml -m Shop"
    )]
    Order(ModuleArgs),

    /// Initialise a modelgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 modelgen init           # platform config location\n\
            \x20 modelgen init --local   # .modelgen.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 modelgen completions bash > ~/.local/share/bash-completion/completions/modelgen\n\
            \x20 modelgen completions zsh  > ~/.zfunc/_modelgen\n\
            \x20 modelgen completions fish > ~/.config/fish/completions/modelgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the modelgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 modelgen config get resolve.include_abstract\n\
            \x20 modelgen config list\n\
            \x20 modelgen config path"
    )]
    Config(ConfigCommands),
}

// ── model arguments ───────────────────────────────────────────────────────────

/// A model location: a `.toml`/`.json` document or a directory of
/// `*.model.toml` / `*.model.json` documents.
#[derive(Debug, Args)]
pub struct ModelArgs {
    #[arg(value_name = "MODEL", help = "Model file or directory")]
    pub model: PathBuf,
}

/// Arguments for `modelgen check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: ModelArgs,

    /// Treat unresolved references as errors.
    #[arg(long = "strict", help = "Fail when references are unresolved")]
    pub strict: bool,
}

/// A model plus one module of it.
#[derive(Debug, Args)]
pub struct ModuleArgs {
    #[command(flatten)]
    pub source: ModelArgs,

    /// Module name; nested modules use dotted names.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        help = "Module name (e.g. Shop or Shop.Billing)"
    )]
    pub module: Option<String>,
}

/// Arguments for `modelgen resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: ModuleArgs,

    /// Leave abstract entities out of the output.
    #[arg(long = "skip-abstract", help = "Omit abstract entities")]
    pub skip_abstract: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `modelgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.modelgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `modelgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `modelgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

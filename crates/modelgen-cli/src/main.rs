//! # modelgen CLI
//!
//! Inspect and resolve domain models ahead of code generation.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                              |
//! |------|--------------------------------------|
//! |  0   | Success                              |
//! |  1   | Internal / system error              |
//! |  2   | User / input error, invalid model    |
//! |  3   | Model, module or document not found  |
//! |  4   | Configuration error                  |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, with exit code 0
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let report = ErrorReport {
        verbose: cli.global.verbose > 0,
        json: cli.global.output_format == OutputFormat::Json,
        color: !cli.global.no_color && std::io::stderr().is_terminal(),
    };

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref())
        .with_cli_context(|| "Failed to load configuration")
    {
        Ok(cfg) => cfg,
        Err(e) => return report.emit(e),
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let report = ErrorReport {
        json: output.is_json(),
        color: report.color && !config.output.no_color,
        ..report
    };

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("modelgen completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => report.emit(e),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Check(args) => commands::check::execute(args, output),
        Commands::Modules(args) => commands::modules::execute(args, output),
        Commands::Relations(args) => commands::relations::execute(args, &config, output),
        Commands::Resolve(args) => commands::resolve::execute(args, &config, output),
        Commands::Order(args) => commands::order::execute(args, &config, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global.config, config, output),
    }
}

/// How a failed run is reported on stderr.
#[derive(Debug, Clone, Copy)]
struct ErrorReport {
    verbose: bool,
    json: bool,
    color: bool,
}

impl ErrorReport {
    /// Log `err`, print it, and map it to an exit code.
    fn emit(self, err: CliError) -> ExitCode {
        err.log();

        let msg = if self.json {
            format!("{}\n", err.to_json())
        } else if self.color {
            err.format_colored(self.verbose)
        } else {
            err.format_plain(self.verbose)
        };
        eprint!("{msg}");

        ExitCode::from(err.exit_code())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

//! swaggerdoc-ctl
//!
//! Generates `zz_generated.swagger_doc_generated.go` files from documentation
//! tables and verifies checked-in copies are current. Typical CI usage:
//!
//! ```text
//! swaggerdoc-ctl verify --enforce-comments
//! ```
//!
//! with the packages listed in `.swaggerdoc.toml`.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli_config::FormatterKind;

#[derive(Debug, Parser)]
#[command(
    name = "swaggerdoc-ctl",
    version,
    about = "Generate and verify Go swagger documentation files",
    styles = output::clap_styles()
)]
pub(crate) struct Cli {
    /// Config file (default: ./.swaggerdoc.toml, then ~/.config/swaggerdoc.toml)
    #[arg(long, global = true, env = "SWAGGERDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Source formatter to use (overrides `formatter` in the config file)
    #[arg(long, global = true, value_enum)]
    formatter: Option<FormatterKind>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Generate swagger doc files
    Generate {
        #[command(flatten)]
        target: TargetArgs,

        /// Output file (single table only; default: next to the table)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the generated file instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Verify checked-in swagger doc files are up to date
    Verify {
        #[command(flatten)]
        target: TargetArgs,

        /// File to verify (single table only; default: next to the table)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Fail when fields are undocumented
        #[arg(long)]
        enforce_comments: bool,
    },

    /// List undocumented types and fields
    Check {
        #[command(flatten)]
        target: TargetArgs,

        /// Exit non-zero when anything is undocumented
        #[arg(long)]
        enforce_comments: bool,
    },
}

/// Selects which documentation tables a command operates on.
#[derive(Debug, Args)]
pub(crate) struct TargetArgs {
    /// Documentation table (.yaml, .yml, .json or .toml). Without it, every
    /// package in the config file is processed.
    #[arg(short, long)]
    records: Option<PathBuf>,

    /// Go package name. With --records, overrides the table's `package`;
    /// without, selects one configured package.
    #[arg(short, long)]
    package: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        output::error(format!("failed to initialize logging: {e}"));
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("swaggerdoc_ctl={level}").parse()?)
                .add_directive(format!("swaggerdoc_sdk={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli_config::load_cli_config(cli.config.as_deref())?;
    let ctx = commands::Context::new(config, cli.formatter);

    match cli.command {
        Commands::Generate {
            target,
            output,
            stdout,
        } => commands::handle_generate_command(&ctx, &target, output.as_deref(), stdout),
        Commands::Verify {
            target,
            file,
            enforce_comments,
        } => commands::handle_verify_command(&ctx, &target, file.as_deref(), enforce_comments),
        Commands::Check {
            target,
            enforce_comments,
        } => commands::handle_check_command(&ctx, &target, enforce_comments),
    }
}

//! uxf - a command-line tool for UXF (Uniform eXchange Format) documents.
//!
//! Thin glue over the `uxf` library crate: every subcommand here is a
//! handful of lines that parse flags, call into `uxf`, and map the
//! result onto the exit codes `0`/`1`/`2`/`3` (§6 "CLI surface"). The
//! library never panics on malformed input, and we mirror that here by
//! propagating `CliError` all the way out instead of unwrapping.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    CompressArgs, InlineArgs, LintArgs, PprintArgs, UncompressArgs, run_compress, run_inline,
    run_lint, run_pprint, run_uncompress,
};
use config::Config;
use error::{CliError, Result};

/// uxf - read, write, and validate Uniform eXchange Format documents.
#[derive(Parser, Debug)]
#[command(name = "uxf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for UXF documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "UXF_CLI_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "UXF_CLI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pretty-print a document in canonical form
    Pprint(PprintCommand),

    /// Gzip-compress a document
    Compress(CompressCommand),

    /// Decompress a gzipped document
    Uncompress(UncompressCommand),

    /// Validate a document and report every diagnostic
    Lint(LintCommand),

    /// Resolve imports and embed their ttypes inline
    Inline(InlineCommand),
}

#[derive(Parser, Debug)]
struct PprintCommand {
    /// Input file, or `-` for stdin
    input: PathBuf,

    /// Output file, or `-`/omitted for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CompressCommand {
    input: PathBuf,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct UncompressCommand {
    input: PathBuf,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LintCommand {
    input: PathBuf,
}

#[derive(Parser, Debug)]
struct InlineCommand {
    input: PathBuf,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("uxf: {}", err);
        return ExitCode::from(3);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("uxf: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| CliError::Config(format!("failed to initialize logging: {}", e)))
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let format = &config.format;

    match cli.command {
        Commands::Pprint(args) => run_pprint(
            PprintArgs { input: args.input, output: args.output, verbose: cli.verbose },
            format,
        ),
        Commands::Compress(args) => run_compress(
            CompressArgs { input: args.input, output: args.output, verbose: cli.verbose },
            format,
        ),
        Commands::Uncompress(args) => run_uncompress(
            UncompressArgs { input: args.input, output: args.output, verbose: cli.verbose },
            format,
        ),
        Commands::Lint(args) => run_lint(LintArgs { input: args.input, verbose: cli.verbose }),
        Commands::Inline(args) => run_inline(
            InlineArgs { input: args.input, output: args.output, verbose: cli.verbose },
            format,
        ),
    }
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

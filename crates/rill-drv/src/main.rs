//! Rill CLI entry point.
//!
//! Accepts a source file path, plus debugging switches for dumping the
//! token stream or the AST instead of running. Program output goes to
//! stdout; diagnostics and logging go to stderr. Exit code is 0 on clean
//! execution and 1 on file-read failure, syntax error, or runtime error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rill_drv::{Config, EmitMode, Session};

/// Interpreter for the Rill scripting language
#[derive(Parser, Debug)]
#[command(name = "rill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the Rill scripting language", long_about = None)]
struct Cli {
    /// Rill source file to run
    file: PathBuf,

    /// Print the token stream and exit
    #[arg(long)]
    emit_tokens: bool,

    /// Print the parsed AST and exit
    #[arg(long, conflicts_with = "emit_tokens")]
    emit_ast: bool,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let emit = if cli.emit_tokens {
        EmitMode::Tokens
    } else if cli.emit_ast {
        EmitMode::Ast
    } else {
        EmitMode::Run
    };

    let session = Session::new(Config {
        input: cli.file,
        emit,
    });

    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Installs the stderr logging subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` raises the default
/// filter from `warn` to `debug`. The subscriber writes to stderr because
/// stdout belongs to the interpreted program.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

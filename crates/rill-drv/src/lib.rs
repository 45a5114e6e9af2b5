//! rill-drv - Interpreter driver.
//!
//! The driver orchestrates the pipeline: read the source file, lex it,
//! parse it, and either pretty-print an intermediate representation (the
//! emit modes, a debugging aid) or run the program against the standard
//! streams.
//!
//! Diagnostics are single-line and go to stderr; the two language
//! taxonomies render with their mandated prefixes (`Syntax Error:`,
//! `Runtime Error:`), and a file-read failure renders as a plain `error:`
//! line. Any of the three exits with code 1.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use rill_eval::{Interpreter, RuntimeError};
use rill_par::{Parser, SyntaxError};

/// What the driver should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Print the token stream and stop.
    Tokens,
    /// Print the parsed AST and stop.
    Ast,
    /// Run the program.
    #[default]
    Run,
}

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source file to interpret.
    pub input: PathBuf,

    /// What to produce.
    pub emit: EmitMode,
}

impl Config {
    /// Configuration that runs the given file.
    pub fn run_file(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            emit: EmitMode::Run,
        }
    }
}

/// A driver-level failure: file access or either interpreter taxonomy.
#[derive(Debug, Error)]
pub enum DriveError {
    /// The source file could not be read.
    #[error("error: cannot read '{}': {}", path.display(), source)]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The parser rejected the program.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The evaluator aborted.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// One interpreter invocation.
pub struct Session {
    config: Config,
}

impl Session {
    /// Creates a session for the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline against the standard streams.
    pub fn run(&self) -> Result<(), DriveError> {
        let source = read_source(&self.config.input)?;

        let tokens = rill_lex::tokenize(&source);
        debug!(tokens = tokens.len(), "lexed");

        if self.config.emit == EmitMode::Tokens {
            let mut stdout = std::io::stdout().lock();
            for lexed in &tokens {
                let _ = writeln!(stdout, "{:?}", lexed.token);
            }
            return Ok(());
        }

        let program = Parser::new(tokens).parse_program()?;
        debug!(stmts = program.stmts.len(), "parsed");

        if self.config.emit == EmitMode::Ast {
            println!("{:#?}", program);
            return Ok(());
        }

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut interpreter = Interpreter::new(stdin.lock(), stdout.lock());
        interpreter.run(&program)?;
        debug!("finished");
        Ok(())
    }
}

/// Parses and runs a source string against the given streams.
///
/// This is the library entry point the binary does not need: tests and
/// embedders can run programs without touching the filesystem or the
/// process streams.
///
/// # Example
///
/// ```
/// use rill_drv::run_source;
///
/// let mut out = Vec::new();
/// run_source("print(2 * 21)", std::io::empty(), &mut out).expect("runs");
/// assert_eq!(out, b"42 \n");
/// ```
pub fn run_source<R: BufRead, W: Write>(
    source: &str,
    input: R,
    output: W,
) -> Result<(), DriveError> {
    let program = Parser::new(rill_lex::tokenize(source)).parse_program()?;
    Interpreter::new(input, output).run(&program)?;
    Ok(())
}

fn read_source(path: &Path) -> Result<String, DriveError> {
    let source = std::fs::read_to_string(path).map_err(|source| DriveError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "read source");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Result<String, DriveError> {
        let mut out = Vec::new();
        run_source(source, std::io::empty(), &mut out)?;
        Ok(String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_run_source_happy_path() {
        assert_eq!(run("print(1 + 2)").expect("runs"), "3 \n");
    }

    #[test]
    fn test_run_source_syntax_error() {
        let err = run("let = 1").expect_err("must fail");
        assert!(matches!(err, DriveError::Syntax(_)));
        assert!(err.to_string().starts_with("Syntax Error:"));
    }

    #[test]
    fn test_run_source_runtime_error() {
        let err = run("ghost = 1").expect_err("must fail");
        assert!(matches!(err, DriveError::Runtime(_)));
        assert!(err.to_string().starts_with("Runtime Error:"));
    }

    #[test]
    fn test_read_failed_message() {
        let session = Session::new(Config::run_file("/definitely/not/here.rill"));
        let err = session.run().expect_err("must fail");
        assert!(matches!(err, DriveError::ReadFailed { .. }));
        assert!(err.to_string().starts_with("error: cannot read"));
    }

    #[test]
    fn test_emit_mode_default_is_run() {
        assert_eq!(EmitMode::default(), EmitMode::Run);
    }
}

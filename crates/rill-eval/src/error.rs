//! Runtime error types for the evaluator.
//!
//! Rill aborts on very few runtime situations: assigning to an undefined
//! variable, calling an undefined function, misusing `append`, a control
//! signal escaping its legal context, and I/O failure on the standard
//! streams. Everything else - unknown reads, bad coercions, division by
//! zero, out-of-range indexing, operator type mismatches - yields `null`
//! or a lenient default instead.

use thiserror::Error;

/// An error that aborts interpretation.
///
/// Rendered as a single-line `Runtime Error:` diagnostic.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Assignment to a name with no existing binding in any scope.
    #[error("Runtime Error: undefined variable '{name}' on line {line}")]
    UndefinedVariable { name: String, line: u32 },

    /// Call to a name that is neither a builtin nor a defined function.
    #[error("Runtime Error: call to undefined function '{name}' on line {line}")]
    UndefinedFunction { name: String, line: u32 },

    /// `append` called with fewer than two arguments.
    #[error("Runtime Error: append expects a list and a value on line {line}")]
    AppendArity { line: u32 },

    /// `append` called with a non-list first argument.
    #[error("Runtime Error: append target is not a list on line {line}")]
    AppendTarget { line: u32 },

    /// `break` reached the top of a function or the program.
    #[error("Runtime Error: 'break' outside of a loop on line {line}")]
    StrayBreak { line: u32 },

    /// `continue` reached the top of a function or the program.
    #[error("Runtime Error: 'continue' outside of a loop on line {line}")]
    StrayContinue { line: u32 },

    /// `return` reached the top of the program.
    #[error("Runtime Error: 'return' outside of a function on line {line}")]
    StrayReturn { line: u32 },

    /// Failure writing to stdout or reading stdin.
    #[error("Runtime Error: {0}")]
    Io(#[from] std::io::Error),
}

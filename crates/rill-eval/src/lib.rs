//! rill-eval - Tree-walking evaluator for the Rill language.
//!
//! The evaluator walks the AST produced by `rill-par` against a chain of
//! environments:
//!
//! - [`value`] - The dynamic tagged [`Value`] and its coercions
//! - [`env`] - The scope chain ([`Env`])
//! - [`ops`] - Binary operator and indexing semantics
//! - [`builtins`] - The builtin function table
//! - [`interp`] - The [`Interpreter`] itself
//! - [`error`] - [`RuntimeError`]
//!
//! Rill's error policy is tolerant-read / strict-write: reading an unknown
//! variable, mismatched operand types, division by zero, and out-of-range
//! indexing all yield `null` or a lenient default, while assigning to an
//! undefined variable, calling an undefined function, and misusing
//! `append` abort with a runtime error.

pub mod builtins;
pub mod env;
pub mod error;
pub mod interp;
pub mod ops;
pub mod value;

pub use env::{Env, EnvRef};
pub use error::RuntimeError;
pub use interp::Interpreter;
pub use value::Value;

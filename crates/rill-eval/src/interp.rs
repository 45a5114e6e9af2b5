//! The tree-walking interpreter.
//!
//! Statement execution returns a [`Flow`] value so `return`, `break`, and
//! `continue` unwind through enclosing blocks without host-language
//! exceptions: every construct passes unknown flow upward, and the two
//! fixed catch points are loops/switches (for `break`, loops alone for
//! `continue`) and the function-call boundary (for `return`). A signal
//! that escapes its legal context becomes a runtime error.
//!
//! Function calls use dynamic scoping: the callee's scope is a child of
//! the caller's current scope, not of the scope the function was defined
//! in. This is a deliberate, preserved quirk of the language - closures
//! are impossible, and a free variable in a function body resolves
//! through whatever chain the call site provides. Recursion works because
//! the function's own name stays resolvable through that chain.

use std::io::{BufRead, Write};

use rill_par::{BinaryExpr, Block, CallExpr, Expr, FuncDef, InputExpr, Literal, Stmt};

use crate::builtins;
use crate::env::{Env, EnvRef};
use crate::error::RuntimeError;
use crate::ops;
use crate::value::Value;

/// The result of executing a statement.
///
/// `Normal` continues with the next statement; the other variants unwind
/// until a construct catches them.
enum Flow {
    Normal,
    Break { line: u32 },
    Continue { line: u32 },
    Return { value: Value, line: u32 },
}

/// The Rill evaluator.
///
/// Generic over its input and output streams so tests can run programs
/// against in-memory buffers; the driver passes locked stdin/stdout.
///
/// # Example
///
/// ```
/// use rill_eval::Interpreter;
///
/// let program = rill_par::parse_source("print(1 + 2)").expect("parses");
/// let mut out = Vec::new();
/// Interpreter::new(std::io::empty(), &mut out)
///     .run(&program)
///     .expect("runs");
/// assert_eq!(out, b"3 \n");
/// ```
pub struct Interpreter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Creates an interpreter over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs a program in a fresh root environment.
    ///
    /// Each call uses its own root scope; re-running a program never
    /// observes state from a previous run.
    pub fn run(&mut self, program: &Block) -> Result<(), RuntimeError> {
        let root = Env::root();
        match self.exec_block_in(program, &root)? {
            Flow::Normal => {
                self.output.flush()?;
                Ok(())
            },
            Flow::Break { line } => Err(RuntimeError::StrayBreak { line }),
            Flow::Continue { line } => Err(RuntimeError::StrayContinue { line }),
            Flow::Return { line, .. } => Err(RuntimeError::StrayReturn { line }),
        }
    }

    /// Executes a block's statements directly in `env`.
    fn exec_block_in(&mut self, block: &Block, env: &EnvRef) -> Result<Flow, RuntimeError> {
        for stmt in &block.stmts {
            match self.exec_stmt(stmt, env)? {
                Flow::Normal => {},
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a block in a fresh child scope of `env`.
    fn exec_block_scoped(&mut self, block: &Block, env: &EnvRef) -> Result<Flow, RuntimeError> {
        let child = Env::child(env);
        self.exec_block_in(block, &child)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &EnvRef) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Let(s) => {
                let value = self.eval(&s.init, env)?;
                env.borrow_mut().define(s.name, value);
                Ok(Flow::Normal)
            },
            Stmt::Assign(s) => {
                let value = self.eval(&s.value, env)?;
                if env.borrow_mut().assign(s.name, value) {
                    Ok(Flow::Normal)
                } else {
                    Err(RuntimeError::UndefinedVariable {
                        name: s.name.as_str().to_owned(),
                        line: s.line,
                    })
                }
            },
            Stmt::Print(s) => {
                for arg in &s.args {
                    let value = self.eval(arg, env)?;
                    write!(self.output, "{} ", value)?;
                }
                writeln!(self.output)?;
                Ok(Flow::Normal)
            },
            Stmt::If(s) => {
                if self.eval(&s.cond, env)?.is_truthy() {
                    self.exec_block_scoped(&s.then_block, env)
                } else if let Some(else_block) = &s.else_block {
                    self.exec_block_scoped(else_block, env)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::While(s) => {
                while self.eval(&s.cond, env)?.is_truthy() {
                    match self.exec_block_scoped(&s.body, env)? {
                        Flow::Normal | Flow::Continue { .. } => {},
                        Flow::Break { .. } => break,
                        ret @ Flow::Return { .. } => return Ok(ret),
                    }
                }
                Ok(Flow::Normal)
            },
            Stmt::Switch(s) => self.exec_switch(s, env),
            Stmt::Break { line } => Ok(Flow::Break { line: *line }),
            Stmt::Continue { line } => Ok(Flow::Continue { line: *line }),
            Stmt::Return(s) => {
                let value = self.eval(&s.value, env)?;
                Ok(Flow::Return {
                    value,
                    line: s.line,
                })
            },
            Stmt::Func(def) => {
                env.borrow_mut().define_func(def.clone());
                Ok(Flow::Normal)
            },
            Stmt::Expr(expr) => {
                self.eval(expr, env)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Switch semantics: the discriminant is evaluated once, the first arm
    /// whose value has the same canonical string form runs in its own
    /// scope, and no later arm is considered regardless of `break`.
    fn exec_switch(&mut self, s: &rill_par::SwitchStmt, env: &EnvRef) -> Result<Flow, RuntimeError> {
        let discriminant = self.eval(&s.discriminant, env)?.to_string();

        for case in &s.cases {
            if self.eval(&case.value, env)?.to_string() == discriminant {
                return Ok(match self.exec_block_scoped(&case.body, env)? {
                    // break is caught at the switch
                    Flow::Break { .. } => Flow::Normal,
                    flow => flow,
                });
            }
        }

        if let Some(default) = &s.default {
            return Ok(match self.exec_block_scoped(default, env)? {
                Flow::Break { .. } => Flow::Normal,
                flow => flow,
            });
        }

        Ok(Flow::Normal)
    }

    fn eval(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit) => Ok(match &lit.value {
                Literal::Int(n) => Value::Int(*n),
                Literal::Float(f) => Value::Float(*f),
                Literal::Str(s) => Value::str(s.as_str()),
                Literal::Bool(b) => Value::Bool(*b),
            }),
            // Reads are tolerant: an unknown name is null, never an error.
            Expr::Ident(ident) => Ok(env.borrow().lookup(ident.name).unwrap_or(Value::Null)),
            Expr::List(list) => {
                let mut items = Vec::with_capacity(list.items.len());
                for item in &list.items {
                    items.push(self.eval(item, env)?);
                }
                Ok(Value::list(items))
            },
            Expr::Binary(binary) => self.eval_binary(binary, env),
            Expr::Index(index) => {
                let target = self.eval(&index.target, env)?;
                let idx = self.eval(&index.index, env)?;
                Ok(ops::index(&target, &idx))
            },
            Expr::Call(call) => self.eval_call(call, env),
            Expr::Input(input) => self.eval_input(input, env),
        }
    }

    /// Both operands are always evaluated, left first. Rill's `&&` and
    /// `||` do not short-circuit.
    fn eval_binary(&mut self, binary: &BinaryExpr, env: &EnvRef) -> Result<Value, RuntimeError> {
        let left = self.eval(&binary.left, env)?;
        let right = self.eval(&binary.right, env)?;
        Ok(ops::binary(binary.op, &left, &right))
    }

    /// Call dispatch: builtins first, then user functions.
    fn eval_call(&mut self, call: &CallExpr, env: &EnvRef) -> Result<Value, RuntimeError> {
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval(arg, env)?);
        }

        if let Some(result) = builtins::call_builtin(call.name, &args, call.line) {
            return result;
        }

        let def = env.borrow().lookup_func(call.name).ok_or_else(|| {
            RuntimeError::UndefinedFunction {
                name: call.name.as_str().to_owned(),
                line: call.line,
            }
        })?;

        self.call_function(&def, args, env)
    }

    /// Invokes a user function with already-evaluated arguments.
    ///
    /// The new scope is a child of the caller's current scope - dynamic
    /// scoping. Missing arguments bind to null; extras are discarded. A
    /// `return` flow produces the call's value; falling off the end of the
    /// body produces null.
    fn call_function(
        &mut self,
        def: &FuncDef,
        args: Vec<Value>,
        caller: &EnvRef,
    ) -> Result<Value, RuntimeError> {
        let scope = Env::child(caller);
        {
            let mut scope_mut = scope.borrow_mut();
            for (i, param) in def.params.iter().enumerate() {
                scope_mut.define(*param, args.get(i).cloned().unwrap_or(Value::Null));
            }
        }

        match self.exec_block_in(&def.body, &scope)? {
            Flow::Return { value, .. } => Ok(value),
            Flow::Normal => Ok(Value::Null),
            // A loop signal with no enclosing loop in this function cannot
            // unwind into the caller; it aborts instead.
            Flow::Break { line } => Err(RuntimeError::StrayBreak { line }),
            Flow::Continue { line } => Err(RuntimeError::StrayContinue { line }),
        }
    }

    fn eval_input(&mut self, input: &InputExpr, env: &EnvRef) -> Result<Value, RuntimeError> {
        if let Some(prompt) = &input.prompt {
            let value = self.eval(prompt, env)?;
            write!(self.output, "{}", value)?;
        }
        // stdout must be visible before we block on stdin.
        self.output.flush()?;

        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            return Ok(Value::str(""));
        }
        if line.ends_with('\n') {
            line.pop();
        }
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(Value::Str(line.into()))
    }
}

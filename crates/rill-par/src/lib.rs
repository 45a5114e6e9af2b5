//! rill-par - Parser for the Rill language.
//!
//! A recursive-descent parser over the token stream produced by
//! `rill-lex`. Statements are parsed top-down; expressions use
//! binding-power precedence climbing (see [`expr`]).
//!
//! Newlines are Rill's statement separators. The parser skips them freely
//! at statement boundaries and around braces, and never inside a single
//! expression.
//!
//! The first syntax error aborts parsing; there is no error recovery. The
//! resulting [`SyntaxError`] carries the offending lexeme and source line
//! and renders as the single-line `Syntax Error:` diagnostic the driver
//! prints.

pub mod ast;
pub mod expr;
pub mod stmt;

use rill_lex::{Lexed, Token};
use thiserror::Error;

pub use ast::*;

/// A syntax error produced by the parser.
///
/// Rendered as a single-line diagnostic:
///
/// ```text
/// Syntax Error: expected ')' after condition, found 'newline' on line 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax Error: {message}, found '{lexeme}' on line {line}")]
pub struct SyntaxError {
    /// What the parser was looking for.
    pub message: String,
    /// Surface text of the offending token.
    pub lexeme: String,
    /// 1-based source line of the offending token.
    pub line: u32,
}

/// Convenience entry point: lex and parse a source string.
///
/// # Example
///
/// ```
/// use rill_par::parse_source;
///
/// let program = parse_source("let x = 1 + 2").expect("valid program");
/// assert_eq!(program.stmts.len(), 1);
/// ```
pub fn parse_source(source: &str) -> Result<Block, SyntaxError> {
    Parser::new(rill_lex::tokenize(source)).parse_program()
}

/// The Rill parser.
///
/// Holds the full token vector (which always ends in `Eof`) and a cursor
/// position. All parsing methods live here and in the [`stmt`] / [`expr`]
/// impl blocks.
pub struct Parser {
    tokens: Vec<Lexed>,
    pos: usize,
}

impl Parser {
    /// Creates a parser over a lexed token stream.
    ///
    /// An `Eof` token is appended if the stream lacks one, so the cursor
    /// can never run off the end.
    pub fn new(mut tokens: Vec<Lexed>) -> Self {
        let ends_with_eof = matches!(tokens.last(), Some(lexed) if lexed.token == Token::Eof);
        if !ends_with_eof {
            let line = tokens.last().map(|lexed| lexed.line()).unwrap_or(1);
            tokens.push(Lexed::new(Token::Eof, rill_util::Span::point(line, 1)));
        }
        Self { tokens, pos: 0 }
    }

    /// Parses the whole program: top-level statements and function
    /// definitions up to `Eof`.
    pub fn parse_program(mut self) -> Result<Block, SyntaxError> {
        let mut stmts = Vec::new();

        loop {
            self.skip_newlines();
            if self.check(&Token::Eof) {
                break;
            }
            if self.check(&Token::Func) {
                stmts.push(self.parse_funcdef()?);
            } else {
                stmts.push(self.parse_stmt()?);
            }
        }

        Ok(Block { stmts, line: 1 })
    }

    // =========================================================================
    // TOKEN CURSOR
    // =========================================================================

    /// The current token.
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    /// The current token's source line.
    pub(crate) fn current_line(&self) -> u32 {
        self.tokens[self.pos].line()
    }

    /// Advances past the current token. `Eof` is sticky.
    pub(crate) fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns true if the current token equals `token`.
    pub(crate) fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    /// Consumes the current token if it equals `token`.
    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the expected token or fails with "expected {what}".
    pub(crate) fn expect(&mut self, token: &Token, what: &str) -> Result<(), SyntaxError> {
        if self.match_token(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    /// Consumes an identifier token, returning its symbol.
    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<rill_util::Symbol, SyntaxError> {
        match self.current() {
            Token::Ident(sym) => {
                let sym = *sym;
                self.advance();
                Ok(sym)
            },
            _ => Err(self.error(format!("expected {}", what))),
        }
    }

    /// Skips any run of newline tokens.
    pub(crate) fn skip_newlines(&mut self) {
        while self.check(&Token::Newline) {
            self.advance();
        }
    }

    /// Builds a syntax error at the current token.
    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            message: message.into(),
            lexeme: self.current().lexeme(),
            line: self.current_line(),
        }
    }
}

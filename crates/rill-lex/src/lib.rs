//! rill-lex - Lexical analyzer for the Rill language.
//!
//! The lexer transforms Rill source text into a stream of tokens. It is
//! organized as:
//!
//! - [`cursor`] - Character cursor with line/column tracking
//! - [`token`] - The `Token` enum and keyword table
//! - [`lexer`] - The `Lexer` itself
//!
//! Two properties distinguish Rill's lexical grammar from most C-family
//! languages: newlines are significant (each `\n` yields a `Newline`
//! token; they are the statement separators), and the scanner is
//! infallible - an unrecognized character becomes an `Invalid` token that
//! the parser reports if it ever reaches for it, and an unterminated
//! string yields whatever content was accumulated.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::{tokenize, Lexed, Lexer};
pub use token::Token;

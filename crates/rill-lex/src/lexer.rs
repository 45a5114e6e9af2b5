//! Main lexer implementation for the Rill language.
//!
//! The `Lexer` transforms source text into a stream of tokens using a
//! direct-coded scanner: one dispatch on the first character of each token,
//! with a specialized method per token family.
//!
//! The scanner is total. Every input, including unterminated strings and
//! stray characters, produces a token stream ending in `Eof`, and once
//! `Eof` is reached every further call yields `Eof` again.

use rill_util::{Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{keyword_from_ident, Token};

/// A token paired with its source span.
///
/// The span records the token's byte range and the line/column at which
/// the token starts. For a `Newline` token that is the line it terminates.
#[derive(Clone, Debug, PartialEq)]
pub struct Lexed {
    pub token: Token,
    pub span: Span,
}

impl Lexed {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }

    /// The 1-based source line the token starts on.
    #[inline]
    pub fn line(&self) -> u32 {
        self.span.line
    }
}

/// Lexes an entire source string into a token vector.
///
/// The returned vector always ends with exactly one `Eof` token.
///
/// # Example
///
/// ```
/// use rill_lex::{tokenize, Token};
///
/// let tokens = tokenize("let x = 1");
/// assert_eq!(tokens.len(), 5);
/// assert_eq!(tokens.last().map(|t| t.token.clone()), Some(Token::Eof));
/// ```
pub fn tokenize(source: &str) -> Vec<Lexed> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let lexed = lexer.next_token();
        let done = lexed.token == Token::Eof;
        tokens.push(lexed);
        if done {
            break;
        }
    }
    tokens
}

/// The Rill scanner.
///
/// Produces one token per call to [`Lexer::next_token`]. Whitespace other
/// than newlines is skipped; `#` and `//` comments run to the end of the
/// line and emit nothing.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    cursor: Cursor<'a>,

    /// Starting byte position of the current token.
    token_start: usize,

    /// Line where the current token starts (1-based).
    token_start_line: u32,

    /// Column where the current token starts (1-based).
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// # Example
    ///
    /// ```
    /// use rill_lex::{Lexer, Token};
    ///
    /// let mut lexer = Lexer::new("while (x)");
    /// assert_eq!(lexer.next_token().token, Token::While);
    /// assert_eq!(lexer.next_token().token, Token::LParen);
    /// ```
    pub fn next_token(&mut self) -> Lexed {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make(Token::Eof);
        }

        let token = match self.cursor.current_char() {
            '\n' => {
                self.cursor.advance();
                Token::Newline
            },
            '(' => {
                self.cursor.advance();
                Token::LParen
            },
            ')' => {
                self.cursor.advance();
                Token::RParen
            },
            '{' => {
                self.cursor.advance();
                Token::LBrace
            },
            '}' => {
                self.cursor.advance();
                Token::RBrace
            },
            '[' => {
                self.cursor.advance();
                Token::LBracket
            },
            ']' => {
                self.cursor.advance();
                Token::RBracket
            },
            ',' => {
                self.cursor.advance();
                Token::Comma
            },
            ':' => {
                self.cursor.advance();
                Token::Colon
            },
            '+' => {
                self.cursor.advance();
                Token::Plus
            },
            '-' => {
                self.cursor.advance();
                Token::Minus
            },
            '*' => {
                self.cursor.advance();
                Token::Star
            },
            // Comment starts were consumed above, so a slash here is division.
            '/' => {
                self.cursor.advance();
                Token::Slash
            },
            '%' => {
                self.cursor.advance();
                Token::Percent
            },
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '"' => self.lex_string(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.cursor.advance();
                Token::Invalid(c.to_string())
            },
        };

        self.make(token)
    }

    /// Wraps a token with the span recorded at its start.
    fn make(&self, token: Token) -> Lexed {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        Lexed::new(token, span)
    }

    /// Lex an identifier or keyword.
    fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);

        match keyword_from_ident(text) {
            Some(keyword) => keyword,
            None => Token::Ident(Symbol::intern(text)),
        }
    }

    /// Lex an integer or float literal.
    ///
    /// A `.` is only part of the number when followed by another digit;
    /// `1.` lexes as the integer 1 and a stray dot.
    fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(start);
            return match text.parse::<f64>() {
                Ok(value) => Token::Float(value),
                Err(_) => Token::Invalid(text.to_string()),
            };
        }

        let text = self.cursor.slice_from(start);
        match text.parse::<i64>() {
            Ok(value) => Token::Number(value),
            Err(_) => Token::Invalid(text.to_string()),
        }
    }

    /// Lex a string literal.
    ///
    /// A backslash takes the following character verbatim; no escape
    /// decoding is performed. Reaching end of input before the closing
    /// quote yields whatever content was accumulated.
    fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening quote

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                break;
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                },
                '\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_at_end() {
                        content.push(self.cursor.current_char());
                        self.cursor.advance();
                    }
                },
                c => {
                    content.push(c);
                    self.cursor.advance();
                },
            }
        }

        Token::Str(Symbol::intern(&content))
    }

    /// Lex `=` or `==`.
    fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::EqEq
        } else {
            Token::Eq
        }
    }

    /// Lex `!=`. Rill has no unary `!`, so a lone bang is invalid.
    fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::NotEq
        } else {
            Token::Invalid("!".to_string())
        }
    }

    /// Lex `<` or `<=`.
    fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::LtEq
        } else {
            Token::Lt
        }
    }

    /// Lex `>` or `>=`.
    fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::GtEq
        } else {
            Token::Gt
        }
    }

    /// Lex `&&`. A lone ampersand is invalid.
    fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            Token::AndAnd
        } else {
            Token::Invalid("&".to_string())
        }
    }

    /// Lex `||`. A lone pipe is invalid.
    fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            Token::OrOr
        } else {
            Token::Invalid("|".to_string())
        }
    }

    /// Skips spaces, tabs, carriage returns, and comments.
    ///
    /// Newlines are significant and are never skipped here. Both comment
    /// forms (`#...` and `//...`) run to the next newline without
    /// consuming it.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => self.cursor.advance(),
                '#' => self.skip_line_comment(),
                '/' if self.cursor.peek_char(1) == '/' => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    /// Consumes characters up to (not including) the next newline.
    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }
}

/// Returns true for characters that may start an identifier.
#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true for characters that may continue an identifier.
#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects tokens without their spans.
    fn lex(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|l| l.token).collect()
    }

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(lex(""), vec![Token::Eof]);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().token, Token::Ident(sym("x")));
        assert_eq!(lexer.next_token().token, Token::Eof);
        assert_eq!(lexer.next_token().token, Token::Eof);
        assert_eq!(lexer.next_token().token, Token::Eof);
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            lex("let x while whilex"),
            vec![
                Token::Let,
                Token::Ident(sym("x")),
                Token::While,
                Token::Ident(sym("whilex")),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_underscore_identifiers() {
        assert_eq!(
            lex("_tmp a_1"),
            vec![Token::Ident(sym("_tmp")), Token::Ident(sym("a_1")), Token::Eof]
        );
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(lex("0 42 007"), vec![
            Token::Number(0),
            Token::Number(42),
            Token::Number(7),
            Token::Eof,
        ]);
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(lex("3.14"), vec![Token::Float(3.14), Token::Eof]);
        assert_eq!(lex("0.5"), vec![Token::Float(0.5), Token::Eof]);
    }

    #[test]
    fn test_dot_not_followed_by_digit_stays_out_of_number() {
        // "1." is the integer 1 followed by a stray dot, which Rill does
        // not recognize as a token.
        assert_eq!(
            lex("1."),
            vec![Token::Number(1), Token::Invalid(".".into()), Token::Eof]
        );
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(lex("\"hello\""), vec![Token::Str(sym("hello")), Token::Eof]);
        assert_eq!(lex("\"\""), vec![Token::Str(sym("")), Token::Eof]);
    }

    #[test]
    fn test_string_backslash_takes_next_verbatim() {
        // \" suppresses termination; the backslash itself is dropped.
        assert_eq!(
            lex(r#""say \"hi\"""#),
            vec![Token::Str(sym("say \"hi\"")), Token::Eof]
        );
        // \n is not decoded; it is a literal 'n'.
        assert_eq!(lex(r#""a\nb""#), vec![Token::Str(sym("anb")), Token::Eof]);
    }

    #[test]
    fn test_unterminated_string_accepted() {
        assert_eq!(lex("\"oops"), vec![Token::Str(sym("oops")), Token::Eof]);
        // Trailing backslash at end of input
        assert_eq!(lex("\"oops\\"), vec![Token::Str(sym("oops")), Token::Eof]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("+ - * / % = == != < > <= >= && ||"),
            vec![
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Percent,
                Token::Eq,
                Token::EqEq,
                Token::NotEq,
                Token::Lt,
                Token::Gt,
                Token::LtEq,
                Token::GtEq,
                Token::AndAnd,
                Token::OrOr,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators_win_over_prefixes() {
        assert_eq!(lex("==="), vec![Token::EqEq, Token::Eq, Token::Eof]);
        assert_eq!(lex("<=="), vec![Token::LtEq, Token::Eq, Token::Eof]);
    }

    #[test]
    fn test_lone_half_operators_are_invalid() {
        assert_eq!(lex("&"), vec![Token::Invalid("&".into()), Token::Eof]);
        assert_eq!(lex("|"), vec![Token::Invalid("|".into()), Token::Eof]);
        assert_eq!(lex("!"), vec![Token::Invalid("!".into()), Token::Eof]);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            lex("( ) { } [ ] , :"),
            vec![
                Token::LParen,
                Token::RParen,
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
                Token::Comma,
                Token::Colon,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_newlines_are_tokens() {
        assert_eq!(
            lex("a\nb\n"),
            vec![
                Token::Ident(sym("a")),
                Token::Newline,
                Token::Ident(sym("b")),
                Token::Newline,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_carriage_return_is_skipped() {
        assert_eq!(
            lex("a\r\nb"),
            vec![Token::Ident(sym("a")), Token::Newline, Token::Ident(sym("b")), Token::Eof]
        );
    }

    #[test]
    fn test_hash_comment() {
        assert_eq!(
            lex("a # comment\nb"),
            vec![Token::Ident(sym("a")), Token::Newline, Token::Ident(sym("b")), Token::Eof]
        );
    }

    #[test]
    fn test_slash_slash_comment() {
        assert_eq!(
            lex("a // comment\nb"),
            vec![Token::Ident(sym("a")), Token::Newline, Token::Ident(sym("b")), Token::Eof]
        );
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(lex("# nothing else"), vec![Token::Eof]);
        assert_eq!(lex("// nothing else"), vec![Token::Eof]);
    }

    #[test]
    fn test_single_slash_is_division() {
        assert_eq!(
            lex("a / b"),
            vec![Token::Ident(sym("a")), Token::Slash, Token::Ident(sym("b")), Token::Eof]
        );
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(lex("@"), vec![Token::Invalid("@".into()), Token::Eof]);
        assert_eq!(lex(";"), vec![Token::Invalid(";".into()), Token::Eof]);
    }

    #[test]
    fn test_token_lines() {
        let tokens = tokenize("let a\nlet b");
        // "let" "a" NEWLINE "let" "b" EOF
        assert_eq!(tokens[0].line(), 1);
        assert_eq!(tokens[1].line(), 1);
        // The newline records the line it terminates.
        assert_eq!(tokens[2].token, Token::Newline);
        assert_eq!(tokens[2].line(), 1);
        assert_eq!(tokens[3].line(), 2);
        assert_eq!(tokens[4].line(), 2);
    }

    #[test]
    fn test_line_at_least_one() {
        for lexed in tokenize("a\nb\n\nc # x\n") {
            assert!(lexed.line() >= 1);
        }
    }

    #[test]
    fn test_columns_advisory() {
        let tokens = tokenize("let x");
        assert_eq!(tokens[0].span.column, 1);
        assert_eq!(tokens[1].span.column, 5);
    }

    #[test]
    fn test_spans_cover_lexemes() {
        let source = "let answer = 42";
        let tokens = tokenize(source);
        assert_eq!(&source[tokens[0].span.start..tokens[0].span.end], "let");
        assert_eq!(&source[tokens[1].span.start..tokens[1].span.end], "answer");
        assert_eq!(&source[tokens[3].span.start..tokens[3].span.end], "42");
    }

    #[test]
    fn test_statement_shaped_input() {
        assert_eq!(
            lex("let i = 0\nwhile (i < 3) { i = i + 1 }"),
            vec![
                Token::Let,
                Token::Ident(sym("i")),
                Token::Eq,
                Token::Number(0),
                Token::Newline,
                Token::While,
                Token::LParen,
                Token::Ident(sym("i")),
                Token::Lt,
                Token::Number(3),
                Token::RParen,
                Token::LBrace,
                Token::Ident(sym("i")),
                Token::Eq,
                Token::Ident(sym("i")),
                Token::Plus,
                Token::Number(1),
                Token::RBrace,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_utf8_passthrough_in_strings() {
        assert_eq!(lex("\"héllo\""), vec![Token::Str(sym("héllo")), Token::Eof]);
    }
}

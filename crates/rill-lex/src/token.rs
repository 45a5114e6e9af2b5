//! Token definitions for the Rill language.
//!
//! Each variant carries all data associated with the token: identifiers
//! and string literals hold an interned [`Symbol`], numeric literals hold
//! their parsed payload.

use rill_util::Symbol;

/// A lexical unit of Rill source code.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// "let" - Variable binding keyword
    Let,

    /// "if" - Conditional keyword
    If,

    /// "else" - Alternative branch keyword
    Else,

    /// "func" - Function definition keyword
    Func,

    /// "return" - Function return keyword
    Return,

    /// "true" - Boolean literal
    True,

    /// "false" - Boolean literal
    False,

    /// "print" - Output statement keyword
    Print,

    /// "input" - Line-read expression keyword
    Input,

    /// "while" - Loop keyword
    While,

    /// "break" - Loop/switch exit keyword
    Break,

    /// "continue" - Loop continuation keyword
    Continue,

    /// "switch" - Multi-way branch keyword
    Switch,

    /// "case" - Switch arm keyword
    Case,

    /// "default" - Switch fallback keyword
    Default,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    /// Identifier (variable or function name)
    Ident(Symbol),

    /// Integer literal
    Number(i64),

    /// Floating point literal
    Float(f64),

    /// String literal (content, with backslash pass-through applied)
    Str(Symbol),

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// "+" - Addition / concatenation
    Plus,

    /// "-" - Subtraction
    Minus,

    /// "*" - Multiplication
    Star,

    /// "/" - Division
    Slash,

    /// "%" - Modulo
    Percent,

    /// "=" - Assignment
    Eq,

    /// "==" - Equality
    EqEq,

    /// "!=" - Inequality
    NotEq,

    /// "<" - Less than
    Lt,

    /// ">" - Greater than
    Gt,

    /// "<=" - Less than or equal
    LtEq,

    /// ">=" - Greater than or equal
    GtEq,

    /// "&&" - Logical AND
    AndAnd,

    /// "||" - Logical OR
    OrOr,

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    /// "(" - Left parenthesis
    LParen,

    /// ")" - Right parenthesis
    RParen,

    /// "{" - Left brace
    LBrace,

    /// "}" - Right brace
    RBrace,

    /// "[" - Left bracket
    LBracket,

    /// "]" - Right bracket
    RBracket,

    /// "," - Comma
    Comma,

    /// ":" - Colon
    Colon,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Significant line terminator
    ///
    /// Newlines separate statements in Rill, so the lexer emits them as
    /// tokens instead of skipping them with the rest of the whitespace.
    Newline,

    /// End of file marker
    ///
    /// Once emitted, every subsequent call to the lexer yields `Eof` again.
    Eof,

    /// Unrecognized character
    ///
    /// The lexer never fails; it hands the offending text to the parser,
    /// which reports it as a syntax error if it reaches for it.
    Invalid(String),
}

impl Token {
    /// The surface text of this token, for diagnostics.
    ///
    /// Literals render their source form; `Newline` and `Eof` render as
    /// readable words since they have no printable lexeme.
    pub fn lexeme(&self) -> String {
        match self {
            Token::Let => "let".into(),
            Token::If => "if".into(),
            Token::Else => "else".into(),
            Token::Func => "func".into(),
            Token::Return => "return".into(),
            Token::True => "true".into(),
            Token::False => "false".into(),
            Token::Print => "print".into(),
            Token::Input => "input".into(),
            Token::While => "while".into(),
            Token::Break => "break".into(),
            Token::Continue => "continue".into(),
            Token::Switch => "switch".into(),
            Token::Case => "case".into(),
            Token::Default => "default".into(),
            Token::Ident(sym) => sym.as_str().into(),
            Token::Number(n) => n.to_string(),
            Token::Float(f) => f.to_string(),
            Token::Str(sym) => format!("\"{}\"", sym.as_str()),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Percent => "%".into(),
            Token::Eq => "=".into(),
            Token::EqEq => "==".into(),
            Token::NotEq => "!=".into(),
            Token::Lt => "<".into(),
            Token::Gt => ">".into(),
            Token::LtEq => "<=".into(),
            Token::GtEq => ">=".into(),
            Token::AndAnd => "&&".into(),
            Token::OrOr => "||".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::LBrace => "{".into(),
            Token::RBrace => "}".into(),
            Token::LBracket => "[".into(),
            Token::RBracket => "]".into(),
            Token::Comma => ",".into(),
            Token::Colon => ":".into(),
            Token::Newline => "newline".into(),
            Token::Eof => "end of file".into(),
            Token::Invalid(text) => text.clone(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

/// Looks up the keyword token for an identifier lexeme.
///
/// Returns `None` if the lexeme is not a reserved word.
pub fn keyword_from_ident(text: &str) -> Option<Token> {
    match text {
        "let" => Some(Token::Let),
        "if" => Some(Token::If),
        "else" => Some(Token::Else),
        "func" => Some(Token::Func),
        "return" => Some(Token::Return),
        "true" => Some(Token::True),
        "false" => Some(Token::False),
        "print" => Some(Token::Print),
        "input" => Some(Token::Input),
        "while" => Some(Token::While),
        "break" => Some(Token::Break),
        "continue" => Some(Token::Continue),
        "switch" => Some(Token::Switch),
        "case" => Some(Token::Case),
        "default" => Some(Token::Default),
        _ => None,
    }
}

//! Expression parsing using binding-power precedence climbing.
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `\|\|` | Left |
//! | 2 | `&&` | Left |
//! | 3 | `==`, `!=` | Left |
//! | 4 | `<`, `>`, `<=`, `>=` | Left |
//! | 5 | `+`, `-` | Left |
//! | 6 | `*`, `/`, `%` | Left |
//! | 7 | postfix call `(...)` and index `[...]` | - |
//!
//! Rill has no unary operators. Calls are only legal on a bare identifier;
//! index chains may follow any primary and compound with calls.

use rill_lex::Token;

use crate::ast::*;
use crate::{Parser, SyntaxError};

/// Binding power levels for precedence climbing.
/// Higher numbers bind tighter. Left-associative operators use
/// `(level, level + 1)`.
#[doc(hidden)]
pub mod bp {
    /// Minimum binding power (start of expression)
    pub const MIN: u8 = 0;

    /// Logical OR: ||
    pub const LOGICAL_OR: u8 = 2;

    /// Logical AND: &&
    pub const LOGICAL_AND: u8 = 4;

    /// Equality: ==, !=
    pub const EQUALITY: u8 = 6;

    /// Relational: <, >, <=, >=
    pub const RELATIONAL: u8 = 8;

    /// Additive: +, -
    pub const ADDITIVE: u8 = 10;

    /// Multiplicative: *, /, %
    pub const MULTIPLICATIVE: u8 = 12;
}

impl Parser {
    /// Parse a complete expression.
    pub fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_expr_bp(bp::MIN)
    }

    /// Parse an expression whose operators all bind at least as tightly
    /// as `min_bp`.
    ///
    /// This is the precedence-climbing core: parse a postfix expression as
    /// the left-hand side, then fold in binary operators while their left
    /// binding power clears the minimum, recursing with the operator's
    /// right binding power for the right-hand side.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_postfix()?;

        while let Some((op, left_bp, right_bp)) = infix_binding_power(self.current()) {
            if left_bp < min_bp {
                break;
            }
            let line = self.current_line();
            self.advance();
            let rhs = self.parse_expr_bp(right_bp)?;
            lhs = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                line,
            });
        }

        Ok(lhs)
    }

    /// Parse a primary expression followed by any chain of calls and
    /// index accesses.
    fn parse_postfix(&mut self) -> Result<Expr, SyntaxError> {
        // A call is only legal on a bare identifier primary, not on a
        // parenthesized expression that happens to be one.
        let bare_ident = matches!(self.current(), Token::Ident(_));
        let mut expr = self.parse_primary()?;

        loop {
            match self.current() {
                Token::LParen => {
                    let name = match &expr {
                        Expr::Ident(ident) if bare_ident => ident.name,
                        _ => return Err(self.error("only a function name can be called")),
                    };
                    let line = self.current_line();
                    self.advance();
                    let args = self.parse_call_args()?;
                    expr = Expr::Call(CallExpr { name, args, line });
                },
                Token::LBracket => {
                    let line = self.current_line();
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect(&Token::RBracket, "']' after index")?;
                    expr = Expr::Index(IndexExpr {
                        target: Box::new(expr),
                        index: Box::new(index),
                        line,
                    });
                },
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Parse call arguments up to the closing parenthesis. The opening
    /// parenthesis has already been consumed.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::RParen, "')' after arguments")?;
        Ok(args)
    }

    /// Parse a primary expression: a literal, identifier, parenthesized
    /// expression, list literal, or `input(...)`.
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let line = self.current_line();

        let expr = match self.current().clone() {
            Token::Number(value) => {
                self.advance();
                Expr::Literal(LiteralExpr {
                    value: Literal::Int(value),
                    line,
                })
            },
            Token::Float(value) => {
                self.advance();
                Expr::Literal(LiteralExpr {
                    value: Literal::Float(value),
                    line,
                })
            },
            Token::Str(value) => {
                self.advance();
                Expr::Literal(LiteralExpr {
                    value: Literal::Str(value),
                    line,
                })
            },
            Token::True => {
                self.advance();
                Expr::Literal(LiteralExpr {
                    value: Literal::Bool(true),
                    line,
                })
            },
            Token::False => {
                self.advance();
                Expr::Literal(LiteralExpr {
                    value: Literal::Bool(false),
                    line,
                })
            },
            Token::Ident(name) => {
                self.advance();
                Expr::Ident(IdentExpr { name, line })
            },
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen, "')' after expression")?;
                inner
            },
            Token::LBracket => {
                self.advance();
                let mut items = Vec::new();
                if !self.check(&Token::RBracket) {
                    loop {
                        items.push(self.parse_expr()?);
                        if !self.match_token(&Token::Comma) {
                            break;
                        }
                    }
                }
                self.expect(&Token::RBracket, "']' after list elements")?;
                Expr::List(ListExpr { items, line })
            },
            Token::Input => {
                self.advance();
                self.expect(&Token::LParen, "'(' after 'input'")?;
                let prompt = if self.check(&Token::RParen) {
                    None
                } else {
                    Some(Box::new(self.parse_expr()?))
                };
                self.expect(&Token::RParen, "')' after input prompt")?;
                Expr::Input(InputExpr { prompt, line })
            },
            _ => return Err(self.error("expected expression")),
        };

        Ok(expr)
    }
}

/// Binding powers for the current token, if it is a binary operator.
///
/// Every Rill operator is left-associative, so the right binding power is
/// always one above the left.
fn infix_binding_power(token: &Token) -> Option<(BinOp, u8, u8)> {
    let (op, left_bp) = match token {
        Token::OrOr => (BinOp::Or, bp::LOGICAL_OR),
        Token::AndAnd => (BinOp::And, bp::LOGICAL_AND),
        Token::EqEq => (BinOp::Eq, bp::EQUALITY),
        Token::NotEq => (BinOp::Ne, bp::EQUALITY),
        Token::Lt => (BinOp::Lt, bp::RELATIONAL),
        Token::Gt => (BinOp::Gt, bp::RELATIONAL),
        Token::LtEq => (BinOp::Le, bp::RELATIONAL),
        Token::GtEq => (BinOp::Ge, bp::RELATIONAL),
        Token::Plus => (BinOp::Add, bp::ADDITIVE),
        Token::Minus => (BinOp::Sub, bp::ADDITIVE),
        Token::Star => (BinOp::Mul, bp::MULTIPLICATIVE),
        Token::Slash => (BinOp::Div, bp::MULTIPLICATIVE),
        Token::Percent => (BinOp::Mod, bp::MULTIPLICATIVE),
        _ => return None,
    };
    Some((op, left_bp, left_bp + 1))
}

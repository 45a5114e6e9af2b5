//! Statement parsing - let, print, if, while, switch, control flow, and
//! function definitions.

use std::rc::Rc;

use rill_lex::Token;

use crate::ast::*;
use crate::{Parser, SyntaxError};

impl Parser {
    /// Parse a single statement.
    ///
    /// Statements need no terminator: each one starts with a keyword or an
    /// expression, and expressions cannot span newlines, so statement
    /// boundaries are unambiguous even on a shared line.
    pub fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        match self.current() {
            Token::Let => self.parse_let_stmt(),
            Token::Print => self.parse_print_stmt(),
            Token::If => self.parse_if_stmt(),
            Token::While => self.parse_while_stmt(),
            Token::Switch => self.parse_switch_stmt(),
            Token::Break => {
                let line = self.current_line();
                self.advance();
                Ok(Stmt::Break { line })
            },
            Token::Continue => {
                let line = self.current_line();
                self.advance();
                Ok(Stmt::Continue { line })
            },
            Token::Return => self.parse_return_stmt(),
            Token::Func => Err(self.error("function definitions are only allowed at the top level")),
            _ => self.parse_expr_or_assign_stmt(),
        }
    }

    /// Parse `let IDENT = expression`.
    fn parse_let_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let line = self.current_line();
        self.expect(&Token::Let, "'let'")?;
        let name = self.expect_ident("a variable name after 'let'")?;
        self.expect(&Token::Eq, "'=' after variable name")?;
        let init = self.parse_expr()?;

        Ok(Stmt::Let(LetStmt { name, init, line }))
    }

    /// Parse `print ( [expression {, expression}] )`.
    fn parse_print_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let line = self.current_line();
        self.expect(&Token::Print, "'print'")?;
        self.expect(&Token::LParen, "'(' after 'print'")?;

        let mut args = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::RParen, "')' after print arguments")?;

        Ok(Stmt::Print(PrintStmt { args, line }))
    }

    /// Parse `if ( expression ) { block [ else ... ]`.
    ///
    /// The else branch is either another brace block or a single statement;
    /// `else if` is the single-statement form with a nested `if`.
    fn parse_if_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let line = self.current_line();
        self.expect(&Token::If, "'if'")?;
        self.expect(&Token::LParen, "'(' after 'if'")?;
        let cond = self.parse_expr()?;
        self.expect(&Token::RParen, "')' after condition")?;
        let then_block = self.parse_braced_block()?;

        self.skip_newlines();
        let else_block = if self.match_token(&Token::Else) {
            self.skip_newlines();
            if self.check(&Token::LBrace) {
                Some(self.parse_braced_block()?)
            } else {
                let else_line = self.current_line();
                let stmt = self.parse_stmt()?;
                Some(Block {
                    stmts: vec![stmt],
                    line: else_line,
                })
            }
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            cond,
            then_block,
            else_block,
            line,
        }))
    }

    /// Parse `while ( expression ) { block`.
    fn parse_while_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let line = self.current_line();
        self.expect(&Token::While, "'while'")?;
        self.expect(&Token::LParen, "'(' after 'while'")?;
        let cond = self.parse_expr()?;
        self.expect(&Token::RParen, "')' after condition")?;
        let body = self.parse_braced_block()?;

        Ok(Stmt::While(WhileStmt { cond, body, line }))
    }

    /// Parse `switch ( expression ) { case ...: ... default: ... }`.
    fn parse_switch_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let line = self.current_line();
        self.expect(&Token::Switch, "'switch'")?;
        self.expect(&Token::LParen, "'(' after 'switch'")?;
        let discriminant = self.parse_expr()?;
        self.expect(&Token::RParen, "')' after switch value")?;
        self.skip_newlines();
        self.expect(&Token::LBrace, "'{' to open switch body")?;

        let mut cases = Vec::new();
        let mut default = None;

        loop {
            self.skip_newlines();
            match self.current() {
                Token::Case => {
                    let case_line = self.current_line();
                    self.advance();
                    let value = self.parse_expr()?;
                    self.expect(&Token::Colon, "':' after case value")?;
                    let body = self.parse_case_items()?;
                    cases.push(SwitchCase {
                        value,
                        body,
                        line: case_line,
                    });
                },
                Token::Default => {
                    self.advance();
                    self.expect(&Token::Colon, "':' after 'default'")?;
                    default = Some(self.parse_case_items()?);
                },
                Token::RBrace => {
                    self.advance();
                    break;
                },
                _ => return Err(self.error("expected 'case', 'default', or '}' in switch body")),
            }
        }

        Ok(Stmt::Switch(SwitchStmt {
            discriminant,
            cases,
            default,
            line,
        }))
    }

    /// Parse the statements of one switch arm, up to the next `case`,
    /// `default`, or closing brace.
    fn parse_case_items(&mut self) -> Result<Block, SyntaxError> {
        let line = self.current_line();
        let mut stmts = Vec::new();

        loop {
            self.skip_newlines();
            match self.current() {
                Token::Case | Token::Default | Token::RBrace | Token::Eof => break,
                _ => stmts.push(self.parse_stmt()?),
            }
        }

        Ok(Block { stmts, line })
    }

    /// Parse `return expression`. Rill has no bare `return`.
    fn parse_return_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let line = self.current_line();
        self.expect(&Token::Return, "'return'")?;
        let value = self.parse_expr()?;

        Ok(Stmt::Return(ReturnStmt { value, line }))
    }

    /// Parse an expression statement, rewriting `expr = expr` into an
    /// assignment when the left side is a bare identifier.
    fn parse_expr_or_assign_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let expr = self.parse_expr()?;

        if self.check(&Token::Eq) {
            let name = match &expr {
                Expr::Ident(ident) => ident.name,
                _ => return Err(self.error("invalid assignment target")),
            };
            let line = self.current_line();
            self.advance();
            let value = self.parse_expr()?;
            return Ok(Stmt::Assign(AssignStmt { name, value, line }));
        }

        Ok(Stmt::Expr(expr))
    }

    /// Parse `func IDENT ( [IDENT {, IDENT}] ) { block`.
    pub(crate) fn parse_funcdef(&mut self) -> Result<Stmt, SyntaxError> {
        let line = self.current_line();
        self.expect(&Token::Func, "'func'")?;
        let name = self.expect_ident("a function name after 'func'")?;
        self.expect(&Token::LParen, "'(' after function name")?;

        let mut params = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                params.push(self.expect_ident("a parameter name")?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::RParen, "')' after parameters")?;
        let body = self.parse_braced_block()?;

        Ok(Stmt::Func(Rc::new(FuncDef {
            name,
            params,
            body,
            line,
        })))
    }

    /// Parse `{ block`: the opening brace, statements separated by
    /// newlines, and the closing brace.
    pub(crate) fn parse_braced_block(&mut self) -> Result<Block, SyntaxError> {
        self.skip_newlines();
        let line = self.current_line();
        self.expect(&Token::LBrace, "'{' to open a block")?;

        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();
            if self.match_token(&Token::RBrace) {
                break;
            }
            if self.check(&Token::Eof) {
                return Err(self.error("expected '}' to close block"));
            }
            stmts.push(self.parse_stmt()?);
        }

        Ok(Block { stmts, line })
    }
}

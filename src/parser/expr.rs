//! # Constant-expression grammar
//!
//! ```text
//! OrExpr   := AndExpr ('|' AndExpr)*
//! AndExpr  := AddExpr ('&' AddExpr)*
//! AddExpr  := UnaryExpr (('+' | '-') UnaryExpr)*
//! UnaryExpr:= ('-' | '!')* Primary
//! Primary  := Identifier_Defined | Integer | '(' OrExpr ')'
//! ```
//!
//! A hand-written recursive-descent parser over a combinator framework
//! (spec §9 Open Question): the grammar is small and fixed, so a parser
//! combinator crate would add a dependency for no real gain over five
//! short functions.
//!
//! Unary operators fold innermost-first (`!-x` negates, then complements
//! the negation — `ops.iter().rev()` below), matching ordinary precedence
//! for stacked prefix operators.
//!
//! Arithmetic runs in `i64` so intermediate values never overflow and
//! negative results mask correctly through `&`/`|` before the caller
//! truncates to a byte.

use super::Parser;
use crate::error::AsmError;
use crate::lexer::token::{Symbol, TokenKind};

impl<'a> Parser<'a> {
    /// Entry point used by everything except `define`: `parse_or_expr`
    /// itself, never deferring to a label. Top-level deferral to a label
    /// reference is handled by the caller before this is ever invoked.
    pub(super) fn parse_or_expr(&mut self) -> Result<i64, AsmError> {
        let mut value = self.parse_and_expr()?;
        while matches!(self.peek_kind(), Some(TokenKind::Symbol(Symbol::Or))) {
            self.advance();
            value |= self.parse_and_expr()?;
        }
        Ok(value)
    }

    fn parse_and_expr(&mut self) -> Result<i64, AsmError> {
        let mut value = self.parse_add_expr()?;
        while matches!(self.peek_kind(), Some(TokenKind::Symbol(Symbol::And))) {
            self.advance();
            value &= self.parse_add_expr()?;
        }
        Ok(value)
    }

    fn parse_add_expr(&mut self) -> Result<i64, AsmError> {
        let mut value = self.parse_unary_expr()?;
        loop {
            match self.peek_kind() {
                Some(TokenKind::Symbol(Symbol::Plus)) => {
                    self.advance();
                    value += self.parse_unary_expr()?;
                }
                Some(TokenKind::Symbol(Symbol::Minus)) => {
                    self.advance();
                    value -= self.parse_unary_expr()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_unary_expr(&mut self) -> Result<i64, AsmError> {
        let mut ops = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Symbol(op @ (Symbol::Minus | Symbol::Not))) => {
                    self.advance();
                    ops.push(op);
                }
                _ => break,
            }
        }
        let mut value = self.parse_primary()?;
        for op in ops.iter().rev() {
            value = match op {
                Symbol::Minus => -value,
                Symbol::Not => !value,
                _ => unreachable!("only Minus/Not are pushed above"),
            };
        }
        Ok(value)
    }

    fn parse_primary(&mut self) -> Result<i64, AsmError> {
        match self.peek_kind() {
            Some(TokenKind::Integer) => {
                let token = self.advance().expect("peeked Some above");
                let value = token.value.expect("Integer token always carries a value");
                if !(-32768..65536).contains(&value) {
                    return Err(AsmError::value(
                        format!("integer literal {value} is out of range"),
                        token.span(),
                    ));
                }
                Ok(value)
            }
            Some(TokenKind::Identifier) => {
                let token = self.advance().expect("peeked Some above");
                let name = token.lexeme();
                match self.symbols.constant(&name) {
                    Some(value) => {
                        self.symbols.mark_constant_used(&name);
                        Ok(value)
                    }
                    None => Err(AsmError::name(
                        format!("'{name}' is not a defined constant"),
                        token.span(),
                    )),
                }
            }
            Some(TokenKind::Symbol(Symbol::LParen)) => {
                self.advance();
                let value = self.parse_or_expr()?;
                self.expect_symbol(Symbol::RParen)?;
                Ok(value)
            }
            _ => Err(AsmError::syntax(
                "expected an integer, a defined constant, or '('",
                self.current_span(),
            )),
        }
    }
}

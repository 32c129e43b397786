//! Core parser struct and helper methods.

use std::collections::HashMap;

use crate::ast::{ClassRef, Stmt, StmtKind};
use crate::error::ParserError;
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

pub type ParseResult<T> = Result<T, ParserError>;

/// The parser for Mython.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    /// Classes declared so far, by name.
    pub(crate) classes: HashMap<String, ClassRef>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            classes: HashMap::new(),
        }
    }

    /// Parse a complete program into a single `Compound` root.
    pub fn parse(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        let span = start_span.merge(self.current_span());
        Ok(Stmt::new(StmtKind::Compound(statements), span))
    }

    // ===== Token manipulation =====

    pub(crate) fn advance(&mut self) -> Token {
        if self.is_at_end() {
            return self.tokens[self.current].clone();
        }
        self.current += 1;
        self.tokens[self.current - 1].clone()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        let index = (self.current + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Whether the next token has the same kind as `kind`, ignoring payloads
    /// for literals and identifiers. Punctuation is compared exactly.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        match kind {
            TokenKind::Char(_) => self.peek().kind == *kind,
            _ => std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind),
        }
    }

    pub(crate) fn check_char(&self, c: char) -> bool {
        self.check(&TokenKind::Char(c))
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_char(&mut self, c: char) -> bool {
        self.match_token(&TokenKind::Char(c))
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParserError::unexpected_token(
                format!("{}", kind),
                format!("{}", self.peek().kind),
                self.current_span(),
            ))
        }
    }

    pub(crate) fn expect_char(&mut self, c: char) -> ParseResult<Token> {
        self.expect(&TokenKind::Char(c))
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(ParserError::unexpected_token(
                "identifier",
                format!("{}", self.peek().kind),
                self.current_span(),
            )),
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    pub(crate) fn previous_span(&self) -> Span {
        self.previous().span
    }
}

//! Expression parsing by recursive descent, loosest binding first.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::TokenKind;
use crate::span::Span;

use super::core::{ParseResult, Parser};

impl Parser {
    /// A full expression: `or` binds loosest.
    pub(crate) fn test(&mut self) -> ParseResult<Stmt> {
        let mut left = self.and_test()?;
        while self.match_token(&TokenKind::Or) {
            let right = self.and_test()?;
            left = logical(LogicalOp::Or, left, right);
        }
        Ok(left)
    }

    fn and_test(&mut self) -> ParseResult<Stmt> {
        let mut left = self.not_test()?;
        while self.match_token(&TokenKind::And) {
            let right = self.not_test()?;
            left = logical(LogicalOp::And, left, right);
        }
        Ok(left)
    }

    fn not_test(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        if self.match_token(&TokenKind::Not) {
            let operand = self.not_test()?;
            let span = start_span.merge(operand.span);
            return Ok(Stmt::new(StmtKind::Not(Box::new(operand)), span));
        }
        self.comparison()
    }

    /// Comparisons do not chain: `a < b < c` is a syntax error.
    fn comparison(&mut self) -> ParseResult<Stmt> {
        let left = self.arith()?;
        let operator = match self.peek().kind {
            TokenKind::Eq => Comparator::Equal,
            TokenKind::NotEq => Comparator::NotEqual,
            TokenKind::LessOrEq => Comparator::LessOrEqual,
            TokenKind::GreaterOrEq => Comparator::GreaterOrEqual,
            TokenKind::Char('<') => Comparator::Less,
            TokenKind::Char('>') => Comparator::Greater,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.arith()?;
        let span = left.span.merge(right.span);
        Ok(Stmt::new(
            StmtKind::Comparison {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }

    fn arith(&mut self) -> ParseResult<Stmt> {
        let mut left = self.term()?;
        loop {
            let operator = if self.match_char('+') {
                ArithOp::Add
            } else if self.match_char('-') {
                ArithOp::Sub
            } else {
                return Ok(left);
            };
            let right = self.term()?;
            left = arithmetic(operator, left, right);
        }
    }

    fn term(&mut self) -> ParseResult<Stmt> {
        let mut left = self.unary()?;
        loop {
            let operator = if self.match_char('*') {
                ArithOp::Mult
            } else if self.match_char('/') {
                ArithOp::Div
            } else {
                return Ok(left);
            };
            let right = self.unary()?;
            left = arithmetic(operator, left, right);
        }
    }

    /// `-x` is sugar for `0 - x`.
    fn unary(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        if self.match_char('-') {
            let operand = self.unary()?;
            let zero = Stmt::new(StmtKind::Literal(Literal::Number(0)), start_span);
            return Ok(arithmetic(ArithOp::Sub, zero, operand));
        }
        self.postfix()
    }

    /// Method calls chained onto any primary: `Point(1, 2).norm()`.
    fn postfix(&mut self) -> ParseResult<Stmt> {
        let mut object = self.primary()?;
        while self.match_char('.') {
            let method = self.expect_identifier()?;
            let arguments = self.arguments()?;
            let span = object.span.merge(self.previous_span());
            object = Stmt::new(
                StmtKind::MethodCall {
                    object: Box::new(object),
                    method,
                    arguments,
                },
                span,
            );
        }
        Ok(object)
    }

    fn primary(&mut self) -> ParseResult<Stmt> {
        if let TokenKind::Identifier(name) = &self.peek().kind {
            if self.peek_nth(1).kind == TokenKind::Char('(') {
                let name = name.clone();
                let start_span = self.advance().span;
                return self.call_by_name(name, start_span);
            }
            return self.dotted_value();
        }

        let token = self.advance();
        let start_span = token.span;

        match token.kind {
            TokenKind::Number(n) => Ok(literal(Literal::Number(n), start_span)),
            TokenKind::StringLiteral(s) => Ok(literal(Literal::String(s), start_span)),
            TokenKind::True => Ok(literal(Literal::Bool(true), start_span)),
            TokenKind::False => Ok(literal(Literal::Bool(false), start_span)),
            TokenKind::None => Ok(literal(Literal::None, start_span)),

            TokenKind::Char('(') => {
                let inner = self.test()?;
                self.expect_char(')')?;
                Ok(inner)
            }

            other => Err(ParserError::unexpected_token(
                "expression",
                format!("{}", other),
                start_span,
            )),
        }
    }

    /// `str(x)` or `ClassName(args)`.
    fn call_by_name(&mut self, name: String, start_span: Span) -> ParseResult<Stmt> {
        if let Some(class) = self.classes.get(&name).cloned() {
            let arguments = self.arguments()?;
            let span = start_span.merge(self.previous_span());
            return Ok(Stmt::new(StmtKind::NewInstance { class, arguments }, span));
        }

        if name == "str" {
            self.expect_char('(')?;
            let argument = self.test()?;
            self.expect_char(')')?;
            let span = start_span.merge(self.previous_span());
            return Ok(Stmt::new(StmtKind::Stringify(Box::new(argument)), span));
        }

        Err(ParserError::unknown_class(name, start_span))
    }

    /// `a.b.c` reads a value; `a.b.m(args)` calls `m` on `a.b`.
    fn dotted_value(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        let mut path = self.dotted_name()?;

        if path.len() > 1 && self.check_char('(') {
            let object_span = start_span.merge(self.previous_span());
            let method = path.pop().unwrap_or_default();
            let arguments = self.arguments()?;
            let span = start_span.merge(self.previous_span());
            return Ok(Stmt::new(
                StmtKind::MethodCall {
                    object: Box::new(Stmt::new(StmtKind::VariableValue(path), object_span)),
                    method,
                    arguments,
                },
                span,
            ));
        }

        let span = start_span.merge(self.previous_span());
        Ok(Stmt::new(StmtKind::VariableValue(path), span))
    }

    /// A parenthesized, comma separated argument list.
    pub(crate) fn arguments(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect_char('(')?;
        let mut arguments = Vec::new();
        if !self.check_char(')') {
            loop {
                arguments.push(self.test()?);
                if !self.match_char(',') {
                    break;
                }
            }
        }
        self.expect_char(')')?;
        Ok(arguments)
    }
}

fn literal(value: Literal, span: Span) -> Stmt {
    Stmt::new(StmtKind::Literal(value), span)
}

fn logical(operator: LogicalOp, left: Stmt, right: Stmt) -> Stmt {
    let span = left.span.merge(right.span);
    Stmt::new(
        StmtKind::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn arithmetic(operator: ArithOp, left: Stmt, right: Stmt) -> Stmt {
    let span = left.span.merge(right.span);
    Stmt::new(
        StmtKind::Arithmetic {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

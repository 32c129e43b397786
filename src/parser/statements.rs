//! Statement parsing: classes, methods, if/else, return, print, assignment.

use std::rc::Rc;

use crate::ast::*;
use crate::error::ParserError;
use crate::interpreter::value::{Class, Method, SELF_NAME};
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn statement(&mut self) -> ParseResult<Stmt> {
        if self.check(&TokenKind::Class) {
            self.class_definition()
        } else if self.check(&TokenKind::If) {
            self.if_statement()
        } else if self.check(&TokenKind::Def) {
            Err(ParserError::general(
                "methods can only be defined inside a class",
                self.current_span(),
            ))
        } else {
            let stmt = self.simple_statement()?;
            self.expect(&TokenKind::Newline)?;
            Ok(stmt)
        }
    }

    fn class_definition(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Class)?;
        let name = self.expect_identifier()?;
        let name_span = self.previous_span();
        if self.classes.contains_key(&name) {
            return Err(ParserError::duplicate_class(name, name_span));
        }

        let parent = if self.match_char('(') {
            let parent_name = self.expect_identifier()?;
            let parent = self
                .classes
                .get(&parent_name)
                .and_then(ClassRef::get)
                .ok_or_else(|| ParserError::unknown_class(&parent_name, self.previous_span()))?;
            self.expect_char(')')?;
            Some(parent)
        } else {
            None
        };

        self.expect_char(':')?;
        self.expect(&TokenKind::Newline)?;
        self.expect(&TokenKind::Indent)?;

        // Registered before the body so methods can instantiate the class.
        let reference = ClassRef::pending(&name);
        self.classes.insert(name.clone(), reference.clone());

        let mut methods = Vec::new();
        loop {
            methods.push(self.method()?);
            if self.check(&TokenKind::Dedent) || self.is_at_end() {
                break;
            }
        }
        self.expect(&TokenKind::Dedent)?;

        let class = Rc::new(Class::new(name, methods, parent));
        reference.bind(&class);

        let span = start_span.merge(self.previous_span());
        Ok(Stmt::new(StmtKind::ClassDefinition(class), span))
    }

    fn method(&mut self) -> ParseResult<Method> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Def)?;
        let name = self.expect_identifier()?;

        self.expect_char('(')?;
        let mut params = Vec::new();
        if !self.check_char(')') {
            loop {
                params.push(self.expect_identifier()?);
                if !self.match_char(',') {
                    break;
                }
            }
        }
        self.expect_char(')')?;
        self.expect_char(':')?;

        // `self` is bound by the call itself.
        if params.first().map(String::as_str) == Some(SELF_NAME) {
            params.remove(0);
        }

        let body = self.suite()?;
        let span = start_span.merge(self.previous_span());
        let body = Stmt::new(StmtKind::MethodBody(Box::new(body)), span);
        Ok(Method::new(name, params, body))
    }

    /// An indented block after a `:`.
    fn suite(&mut self) -> ParseResult<Stmt> {
        self.expect(&TokenKind::Newline)?;
        let start_span = self.current_span();
        self.expect(&TokenKind::Indent)?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            statements.push(self.statement()?);
        }
        self.expect(&TokenKind::Dedent)?;

        let span = start_span.merge(self.previous_span());
        Ok(Stmt::new(StmtKind::Compound(statements), span))
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::If)?;
        let condition = self.test()?;
        self.expect_char(':')?;
        let then_branch = self.suite()?;

        let else_branch = if self.match_token(&TokenKind::Else) {
            self.expect_char(':')?;
            Some(Box::new(self.suite()?))
        } else {
            None
        };

        let span = start_span.merge(self.previous_span());
        Ok(Stmt::new(
            StmtKind::IfElse {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch,
            },
            span,
        ))
    }

    /// `print(a, b)`: a parenthesized argument list that ends the line.
    ///
    /// Rewinds and yields `None` when the parentheses only open an
    /// expression, as in `print (1 + 2) * 3`.
    fn print_call(&mut self) -> Option<Vec<Stmt>> {
        if !self.check_char('(') {
            return None;
        }
        let checkpoint = self.current;
        match self.arguments() {
            Ok(arguments) if self.check(&TokenKind::Newline) => Some(arguments),
            _ => {
                self.current = checkpoint;
                None
            }
        }
    }

    fn simple_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();

        if self.match_token(&TokenKind::Return) {
            let value = if self.check(&TokenKind::Newline) {
                Stmt::new(StmtKind::Literal(Literal::None), start_span)
            } else {
                self.test()?
            };
            let span = start_span.merge(value.span);
            return Ok(Stmt::new(StmtKind::Return(Box::new(value)), span));
        }

        if self.match_token(&TokenKind::Print) {
            if let Some(arguments) = self.print_call() {
                let span = start_span.merge(self.previous_span());
                return Ok(Stmt::new(StmtKind::Print(arguments), span));
            }

            let mut arguments = Vec::new();
            if !self.check(&TokenKind::Newline) {
                loop {
                    arguments.push(self.test()?);
                    if !self.match_char(',') {
                        break;
                    }
                }
            }
            let span = start_span.merge(self.previous_span());
            return Ok(Stmt::new(StmtKind::Print(arguments), span));
        }

        if self.at_assignment() {
            return self.assignment();
        }

        self.test()
    }

    /// Whether the tokens ahead read `name(.name)* =`.
    fn at_assignment(&self) -> bool {
        let mut n = 0;
        if !matches!(self.peek_nth(n).kind, TokenKind::Identifier(_)) {
            return false;
        }
        while self.peek_nth(n + 1).kind == TokenKind::Char('.')
            && matches!(self.peek_nth(n + 2).kind, TokenKind::Identifier(_))
        {
            n += 2;
        }
        self.peek_nth(n + 1).kind == TokenKind::Char('=')
    }

    fn assignment(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        let mut path = self.dotted_name()?;
        self.expect_char('=')?;
        let value = Box::new(self.test()?);
        let span = start_span.merge(value.span);

        let kind = match path.pop() {
            Some(name) if path.is_empty() => StmtKind::Assignment { name, value },
            Some(field) => StmtKind::FieldAssignment {
                object: path,
                field,
                value,
            },
            None => return Err(ParserError::invalid_assignment_target(start_span)),
        };
        Ok(Stmt::new(kind, span))
    }

    /// `name` or `name.name.name`.
    pub(crate) fn dotted_name(&mut self) -> ParseResult<Vec<String>> {
        let mut path = vec![self.expect_identifier()?];
        while self.check_char('.') && matches!(self.peek_nth(1).kind, TokenKind::Identifier(_)) {
            self.advance();
            path.push(self.expect_identifier()?);
        }
        Ok(path)
    }
}

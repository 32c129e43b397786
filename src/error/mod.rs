//! Error types for all phases.

use crate::span::Span;
use thiserror::Error;

/// Lexer errors.
#[derive(Debug, Error)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at {1}")]
    UnexpectedChar(char, Span),

    #[error("Unterminated string at {0}")]
    UnterminatedString(Span),

    #[error("Invalid escape sequence '\\{0}' at {1}")]
    InvalidEscape(char, Span),

    #[error("Invalid number '{0}' at {1}")]
    InvalidNumber(String, Span),

    #[error("Indentation must be a multiple of two spaces at {0}")]
    InvalidIndent(Span),
}

impl LexerError {
    pub fn unexpected_char(c: char, span: Span) -> Self {
        Self::UnexpectedChar(c, span)
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::UnterminatedString(span)
    }

    pub fn invalid_escape(c: char, span: Span) -> Self {
        Self::InvalidEscape(c, span)
    }

    pub fn invalid_number(s: String, span: Span) -> Self {
        Self::InvalidNumber(s, span)
    }

    pub fn invalid_indent(span: Span) -> Self {
        Self::InvalidIndent(span)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar(_, span) => *span,
            Self::UnterminatedString(span) => *span,
            Self::InvalidEscape(_, span) => *span,
            Self::InvalidNumber(_, span) => *span,
            Self::InvalidIndent(span) => *span,
        }
    }
}

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Unexpected token '{found}', expected {expected} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unknown class '{0}' at {1}")]
    UnknownClass(String, Span),

    #[error("Class '{0}' is already defined at {1}")]
    DuplicateClass(String, Span),

    #[error("Invalid assignment target at {0}")]
    InvalidAssignmentTarget(Span),

    #[error("{message} at {span}")]
    General { message: String, span: Span },
}

impl ParserError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unknown_class(name: impl Into<String>, span: Span) -> Self {
        Self::UnknownClass(name.into(), span)
    }

    pub fn duplicate_class(name: impl Into<String>, span: Span) -> Self {
        Self::DuplicateClass(name.into(), span)
    }

    pub fn invalid_assignment_target(span: Span) -> Self {
        Self::InvalidAssignmentTarget(span)
    }

    pub fn general(message: impl Into<String>, span: Span) -> Self {
        Self::General {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } => *span,
            Self::UnknownClass(_, span) => *span,
            Self::DuplicateClass(_, span) => *span,
            Self::InvalidAssignmentTarget(span) => *span,
            Self::General { span, .. } => *span,
        }
    }
}

impl From<LexerError> for ParserError {
    fn from(err: LexerError) -> Self {
        Self::General {
            message: err.to_string(),
            span: err.span(),
        }
    }
}

/// The user-visible category of a runtime failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NameError,
    MethodNotFound,
    TypeError,
    ZeroDivisionError,
    ComparisonError,
    ReturnOutsideMethod,
    Overflow,
    RecursionLimit,
    Io,
}

/// Runtime errors. All of them abort the running program.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("NameError: name '{0}' is not defined at {1}")]
    NameError(String, Span),

    #[error("MethodNotFound: class {class} has no method '{method}' taking {arity} argument(s) at {span}")]
    MethodNotFound {
        class: String,
        method: String,
        arity: usize,
        span: Span,
    },

    #[error("TypeError: {message} at {span}")]
    TypeError { message: String, span: Span },

    #[error("ZeroDivisionError: integer division by zero at {0}")]
    ZeroDivision(Span),

    #[error("ComparisonError: {message} at {span}")]
    ComparisonError { message: String, span: Span },

    #[error("'return' outside of a method body at {0}")]
    ReturnOutsideMethod(Span),

    #[error("Integer overflow in {operation} at {span}")]
    Overflow { operation: &'static str, span: Span },

    #[error("Maximum call depth of {limit} exceeded at {span}")]
    RecursionLimit { limit: usize, span: Span },

    #[error("Failed to write output: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RuntimeError {
    pub fn name_error(name: impl Into<String>, span: Span) -> Self {
        Self::NameError(name.into(), span)
    }

    pub fn method_not_found(
        class: impl Into<String>,
        method: impl Into<String>,
        arity: usize,
        span: Span,
    ) -> Self {
        Self::MethodNotFound {
            class: class.into(),
            method: method.into(),
            arity,
            span,
        }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::TypeError {
            message: message.into(),
            span,
        }
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::ZeroDivision(span)
    }

    pub fn comparison_error(message: impl Into<String>, span: Span) -> Self {
        Self::ComparisonError {
            message: message.into(),
            span,
        }
    }

    pub fn overflow(operation: &'static str, span: Span) -> Self {
        Self::Overflow { operation, span }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NameError(..) => ErrorKind::NameError,
            Self::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            Self::TypeError { .. } => ErrorKind::TypeError,
            Self::ZeroDivision(_) => ErrorKind::ZeroDivisionError,
            Self::ComparisonError { .. } => ErrorKind::ComparisonError,
            Self::ReturnOutsideMethod(_) => ErrorKind::ReturnOutsideMethod,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::RecursionLimit { .. } => ErrorKind::RecursionLimit,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Location of the node that failed. I/O failures have no source location.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::NameError(_, span) => Some(*span),
            Self::MethodNotFound { span, .. } => Some(*span),
            Self::TypeError { span, .. } => Some(*span),
            Self::ZeroDivision(span) => Some(*span),
            Self::ComparisonError { span, .. } => Some(*span),
            Self::ReturnOutsideMethod(span) => Some(*span),
            Self::Overflow { span, .. } => Some(*span),
            Self::RecursionLimit { span, .. } => Some(*span),
            Self::Io { .. } => None,
        }
    }
}

/// A unified error type for all phases.
#[derive(Debug, Error)]
pub enum MythonError {
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

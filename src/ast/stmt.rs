//! Statement AST nodes.
//!
//! Mython does not separate statements from expressions at runtime: every node
//! executes against a scope and produces a value.

use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use crate::ast::expr::{ArithOp, Comparator, Literal, LogicalOp};
use crate::interpreter::value::Class;
use crate::span::Span;

/// A node in the AST.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Nodes built without source text (tests, embedders) get an empty span.
impl From<StmtKind> for Stmt {
    fn from(kind: StmtKind) -> Self {
        Self::new(kind, Span::default())
    }
}

/// Node variants.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Constant: 42, "text", True, None
    Literal(Literal),

    /// Variable binding: x = value
    Assignment { name: String, value: Box<Stmt> },

    /// Variable or field read: x, self.x, a.b.c
    VariableValue(Vec<String>),

    /// print a, b, c
    Print(Vec<Stmt>),

    /// object.method(arguments)
    MethodCall {
        object: Box<Stmt>,
        method: String,
        arguments: Vec<Stmt>,
    },

    /// str(value)
    Stringify(Box<Stmt>),

    /// a + b, a - b, a * b, a / b
    Arithmetic {
        operator: ArithOp,
        left: Box<Stmt>,
        right: Box<Stmt>,
    },

    /// A block of statements executed in order.
    Compound(Vec<Stmt>),

    /// return value
    Return(Box<Stmt>),

    /// class Name(Parent): ...
    ClassDefinition(Rc<Class>),

    /// object.path.field = value
    FieldAssignment {
        object: Vec<String>,
        field: String,
        value: Box<Stmt>,
    },

    /// if condition: ... else: ...
    IfElse {
        condition: Box<Stmt>,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// a and b, a or b
    Logical {
        operator: LogicalOp,
        left: Box<Stmt>,
        right: Box<Stmt>,
    },

    /// not value
    Not(Box<Stmt>),

    /// a == b, a < b, ...
    Comparison {
        operator: Comparator,
        left: Box<Stmt>,
        right: Box<Stmt>,
    },

    /// ClassName(arguments)
    NewInstance {
        class: ClassRef,
        arguments: Vec<Stmt>,
    },

    /// Function boundary: the only node that stops a `return`.
    MethodBody(Box<Stmt>),
}

/// A non-owning reference from a `NewInstance` node to its class.
///
/// The parser hands these out as soon as a class header is read, so methods
/// can instantiate their own class. The reference is bound once the class
/// body is complete; the class itself stays owned by its `ClassDefinition`.
#[derive(Debug, Clone)]
pub struct ClassRef {
    name: String,
    target: Rc<OnceCell<Weak<Class>>>,
}

impl ClassRef {
    /// A reference to a class whose body is still being parsed.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: Rc::new(OnceCell::new()),
        }
    }

    /// A reference to an existing class.
    pub fn resolved(class: &Rc<Class>) -> Self {
        let reference = Self::pending(class.name());
        reference.bind(class);
        reference
    }

    /// Point every copy of this reference at `class`. Later binds are ignored.
    pub fn bind(&self, class: &Rc<Class>) {
        let _ = self.target.set(Rc::downgrade(class));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The referenced class, if it is bound and still alive.
    pub fn get(&self) -> Option<Rc<Class>> {
        self.target.get().and_then(Weak::upgrade)
    }
}

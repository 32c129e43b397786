//! Tree-walking interpreter for Mython.

use crate::ast::{Stmt, StmtKind};
use crate::error::RuntimeError;
use crate::interpreter::context::Context;
use crate::interpreter::environment::Closure;
use crate::interpreter::value::Value;
use crate::span::Span;

/// Evaluate a node for its value. A pending `return` is handed straight back
/// to the caller of the enclosing `execute_*` function.
macro_rules! eval {
    ($interpreter:expr, $stmt:expr, $scope:expr) => {
        match $interpreter.execute($stmt, $scope)? {
            $crate::interpreter::executor::ControlFlow::Normal(value) => value,
            flow @ $crate::interpreter::executor::ControlFlow::Return(..) => return Ok(flow),
        }
    };
}

mod calls;
mod comparison;
mod expressions;
mod objects;
mod operators;
mod statements;


pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Special method names the interpreter dispatches to.
pub(crate) const INIT_METHOD: &str = "__init__";
pub(crate) const STR_METHOD: &str = "__str__";
pub(crate) const ADD_METHOD: &str = "__add__";
pub(crate) const EQ_METHOD: &str = "__eq__";
pub(crate) const LT_METHOD: &str = "__lt__";

/// Result of executing a node.
///
/// `Return` is not an error: it unwinds through blocks, conditionals and
/// operators until the nearest `MethodBody` turns it back into a value.
#[derive(Debug)]
pub(crate) enum ControlFlow {
    Normal(Value),
    /// A `return` in flight, with the span of the `return` node.
    Return(Value, Span),
}

/// Host-controlled limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Deepest allowed nesting of method calls. `None` leaves recursion
    /// bounded only by the native stack.
    pub max_call_depth: Option<usize>,
}

/// The Mython interpreter.
pub struct Interpreter<'ctx> {
    pub(crate) context: &'ctx mut dyn Context,
    pub(crate) options: RunOptions,
    pub(crate) call_depth: usize,
}

impl<'ctx> Interpreter<'ctx> {
    pub fn new(context: &'ctx mut dyn Context) -> Self {
        Self::with_options(context, RunOptions::default())
    }

    pub fn with_options(context: &'ctx mut dyn Context, options: RunOptions) -> Self {
        Self {
            context,
            options,
            call_depth: 0,
        }
    }

    /// Execute a program root against the global scope and return its value.
    ///
    /// A `return` that escapes the root was executed outside any method and
    /// is reported as an error.
    pub fn interpret(&mut self, root: &Stmt, globals: &mut Closure) -> RuntimeResult<Value> {
        match self.execute(root, globals)? {
            ControlFlow::Normal(value) => Ok(value),
            ControlFlow::Return(_, span) => Err(RuntimeError::ReturnOutsideMethod(span)),
        }
    }

    /// Execute a single node.
    pub(crate) fn execute(&mut self, stmt: &Stmt, scope: &mut Closure) -> RuntimeResult<ControlFlow> {
        let span = stmt.span;
        match &stmt.kind {
            StmtKind::Literal(literal) => Ok(ControlFlow::Normal(self.evaluate_literal(literal))),

            StmtKind::Assignment { name, value } => self.execute_assignment(name, value, scope),

            StmtKind::VariableValue(path) => {
                Ok(ControlFlow::Normal(self.lookup_path(path, scope, span)?))
            }

            StmtKind::Print(arguments) => self.execute_print(arguments, scope, span),

            StmtKind::MethodCall {
                object,
                method,
                arguments,
            } => self.execute_method_call(object, method, arguments, scope, span),

            StmtKind::Stringify(argument) => self.execute_stringify(argument, scope, span),

            StmtKind::Arithmetic {
                operator,
                left,
                right,
            } => self.execute_arithmetic(*operator, left, right, scope, span),

            StmtKind::Compound(statements) => self.execute_compound(statements, scope),

            StmtKind::Return(value) => {
                let value = eval!(self, value, scope);
                Ok(ControlFlow::Return(value, span))
            }

            StmtKind::ClassDefinition(class) => self.execute_class_definition(class, scope),

            StmtKind::FieldAssignment {
                object,
                field,
                value,
            } => self.execute_field_assignment(object, field, value, scope, span),

            StmtKind::IfElse {
                condition,
                then_branch,
                else_branch,
            } => self.execute_if(condition, then_branch, else_branch.as_deref(), scope),

            StmtKind::Logical {
                operator,
                left,
                right,
            } => self.execute_logical(*operator, left, right, scope),

            StmtKind::Not(argument) => {
                let value = eval!(self, argument, scope);
                Ok(ControlFlow::Normal(Value::Bool(!value.is_truthy())))
            }

            StmtKind::Comparison {
                operator,
                left,
                right,
            } => self.execute_comparison(*operator, left, right, scope, span),

            StmtKind::NewInstance { class, arguments } => {
                self.execute_new_instance(class, arguments, scope, span)
            }

            StmtKind::MethodBody(body) => match self.execute(body, scope)? {
                ControlFlow::Return(value, _) => Ok(ControlFlow::Normal(value)),
                ControlFlow::Normal(_) => Ok(ControlFlow::Normal(Value::None)),
            },
        }
    }
}

/// Run a program: execute `root` in `globals`, writing output to `context`.
pub fn run(
    root: &Stmt,
    globals: &mut Closure,
    context: &mut dyn Context,
    options: RunOptions,
) -> RuntimeResult<Value> {
    Interpreter::with_options(context, options).interpret(root, globals)
}

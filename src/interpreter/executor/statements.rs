//! Statement execution.

use std::rc::Rc;

use tracing::debug;

use crate::ast::Stmt;
use crate::error::RuntimeError;
use crate::interpreter::environment::Closure;
use crate::interpreter::value::{Class, Value};
use crate::span::Span;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter<'_> {
    /// Execute statements in order; the block's value is the last one's.
    pub(crate) fn execute_compound(
        &mut self,
        statements: &[Stmt],
        scope: &mut Closure,
    ) -> RuntimeResult<ControlFlow> {
        let mut last = Value::None;
        for stmt in statements {
            last = eval!(self, stmt, scope);
        }
        Ok(ControlFlow::Normal(last))
    }

    pub(crate) fn execute_assignment(
        &mut self,
        name: &str,
        value: &Stmt,
        scope: &mut Closure,
    ) -> RuntimeResult<ControlFlow> {
        let value = eval!(self, value, scope);
        scope.set(name, value.clone());
        Ok(ControlFlow::Normal(value))
    }

    pub(crate) fn execute_field_assignment(
        &mut self,
        object: &[String],
        field: &str,
        value: &Stmt,
        scope: &mut Closure,
        span: Span,
    ) -> RuntimeResult<ControlFlow> {
        let target = self.lookup_path(object, scope, span)?;
        let instance = match &target {
            Value::Instance(handle) => self.live_instance(handle, span)?,
            other => {
                return Err(RuntimeError::type_error(
                    format!(
                        "cannot set field '{}' on '{}': {} is not an object",
                        field,
                        object.join("."),
                        other.type_name()
                    ),
                    span,
                ));
            }
        };

        let value = eval!(self, value, scope);
        instance.set_field(field, value.clone());
        Ok(ControlFlow::Normal(value))
    }

    pub(crate) fn execute_class_definition(
        &mut self,
        class: &Rc<Class>,
        scope: &mut Closure,
    ) -> RuntimeResult<ControlFlow> {
        debug!(
            class = %class.name(),
            parent = class.parent().map(|p| p.name()).unwrap_or("-"),
            methods = class.methods().len(),
            "defining class"
        );
        scope.set(class.name(), Value::Class(Rc::clone(class)));
        Ok(ControlFlow::Normal(Value::None))
    }

    pub(crate) fn execute_if(
        &mut self,
        condition: &Stmt,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
        scope: &mut Closure,
    ) -> RuntimeResult<ControlFlow> {
        let condition = eval!(self, condition, scope);
        if condition.is_truthy() {
            self.execute(then_branch, scope)
        } else if let Some(else_branch) = else_branch {
            self.execute(else_branch, scope)
        } else {
            Ok(ControlFlow::Normal(Value::None))
        }
    }

    /// `print a, b, c`: space separated, newline terminated. The value is the
    /// last argument's.
    pub(crate) fn execute_print(
        &mut self,
        arguments: &[Stmt],
        scope: &mut Closure,
        span: Span,
    ) -> RuntimeResult<ControlFlow> {
        let mut last = Value::None;
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.context.output().write_all(b" ")?;
            }
            last = eval!(self, argument, scope);
            let text = self.stringify(&last, span)?;
            self.context.output().write_all(text.as_bytes())?;
        }
        self.context.output().write_all(b"\n")?;
        Ok(ControlFlow::Normal(last))
    }
}

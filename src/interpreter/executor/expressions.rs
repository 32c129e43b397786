//! Literals, variable lookup, conversion to text and boolean operators.

use crate::ast::{Literal, LogicalOp, Stmt};
use crate::error::RuntimeError;
use crate::interpreter::environment::Closure;
use crate::interpreter::value::{InstanceHandle, Value};
use crate::span::Span;

use super::{ControlFlow, Interpreter, RuntimeResult, STR_METHOD};

impl Interpreter<'_> {
    pub(crate) fn evaluate_literal(&self, literal: &Literal) -> Value {
        match literal {
            Literal::None => Value::None,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        }
    }

    /// Resolve `a` or `a.b.c`: the first name comes from `scope`, every
    /// following one from the fields of the object found so far.
    ///
    /// The non-owning `self` binding is upgraded on the way out, so whatever
    /// the caller stores keeps the object alive.
    pub(crate) fn lookup_path(
        &self,
        path: &[String],
        scope: &Closure,
        span: Span,
    ) -> RuntimeResult<Value> {
        let Some((first, rest)) = path.split_first() else {
            return Err(RuntimeError::name_error("", span));
        };
        let mut value = scope
            .get(first)
            .ok_or_else(|| RuntimeError::name_error(first.clone(), span))?;

        for (i, segment) in rest.iter().enumerate() {
            let not_found = || RuntimeError::name_error(path[..i + 2].join("."), span);
            let instance = match &value {
                Value::Instance(handle) => handle.get().ok_or_else(not_found)?,
                _ => return Err(not_found()),
            };
            value = instance.get_field(segment).ok_or_else(not_found)?;
        }

        match value {
            Value::Instance(InstanceHandle::Shared(ref weak)) => match weak.upgrade() {
                Some(instance) => Ok(Value::instance(instance)),
                None => Err(RuntimeError::name_error(path.join("."), span)),
            },
            other => Ok(other),
        }
    }

    pub(crate) fn execute_stringify(
        &mut self,
        argument: &Stmt,
        scope: &mut Closure,
        span: Span,
    ) -> RuntimeResult<ControlFlow> {
        let value = eval!(self, argument, scope);
        let text = self.stringify(&value, span)?;
        Ok(ControlFlow::Normal(Value::String(text)))
    }

    /// Text of a value as `print` shows it. Instances with a zero-argument
    /// `__str__` are rendered through it.
    pub(crate) fn stringify(&mut self, value: &Value, span: Span) -> RuntimeResult<String> {
        if let Value::Instance(handle) = value {
            let instance = self.live_instance(handle, span)?;
            if instance.has_method(STR_METHOD, 0) {
                let text = self.call_method(&instance, STR_METHOD, Vec::new(), span)?;
                return self.stringify(&text, span);
            }
        }
        Ok(value.to_string())
    }

    /// `and` / `or`. Both always produce a `Bool`.
    pub(crate) fn execute_logical(
        &mut self,
        operator: LogicalOp,
        left: &Stmt,
        right: &Stmt,
        scope: &mut Closure,
    ) -> RuntimeResult<ControlFlow> {
        let left = eval!(self, left, scope).is_truthy();
        let result = match (operator, left) {
            (LogicalOp::Or, true) => true,
            (LogicalOp::And, false) => false,
            (LogicalOp::Or, false) | (LogicalOp::And, true) => {
                eval!(self, right, scope).is_truthy()
            }
        };
        Ok(ControlFlow::Normal(Value::Bool(result)))
    }
}

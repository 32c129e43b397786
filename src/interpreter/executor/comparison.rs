//! Relational operators.
//!
//! `==` and `<` are the only primitive comparisons. Every other operator is
//! derived from them, so an object that wants `>` has to provide both
//! `__eq__` and `__lt__`.

use tracing::trace;

use crate::ast::{Comparator, Stmt};
use crate::error::RuntimeError;
use crate::interpreter::environment::Closure;
use crate::interpreter::value::Value;
use crate::span::Span;

use super::{ControlFlow, Interpreter, RuntimeResult, EQ_METHOD, LT_METHOD};

impl Interpreter<'_> {
    pub(crate) fn execute_comparison(
        &mut self,
        operator: Comparator,
        left: &Stmt,
        right: &Stmt,
        scope: &mut Closure,
        span: Span,
    ) -> RuntimeResult<ControlFlow> {
        let left = eval!(self, left, scope);
        let right = eval!(self, right, scope);
        let result = self.compare(operator, &left, &right, span)?;
        Ok(ControlFlow::Normal(Value::Bool(result)))
    }

    pub(crate) fn compare(
        &mut self,
        operator: Comparator,
        left: &Value,
        right: &Value,
        span: Span,
    ) -> RuntimeResult<bool> {
        match operator {
            Comparator::Equal => self.equal(left, right, span),
            Comparator::NotEqual => Ok(!self.equal(left, right, span)?),
            Comparator::Less => self.less(left, right, span),
            Comparator::Greater => self.greater(left, right, span),
            Comparator::LessOrEqual => Ok(!self.greater(left, right, span)?),
            Comparator::GreaterOrEqual => Ok(!self.less(left, right, span)?),
        }
    }

    fn greater(&mut self, left: &Value, right: &Value, span: Span) -> RuntimeResult<bool> {
        Ok(!self.less(left, right, span)? && !self.equal(left, right, span)?)
    }

    pub(crate) fn equal(&mut self, left: &Value, right: &Value, span: Span) -> RuntimeResult<bool> {
        match (left, right) {
            (Value::None, Value::None) => Ok(true),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Number(a), Value::Number(b)) => Ok(a == b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            (Value::Instance(_), Value::Instance(_)) => {
                self.delegate(EQ_METHOD, Comparator::Equal, left, right, span)
            }
            (Value::Class(_), Value::Class(_)) => Err(incomparable(Comparator::Equal, span)),
            _ => Err(mismatch(Comparator::Equal, left, right, span)),
        }
    }

    pub(crate) fn less(&mut self, left: &Value, right: &Value, span: Span) -> RuntimeResult<bool> {
        match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(a < b),
            (Value::Number(a), Value::Number(b)) => Ok(a < b),
            (Value::String(a), Value::String(b)) => Ok(a < b),
            (Value::Instance(_), Value::Instance(_)) => {
                self.delegate(LT_METHOD, Comparator::Less, left, right, span)
            }
            (Value::None, Value::None) | (Value::Class(_), Value::Class(_)) => {
                Err(incomparable(Comparator::Less, span))
            }
            _ => Err(mismatch(Comparator::Less, left, right, span)),
        }
    }

    /// Call `left.<method>(right)` and read the result as a condition.
    fn delegate(
        &mut self,
        method: &str,
        operator: Comparator,
        left: &Value,
        right: &Value,
        span: Span,
    ) -> RuntimeResult<bool> {
        let Value::Instance(handle) = left else {
            return Err(mismatch(operator, left, right, span));
        };
        let instance = self.live_instance(handle, span)?;
        if !instance.has_method(method, 1) {
            return Err(RuntimeError::comparison_error(
                format!(
                    "'{}' objects do not support '{}': {} is not defined",
                    instance.class().name(),
                    operator,
                    method
                ),
                span,
            ));
        }
        trace!(class = %instance.class().name(), method, "delegating comparison");
        let result = self.call_method(&instance, method, vec![right.clone()], span)?;
        Ok(result.is_truthy())
    }
}

fn incomparable(operator: Comparator, span: Span) -> RuntimeError {
    RuntimeError::comparison_error(format!("values do not support '{}'", operator), span)
}

fn mismatch(operator: Comparator, left: &Value, right: &Value, span: Span) -> RuntimeError {
    RuntimeError::type_error(
        format!(
            "'{}' not supported between '{}' and '{}'",
            operator,
            left.type_name(),
            right.type_name()
        ),
        span,
    )
}

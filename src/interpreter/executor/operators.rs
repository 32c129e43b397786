//! Binary arithmetic.

use crate::ast::{ArithOp, Stmt};
use crate::error::RuntimeError;
use crate::interpreter::environment::Closure;
use crate::interpreter::value::Value;
use crate::span::Span;

use super::{ControlFlow, Interpreter, RuntimeResult, ADD_METHOD};

impl Interpreter<'_> {
    pub(crate) fn execute_arithmetic(
        &mut self,
        operator: ArithOp,
        left: &Stmt,
        right: &Stmt,
        scope: &mut Closure,
        span: Span,
    ) -> RuntimeResult<ControlFlow> {
        let left = eval!(self, left, scope);
        let right = eval!(self, right, scope);
        let value = match operator {
            ArithOp::Add => self.eval_add(&left, &right, span)?,
            ArithOp::Sub => eval_subtract(&left, &right, span)?,
            ArithOp::Mult => eval_multiply(&left, &right, span)?,
            ArithOp::Div => eval_divide(&left, &right, span)?,
        };
        Ok(ControlFlow::Normal(value))
    }

    /// `+` is the only operator objects can overload, through `__add__`.
    fn eval_add(&mut self, left: &Value, right: &Value, span: Span) -> RuntimeResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => a
                .checked_add(*b)
                .map(Value::Number)
                .ok_or_else(|| RuntimeError::overflow("addition", span)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            (Value::Instance(handle), _) => {
                let instance = self.live_instance(handle, span)?;
                self.call_method(&instance, ADD_METHOD, vec![right.clone()], span)
            }
            _ => Err(unsupported(ArithOp::Add, left, right, span)),
        }
    }
}

fn eval_subtract(left: &Value, right: &Value, span: Span) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .checked_sub(*b)
            .map(Value::Number)
            .ok_or_else(|| RuntimeError::overflow("subtraction", span)),
        _ => Err(unsupported(ArithOp::Sub, left, right, span)),
    }
}

fn eval_multiply(left: &Value, right: &Value, span: Span) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .checked_mul(*b)
            .map(Value::Number)
            .ok_or_else(|| RuntimeError::overflow("multiplication", span)),
        _ => Err(unsupported(ArithOp::Mult, left, right, span)),
    }
}

/// Integer division, truncating toward zero.
fn eval_divide(left: &Value, right: &Value, span: Span) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Number(_), Value::Number(0)) => Err(RuntimeError::division_by_zero(span)),
        (Value::Number(a), Value::Number(b)) => a
            .checked_div(*b)
            .map(Value::Number)
            .ok_or_else(|| RuntimeError::overflow("division", span)),
        _ => Err(unsupported(ArithOp::Div, left, right, span)),
    }
}

fn unsupported(operator: ArithOp, left: &Value, right: &Value, span: Span) -> RuntimeError {
    RuntimeError::type_error(
        format!(
            "unsupported operand types for {}: '{}' and '{}'",
            operator.symbol(),
            left.type_name(),
            right.type_name()
        ),
        span,
    )
}

//! Method calls.

use std::rc::Rc;

use crate::ast::Stmt;
use crate::error::RuntimeError;
use crate::interpreter::environment::Closure;
use crate::interpreter::value::{Instance, InstanceHandle, Value, SELF_NAME};
use crate::span::Span;

use super::{ControlFlow, Interpreter, RuntimeResult};

impl Interpreter<'_> {
    /// Evaluate `object.method(args)`. The receiver must be an instance; its
    /// arguments are evaluated left to right only after that is checked.
    pub(crate) fn execute_method_call(
        &mut self,
        object: &Stmt,
        method: &str,
        arguments: &[Stmt],
        scope: &mut Closure,
        span: Span,
    ) -> RuntimeResult<ControlFlow> {
        let receiver = eval!(self, object, scope);
        let instance = match &receiver {
            Value::Instance(handle) => self.live_instance(handle, span)?,
            other => {
                return Err(RuntimeError::type_error(
                    format!(
                        "cannot call method '{}' on a value of type '{}'",
                        method,
                        other.type_name()
                    ),
                    span,
                ));
            }
        };

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(eval!(self, argument, scope));
        }

        let value = self.call_method(&instance, method, values, span)?;
        Ok(ControlFlow::Normal(value))
    }

    /// Invoke a method on an instance.
    ///
    /// The body runs in a fresh frame holding only `self` and the formal
    /// parameters; the caller's variables are not visible.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(class = %instance.class().name(), method = %name, arity = args.len())
    )]
    pub(crate) fn call_method(
        &mut self,
        instance: &Rc<Instance>,
        name: &str,
        args: Vec<Value>,
        span: Span,
    ) -> RuntimeResult<Value> {
        let class = Rc::clone(instance.class());
        let method = class.find_method(name, args.len()).ok_or_else(|| {
            RuntimeError::method_not_found(class.name(), name, args.len(), span)
        })?;

        if let Some(limit) = self.options.max_call_depth {
            if self.call_depth >= limit {
                return Err(RuntimeError::RecursionLimit { limit, span });
            }
        }

        let mut frame = Closure::new();
        frame.set(
            SELF_NAME,
            Value::Instance(InstanceHandle::Shared(Rc::downgrade(instance))),
        );
        for (param, value) in method.formal_params.iter().zip(args) {
            frame.set(param.as_str(), value);
        }

        self.call_depth += 1;
        let result = self.execute(&method.body, &mut frame);
        self.call_depth -= 1;

        match result? {
            ControlFlow::Normal(value) => Ok(value),
            ControlFlow::Return(_, span) => Err(RuntimeError::ReturnOutsideMethod(span)),
        }
    }
}

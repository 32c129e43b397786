//! Class instantiation.

use std::rc::Rc;

use tracing::debug;

use crate::ast::{ClassRef, Stmt};
use crate::error::RuntimeError;
use crate::interpreter::environment::Closure;
use crate::interpreter::value::{Instance, InstanceHandle, Value};
use crate::span::Span;

use super::{ControlFlow, Interpreter, RuntimeResult, INIT_METHOD};

impl Interpreter<'_> {
    /// Evaluate `ClassName(args)`.
    ///
    /// `__init__` runs only when the class (or an ancestor) defines one taking
    /// exactly as many arguments as were passed. Otherwise the arguments are
    /// not evaluated and the instance starts with no fields besides `self`.
    pub(crate) fn execute_new_instance(
        &mut self,
        class: &ClassRef,
        arguments: &[Stmt],
        scope: &mut Closure,
        span: Span,
    ) -> RuntimeResult<ControlFlow> {
        let class = class
            .get()
            .ok_or_else(|| RuntimeError::name_error(class.name(), span))?;
        let instance = Instance::new(class);
        debug!(class = %instance.class().name(), args = arguments.len(), "new instance");

        if instance.has_method(INIT_METHOD, arguments.len()) {
            let mut values = Vec::with_capacity(arguments.len());
            for argument in arguments {
                values.push(eval!(self, argument, scope));
            }
            self.call_method(&instance, INIT_METHOD, values, span)?;
        }

        Ok(ControlFlow::Normal(Value::instance(instance)))
    }

    /// Upgrade a handle for use. Only a `self` binding that outlived every
    /// owner of its object can fail here.
    pub(crate) fn live_instance(
        &self,
        handle: &InstanceHandle,
        span: Span,
    ) -> RuntimeResult<Rc<Instance>> {
        handle
            .get()
            .ok_or_else(|| RuntimeError::type_error("object has already been released", span))
    }
}

//! Runtime values for the Mython interpreter.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::ast::Stmt;
use crate::interpreter::environment::Closure;

/// Name under which an instance refers to itself, in its fields and in
/// every method call frame.
pub const SELF_NAME: &str = "self";

/// A runtime value in Mython.
///
/// Primitives are immutable, so copying them is indistinguishable from
/// sharing them. Classes and instances are shared through reference counts:
/// assigning an instance anywhere stores another handle to the same object.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value
    #[default]
    None,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Number(i64),
    /// String value
    String(String),
    /// Class definition
    Class(Rc<Class>),
    /// Class instance
    Instance(InstanceHandle),
}

impl Value {
    pub fn type_name(&self) -> String {
        match self {
            Value::None => "NoneType".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Number(_) => "int".to_string(),
            Value::String(_) => "str".to_string(),
            Value::Class(_) => "class".to_string(),
            Value::Instance(handle) => match handle.get() {
                Some(instance) => instance.class().name().to_string(),
                None => "released instance".to_string(),
            },
        }
    }

    /// Truthiness used by `if`, `and`, `or` and `not`.
    ///
    /// Classes and instances are always false: there is no `__bool__`
    /// protocol, so objects cannot opt into being truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            Value::Class(_) | Value::Instance(_) => false,
        }
    }

    /// Wrap a freshly created instance in an owning handle.
    pub fn instance(instance: Rc<Instance>) -> Value {
        Value::Instance(InstanceHandle::Owned(instance))
    }
}

/// Default text of a value. Instances that define `__str__` are rendered by
/// the interpreter instead; without it they show as
/// `<ClassName object at 0x...>`, where the address identifies the instance.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Class(class) => write!(f, "Class {}", class.name()),
            Value::Instance(handle) => match handle.get() {
                Some(instance) => write!(
                    f,
                    "<{} object at {:p}>",
                    instance.class().name(),
                    Rc::as_ptr(&instance)
                ),
                None => write!(f, "<released object>"),
            },
        }
    }
}

/// A handle to a class instance.
///
/// `Shared` does not keep the instance alive. It is only used for the `self`
/// binding an instance stores in its own fields and in call frames, so an
/// instance never owns itself.
#[derive(Clone)]
pub enum InstanceHandle {
    Owned(Rc<Instance>),
    Shared(Weak<Instance>),
}

impl InstanceHandle {
    /// The instance, unless every owning handle to it has been dropped.
    pub fn get(&self) -> Option<Rc<Instance>> {
        match self {
            InstanceHandle::Owned(instance) => Some(Rc::clone(instance)),
            InstanceHandle::Shared(weak) => weak.upgrade(),
        }
    }
}

impl fmt::Debug for InstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceHandle::Owned(instance) => write!(f, "Owned({:?})", instance),
            InstanceHandle::Shared(_) => write!(f, "Shared"),
        }
    }
}

/// A method: name, formal parameters and body.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Stmt,
}

impl Method {
    pub fn new(name: impl Into<String>, formal_params: Vec<String>, body: Stmt) -> Self {
        Self {
            name: name.into(),
            formal_params,
            body,
        }
    }

    pub fn arity(&self) -> usize {
        self.formal_params.len()
    }
}

/// A class definition. Immutable once built.
#[derive(Debug)]
pub struct Class {
    name: String,
    methods: Vec<Method>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new(name: impl Into<String>, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        Self {
            name: name.into(),
            methods,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    /// Methods declared directly on this class.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Find a method by name in this class, then up the parent chain.
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        let mut class = self;
        loop {
            if let Some(method) = class.methods.iter().find(|m| m.name == name) {
                return Some(method);
            }
            class = class.parent.as_deref()?;
        }
    }

    /// Like `get_method`, but the nearest method with this name must also
    /// take exactly `arity` arguments. An arity mismatch is treated as a miss.
    pub fn find_method(&self, name: &str, arity: usize) -> Option<&Method> {
        self.get_method(name).filter(|m| m.arity() == arity)
    }
}

/// An instance of a user-defined class.
pub struct Instance {
    class: Rc<Class>,
    fields: RefCell<Closure>,
}

impl Instance {
    /// Create an instance whose fields already contain its `self` binding.
    pub fn new(class: Rc<Class>) -> Rc<Instance> {
        Rc::new_cyclic(|me| {
            let mut fields = Closure::new();
            fields.set(SELF_NAME, Value::Instance(InstanceHandle::Shared(me.clone())));
            Instance {
                class,
                fields: RefCell::new(fields),
            }
        })
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    pub fn has_method(&self, name: &str, arity: usize) -> bool {
        self.class.find_method(name, arity).is_some()
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name)
    }

    /// Store a field. The replaced value is released after the fields are
    /// unlocked, since dropping it may drop other instances.
    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        let previous = self.fields.borrow_mut().set(name, value);
        drop(previous);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field values may lead back to this instance, so only names are shown.
        let fields = self.fields.borrow();
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .field("fields", &fields.names().collect::<Vec<_>>())
            .finish()
    }
}

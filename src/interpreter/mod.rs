//! Interpreter module for Mython.

pub mod context;
pub mod environment;
pub mod executor;
pub mod value;

pub use context::{Context, DummyContext, SimpleContext};
pub use environment::Closure;
pub use executor::{run, Interpreter, RunOptions};
pub use value::{Class, Instance, InstanceHandle, Method, Value};

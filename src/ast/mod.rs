//! Abstract Syntax Tree for Mython.

pub mod expr;
pub mod stmt;

pub use expr::{ArithOp, Comparator, Literal, LogicalOp};
pub use stmt::{ClassRef, Stmt, StmtKind};

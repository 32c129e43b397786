//! Parser module for Mython.

mod core;
mod expressions;
mod statements;

#[cfg(test)]
mod tests;

pub use self::core::{ParseResult, Parser};

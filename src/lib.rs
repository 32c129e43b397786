//! Mython: a small class-based scripting language with Python-like syntax.
//!
//! This is the library root that exports all modules.
//!
//! # Pipeline
//!
//! Source text goes through the [`lexer`] (layout-aware tokens), the [`parser`]
//! (a single `Compound` statement tree) and finally the tree-walking
//! [`interpreter`], which writes everything `print` produces to a
//! [`interpreter::Context`].
//!
//! ```
//! let mut out = Vec::new();
//! mython::run_with_output("print 1 + 2\n", &mut out, Default::default()).unwrap();
//! assert_eq!(out, b"3\n");
//! ```

// Allow some clippy lints that are stylistic and not critical
#![allow(clippy::module_inception)]
#![allow(clippy::result_large_err)]
#![allow(clippy::new_without_default)]

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;

use std::io::Write;
use std::sync::Once;

use error::MythonError;
use interpreter::{Closure, RunOptions, SimpleContext};

/// Lex and parse a program into its root statement.
pub fn parse(source: &str) -> Result<ast::Stmt, MythonError> {
    let tokens = lexer::Scanner::new(source).scan_tokens()?;
    let program = parser::Parser::new(tokens).parse()?;
    Ok(program)
}

/// Run a Mython program, printing to standard output.
pub fn run(source: &str) -> Result<(), MythonError> {
    let stdout = std::io::stdout();
    run_with_output(source, stdout.lock(), RunOptions::default())
}

/// Run a Mython program, printing to `output`.
///
/// Output is flushed even when the program fails, so everything printed
/// before the error reaches the writer.
pub fn run_with_output<W: Write>(
    source: &str,
    output: W,
    options: RunOptions,
) -> Result<(), MythonError> {
    let program = parse(source)?;

    let mut context = SimpleContext::new(output);
    let mut globals = Closure::new();
    let result = interpreter::run(&program, &mut globals, &mut context, options);
    context.into_inner().flush()?;
    result?;

    Ok(())
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr log subscriber, filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

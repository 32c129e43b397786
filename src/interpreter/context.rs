//! Execution context: where `print` output goes.

use std::io::Write;

/// Capabilities the host hands to a running program.
pub trait Context {
    /// The sink `print` writes to. Nothing else produces output.
    fn output(&mut self) -> &mut dyn Write;
}

/// A context writing to any `Write` implementation.
pub struct SimpleContext<W: Write> {
    output: W,
}

impl<W: Write> SimpleContext<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Context for SimpleContext<W> {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// A context that captures output in memory.
#[derive(Debug, Default)]
pub struct DummyContext {
    pub output: Vec<u8>,
}

impl DummyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far, as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Context for DummyContext {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

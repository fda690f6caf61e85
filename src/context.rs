use std::io::Write;

/// Output environment injected into every object operation that may
/// print. The embedder decides where the bytes go.
pub trait Context {
    fn output_stream(&mut self) -> &mut dyn Write;
}

/// Context collecting all output in memory. Used by tests.
#[derive(Debug, Default)]
pub struct DummyContext {
    output: Vec<u8>,
}

impl DummyContext {
    pub fn new() -> Self {
        DummyContext::default()
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Context for DummyContext {
    fn output_stream(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// Context delegating to a caller-supplied sink.
pub struct SimpleContext<'a> {
    output: &'a mut dyn Write,
}

impl<'a> SimpleContext<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        SimpleContext { output }
    }
}

impl Context for SimpleContext<'_> {
    fn output_stream(&mut self) -> &mut dyn Write {
        &mut *self.output
    }
}

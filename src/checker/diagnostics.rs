//! Diagnostic sink capability.

use std::io::Write;

/// Receives one human-readable line per warning or note.
///
/// The checker emits diagnostics in processing order and never interprets
/// or aggregates them; what happens to the lines is entirely up to the
/// sink.
pub trait DiagnosticSink {
    /// Emit one diagnostic line.
    fn emit(&mut self, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn emit(&mut self, message: &str) {
        (**self).emit(message);
    }
}

/// Collects diagnostics in order; the usual sink for tests.
impl DiagnosticSink for Vec<String> {
    fn emit(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Writes each diagnostic as one line to the wrapped writer.
///
/// Write errors are swallowed; diagnostics are best-effort output and must
/// not abort record processing.
#[derive(Debug)]
pub struct WriterSink<W: Write>(pub W);

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn emit(&mut self, message: &str) {
        let _ = writeln!(self.0, "{message}");
    }
}

use super::Writer;
use crate::entry::Entry;
use crate::formatter::Formatter;
use parking_lot::Mutex;
use std::io::Write;

/// Writes one formatted line per entry to any [`std::io::Write`] target.
///
/// I/O failures are reported through `tracing` and never reach the logger
/// that emitted the entry.
pub struct SimpleWriter<W> {
    out: Mutex<W>,
    formatter: Box<dyn Formatter>,
}

impl<W> SimpleWriter<W>
where
    W: Write + Send,
{
    pub fn new(out: W, formatter: impl Formatter + 'static) -> Self {
        Self {
            out: Mutex::new(out),
            formatter: Box::new(formatter),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Run `f` with the underlying target, e.g. to inspect an in-memory buffer.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.out.lock())
    }
}

impl<W> Writer for SimpleWriter<W>
where
    W: Write + Send,
{
    fn write(&self, entry: &Entry) {
        let line = self.formatter.format(entry);
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, module = entry.module_display(), "Failed to write log entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{DefaultFormatter, JsonFormatter};
    use crate::level::Level;
    use chrono::Utc;
    use std::io;

    fn entry(message: &str) -> Entry {
        Entry {
            module: "app".to_string(),
            level: Level::Info,
            timestamp: Utc::now(),
            filename: "src/app/main.rs",
            line: 7,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_writes_one_line_per_entry() {
        let writer = SimpleWriter::new(Vec::new(), DefaultFormatter);
        writer.write(&entry("first"));
        writer.write(&entry("second"));

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO app main.rs:7 first"));
        assert!(lines[1].ends_with("INFO app main.rs:7 second"));
    }

    #[test]
    fn test_uses_configured_formatter() {
        let writer = SimpleWriter::new(Vec::new(), JsonFormatter);
        writer.write(&entry("structured"));

        let line = writer.with_inner(|buf| String::from_utf8(buf.clone()).unwrap());
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["message"], "structured");
    }

    struct FailingOutput;

    impl Write for FailingOutput {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_errors_are_contained() {
        let writer = SimpleWriter::new(FailingOutput, DefaultFormatter);
        writer.write(&entry("lost"));
    }
}

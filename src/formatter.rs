//! Turning entries into display strings.
//!
//! The registry never formats; formatters are used by sinks such as
//! [`SimpleWriter`](crate::writer::SimpleWriter).

use crate::entry::Entry;
use chrono::SecondsFormat;
use serde_json::json;
use std::path::Path;

pub trait Formatter: Send + Sync {
    fn format(&self, entry: &Entry) -> String;
}

impl<F> Formatter for F
where
    F: Fn(&Entry) -> String + Send + Sync,
{
    fn format(&self, entry: &Entry) -> String {
        self(entry)
    }
}

/// `2024-01-01 12:00:00 INFO net.http server.rs:42 message`
///
/// Timestamps are always UTC and only the basename of the source file is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format(&self, entry: &Entry) -> String {
        format!(
            "{} {} {} {}:{} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.level,
            entry.module_display(),
            basename(entry.filename),
            entry.line,
            entry.message
        )
    }
}

/// One JSON object per entry, suitable for NDJSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, entry: &Entry) -> String {
        json!({
            "timestamp": entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            "level": entry.level,
            "module": entry.module_display(),
            "filename": basename(entry.filename),
            "line": entry.line,
            "message": entry.message,
        })
        .to_string()
    }
}

fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

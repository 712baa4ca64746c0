//! Logging configuration: level strings and TOML files.
//!
//! Level strings look like `"<root>=INFO;net.http=DEBUG"`. Entries may be
//! separated by `;` or `,`, so the output of
//! [`Context::logger_info`](crate::Context::logger_info) can be fed straight
//! back in.
//!
//! A TOML file can also replace the default writer:
//!
//! ```toml
//! [levels]
//! "<root>" = "INFO"
//! "net.http" = "debug"
//!
//! [default_writer]
//! level = "TRACE"
//! format = "json"
//! target = "stdout"
//! ```

use crate::context::Context;
use crate::entry::ROOT_NAME;
use crate::error::{ConfigError, RegistryError};
use crate::formatter::{DefaultFormatter, JsonFormatter};
use crate::level::Level;
use crate::module::normalize;
use crate::writer::{DEFAULT_WRITER_NAME, SimpleWriter, Writer};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Parse a level string into normalized module names and levels.
///
/// The root may be written as `<root>` or left empty, and a bare level
/// (`"DEBUG"`) applies to the root. Blank input yields an empty map.
pub fn parse_config_string(input: &str) -> Result<BTreeMap<String, Level>, ConfigError> {
    let mut levels = BTreeMap::new();

    for raw in input.split([';', ',']) {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }

        let (name, level) = match entry.split_once('=') {
            Some((name, level)) => (name.trim(), level.trim()),
            None => ("", entry),
        };
        if level.is_empty() {
            return Err(ConfigError::InvalidEntry {
                entry: entry.to_string(),
                reason: "expected name=LEVEL".to_string(),
            });
        }

        levels.insert(module_key(name), level.parse()?);
    }

    Ok(levels)
}

/// Normalized module name, mapping `<root>` to the root's empty name.
fn module_key(name: &str) -> String {
    if name.trim().eq_ignore_ascii_case(ROOT_NAME) {
        String::new()
    } else {
        normalize(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// `2024-01-01 12:00:00 INFO module file.rs:1 message`
    #[default]
    Default,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stderr,
    Stdout,
}

/// Settings for the `"default"` writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    pub level: Level,
    pub format: FormatKind,
    pub target: Target,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            level: Level::Trace,
            format: FormatKind::Default,
            target: Target::Stderr,
        }
    }
}

impl WriterConfig {
    pub fn build(&self) -> Arc<dyn Writer> {
        match self.target {
            Target::Stderr => simple_writer(io::stderr(), self.format),
            Target::Stdout => simple_writer(io::stdout(), self.format),
        }
    }
}

fn simple_writer<W>(out: W, format: FormatKind) -> Arc<dyn Writer>
where
    W: Write + Send + 'static,
{
    match format {
        FormatKind::Default => Arc::new(SimpleWriter::new(out, DefaultFormatter)),
        FormatKind::Json => Arc::new(SimpleWriter::new(out, JsonFormatter)),
    }
}

/// File-based logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Module name to level; `"<root>"` addresses the root.
    pub levels: BTreeMap<String, Level>,
    /// Replaces the `"default"` writer when present.
    pub default_writer: Option<WriterConfig>,
}

impl LoggingConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Merge the levels of a level string over the ones from the file.
    pub fn with_level_string(mut self, levels: &str) -> Result<Self, ConfigError> {
        self.levels.extend(parse_config_string(levels)?);
        Ok(self)
    }

    /// Apply levels and, if configured, swap in a new default writer.
    ///
    /// A replaced default writer is re-registered after any other writers.
    pub fn apply(&self, context: &Context) -> Result<(), ConfigError> {
        for (name, level) in &self.levels {
            context.get_logger(&module_key(name)).set_log_level(*level);
        }

        if let Some(writer) = &self.default_writer {
            match context.remove_writer(DEFAULT_WRITER_NAME) {
                Ok(_) | Err(RegistryError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
            if let Err(e) =
                context.register_writer(DEFAULT_WRITER_NAME, Some(writer.build()), writer.level)
            {
                tracing::warn!(error = e.as_label(), "Failed to install default writer");
                return Err(e.into());
            }
            tracing::debug!(
                level = %writer.level,
                format = ?writer.format,
                target = ?writer.target,
                "Configured default writer"
            );
        }

        Ok(())
    }
}

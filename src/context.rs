use crate::config;
use crate::error::{ConfigError, RegistryError};
use crate::level::Level;
use crate::logger::Logger;
use crate::module::ModuleTree;
use crate::writer::{DEFAULT_WRITER_NAME, RegisteredWriter, Writer, Writers, default_writers};
use std::sync::Arc;

/// One module tree paired with one writer registry.
///
/// Loggers obtained from a context only see that context's levels and
/// writers, so tests can build their own instead of sharing the process-wide
/// one in [`crate::global`].
pub struct Context {
    modules: Arc<ModuleTree>,
    writers: Arc<Writers>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Root at WARNING and a `"default"` stderr writer accepting TRACE.
    pub fn new() -> Self {
        Self::with_writers(default_writers())
    }

    pub fn with_writers(writers: impl IntoIterator<Item = (String, RegisteredWriter)>) -> Self {
        Self {
            modules: Arc::new(ModuleTree::new()),
            writers: Arc::new(Writers::new(writers)),
        }
    }

    /// A context with no writers at all.
    pub fn empty() -> Self {
        Self::with_writers(Vec::new())
    }

    /// Logger for `name`, creating the module and its ancestors if necessary.
    pub fn get_logger(&self, name: &str) -> Logger {
        let id = self.modules.get(name);
        Logger::new(id, Arc::clone(&self.modules), Arc::clone(&self.writers))
    }

    pub fn register_writer(
        &self,
        name: &str,
        writer: Option<Arc<dyn Writer>>,
        min_level: Level,
    ) -> Result<(), RegistryError> {
        self.writers.add_with_level(name, writer, min_level)
    }

    /// Remove the writer registered as `name`, returning it with its level.
    pub fn remove_writer(&self, name: &str) -> Result<(Arc<dyn Writer>, Level), RegistryError> {
        let removed = self.writers.remove(name)?;
        Ok((removed.writer, removed.level))
    }

    pub fn replace_writer(
        &self,
        name: &str,
        writer: Option<Arc<dyn Writer>>,
    ) -> Result<Arc<dyn Writer>, RegistryError> {
        self.writers.replace(name, writer)
    }

    /// Swap the sink of the `"default"` writer, keeping its level.
    pub fn replace_default_writer(
        &self,
        writer: Option<Arc<dyn Writer>>,
    ) -> Result<Arc<dyn Writer>, RegistryError> {
        self.writers
            .replace(DEFAULT_WRITER_NAME, writer)
            .map_err(|e| match e {
                RegistryError::NotFound { .. } => RegistryError::NoDefaultWriter,
                other => other,
            })
    }

    pub fn will_write(&self, level: Level) -> bool {
        self.writers.will_write(level)
    }

    /// Every module back to UNSPECIFIED and the root back to WARNING.
    pub fn reset_loggers(&self) {
        self.modules.reset_levels();
        tracing::debug!("Reset logger levels");
    }

    /// Back to the single `"default"` stderr writer.
    pub fn reset_writers(&self) {
        self.writers.reset(default_writers());
    }

    /// Configured levels in the format accepted by [`Context::configure_loggers`].
    pub fn logger_info(&self) -> String {
        self.modules.config()
    }

    /// Apply a `name=LEVEL` list such as `"<root>=INFO;net.http=DEBUG"`.
    ///
    /// Nothing is applied when any entry fails to parse.
    pub fn configure_loggers(&self, levels: &str) -> Result<(), ConfigError> {
        let levels = config::parse_config_string(levels)?;
        for (name, level) in levels {
            self.get_logger(&name).set_log_level(level);
        }
        Ok(())
    }

    /// Registered writer names in delivery order.
    pub fn writer_names(&self) -> Vec<String> {
        self.writers.names()
    }
}

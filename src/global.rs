//! The process-wide [`Context`] and free functions over it.
//!
//! Libraries usually call [`get_logger`] and leave writer configuration to
//! the application. Tests that need isolation should build their own
//! [`Context`] instead.

use crate::context::Context;
use crate::error::{ConfigError, RegistryError};
use crate::level::Level;
use crate::logger::Logger;
use crate::writer::Writer;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<Context> = LazyLock::new(Context::new);

pub fn default_context() -> &'static Context {
    &GLOBAL
}

/// Logger for `name`, creating it and its parents if necessary.
pub fn get_logger(name: &str) -> Logger {
    GLOBAL.get_logger(name)
}

/// Configured levels, in the format accepted by [`configure_loggers`].
/// Modules with UNSPECIFIED level are not included.
pub fn logger_info() -> String {
    GLOBAL.logger_info()
}

pub fn configure_loggers(levels: &str) -> Result<(), ConfigError> {
    GLOBAL.configure_loggers(levels)
}

/// Set every module back to UNSPECIFIED, except the root which goes back to WARNING.
pub fn reset_loggers() {
    GLOBAL.reset_loggers();
}

/// Put the writers back into their initial state.
pub fn reset_writers() {
    GLOBAL.reset_writers();
}

/// Replace the sink of the `"default"` writer and return the previous one.
pub fn replace_default_writer(
    writer: Option<Arc<dyn Writer>>,
) -> Result<Arc<dyn Writer>, RegistryError> {
    GLOBAL.replace_default_writer(writer)
}

/// Add a writer notified of every message at or above `min_level`.
pub fn register_writer(
    name: &str,
    writer: Option<Arc<dyn Writer>>,
    min_level: Level,
) -> Result<(), RegistryError> {
    GLOBAL.register_writer(name, writer, min_level)
}

pub fn remove_writer(name: &str) -> Result<(Arc<dyn Writer>, Level), RegistryError> {
    GLOBAL.remove_writer(name)
}

/// Whether any writer is registered at or below `level`. When false, a
/// message at `level` is discarded.
pub fn will_write(level: Level) -> bool {
    GLOBAL.will_write(level)
}

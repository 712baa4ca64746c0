use crate::entry::Entry;
use crate::level::Level;
use crate::module::{ModuleId, ModuleTree, display_name};
use crate::writer::Writers;
use chrono::Utc;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Handle to one module in the hierarchy.
///
/// Cheap to clone. Every handle for the same name shares the same level:
/// setting it through one is immediately visible through all of them.
///
/// A message is only formatted when the module's effective level admits it
/// *and* at least one writer would accept it; otherwise the call returns
/// after the gate check.
#[derive(Clone)]
pub struct Logger {
    id: ModuleId,
    name: Arc<str>,
    modules: Arc<ModuleTree>,
    writers: Arc<Writers>,
}

impl Logger {
    pub(crate) fn new(id: ModuleId, modules: Arc<ModuleTree>, writers: Arc<Writers>) -> Self {
        let name = modules.name(id);
        Self {
            id,
            name,
            modules,
            writers,
        }
    }

    /// Normalized module name, `<root>` for the root logger.
    pub fn name(&self) -> &str {
        display_name(&self.name)
    }

    pub fn module_id(&self) -> ModuleId {
        self.id
    }

    /// Logger for the parent module; the root is its own parent.
    pub fn parent(&self) -> Logger {
        match self.modules.parent(self.id) {
            Some(parent) => self.bound_to(parent),
            None => self.clone(),
        }
    }

    /// Logger for `<this module>.<name>`.
    pub fn child(&self, name: &str) -> Logger {
        let id = if self.id.is_root() {
            self.modules.get(name)
        } else {
            self.modules.get(&format!("{}.{}", self.name, name))
        };
        self.bound_to(id)
    }

    fn bound_to(&self, id: ModuleId) -> Logger {
        Logger::new(id, Arc::clone(&self.modules), Arc::clone(&self.writers))
    }

    /// The level set on this module itself; UNSPECIFIED means inherited.
    pub fn log_level(&self) -> Level {
        self.modules.level(self.id)
    }

    pub fn effective_log_level(&self) -> Level {
        self.modules.effective_level(self.id)
    }

    /// Set this module's level. UNSPECIFIED makes it inherit again.
    pub fn set_log_level(&self, level: Level) {
        self.modules.set_level(self.id, level);
    }

    /// Whether a message at `level` would reach at least one writer.
    pub fn is_level_enabled(&self, level: Level) -> bool {
        if !level.is_specified() {
            return false;
        }
        let effective = self.effective_log_level();
        effective.is_specified() && level >= effective && self.writers.will_write(level)
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.is_level_enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_level_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_level_enabled(Level::Info)
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.is_level_enabled(Level::Warning)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_level_enabled(Level::Error)
    }

    pub fn is_critical_enabled(&self) -> bool {
        self.is_level_enabled(Level::Critical)
    }

    /// Emit a message attributed to the caller's source location.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.log_at(level, Location::caller(), args);
    }

    /// Emit a message attributed to an explicit source location.
    pub fn log_at(&self, level: Level, location: &'static Location<'static>, args: fmt::Arguments<'_>) {
        if !self.is_level_enabled(level) {
            return;
        }
        self.emit(level, location, args);
    }

    /// Build and deliver an entry without consulting the gate again.
    ///
    /// Used by the logging macros, which check [`Logger::is_level_enabled`]
    /// before evaluating their arguments.
    #[doc(hidden)]
    #[track_caller]
    pub fn emit_enabled(&self, level: Level, args: fmt::Arguments<'_>) {
        self.emit(level, Location::caller(), args);
    }

    fn emit(&self, level: Level, location: &'static Location<'static>, args: fmt::Arguments<'_>) {
        let entry = Entry {
            module: self.name.to_string(),
            level,
            timestamp: Utc::now(),
            filename: location.file(),
            line: location.line(),
            message: fmt::format(args),
        };
        self.writers.write(&entry);
    }

    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    #[track_caller]
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Critical, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.log_level())
            .finish()
    }
}

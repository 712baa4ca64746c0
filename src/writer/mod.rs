//! Output sinks and the registry that fans entries out to them.
//!
//! ```text
//!   Logger ──► Writers::will_write(level)?  ──► Writers::write(&entry)
//!                                                 │ snapshot under read lock
//!                                                 ├──► "default" (level >= TRACE?)
//!                                                 ├──► "audit"   (level >= ERROR?)
//!                                                 └──► ...       (insertion order)
//! ```
//!
//! Each writer is gated by its own minimum level. A writer that panics is
//! contained and the remaining writers still receive the entry.

mod simple;
mod test_writer;

pub use simple::SimpleWriter;
pub use test_writer::TestWriter;

use crate::entry::Entry;
use crate::error::RegistryError;
use crate::formatter::DefaultFormatter;
use crate::level::Level;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Name of the writer installed at start-up.
pub const DEFAULT_WRITER_NAME: &str = "default";

/// A destination for accepted log entries.
///
/// The registry has already checked the writer's minimum level before
/// calling [`Writer::write`].
pub trait Writer: Send + Sync {
    fn write(&self, entry: &Entry);
}

impl<F> Writer for F
where
    F: Fn(&Entry) + Send + Sync,
{
    fn write(&self, entry: &Entry) {
        self(entry)
    }
}

/// A writer together with the minimum level it accepts.
#[derive(Clone)]
pub struct RegisteredWriter {
    pub writer: Arc<dyn Writer>,
    pub level: Level,
}

impl RegisteredWriter {
    pub fn new(writer: Arc<dyn Writer>, level: Level) -> Self {
        Self { writer, level }
    }
}

impl fmt::Debug for RegisteredWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredWriter")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct NamedWriter {
    name: String,
    registered: RegisteredWriter,
}

#[derive(Default)]
struct WriterSet {
    // Swapped wholesale on mutation so `write` can hold a snapshot without the lock.
    entries: Arc<Vec<NamedWriter>>,
    // Lowest minimum level across `entries`; `None` when empty.
    lowest: Option<Level>,
}

impl WriterSet {
    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|named| named.name == name)
    }

    fn recompute_lowest(&mut self) {
        self.lowest = self
            .entries
            .iter()
            .map(|named| named.registered.level)
            .min();
    }
}

/// Registry of named writers.
pub struct Writers {
    inner: RwLock<WriterSet>,
}

impl Default for Writers {
    fn default() -> Self {
        Self::empty()
    }
}

impl Writers {
    /// Create a registry holding the given writers, in iteration order.
    pub fn new(initial: impl IntoIterator<Item = (String, RegisteredWriter)>) -> Self {
        let writers = Self::empty();
        writers.reset(initial);
        writers
    }

    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(WriterSet::default()),
        }
    }

    /// Register `writer` accepting every level from TRACE upwards.
    pub fn add(&self, name: &str, writer: Option<Arc<dyn Writer>>) -> Result<(), RegistryError> {
        self.add_with_level(name, writer, Level::Trace)
    }

    pub fn add_with_level(
        &self,
        name: &str,
        writer: Option<Arc<dyn Writer>>,
        level: Level,
    ) -> Result<(), RegistryError> {
        let writer = writer.ok_or(RegistryError::NilWriter)?;

        let mut set = self.inner.write();
        if set.position(name).is_some() {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        Arc::make_mut(&mut set.entries).push(NamedWriter {
            name: name.to_string(),
            registered: RegisteredWriter::new(writer, level),
        });
        set.recompute_lowest();

        tracing::debug!(writer = name, level = %level, "Registered writer");
        Ok(())
    }

    /// Swap the sink registered under `name`, keeping its minimum level.
    ///
    /// Returns the displaced sink.
    pub fn replace(
        &self,
        name: &str,
        writer: Option<Arc<dyn Writer>>,
    ) -> Result<Arc<dyn Writer>, RegistryError> {
        let writer = writer.ok_or(RegistryError::NilWriter)?;

        let mut set = self.inner.write();
        let index = set.position(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })?;
        let entries = Arc::make_mut(&mut set.entries);
        let previous = std::mem::replace(&mut entries[index].registered.writer, writer);

        tracing::debug!(writer = name, "Replaced writer");
        Ok(previous)
    }

    pub fn remove(&self, name: &str) -> Result<RegisteredWriter, RegistryError> {
        let mut set = self.inner.write();
        let index = set.position(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })?;
        let removed = Arc::make_mut(&mut set.entries).remove(index);
        set.recompute_lowest();

        tracing::debug!(writer = name, "Removed writer");
        Ok(removed.registered)
    }

    /// Whether any registered writer would accept an entry at `level`.
    pub fn will_write(&self, level: Level) -> bool {
        if !level.is_specified() {
            return false;
        }
        self.inner
            .read()
            .lowest
            .is_some_and(|lowest| level >= lowest)
    }

    /// Deliver `entry` to every writer whose minimum level admits it.
    pub fn write(&self, entry: &Entry) {
        let snapshot = Arc::clone(&self.inner.read().entries);

        for named in snapshot.iter() {
            if entry.level < named.registered.level {
                continue;
            }
            let writer = &named.registered.writer;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| writer.write(entry))) {
                tracing::warn!(
                    writer = %named.name,
                    panic = %panic_message(payload.as_ref()),
                    "Writer panicked, continuing with remaining writers"
                );
            }
        }
    }

    /// Discard every writer and install exactly `writers`, in iteration order.
    ///
    /// A name given more than once keeps its first position and its last value.
    pub fn reset(&self, writers: impl IntoIterator<Item = (String, RegisteredWriter)>) {
        let mut entries: Vec<NamedWriter> = Vec::new();
        for (name, registered) in writers {
            match entries.iter_mut().find(|named| named.name == name) {
                Some(existing) => existing.registered = registered,
                None => entries.push(NamedWriter { name, registered }),
            }
        }

        let mut set = self.inner.write();
        set.entries = Arc::new(entries);
        set.recompute_lowest();

        tracing::debug!(writers = set.entries.len(), "Reset writers");
    }

    /// Registered names in delivery order.
    pub fn names(&self) -> Vec<String> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|named| named.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The writer set a fresh process starts with: `"default"` at TRACE on stderr.
pub fn default_writers() -> Vec<(String, RegisteredWriter)> {
    let stderr: Arc<dyn Writer> = Arc::new(SimpleWriter::new(io::stderr(), DefaultFormatter));
    vec![(
        DEFAULT_WRITER_NAME.to_string(),
        RegisteredWriter::new(stderr, Level::Trace),
    )]
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

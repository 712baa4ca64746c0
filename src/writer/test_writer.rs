use super::Writer;
use crate::entry::Entry;
use parking_lot::Mutex;

/// Keeps every entry it receives in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct TestWriter {
    log: Mutex<Vec<Entry>>,
}

impl TestWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far, oldest first.
    pub fn log(&self) -> Vec<Entry> {
        self.log.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

impl Writer for TestWriter {
    fn write(&self, entry: &Entry) {
        self.log.lock().push(entry.clone());
    }
}

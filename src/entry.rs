use crate::level::Level;
use crate::module::display_name;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display name of the root module.
pub const ROOT_NAME: &str = "<root>";

/// A single accepted log message, handed to every writer whose level admits it.
///
/// Entries are built only after both the module and writer gates pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Normalized module name; the root module is `""`.
    pub module: String,
    pub level: Level,
    pub timestamp: DateTime<Utc>,
    pub filename: &'static str,
    pub line: u32,
    pub message: String,
}

impl Entry {
    /// Module name as shown to people, with the root spelled `<root>`.
    pub fn module_display(&self) -> &str {
        display_name(&self.module)
    }
}

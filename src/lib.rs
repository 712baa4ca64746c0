#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed:
#![allow(
    clippy::missing_errors_doc,      // Errors are enumerated in `error`
    clippy::missing_panics_doc,      // Only tests unwrap
    clippy::module_name_repetitions, // e.g. ConfigError in config
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

//! Hierarchical, level-gated logging.
//!
//! ```text
//!   <root> (WARNING)
//!     ├── net            (UNSPECIFIED → inherits WARNING)
//!     │    └── net.http  (DEBUG)
//!     └── db             (ERROR)
//!
//!   Logger::log(level) ── level >= effective && any writer accepts? ──► Writers
//! ```
//!
//! Modules are dot-separated, case-insensitive names. A module without its
//! own level inherits the nearest ancestor's. Writers are named sinks with
//! their own minimum level; every accepted entry is delivered to each writer
//! whose level admits it, in registration order.
//!
//! ```
//! use hierlog::{Context, Level, TestWriter, Writer};
//! use std::sync::Arc;
//!
//! let context = Context::empty();
//! let captured = Arc::new(TestWriter::new());
//! let sink: Arc<dyn Writer> = captured.clone();
//! context.register_writer("capture", Some(sink), Level::Trace).unwrap();
//!
//! let logger = context.get_logger("net.http");
//! logger.set_log_level(Level::Debug);
//! hierlog::debug!(logger, "connected to {}", "example.org");
//!
//! assert_eq!(captured.messages(), vec!["connected to example.org"]);
//! ```

mod macros;

pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod formatter;
pub mod global;
pub mod level;
pub mod logger;
pub mod module;
pub mod writer;

pub use config::{FormatKind, LoggingConfig, Target, WriterConfig, parse_config_string};
pub use context::Context;
pub use entry::{Entry, ROOT_NAME};
pub use error::{ConfigError, RegistryError};
pub use formatter::{DefaultFormatter, Formatter, JsonFormatter};
pub use global::{
    configure_loggers, default_context, get_logger, logger_info, register_writer, remove_writer,
    replace_default_writer, reset_loggers, reset_writers, will_write,
};
pub use level::Level;
pub use logger::Logger;
pub use module::{ModuleId, ModuleTree};
pub use writer::{
    DEFAULT_WRITER_NAME, RegisteredWriter, SimpleWriter, TestWriter, Writer, Writers,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

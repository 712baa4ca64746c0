use thiserror::Error;

/// Failures of writer registration and replacement.
///
/// None of these are fatal; they are returned to the caller and never
/// logged by the registry itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("there is already a Writer registered with the name \"{name}\"")]
    DuplicateName { name: String },

    #[error("Writer cannot be nil")]
    NilWriter,

    #[error("Writer \"{name}\" is not registered")]
    NotFound { name: String },

    #[error("there is no \"default\" writer")]
    NoDefaultWriter,
}

impl RegistryError {
    /// Short stable label for diagnostics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::DuplicateName { .. } => "writer_duplicate_name",
            RegistryError::NilWriter => "writer_nil",
            RegistryError::NotFound { .. } => "writer_not_found",
            RegistryError::NoDefaultWriter => "writer_no_default",
        }
    }
}

/// Failures while parsing or applying logging configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown severity level \"{input}\"")]
    InvalidLevel { input: String },

    #[error("invalid logger config entry \"{entry}\": {reason}")]
    InvalidEntry { entry: String, reason: String },

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Writer error: {0}")]
    Registry(#[from] RegistryError),
}

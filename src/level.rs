use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log message, ordered from least to most severe.
///
/// `Unspecified` is not a severity a message can carry. On a module it means
/// "inherit from the parent"; on a writer it means "accept everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum Level {
    #[default]
    Unspecified = 0,
    Trace = 1,
    Debug = 2,
    Info = 3,
    Warning = 4,
    Error = 5,
    Critical = 6,
}

impl Level {
    /// Every level a message can be emitted at, least severe first.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Unspecified => "UNSPECIFIED",
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Five-column tag used when aligning log lines.
    pub fn short(&self) -> &'static str {
        match self {
            Level::Unspecified => "     ",
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO ",
            Level::Warning => "WARN ",
            Level::Error => "ERROR",
            Level::Critical => "CRITC",
        }
    }

    pub fn is_specified(&self) -> bool {
        *self != Level::Unspecified
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNSPECIFIED" => Ok(Level::Unspecified),
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            _ => Err(ConfigError::InvalidLevel {
                input: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(Level::Unspecified < Level::Trace);
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
        assert!(Level::ALL.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
        assert_eq!("Debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!(" INFO ".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("error".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("critical".parse::<Level>().unwrap(), Level::Critical);
        assert_eq!("unspecified".parse::<Level>().unwrap(), Level::Unspecified);

        let err = "loud".parse::<Level>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel { ref input } if input == "loud"));
    }

    #[test]
    fn test_level_display_round_trips() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
        assert_eq!(Level::Unspecified.to_string(), "UNSPECIFIED");
    }

    #[test]
    fn test_short_names_are_aligned() {
        for level in Level::ALL {
            assert_eq!(level.short().len(), 5, "{level}");
        }
        assert_eq!(Level::Warning.short(), "WARN ");
        assert_eq!(Level::Critical.short(), "CRITC");
    }

    #[test]
    fn test_level_serde() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");

        let level: Level = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, Level::Debug);

        assert!(serde_json::from_str::<Level>("\"verbose\"").is_err());
    }
}

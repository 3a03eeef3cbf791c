//! Unified error type for fieldlog's fallible edges (outputs and config loading).
//!
//! Logging calls themselves never return errors; these only surface from
//! [`crate::Output`] implementations, [`crate::Logger::flush`], and [`crate::Config`].

/// Error type for fieldlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Record serialization error.
    Format(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::ConfigDirNotFound | Self::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

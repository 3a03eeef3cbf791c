//! Configuration struct definitions.

use crate::level::Level;
use crate::output::Format;
use serde::Deserialize;

/// `[logger]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Root `src` name; the executable's file name when unset.
    pub name: Option<String>,
    /// Threshold, parsed permissively; `info` when unset.
    pub level: Option<Level>,
    pub format: Format,
    /// `stdout`, `stderr`, `discard`, or a file path (`~` is expanded).
    pub destination: String,
    /// Emit the `caller` field.
    pub caller: bool,
    /// Prefix trimmed from `caller` values.
    pub caller_trim: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: None,
            level: None,
            format: Format::Logfmt,
            destination: "stdout".to_string(),
            caller: true,
            caller_trim: String::new(),
        }
    }
}

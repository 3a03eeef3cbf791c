//! Record rendering. The [`Output`] trait lets users plug in their own encoding;
//! logfmt and JSON are built in.

mod json;
mod logfmt;
mod sink;

pub use json::JsonOutput;
pub use logfmt::LogfmtOutput;
pub use sink::{Capture, Destination, Sink};

use crate::field::Field;
use crate::level::Level;
use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Everything an output needs to render one line.
///
/// Field order is part of the contract: `ts`, `caller`, the logger's bound fields,
/// `level`, `msg`, then the fields passed to the logging call.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub ts: String,
    /// `None` when caller display is disabled.
    pub caller: Option<String>,
    /// Static fields, `src`, and anything added with `with_fields`, in binding order.
    pub bound: &'a [Field],
    pub level: Level,
    pub msg: String,
    pub fields: &'a [Field],
}

/// `Send + Sync` so one logger can be shared across threads without a lock around
/// the trait object; implementations serialize their own writes.
pub trait Output: Send + Sync {
    /// Renders and writes one record.
    ///
    /// # Errors
    /// I/O errors from the underlying sink, or serialization failures.
    fn write(&self, record: &Record<'_>) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;
}

/// Built-in record encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Format {
    /// `key=value` pairs separated by spaces.
    #[default]
    Logfmt,
    /// One JSON object per line.
    Json,
}

impl Format {
    pub const ALL: [Self; 2] = [Self::Logfmt, Self::Json];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logfmt => "logfmt",
            Self::Json => "json",
        }
    }

    /// Case-insensitive; anything that isn't `json` is logfmt.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.eq_ignore_ascii_case(Self::Json.as_str()) {
            Self::Json
        } else {
            Self::Logfmt
        }
    }

    /// The output implementing this format, writing to `sink`.
    #[must_use]
    pub fn output(self, sink: Sink) -> Arc<dyn Output> {
        match self {
            Self::Logfmt => Arc::new(LogfmtOutput::new(sink)),
            Self::Json => Arc::new(JsonOutput::new(sink)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

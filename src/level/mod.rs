//! Severity levels that gate which records reach the output.

mod dynamic;

pub use dynamic::DynamicLeveler;

use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordered from least to most severe so a record passes when `record >= threshold`.
///
/// `All` sits below everything and therefore lets every record through when used as
/// a threshold. `Fatal` sits above `Err`; logging at it terminates the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(from = "String")]
#[repr(u8)]
pub enum Level {
    /// Threshold sentinel that passes every record.
    All = 0,
    /// Development diagnostics, too noisy for normal operation.
    Debug = 1,
    /// Normal operational milestones.
    #[default]
    Info = 2,
    /// Non-fatal anomalies that may need attention.
    Warn = 3,
    /// Failures that prevented an operation from completing.
    Err = 4,
    /// Unrecoverable condition; the process exits after the record is written.
    Fatal = 5,
}

/// Prefix matching walks this table in order; the first hit wins.
const PARSE_ORDER: [Level; 6] = [
    Level::All,
    Level::Fatal,
    Level::Err,
    Level::Warn,
    Level::Info,
    Level::Debug,
];

impl Level {
    /// Canonical lowercase name, as written into the `level` field of every record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Err => "err",
            Self::Fatal => "fatal",
        }
    }

    /// Every level in ascending severity.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::All,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Err,
            Self::Fatal,
        ]
    }

    /// Case-insensitive prefix parse that never fails.
    ///
    /// An exact canonical name wins outright. Otherwise the first name in the order
    /// `all, fatal, err, warn, info, debug` that starts with the input is used.
    /// Anything else, including the empty string, resolves to [`Level::All`].
    ///
    /// ```
    /// use fieldlog::Level;
    ///
    /// assert_eq!(Level::parse("INFO"), Level::Info);
    /// assert_eq!(Level::parse("w"), Level::Warn);
    /// assert_eq!(Level::parse("error"), Level::All);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.to_lowercase();

        if let Some(level) = PARSE_ORDER.iter().find(|level| level.as_str() == input) {
            return *level;
        }

        PARSE_ORDER
            .iter()
            .copied()
            .find(|level| level.as_str().starts_with(&input))
            .unwrap_or(Self::All)
    }

    /// Whether a record at `self` passes the given threshold.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        self as u8 >= threshold as u8
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Err,
            5 => Self::Fatal,
            _ => Self::All,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Source of the active threshold, consulted on every logging call.
///
/// A plain [`Level`] is a fixed threshold; [`DynamicLeveler`] can be changed while
/// loggers built on it keep running.
pub trait Leveler: Send + Sync {
    /// The threshold in effect right now.
    fn level(&self) -> Level;
}

impl Leveler for Level {
    fn level(&self) -> Level {
        *self
    }
}

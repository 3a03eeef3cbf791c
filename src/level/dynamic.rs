//! Runtime-adjustable threshold, so verbosity can change without a restart.

use super::{Level, Leveler};
use std::sync::atomic::{AtomicU8, Ordering};

/// Atomically swappable level shared between the loggers that filter on it and
/// whatever adjusts it (a signal handler, an admin endpoint, a config reload).
///
/// Wrap it in an `Arc` and hand the same instance to [`crate::LoggerBuilder::leveler`]
/// and to the code that calls [`DynamicLeveler::set_level`].
///
/// ```
/// use fieldlog::{DynamicLeveler, Level};
///
/// let leveler = DynamicLeveler::new("info");
/// assert_eq!(leveler.current(), Level::Info);
///
/// leveler.set_level("debug");
/// assert_eq!(leveler.current(), Level::Debug);
/// ```
#[derive(Debug)]
pub struct DynamicLeveler {
    level: AtomicU8,
}

impl DynamicLeveler {
    /// Parses `initial` with [`Level::parse`], so unknown input starts at `all`.
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self::with_level(Level::parse(initial))
    }

    #[must_use]
    pub const fn with_level(level: Level) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
        }
    }

    /// Parses and stores a new threshold.
    pub fn set_level(&self, level: &str) {
        self.set(Level::parse(level));
    }

    pub fn set(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// The most recently stored threshold.
    #[must_use]
    pub fn current(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }
}

impl Leveler for DynamicLeveler {
    fn level(&self) -> Level {
        self.current()
    }
}

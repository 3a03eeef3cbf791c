//! The logger handle: leveled methods, derivation of sub-loggers, and the single
//! private primitive every record goes through.

mod builder;
mod from_config;
mod terminator;

pub use builder::LoggerBuilder;
pub use terminator::{ProcessExit, Terminator};

use crate::caller;
use crate::field::{Field, Fields, Value};
use crate::level::{Level, Leveler};
use crate::message::Message;
use crate::multi_error::{MultiError, WrappedErrors};
use crate::output::{Destination, Format, Output, Record};
use chrono::{DateTime, Local, SecondsFormat};
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

pub(crate) const SRC_KEY: &str = "src";

/// Renders the `ts` field.
pub type TimeFormatter = Arc<dyn Fn(&DateTime<Local>) -> String + Send + Sync>;

/// Settings shared unchanged by a logger and everything derived from it.
struct Core {
    output: Arc<dyn Output>,
    leveler: Arc<dyn Leveler>,
    show_caller: bool,
    caller_trim: String,
    time_formatter: Option<TimeFormatter>,
    terminator: Arc<dyn Terminator>,
}

impl Core {
    fn timestamp(&self) -> String {
        let now = Local::now();
        self.time_formatter.as_ref().map_or_else(
            || now.to_rfc3339_opts(SecondsFormat::Nanos, true),
            |format| format(&now),
        )
    }
}

/// Structured, leveled logger.
///
/// Handles are immutable: [`Logger::child`] and [`Logger::with_fields`] return new
/// handles and leave the parent untouched. Clones share the same output, so they
/// are cheap and safe to send across threads.
///
/// `Logger::default()` is a no-op handle. Every method on it returns without writing
/// anything, which lets code hold a logger it may never have been given.
///
/// ```
/// use fieldlog::{Capture, Level, Logger, fields};
///
/// let capture = Capture::new();
/// let logger = Logger::builder()
///     .destination(capture.clone())
///     .name("myapp")
///     .level(Level::Info)
///     .fields([("somekey", "someval")])
///     .build();
///
/// logger.info("some message", [("anotherkey", "another value")]);
/// logger.debug("filtered out", ());
///
/// let line = capture.contents();
/// assert!(line.contains("somekey=someval src=myapp level=info"));
/// assert!(line.contains(r#"msg="some message" anotherkey="another value""#));
/// assert!(!line.contains("filtered out"));
///
/// let db = logger.child("db").with_fields(fields! { "pool" => 4 });
/// db.warn("slow query", ());
/// assert!(capture.contents().contains("src=myapp.db pool=4 level=warn"));
/// ```
#[derive(Clone, Default)]
pub struct Logger {
    core: Option<Arc<Core>>,
    src: Vec<String>,
    bound: Vec<Field>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Standard output, logfmt, named `default`.
    #[must_use]
    pub fn default_logger() -> Self {
        LoggerBuilder::new()
            .name("default")
            .format(Format::Logfmt)
            .build()
    }

    /// Discards everything it is given, for tests that need a real logger but no output.
    #[must_use]
    pub fn silenced() -> Self {
        LoggerBuilder::new()
            .destination(Destination::Discard)
            .name("discard")
            .build()
    }

    /// Sub-logger whose `src` is this logger's path with `name` appended, joined by `.`.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.core.is_none() {
            return Self::default();
        }

        let mut src = self.src.clone();
        src.push(name.to_string());
        let path = src.join(".");

        let mut bound = self.bound.clone();
        match bound.iter_mut().rev().find(|field| field.key == SRC_KEY) {
            Some(field) => field.value = Value::Str(path),
            None => bound.push(Field::new(SRC_KEY, path)),
        }

        Self {
            core: self.core.clone(),
            src,
            bound,
        }
    }

    /// Logger with `fields` bound after the existing ones. Duplicate keys are kept;
    /// the output format decides how they appear.
    #[must_use]
    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        if self.core.is_none() {
            return Self::default();
        }

        let mut bound = self.bound.clone();
        bound.extend(fields.into());

        Self {
            core: self.core.clone(),
            src: self.src.clone(),
            bound,
        }
    }

    /// Logs at an arbitrary level. Logging at [`Level::Fatal`] through this method
    /// writes the record but does not terminate; use [`Logger::fatal`] for that.
    #[track_caller]
    pub fn log<'m>(&self, level: Level, msg: impl Into<Message<'m>>, fields: impl Into<Fields>) {
        self.emit(level, Location::caller(), msg.into(), fields.into());
    }

    #[track_caller]
    pub fn debug<'m>(&self, msg: impl Into<Message<'m>>, fields: impl Into<Fields>) {
        self.emit(Level::Debug, Location::caller(), msg.into(), fields.into());
    }

    #[track_caller]
    pub fn info<'m>(&self, msg: impl Into<Message<'m>>, fields: impl Into<Fields>) {
        self.emit(Level::Info, Location::caller(), msg.into(), fields.into());
    }

    #[track_caller]
    pub fn warn<'m>(&self, msg: impl Into<Message<'m>>, fields: impl Into<Fields>) {
        self.emit(Level::Warn, Location::caller(), msg.into(), fields.into());
    }

    #[track_caller]
    pub fn err<'m>(&self, msg: impl Into<Message<'m>>, fields: impl Into<Fields>) {
        self.emit(Level::Err, Location::caller(), msg.into(), fields.into());
    }

    /// Logs at [`Level::Fatal`], flushes, then exits with status 1 through the
    /// configured [`Terminator`].
    ///
    /// A no-op handle writes nothing but still exits.
    #[track_caller]
    pub fn fatal<'m>(&self, msg: impl Into<Message<'m>>, fields: impl Into<Fields>) {
        self.emit(Level::Fatal, Location::caller(), msg.into(), fields.into());

        match &self.core {
            Some(core) => {
                let _ = core.output.flush();
                core.terminator.terminate(1);
            }
            None => ProcessExit.terminate(1),
        }
    }

    /// Logs `err` at [`Level::Err`].
    ///
    /// A [`MultiError`] is unwound into `error_00`, `error_01`, ... in order; any
    /// other error becomes a single `error` field. Unwinding goes one level deep: a
    /// `MultiError` nested inside another is written as its display text.
    ///
    /// Only this crate's [`MultiError`] is recognized behind a `dyn Error`. Aggregate
    /// types of your own implement [`WrappedErrors`] and go through
    /// [`Logger::log_wrapped`].
    ///
    /// ```
    /// use fieldlog::{Capture, Logger, MultiError};
    ///
    /// let capture = Capture::new();
    /// let logger = Logger::builder().destination(capture.clone()).build();
    ///
    /// let err = MultiError::new().append("some err1").append("some err2");
    /// logger.log_error("some error", &err, ());
    ///
    /// let line = capture.contents();
    /// assert!(line.contains(r#"error_00="some err1" error_01="some err2""#));
    /// assert!(!line.contains(" error="));
    /// ```
    #[track_caller]
    pub fn log_error<'m>(
        &self,
        msg: impl Into<Message<'m>>,
        err: &(dyn Error + 'static),
        fields: impl Into<Fields>,
    ) {
        let mut fields = fields.into();

        match err.downcast_ref::<MultiError>() {
            Some(multi) => push_wrapped(&mut fields, multi),
            None => fields.push("error", err.to_string()),
        }

        self.emit(Level::Err, Location::caller(), msg.into(), fields);
    }

    /// Logs an aggregate error at [`Level::Err`], one `error_NN` field per wrapped
    /// error, like [`Logger::log_error`] does for [`MultiError`].
    ///
    /// ```
    /// use fieldlog::{Capture, Logger, WrappedErrors};
    /// use std::error::Error;
    ///
    /// struct Batch(Vec<std::io::Error>);
    ///
    /// impl WrappedErrors for Batch {
    ///     fn wrapped_errors(&self) -> Vec<&(dyn Error + 'static)> {
    ///         self.0.iter().map(|e| e as &(dyn Error + 'static)).collect()
    ///     }
    /// }
    ///
    /// let capture = Capture::new();
    /// let logger = Logger::builder().destination(capture.clone()).build();
    ///
    /// let batch = Batch(vec![std::io::Error::other("disk"), std::io::Error::other("net")]);
    /// logger.log_wrapped("batch failed", &batch, ());
    /// assert!(capture.contents().contains("error_00=disk error_01=net"));
    /// ```
    #[track_caller]
    pub fn log_wrapped<'m, E: WrappedErrors + ?Sized>(
        &self,
        msg: impl Into<Message<'m>>,
        err: &E,
        fields: impl Into<Fields>,
    ) {
        let mut fields = fields.into();
        push_wrapped(&mut fields, err);
        self.emit(Level::Err, Location::caller(), msg.into(), fields);
    }

    /// Whether a record at `level` would currently be written.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.core
            .as_ref()
            .is_some_and(|core| level.passes(core.leveler.level()))
    }

    /// The threshold in effect, or `None` for a no-op handle.
    #[must_use]
    pub fn min_level(&self) -> Option<Level> {
        self.core.as_ref().map(|core| core.leveler.level())
    }

    /// Dot-joined source path, e.g. `app.db.pool`.
    #[must_use]
    pub fn src(&self) -> String {
        self.src.join(".")
    }

    /// Fields bound to every record, `src` included.
    #[must_use]
    pub fn bound_fields(&self) -> &[Field] {
        &self.bound
    }

    /// True for handles created with `Logger::default()`.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.core.is_none()
    }

    /// # Errors
    /// Returns the output's flush error.
    pub fn flush(&self) -> Result<(), crate::Error> {
        match &self.core {
            Some(core) => core.output.flush(),
            None => Ok(()),
        }
    }

    fn emit(&self, level: Level, location: &Location<'_>, msg: Message<'_>, fields: Fields) {
        let Some(core) = &self.core else {
            return;
        };

        if !level.passes(core.leveler.level()) {
            return;
        }

        let record = Record {
            ts: core.timestamp(),
            caller: core
                .show_caller
                .then(|| caller::resolve(location, &core.caller_trim)),
            bound: &self.bound,
            level,
            msg: msg.to_string(),
            fields: fields.as_slice(),
        };

        let _ = core.output.write(&record);
    }
}

fn push_wrapped<E: WrappedErrors + ?Sized>(fields: &mut Fields, err: &E) {
    for (i, wrapped) in err.wrapped_errors().into_iter().enumerate() {
        fields.push(format!("error_{i:02}"), wrapped.to_string());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("src", &self.src())
            .field("bound", &self.bound)
            .field("min_level", &self.min_level())
            .finish_non_exhaustive()
    }
}

impl From<Option<Self>> for Logger {
    fn from(logger: Option<Self>) -> Self {
        logger.unwrap_or_default()
    }
}

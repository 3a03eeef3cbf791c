//! Explicit configuration for a [`Logger`]: every option has a named setter and a
//! default, and nothing is retained once [`LoggerBuilder::build`] returns.

use super::terminator::{ProcessExit, Terminator};
use super::{Core, Logger, TimeFormatter, SRC_KEY};
use crate::field::{Field, Fields};
use crate::level::{Level, Leveler};
use crate::output::{Destination, Format, Output, Sink};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Collects options; setters can be called in any order and the last call wins.
///
/// Defaults: standard output, logfmt, level `info`, caller display on, no caller
/// trimming, the running executable's file name as the logger name, and RFC 3339
/// timestamps with nanoseconds rendered in UTC.
pub struct LoggerBuilder {
    pub(super) destination: Destination,
    pub(super) name: String,
    pub(super) format: Format,
    pub(super) output: Option<Arc<dyn Output>>,
    pub(super) leveler: Arc<dyn Leveler>,
    pub(super) fields: Fields,
    pub(super) show_caller: bool,
    pub(super) caller_trim: String,
    pub(super) time_formatter: Option<TimeFormatter>,
    pub(super) terminator: Arc<dyn Terminator>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            destination: Destination::Stdout,
            name: executable_name(),
            format: Format::Logfmt,
            output: None,
            leveler: Arc::new(Level::Info),
            fields: Fields::new(),
            show_caller: true,
            caller_trim: String::new(),
            time_formatter: None,
            terminator: Arc::new(ProcessExit),
        }
    }

    #[must_use]
    pub fn destination(mut self, destination: impl Into<Destination>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Shorthand for `destination(Destination::writer(w))`.
    #[must_use]
    pub fn writer(self, w: impl std::io::Write + Send + 'static) -> Self {
        self.destination(Destination::writer(w))
    }

    /// Root segment of the `src` path.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Custom encoding. Takes precedence over [`LoggerBuilder::format`] and
    /// [`LoggerBuilder::destination`]; the output owns its own sink.
    #[must_use]
    pub fn output(mut self, output: Arc<dyn Output>) -> Self {
        self.output = Some(output);
        self
    }

    /// Fixed threshold.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.leveler = Arc::new(level);
        self
    }

    /// Threshold read on every call, e.g. a shared [`crate::DynamicLeveler`].
    #[must_use]
    pub fn leveler(mut self, leveler: Arc<dyn Leveler>) -> Self {
        self.leveler = leveler;
        self
    }

    /// Static fields bound to every record.
    ///
    /// Replaces whatever an earlier call set; fields from separate calls are not
    /// merged.
    #[must_use]
    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Toggles the `caller` field.
    #[must_use]
    pub const fn caller(mut self, enabled: bool) -> Self {
        self.show_caller = enabled;
        self
    }

    /// Prefix removed from the front of every `caller` value. See
    /// [`crate::caller::trim`] and [`crate::caller_root!`].
    #[must_use]
    pub fn caller_trim(mut self, prefix: impl Into<String>) -> Self {
        self.caller_trim = prefix.into();
        self
    }

    /// Custom rendering for the `ts` field.
    #[must_use]
    pub fn time_formatter(
        mut self,
        formatter: impl Fn(&DateTime<Local>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.time_formatter = Some(Arc::new(formatter));
        self
    }

    /// Renders `ts` as RFC 3339 with nanoseconds in the given offset.
    #[must_use]
    pub fn time_offset(self, offset: FixedOffset) -> Self {
        self.time_formatter(move |ts| {
            ts.with_timezone(&offset)
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
        })
    }

    /// Replaces the process exit performed by [`Logger::fatal`].
    #[must_use]
    pub fn terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.terminator = Arc::new(terminator);
        self
    }

    /// Never fails: every option already holds a usable value.
    #[must_use]
    pub fn build(self) -> Logger {
        // Hosts normally run in UTC; only pay for the conversion when they don't.
        let time_formatter = self.time_formatter.or_else(|| {
            let offset = Local::now().offset().local_minus_utc();
            (offset != 0).then(|| Arc::new(utc_rfc3339) as TimeFormatter)
        });

        let output = match self.output {
            Some(output) => output,
            None => self.format.output(Sink::new(self.destination)),
        };

        let mut bound = self.fields.into_vec();
        bound.push(Field::new(SRC_KEY, self.name.clone()));

        Logger {
            core: Some(Arc::new(Core {
                output,
                leveler: self.leveler,
                show_caller: self.show_caller,
                caller_trim: self.caller_trim,
                time_formatter,
                terminator: self.terminator,
            })),
            src: vec![self.name],
            bound,
        }
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("destination", &self.destination)
            .field("name", &self.name)
            .field("format", &self.format)
            .field("custom_output", &self.output.is_some())
            .field("level", &self.leveler.level())
            .field("fields", &self.fields)
            .field("show_caller", &self.show_caller)
            .field("caller_trim", &self.caller_trim)
            .finish_non_exhaustive()
    }
}

fn utc_rfc3339(ts: &DateTime<Local>) -> String {
    ts.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// File name of the running executable, as invoked.
fn executable_name() -> String {
    let arg0 = std::env::args_os().next();
    let from_arg0 = arg0
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned());

    from_arg0
        .or_else(|| {
            let exe = std::env::current_exe().ok()?;
            exe.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

//! Where rendered lines go, and the lock that keeps concurrent lines from interleaving.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Destination chosen at build time.
#[derive(Default)]
pub enum Destination {
    #[default]
    Stdout,
    Stderr,
    /// Accepts and drops everything.
    Discard,
    Writer(Box<dyn Write + Send>),
}

impl Destination {
    pub fn writer(w: impl Write + Send + 'static) -> Self {
        Self::Writer(Box::new(w))
    }

    fn into_writer(self) -> Box<dyn Write + Send> {
        match self {
            Self::Stdout => Box::new(io::stdout()),
            Self::Stderr => Box::new(io::stderr()),
            Self::Discard => Box::new(io::sink()),
            Self::Writer(w) => w,
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Discard => f.write_str("Discard"),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

impl From<Capture> for Destination {
    fn from(capture: Capture) -> Self {
        Self::writer(capture)
    }
}

/// Shared, mutex-guarded writer. Each rendered record is written with a single
/// `write_all` under the lock, so lines from different threads never interleave.
#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    #[must_use]
    pub fn new(destination: Destination) -> Self {
        Self {
            writer: Arc::new(Mutex::new(destination.into_writer())),
        }
    }

    /// Writes `line` followed by a newline.
    ///
    /// # Errors
    /// Whatever the underlying writer returns.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        self.lock().write_all(&buf)
    }

    /// # Errors
    /// Whatever the underlying writer returns.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }

    // A panic while holding the lock can only have left a partial line behind;
    // the writer itself is still usable.
    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

/// In-memory destination whose clones share one buffer. Hand one clone to the
/// builder and read the output back through another.
///
/// ```
/// use fieldlog::{Capture, Logger};
///
/// let capture = Capture::new();
/// let logger = Logger::builder()
///     .destination(capture.clone())
///     .name("app")
///     .caller(false)
///     .build();
///
/// logger.info("ready", ());
/// assert!(capture.contents().contains("msg=ready"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Written lines, without their trailing newlines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_appends_newline() {
        let capture = Capture::new();
        let sink = Sink::new(capture.clone().into());
        sink.write_line("a=1").unwrap();
        sink.write_line("b=2").unwrap();
        assert_eq!(capture.contents(), "a=1\nb=2\n");
    }

    #[test]
    fn capture_clear_empties_buffer() {
        let mut capture = Capture::new();
        capture.write_all(b"data").unwrap();
        assert!(!capture.is_empty());
        capture.clear();
        assert!(capture.is_empty());
    }

    #[test]
    fn discard_accepts_writes() {
        let sink = Sink::new(Destination::Discard);
        assert!(sink.write_line("dropped").is_ok());
        assert!(sink.flush().is_ok());
    }
}

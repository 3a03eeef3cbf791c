//! The message argument of every logging call.
//!
//! A message is text, an error, something displayable, or an opaque value. Rendering
//! never fails: opaque values degrade to a placeholder naming their type.

use crate::multi_error::MultiError;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Closed set of things a log message can be built from.
///
/// Strings convert directly, as do references to `io::Error`, [`MultiError`],
/// [`crate::Error`] and `dyn Error` trait objects. Your own error types go through
/// [`Message::error`], and other `Display` values through [`Message::display`]:
///
/// ```
/// use fieldlog::{Logger, Message};
///
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("upstream timed out")
///     }
/// }
///
/// impl std::error::Error for Timeout {}
///
/// let logger = Logger::silenced();
/// logger.err(Message::error(&Timeout), ());
/// ```
///
/// ```
/// use fieldlog::Message;
///
/// let io = std::io::Error::other("disk full");
/// assert_eq!(Message::from("plain").to_string(), "plain");
/// assert_eq!(Message::from(&io).to_string(), "disk full");
/// assert_eq!(Message::display(&42).to_string(), "42");
/// assert!(
///     Message::opaque(&vec![1u8])
///         .to_string()
///         .starts_with("unable to convert type "),
/// );
/// ```
pub enum Message<'a> {
    Text(Cow<'a, str>),
    Error(&'a (dyn Error + 'a)),
    Display(&'a (dyn fmt::Display + 'a)),
    /// Carries only the type name of a value that could not be rendered.
    Opaque(&'static str),
}

impl<'a> Message<'a> {
    /// Message taken from an error's `Display` text.
    #[must_use]
    pub fn error(err: &'a (dyn Error + 'a)) -> Self {
        Self::Error(err)
    }

    #[must_use]
    pub fn display<T: fmt::Display + 'a>(value: &'a T) -> Self {
        Self::Display(value)
    }

    /// Fallback for values with no textual form.
    #[must_use]
    pub fn opaque<T: ?Sized>(_value: &T) -> Self {
        Self::Opaque(std::any::type_name::<T>())
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Error(err) => write!(f, "{err}"),
            Self::Display(value) => write!(f, "{value}"),
            Self::Opaque(type_name) => write!(f, "unable to convert type {type_name} to string"),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Message").field(&self.to_string()).finish()
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Message<'_> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a String> for Message<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<Cow<'a, str>> for Message<'a> {
    fn from(text: Cow<'a, str>) -> Self {
        Self::Text(text)
    }
}

impl From<fmt::Arguments<'_>> for Message<'_> {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Self::Text(Cow::Owned(args.to_string()))
    }
}

impl<'a> From<&'a (dyn Error + 'static)> for Message<'a> {
    fn from(err: &'a (dyn Error + 'static)) -> Self {
        Self::Error(err)
    }
}

impl<'a> From<&'a (dyn Error + Send + Sync + 'static)> for Message<'a> {
    fn from(err: &'a (dyn Error + Send + Sync + 'static)) -> Self {
        Self::Error(err)
    }
}

impl<'a> From<&'a Box<dyn Error + Send + Sync + 'static>> for Message<'a> {
    fn from(err: &'a Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self::Error(&**err)
    }
}

impl<'a> From<&'a std::io::Error> for Message<'a> {
    fn from(err: &'a std::io::Error) -> Self {
        Self::Error(err)
    }
}

impl<'a> From<&'a MultiError> for Message<'a> {
    fn from(err: &'a MultiError) -> Self {
        Self::Error(err)
    }
}

impl<'a> From<&'a crate::Error> for Message<'a> {
    fn from(err: &'a crate::Error) -> Self {
        Self::Error(err)
    }
}

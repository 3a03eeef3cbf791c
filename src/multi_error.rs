//! An error that aggregates several causes, unwound field-by-field by
//! [`crate::Logger::log_error`].

use std::error::Error;
use std::fmt;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors that aggregate other errors.
///
/// Implement it on your own aggregate type and log it with
/// [`crate::Logger::log_wrapped`] to get one `error_NN` field per wrapped error.
pub trait WrappedErrors {
    /// The wrapped errors, in reporting order.
    fn wrapped_errors(&self) -> Vec<&(dyn Error + 'static)>;
}

/// Ordered collection of errors, for operations that keep going after a failure and
/// report everything at the end.
///
/// ```
/// use fieldlog::MultiError;
///
/// let err = MultiError::new()
///     .append("first failure")
///     .append(std::io::Error::other("second failure"));
///
/// assert_eq!(err.len(), 2);
/// assert!(err.into_result().is_err());
/// assert!(MultiError::new().into_result().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct MultiError {
    errors: Vec<BoxError>,
}

impl MultiError {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, err: impl Into<BoxError>) {
        self.errors.push(err.into());
    }

    /// Chaining form of [`MultiError::push`].
    #[must_use]
    pub fn append(mut self, err: impl Into<BoxError>) -> Self {
        self.push(err);
        self
    }

    /// Wrapped errors in the order they were added.
    pub fn errors(&self) -> impl Iterator<Item = &(dyn Error + Send + Sync + 'static)> {
        self.errors.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was collected.
    ///
    /// # Errors
    /// Returns `self` when at least one error was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 {
            "error"
        } else {
            "errors"
        };
        write!(f, "{} {noun} occurred:", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n\t* {err}")?;
        }
        Ok(())
    }
}

impl Error for MultiError {}

impl WrappedErrors for MultiError {
    fn wrapped_errors(&self) -> Vec<&(dyn Error + 'static)> {
        self.errors
            .iter()
            .map(|err| &**err as &(dyn Error + 'static))
            .collect()
    }
}

impl<E: Into<BoxError>> FromIterator<E> for MultiError {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<E: Into<BoxError>> Extend<E> for MultiError {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.errors.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_error() {
        let err: MultiError = ["one", "two"].into_iter().collect();
        assert_eq!(err.to_string(), "2 errors occurred:\n\t* one\n\t* two");
    }

    #[test]
    fn single_error_is_singular() {
        let err = MultiError::new().append("only");
        assert_eq!(err.to_string(), "1 error occurred:\n\t* only");
    }

    #[test]
    fn errors_keep_insertion_order() {
        let err = MultiError::new().append("a").append("b").append("c");
        let messages: Vec<String> = err.errors().map(ToString::to_string).collect();
        assert_eq!(messages, ["a", "b", "c"]);
    }
}

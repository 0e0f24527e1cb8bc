// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::Exception;

/// The variant of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An informational failure produced by application logic.
    Info,
    /// A failure caused by a captured [`Exception`].
    Exceptional,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Exceptional => write!(f, "exceptional"),
        }
    }
}

#[derive(Debug)]
struct Inner {
    message: Cow<'static, str>,
    caused_errors: Vec<Error>,
    exception: Option<Exception>,
}

/// An immutable error value with a message and an ordered list of causing errors.
///
/// Errors are built bottom-up and never change afterwards, so the tree formed by
/// [`caused_errors`](Self::caused_errors) can never contain a cycle. Cloning is cheap: the data is
/// shared behind an [`Arc`].
///
/// An error created from an [`Exception`] is of kind [`ErrorKind::Exceptional`] and keeps the
/// exception around for introspection.
///
/// # Examples
///
/// ```rust
/// use outcome::{Error, ErrorKind};
///
/// let cause = Error::new("connection refused");
/// let error = Error::caused_by("failed to load profile", cause);
///
/// assert_eq!(error.kind(), ErrorKind::Info);
/// assert_eq!(error.caused_errors()[0].message(), "connection refused");
/// ```
#[derive(Clone)]
pub struct Error {
    data: Arc<Inner>,
}

impl Error {
    fn from_parts(message: Cow<'static, str>, caused_errors: Vec<Self>, exception: Option<Exception>) -> Self {
        Self {
            data: Arc::new(Inner {
                message,
                caused_errors,
                exception,
            }),
        }
    }

    /// Creates an informational error with the given message.
    #[must_use]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_parts(message.into(), Vec::new(), None)
    }

    /// Creates an informational error caused by another error.
    #[must_use]
    pub fn caused_by(message: impl Into<Cow<'static, str>>, cause: Self) -> Self {
        Self::from_parts(message.into(), vec![cause], None)
    }

    /// Creates an informational error caused by several errors, keeping their order.
    #[must_use]
    pub fn caused_by_all(message: impl Into<Cow<'static, str>>, causes: impl IntoIterator<Item = Self>) -> Self {
        Self::from_parts(message.into(), causes.into_iter().collect(), None)
    }

    /// Creates an exceptional error whose message is the exception's message.
    #[must_use]
    pub fn exceptional(exception: impl Into<Exception>) -> Self {
        let exception = exception.into();
        Self::from_parts(Cow::Owned(exception.to_string()), Vec::new(), Some(exception))
    }

    /// Creates an exceptional error with a custom message.
    #[must_use]
    pub fn exceptional_with_message(message: impl Into<Cow<'static, str>>, exception: impl Into<Exception>) -> Self {
        Self::from_parts(message.into(), Vec::new(), Some(exception.into()))
    }

    /// Creates an exceptional error caused by other errors.
    #[must_use]
    pub fn exceptional_caused_by(exception: impl Into<Exception>, causes: impl IntoIterator<Item = Self>) -> Self {
        let exception = exception.into();
        Self::from_parts(Cow::Owned(exception.to_string()), causes.into_iter().collect(), Some(exception))
    }

    /// Returns the human-readable message. May be empty.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.data.message
    }

    /// Returns the errors that caused this one, in insertion order.
    #[must_use]
    pub fn caused_errors(&self) -> &[Self] {
        &self.data.caused_errors
    }

    /// Returns the captured exception of an exceptional error.
    #[must_use]
    pub fn exception(&self) -> Option<&Exception> {
        self.data.exception.as_ref()
    }

    /// Returns the variant of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        if self.data.exception.is_some() {
            ErrorKind::Exceptional
        } else {
            ErrorKind::Info
        }
    }

    /// Returns `true` if this error carries an exception.
    #[must_use]
    pub fn is_exceptional(&self) -> bool {
        self.data.exception.is_some()
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        f.write_str(self.message())?;

        for cause in self.caused_errors() {
            f.write_str("\n")?;
            for _ in 0..depth {
                f.write_str("\t")?;
            }
            f.write_str("caused by: ")?;
            cause.write_tree(f, depth + 1)?;
        }

        Ok(())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
            || (self.data.message == other.data.message
                && self.data.caused_errors == other.data.caused_errors
                && self.data.exception == other.data.exception)
    }
}

impl Eq for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Error");
        debug.field("message", &self.data.message);

        if !self.data.caused_errors.is_empty() {
            debug.field("caused_errors", &self.data.caused_errors);
        }

        if let Some(exception) = &self.data.exception {
            debug.field("exception", exception);
        }

        debug.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Only the first caused error is reachable through [`source`](StdError::source);
/// use [`Error::caused_errors`] to walk all of them.
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.data.caused_errors.first().map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl From<&'static str> for Error {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Cow<'static, str>> for Error {
    fn from(message: Cow<'static, str>) -> Self {
        Self::new(message)
    }
}

impl From<Exception> for Error {
    fn from(exception: Exception) -> Self {
        Self::exceptional(exception)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Debug, Clone, PartialEq, Eq, Send, Sync, StdError);
    assert_impl_all!(ErrorKind: Debug, Clone, Copy, PartialEq, Eq, std::hash::Hash);

    #[test]
    fn new_is_info() {
        let error = Error::new("bad");
        assert_eq!(error.message(), "bad");
        assert_eq!(error.kind(), ErrorKind::Info);
        assert!(error.caused_errors().is_empty());
        assert!(error.exception().is_none());
    }

    #[test]
    fn empty_message_is_allowed() {
        assert_eq!(Error::new("").message(), "");
    }

    #[test]
    fn causes_keep_insertion_order() {
        let error = Error::caused_by_all("outer", [Error::new("a"), Error::new("b"), Error::new("c")]);
        let messages: Vec<_> = error.caused_errors().iter().map(Error::message).collect();
        assert_eq!(messages, ["a", "b", "c"]);
    }

    #[test]
    fn exceptional_uses_exception_message() {
        let error = Error::exceptional(std::io::Error::other("io failed"));
        assert_eq!(error.kind(), ErrorKind::Exceptional);
        assert!(error.is_exceptional());
        assert_eq!(error.message(), "io failed");
        assert!(error.exception().unwrap().is::<std::io::Error>());
    }

    #[test]
    fn exceptional_with_message_overrides_message() {
        let error = Error::exceptional_with_message("custom", std::fmt::Error);
        assert_eq!(error.message(), "custom");
        assert!(error.exception().unwrap().is::<std::fmt::Error>());
    }

    #[test]
    fn exceptional_caused_by_keeps_causes() {
        let error = Error::exceptional_caused_by(std::fmt::Error, [Error::new("cause")]);
        assert_eq!(error.caused_errors(), [Error::new("cause")]);
        assert_eq!(error.kind(), ErrorKind::Exceptional);
    }

    #[test]
    fn structural_equality() {
        assert_eq!(Error::new("x"), Error::new("x"));
        assert_ne!(Error::new("x"), Error::new("y"));
        assert_eq!(
            Error::caused_by("x", Error::new("y")),
            Error::caused_by("x", Error::new("y"))
        );
        assert_ne!(Error::caused_by("x", Error::new("y")), Error::new("x"));
    }

    #[test]
    fn exceptional_equality_compares_exception_identity() {
        let exception = Exception::new("boom");
        assert_eq!(
            Error::exceptional(exception.clone()),
            Error::exceptional(exception)
        );
        assert_ne!(Error::exceptional(Exception::new("boom")), Error::exceptional(Exception::new("boom")));
        assert_ne!(Error::exceptional(Exception::new("boom")), Error::new("boom"));
    }

    #[test]
    fn display_renders_cause_tree() {
        let error = Error::caused_by_all(
            "x",
            [Error::caused_by("y", Error::new("z")), Error::new("w")],
        );
        assert_eq!(error.to_string(), "x\ncaused by: y\n\tcaused by: z\ncaused by: w");
    }

    #[test]
    fn source_is_first_cause() {
        let error = Error::caused_by_all("outer", [Error::new("first"), Error::new("second")]);
        assert_eq!(error.source().unwrap().to_string(), "first");
        assert!(Error::new("leaf").source().is_none());
    }

    #[test]
    fn conversions() {
        assert_eq!(Error::from("a"), Error::new("a"));
        assert_eq!(Error::from(String::from("b")), Error::new("b"));
        assert_eq!(Error::from(Cow::Borrowed("c")), Error::new("c"));
        assert_eq!(Error::from(Exception::new("d")).kind(), ErrorKind::Exceptional);
    }

    #[test]
    fn debug_omits_empty_fields() {
        let debug = format!("{:?}", Error::new("plain"));
        assert_eq!(debug, r#"Error { message: "plain" }"#);
        let debug = format!("{:?}", Error::exceptional(Exception::new("boom")));
        assert!(debug.contains("exception"));
    }

    #[test]
    fn kind_display() {
        assert_eq!(ErrorKind::Info.to_string(), "info");
        assert_eq!(ErrorKind::Exceptional.to_string(), "exceptional");
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// A captured failure raised by a continuation.
///
/// `Exception` is the Rust counterpart of a thrown exception: a cheaply clonable, type-erased
/// [`std::error::Error`] that can be inspected by downcasting. Exceptions are produced when a
/// `*_try` combinator catches a panic, or when a fallible operation returns `Err`.
///
/// Two exceptions are equal only if they share the same underlying allocation, which mirrors the
/// reference identity of a thrown object.
///
/// # Examples
///
/// ```rust
/// use outcome::Exception;
///
/// let exception = Exception::new(std::io::Error::other("disk unplugged"));
///
/// assert!(exception.is::<std::io::Error>());
/// assert_eq!(exception.to_string(), "disk unplugged");
/// ```
#[derive(Clone)]
pub struct Exception {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl Exception {
    /// Creates a new exception from any error or message.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self {
            inner: Arc::from(error.into()),
        }
    }

    /// Raises the error by panicking with an [`Exception`] payload.
    ///
    /// When caught by a `*_try` combinator the original error is recovered intact, so it can
    /// later be found again with [`downcast_ref`](Self::downcast_ref).
    ///
    /// # Panics
    ///
    /// Always. The payload is an [`Exception`] rather than a string, so if nothing captures the
    /// panic the default panic hook reports it as `Box<dyn Any>` without the error's message.
    #[track_caller]
    pub fn raise<E>(error: E) -> !
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        std::panic::panic_any(Self::new(error))
    }

    /// Converts a panic payload into an exception.
    ///
    /// Payloads raised through [`Exception::raise`] and boxed errors are kept as they are.
    /// String payloads produced by `panic!` become a [`Panicked`] error.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Self>() {
            Ok(exception) => return *exception,
            Err(payload) => payload,
        };

        let payload = match payload.downcast::<Box<dyn StdError + Send + Sync>>() {
            Ok(error) => return Self::new(*error),
            Err(payload) => payload,
        };

        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            Cow::Borrowed(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Cow::Owned(message.clone())
        } else {
            Cow::Borrowed("panic with a payload of unknown type")
        };

        Self::new(Panicked { message })
    }

    /// Returns a reference to the inner error if it is of type `E`.
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Returns `true` if the inner error is of type `E`.
    #[must_use]
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    /// Returns the inner error as a trait object.
    #[must_use]
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

impl<E> From<E> for Exception
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl PartialEq for Exception {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Exception {}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Exception").field(&self.inner).finish()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// The error recorded when a continuation panics with a plain message.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Panicked {
    message: Cow<'static, str>,
}

impl Panicked {
    /// Returns the panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;

use crate::{Error, ErrorKind, ErrorsExt};

/// The terminal status of an operation.
///
/// A conclusion is either successful with no errors, or failed with at least one error.
/// Both [`Outcome`](crate::Outcome) and [`AsyncOutcome`](crate::AsyncOutcome) are conclusions.
pub trait Conclusion {
    /// Returns `true` if the operation succeeded.
    fn is_success(&self) -> bool;

    /// Returns `true` if the operation failed.
    fn is_failed(&self) -> bool {
        !self.is_success()
    }

    /// Returns the errors of a failed operation, or an empty slice on success.
    fn errors(&self) -> &[Error];
}

/// Convenience methods available on every [`Conclusion`].
///
/// [`Outcome`](crate::Outcome) has inherent `on_success` and `on_fail` methods that take
/// precedence over the valueless taps defined here.
///
/// # Examples
///
/// ```rust
/// use outcome::{AsyncOutcome, ConclusionExt, Outcome};
///
/// let mut reported = 0;
/// let outcome = AsyncOutcome::<u32>::from_outcome(Outcome::fail("quota exceeded"))
///     .on_success(|| unreachable!())
///     .on_fail(|errors| reported = errors.len());
///
/// assert_eq!(reported, 1);
/// assert!(outcome.try_get_exception::<std::io::Error>().is_none());
/// ```
pub trait ConclusionExt: Conclusion {
    /// Invokes `action` if the conclusion is successful and returns it unchanged.
    fn on_success(self, action: impl FnOnce()) -> Self
    where
        Self: Sized,
    {
        if self.is_success() {
            action();
        }

        self
    }

    /// Invokes `action` with the errors if the conclusion is failed and returns it unchanged.
    fn on_fail(self, action: impl FnOnce(&[Error])) -> Self
    where
        Self: Sized,
    {
        if self.is_failed() {
            action(self.errors());
        }

        self
    }

    /// Returns `true` if any top-level error is of the given kind.
    fn has_error_of_kind(&self, kind: ErrorKind) -> bool {
        self.errors().has_errors_of_kind(kind)
    }

    /// Returns `true` if any top-level error satisfies the predicate.
    fn has_error_with(&self, predicate: impl Fn(&Error) -> bool) -> bool {
        self.errors().has_errors_with(predicate)
    }

    /// Returns `true` if any error in the cause trees satisfies the predicate.
    fn has_error_recursively_with(&self, predicate: impl Fn(&Error) -> bool) -> bool {
        self.errors().has_errors_recursively_with(predicate)
    }

    /// Returns the exceptions of type `E` carried by the top-level errors.
    fn exceptions<E: StdError + 'static>(&self) -> impl Iterator<Item = &E> {
        self.errors().exceptions::<E>()
    }

    /// Returns the first exception of type `E` carried by the top-level errors.
    fn try_get_exception<E: StdError + 'static>(&self) -> Option<&E> {
        self.errors().try_get_exception::<E>()
    }

    /// Invokes `action` with the first exception of type `E` and the error carrying it.
    ///
    /// Nothing happens on success or when no such exception exists. The conclusion is returned
    /// unchanged.
    fn then_on_fail_with_exception<E>(self, action: impl FnOnce(&E, &Error)) -> Self
    where
        Self: Sized,
        E: StdError + 'static,
    {
        if let Some((exception, error)) = first_exception::<E>(self.errors()) {
            action(exception, error);
        }

        self
    }
}

impl<C: Conclusion + ?Sized> ConclusionExt for C {}

pub(crate) fn first_exception<E: StdError + 'static>(errors: &[Error]) -> Option<(&E, &Error)> {
    errors.exceptional_errors().find_map(|error| {
        error
            .exception()
            .and_then(|exception| exception.downcast_ref::<E>())
            .map(|exception| (exception, error))
    })
}

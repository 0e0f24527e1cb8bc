// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;

use crate::{Error, ErrorKind};

/// Queries over a sequence of [`Error`]s.
///
/// Recursive queries walk the cause tree depth-first and stop at the first match.
///
/// # Examples
///
/// ```rust
/// use outcome::{Error, ErrorsExt};
///
/// let errors = [Error::caused_by("x", Error::caused_by("y", Error::new("z")))];
///
/// assert!(errors.has_errors_recursively_with(|error| error.message() == "z"));
/// assert!(!errors.has_errors_with(|error| error.message() == "z"));
/// ```
pub trait ErrorsExt {
    /// Returns `true` if any top-level error satisfies the predicate.
    fn has_errors_with(&self, predicate: impl Fn(&Error) -> bool) -> bool;

    /// Returns `true` if any error in the cause trees satisfies the predicate.
    fn has_errors_recursively_with(&self, predicate: impl Fn(&Error) -> bool) -> bool;

    /// Returns `true` if any top-level error is of the given kind.
    fn has_errors_of_kind(&self, kind: ErrorKind) -> bool {
        self.has_errors_with(|error| error.kind() == kind)
    }

    /// Returns `true` if any top-level error is of the given kind and satisfies the predicate.
    fn has_errors_of_kind_with(&self, kind: ErrorKind, predicate: impl Fn(&Error) -> bool) -> bool {
        self.has_errors_with(|error| error.kind() == kind && predicate(error))
    }

    /// Returns `true` if any error in the cause trees is of the given kind.
    fn has_errors_of_kind_recursively(&self, kind: ErrorKind) -> bool {
        self.has_errors_recursively_with(|error| error.kind() == kind)
    }

    /// Returns `true` if any error in the cause trees is of the given kind and satisfies the predicate.
    fn has_errors_of_kind_recursively_with(&self, kind: ErrorKind, predicate: impl Fn(&Error) -> bool) -> bool {
        self.has_errors_recursively_with(|error| error.kind() == kind && predicate(error))
    }

    /// Returns the top-level exceptional errors.
    fn exceptional_errors(&self) -> impl Iterator<Item = &Error>;

    /// Returns the exceptions of type `E` carried by top-level errors.
    fn exceptions<E: StdError + 'static>(&self) -> impl Iterator<Item = &E> {
        self.exceptional_errors()
            .filter_map(|error| error.exception().and_then(|exception| exception.downcast_ref::<E>()))
    }

    /// Returns the exceptions of type `E` carried by top-level errors that satisfy the predicate.
    fn exceptions_with<E: StdError + 'static>(&self, predicate: impl Fn(&E) -> bool) -> impl Iterator<Item = &E> {
        self.exceptions::<E>().filter(move |exception| predicate(*exception))
    }

    /// Returns the first exception of type `E`, if any.
    fn try_get_exception<E: StdError + 'static>(&self) -> Option<&E> {
        self.exceptions::<E>().next()
    }

    /// Returns the first exception of type `E` that satisfies the predicate, if any.
    fn try_get_exception_with<E: StdError + 'static>(&self, predicate: impl Fn(&E) -> bool) -> Option<&E> {
        self.exceptions_with::<E>(predicate).next()
    }
}

impl ErrorsExt for [Error] {
    fn has_errors_with(&self, predicate: impl Fn(&Error) -> bool) -> bool {
        self.iter().any(predicate)
    }

    fn has_errors_recursively_with(&self, predicate: impl Fn(&Error) -> bool) -> bool {
        fn visit(errors: &[Error], predicate: &dyn Fn(&Error) -> bool) -> bool {
            errors
                .iter()
                .any(|error| predicate(error) || visit(error.caused_errors(), predicate))
        }

        visit(self, &predicate)
    }

    fn exceptional_errors(&self) -> impl Iterator<Item = &Error> {
        self.iter().filter(|error| error.is_exceptional())
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{Conclusion, Error, Outcome};

/// Accumulates errors from several steps and produces a single [`Outcome`].
///
/// The built outcome is successful if no error was appended, and failed with all appended errors
/// in order otherwise.
///
/// # Examples
///
/// ```rust
/// use outcome::{Outcome, OutcomeBuilder};
///
/// let name = Outcome::ok("ferris");
/// let age = Outcome::<u32>::fail("age is missing");
///
/// let outcome = OutcomeBuilder::new()
///     .append_state_of(&name)
///     .append_state_of(&age)
///     .build_with_value("profile");
///
/// assert_eq!(outcome, Outcome::fail("age is missing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeBuilder {
    errors: Vec<Error>,
}

impl OutcomeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates an empty builder with room for `capacity` errors.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            errors: Vec::with_capacity(capacity),
        }
    }

    /// Creates a builder holding `errors`.
    #[must_use]
    pub fn from_errors(errors: impl IntoIterator<Item = Error>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
        }
    }

    /// Appends an error.
    #[must_use]
    pub fn append_error(mut self, error: impl Into<Error>) -> Self {
        self.errors.push(error.into());
        self
    }

    /// Appends several errors, keeping their order.
    #[must_use]
    pub fn append_errors(mut self, errors: impl IntoIterator<Item = Error>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Appends the errors of a conclusion. A successful conclusion appends nothing.
    #[must_use]
    pub fn append_state_of(self, conclusion: &(impl Conclusion + ?Sized)) -> Self {
        self.append_errors(conclusion.errors().iter().cloned())
    }

    /// Appends the errors accumulated by another builder.
    #[must_use]
    pub fn append_builder(self, other: Self) -> Self {
        self.append_errors(other.errors)
    }

    /// Returns `true` if no error was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of appended errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the errors appended so far.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Builds a valueless outcome.
    pub fn build(self) -> Outcome {
        if self.errors.is_empty() {
            Outcome::success()
        } else {
            Outcome::failed(self.errors)
        }
    }

    /// Builds an outcome holding `value` on success.
    pub fn build_with_value<T>(self, value: T) -> Outcome<T> {
        self.build().with_value(value)
    }

    /// Builds an outcome whose value is produced by `factory` on success.
    ///
    /// `factory` is not invoked when errors were appended.
    pub fn build_with_value_from<T>(self, factory: impl FnOnce() -> T) -> Outcome<T> {
        self.build().with_value_from(factory)
    }
}

impl Extend<Error> for OutcomeBuilder {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

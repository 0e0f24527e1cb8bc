// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use crate::catch::capture;
use crate::{Conclusion, Error, Exception, OutcomeError, settings};

#[derive(Clone, PartialEq, Eq)]
pub(crate) enum State<T> {
    Success(T),
    Failed(Vec<Error>),
}

/// The immutable outcome of an operation: a success carrying a value, or a failure carrying one
/// or more errors.
///
/// `Outcome<()>` is the valueless outcome; it is also the default type parameter, so `Outcome`
/// alone names it. A failed outcome always holds at least one error, which the constructors
/// enforce.
///
/// Outcomes chain through combinators such as [`then`](Self::then) and
/// [`and_then`](Self::and_then). A failure short-circuits every continuation and carries its
/// errors unchanged to the end of the chain. The `*_try` variants additionally catch a panic raised
/// by the continuation and append it as an exceptional [`Error`].
///
/// # Examples
///
/// ```rust
/// use outcome::{Error, Outcome};
///
/// fn parse(input: &str) -> Outcome<u32> {
///     input.parse::<u32>().map_err(|_| Error::new("not a number")).into()
/// }
///
/// let doubled = parse("21").then(|value| value * 2);
/// assert_eq!(doubled.value(), &42);
///
/// let failed = parse("x").then(|value| value * 2);
/// assert_eq!(failed.errors()[0].message(), "not a number");
/// ```
#[derive(Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T = ()> {
    pub(crate) state: State<T>,
}

impl Outcome<()> {
    /// Returns the successful valueless outcome.
    pub const fn success() -> Self {
        Self {
            state: State::Success(()),
        }
    }

    /// Attaches `value` to a successful outcome, propagating the errors of a failed one.
    pub fn with_value<U>(self, value: U) -> Outcome<U> {
        self.with_value_from(|| value)
    }

    /// Attaches the value produced by `factory` to a successful outcome.
    ///
    /// `factory` is not invoked when the outcome is failed.
    pub fn with_value_from<U>(self, factory: impl FnOnce() -> U) -> Outcome<U> {
        match self.state {
            State::Success(()) => Outcome::ok(factory()),
            State::Failed(errors) => Outcome::failed(errors),
        }
    }

    /// Combines outcomes into one valueless outcome.
    ///
    /// The result is successful if all inputs are, including when there are no inputs. Otherwise
    /// it holds the errors of all failed inputs, in input order.
    pub fn combine<U>(outcomes: impl IntoIterator<Item = Outcome<U>>) -> Self {
        let errors: Vec<Error> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome.state {
                State::Success(_) => None,
                State::Failed(errors) => Some(errors),
            })
            .flatten()
            .collect();

        if errors.is_empty() { Self::success() } else { Self::failed(errors) }
    }
}

impl<T> Outcome<T> {
    /// Creates a successful outcome holding `value`.
    pub const fn ok(value: T) -> Self {
        Self {
            state: State::Success(value),
        }
    }

    /// Creates a failed outcome holding a single error.
    pub fn fail(error: impl Into<Error>) -> Self {
        Self::failed(vec![error.into()])
    }

    /// Creates a failed outcome holding `errors`, in order.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`try_fail_many`](Self::try_fail_many) to handle that case.
    #[track_caller]
    pub fn fail_many(errors: impl IntoIterator<Item = Error>) -> Self {
        Self::try_fail_many(errors).unwrap_or_else(|error| error.raise())
    }

    /// Creates a failed outcome holding `errors`, or an error if there are none.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::InvalidConstruction`] if `errors` is empty.
    pub fn try_fail_many(errors: impl IntoIterator<Item = Error>) -> Result<Self, OutcomeError> {
        let errors: Vec<Error> = errors.into_iter().collect();

        if errors.is_empty() {
            Err(OutcomeError::EMPTY_FAILURE)
        } else {
            Ok(Self::failed(errors))
        }
    }

    /// Succeeds with `value` if `condition` holds, fails with `error` otherwise.
    pub fn ok_if(condition: bool, value: T, error: impl Into<Error>) -> Self {
        if condition { Self::ok(value) } else { Self::fail(error) }
    }

    /// Fails with `error` if `condition` holds, succeeds with `value` otherwise.
    pub fn fail_if(condition: bool, value: T, error: impl Into<Error>) -> Self {
        Self::ok_if(!condition, value, error)
    }

    /// Runs `operation`, capturing a panic as a failure via the global catch handler.
    pub fn try_invoke(operation: impl FnOnce() -> T) -> Self {
        Self::try_invoke_with(operation, settings::translate)
    }

    /// Runs `operation`, capturing a panic as a failure via `handler`.
    pub fn try_invoke_with(operation: impl FnOnce() -> T, handler: impl FnOnce(Exception) -> Error) -> Self {
        match capture("try_invoke", operation) {
            Ok(value) => Self::ok(value),
            Err(exception) => Self::fail(handler(exception)),
        }
    }

    /// Runs a fallible `operation`, turning both `Err` and panics into an exceptional failure.
    pub fn try_fallible<E>(operation: impl FnOnce() -> Result<T, E>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        match capture("try_fallible", operation) {
            Ok(Ok(value)) => Self::ok(value),
            Ok(Err(error)) => Self::fail(settings::translate(Exception::new(error))),
            Err(exception) => Self::fail(settings::translate(exception)),
        }
    }

    /// Combines outcomes into one outcome holding all values in input order.
    ///
    /// If any input failed, the result holds the errors of all failed inputs, in input order.
    pub fn combine_values(outcomes: impl IntoIterator<Item = Self>) -> Outcome<Vec<T>> {
        let mut values = Vec::new();
        let mut errors = Vec::new();

        for outcome in outcomes {
            match outcome.state {
                State::Success(value) => values.push(value),
                State::Failed(failed) => errors.extend(failed),
            }
        }

        if errors.is_empty() {
            Outcome::ok(values)
        } else {
            Outcome::failed(errors)
        }
    }

    pub(crate) fn failed(errors: Vec<Error>) -> Self {
        debug_assert!(!errors.is_empty(), "a failed outcome must hold at least one error");
        Self {
            state: State::Failed(errors),
        }
    }

    /// Returns `true` if the outcome is successful.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.state, State::Success(_))
    }

    /// Returns `true` if the outcome is failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        !self.is_success()
    }

    /// Returns the errors of a failed outcome, or an empty slice on success.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        match &self.state {
            State::Success(_) => &[],
            State::Failed(errors) => errors.as_slice(),
        }
    }

    /// Consumes the outcome, returning its errors. A successful outcome yields none.
    #[must_use]
    pub fn into_errors(self) -> Vec<Error> {
        match self.state {
            State::Success(_) => Vec::new(),
            State::Failed(errors) => errors,
        }
    }

    /// Returns the value of a successful outcome.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is failed.
    #[track_caller]
    #[must_use]
    pub fn value(&self) -> &T {
        self.try_value().unwrap_or_else(|error| error.raise())
    }

    /// Returns the value of a successful outcome.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::OperationOnFailed`] if the outcome is failed.
    pub fn try_value(&self) -> Result<&T, OutcomeError> {
        self.as_value()
            .ok_or(OutcomeError::OperationOnFailed { operation: "get value" })
    }

    /// Consumes the outcome, returning the value of a successful one.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is failed.
    #[track_caller]
    #[must_use]
    pub fn into_value(self) -> T {
        match self.state {
            State::Success(value) => value,
            State::Failed(_) => OutcomeError::OperationOnFailed { operation: "get value" }.raise(),
        }
    }

    /// Returns the value of a successful outcome, or `None`.
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match &self.state {
            State::Success(value) => Some(value),
            State::Failed(_) => None,
        }
    }

    /// Returns the value of a successful outcome, or `default`.
    #[must_use]
    pub fn value_or(self, default: T) -> T {
        self.value_or_else(|_| default)
    }

    /// Returns the value of a successful outcome, or computes one from the errors.
    #[must_use]
    pub fn value_or_else(self, fallback: impl FnOnce(&[Error]) -> T) -> T {
        match self.state {
            State::Success(value) => value,
            State::Failed(errors) => fallback(&errors),
        }
    }

    /// Returns the value of a successful outcome, or `T::default()`.
    #[must_use]
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or_else(|_| T::default())
    }

    /// Drops the value, keeping only the status and errors.
    ///
    /// Applying this to an already valueless outcome returns an equal outcome.
    pub fn into_unit(self) -> Outcome<()> {
        match self.state {
            State::Success(_) => Outcome::success(),
            State::Failed(errors) => Outcome::failed(errors),
        }
    }

    /// Converts a failed outcome into a failed outcome of another value type.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is successful, since there is no value to convert.
    #[track_caller]
    pub fn cast<U>(self) -> Outcome<U> {
        self.try_cast().unwrap_or_else(|error| error.raise())
    }

    /// Converts a failed outcome into a failed outcome of another value type.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::InvalidConstruction`] if the outcome is successful.
    pub fn try_cast<U>(self) -> Result<Outcome<U>, OutcomeError> {
        match self.state {
            State::Success(_) => Err(OutcomeError::InvalidConstruction(
                "can't convert a successful outcome without a value converter".into(),
            )),
            State::Failed(errors) => Ok(Outcome::failed(errors)),
        }
    }

    /// Splits the outcome into its status, value and errors.
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<T>, Vec<Error>) {
        match self.state {
            State::Success(value) => (true, Some(value), Vec::new()),
            State::Failed(errors) => (false, None, errors),
        }
    }

    /// Converts into a standard [`Result`].
    ///
    /// # Errors
    ///
    /// Returns the errors of a failed outcome.
    pub fn into_result(self) -> Result<T, Vec<Error>> {
        match self.state {
            State::Success(value) => Ok(value),
            State::Failed(errors) => Err(errors),
        }
    }
}

impl<T> Outcome<Outcome<T>> {
    /// Removes one level of nesting.
    ///
    /// A failed outer outcome keeps its errors. A successful outer outcome yields the inner outcome.
    pub fn flatten(self) -> Outcome<T> {
        match self.state {
            State::Success(inner) => inner,
            State::Failed(errors) => Outcome::failed(errors),
        }
    }
}

impl<T> Conclusion for Outcome<T> {
    fn is_success(&self) -> bool {
        Self::is_success(self)
    }

    fn errors(&self) -> &[Error] {
        Self::errors(self)
    }
}

impl Default for Outcome<()> {
    fn default() -> Self {
        Self::success()
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(error: Error) -> Self {
        Self::fail(error)
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Error>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(error) => Self::fail(error),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Vec<Error>> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T, V> FromIterator<Outcome<T>> for Outcome<V>
where
    V: FromIterator<T>,
{
    /// Collects values in order, or all errors of the failed items in order.
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        Outcome::combine_values(iter).then(|values| values.into_iter().collect())
    }
}

/// Wraps a plain value into a successful [`Outcome`].
pub trait IntoOutcome: Sized {
    /// Returns a successful outcome holding `self`.
    fn into_outcome(self) -> Outcome<Self> {
        Outcome::ok(self)
    }
}

impl<T> IntoOutcome for T {}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Success(value) => f.debug_tuple("Success").field(value).finish(),
            State::Failed(errors) => f.debug_tuple("Failed").field(errors).finish(),
        }
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Success(_) => f.write_str("Success"),
            State::Failed(errors) => {
                f.write_str("Failed: ")?;
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        f.write_str("; ")?;
                    }
                    f.write_str(error.message())?;
                }
                Ok(())
            }
        }
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::catch::capture;
use crate::outcome::State;
use crate::{Error, Exception, Outcome, settings};

impl<T> Outcome<T> {
    /// Maps the value of a successful outcome.
    ///
    /// A failed outcome is propagated and `continuation` is not invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// assert_eq!(Outcome::ok(2).then(|value| value + 1), Outcome::ok(3));
    /// ```
    pub fn then<U>(self, continuation: impl FnOnce(T) -> U) -> Outcome<U> {
        match self.state {
            State::Success(value) => Outcome::ok(continuation(value)),
            State::Failed(errors) => Outcome::failed(errors),
        }
    }

    /// Like [`then`](Self::then), but a panic in `continuation` becomes an error produced by the
    /// global catch handler.
    pub fn then_try<U>(self, continuation: impl FnOnce(T) -> U) -> Outcome<U> {
        self.then_try_with(continuation, settings::translate)
    }

    /// Like [`then`](Self::then), but a panic in `continuation` becomes an error produced by
    /// `handler`.
    pub fn then_try_with<U>(
        self,
        continuation: impl FnOnce(T) -> U,
        handler: impl FnOnce(Exception) -> Error,
    ) -> Outcome<U> {
        match self.state {
            State::Success(value) => match capture("then_try", || continuation(value)) {
                Ok(output) => Outcome::ok(output),
                Err(exception) => Outcome::fail(handler(exception)),
            },
            State::Failed(errors) => Outcome::failed(errors),
        }
    }

    /// Chains an operation that itself produces an outcome.
    ///
    /// A failed outcome is propagated and `continuation` is not invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let halve = |value: i32| Outcome::ok_if(value % 2 == 0, value / 2, "odd value");
    ///
    /// assert_eq!(Outcome::ok(8).and_then(halve), Outcome::ok(4));
    /// assert_eq!(Outcome::ok(3).and_then(halve), Outcome::fail("odd value"));
    /// ```
    pub fn and_then<U>(self, continuation: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self.state {
            State::Success(value) => continuation(value),
            State::Failed(errors) => Outcome::failed(errors),
        }
    }

    /// Like [`and_then`](Self::and_then), but a panic in `continuation` becomes an error
    /// produced by the global catch handler.
    pub fn and_then_try<U>(self, continuation: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        self.and_then_try_with(continuation, settings::translate)
    }

    /// Like [`and_then`](Self::and_then), but a panic in `continuation` becomes an error
    /// produced by `handler`.
    pub fn and_then_try_with<U>(
        self,
        continuation: impl FnOnce(T) -> Outcome<U>,
        handler: impl FnOnce(Exception) -> Error,
    ) -> Outcome<U> {
        match self.state {
            State::Success(value) => capture("and_then_try", || continuation(value))
                .unwrap_or_else(|exception| Outcome::fail(handler(exception))),
            State::Failed(errors) => Outcome::failed(errors),
        }
    }
}

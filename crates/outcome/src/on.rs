// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;

use crate::catch::capture;
use crate::conclusion::first_exception;
use crate::outcome::State;
use crate::{Error, Exception, Outcome, settings};

impl<T> Outcome<T> {
    /// Runs `action` with the value of a successful outcome and returns the outcome unchanged.
    pub fn on_success(self, action: impl FnOnce(&T)) -> Self {
        if let State::Success(value) = &self.state {
            action(value);
        }

        self
    }

    /// Like [`on_success`](Self::on_success), but a panic in `action` turns the outcome into a
    /// failure holding the error produced by the global catch handler.
    pub fn on_success_try(self, action: impl FnOnce(&T)) -> Self {
        self.on_success_try_with(action, settings::translate)
    }

    /// Like [`on_success`](Self::on_success), but a panic in `action` turns the outcome into a
    /// failure holding the error produced by `handler`.
    pub fn on_success_try_with(self, action: impl FnOnce(&T), handler: impl FnOnce(Exception) -> Error) -> Self {
        match self.state {
            State::Success(value) => match capture("on_success_try", || action(&value)) {
                Ok(()) => Self::ok(value),
                Err(exception) => Self::fail(handler(exception)),
            },
            State::Failed(_) => self,
        }
    }

    /// Runs `action` with the errors of a failed outcome and returns the outcome unchanged.
    pub fn on_fail(self, action: impl FnOnce(&[Error])) -> Self {
        if let State::Failed(errors) = &self.state {
            action(errors);
        }

        self
    }

    /// Like [`on_fail`](Self::on_fail), but a panic in `action` appends the error produced by
    /// the global catch handler.
    pub fn on_fail_try(self, action: impl FnOnce(&[Error])) -> Self {
        self.on_fail_try_with(action, settings::translate)
    }

    /// Like [`on_fail`](Self::on_fail), but a panic in `action` appends the error produced by
    /// `handler`.
    pub fn on_fail_try_with(self, action: impl FnOnce(&[Error]), handler: impl FnOnce(Exception) -> Error) -> Self {
        match self.state {
            State::Failed(errors) => match capture("on_fail_try", || action(&errors)) {
                Ok(()) => Self::failed(errors),
                Err(exception) => Self::failed(appended(errors, handler(exception))),
            },
            State::Success(_) => self,
        }
    }

    /// Recovers a failed outcome with the value returned by `recovery`.
    ///
    /// A successful outcome is returned unchanged and `recovery` is not invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let outcome = Outcome::<usize>::fail("missing").then_on_fail(|errors| errors.len());
    ///
    /// assert_eq!(outcome, Outcome::ok(1));
    /// ```
    pub fn then_on_fail(self, recovery: impl FnOnce(&[Error]) -> T) -> Self {
        match self.state {
            State::Failed(errors) => Self::ok(recovery(&errors)),
            State::Success(_) => self,
        }
    }

    /// Like [`then_on_fail`](Self::then_on_fail), but a panic in `recovery` appends the error
    /// produced by the global catch handler.
    pub fn then_on_fail_try(self, recovery: impl FnOnce(&[Error]) -> T) -> Self {
        self.then_on_fail_try_with(recovery, settings::translate)
    }

    /// Like [`then_on_fail`](Self::then_on_fail), but a panic in `recovery` appends the error
    /// produced by `handler`.
    pub fn then_on_fail_try_with(
        self,
        recovery: impl FnOnce(&[Error]) -> T,
        handler: impl FnOnce(Exception) -> Error,
    ) -> Self {
        match self.state {
            State::Failed(errors) => match capture("then_on_fail_try", || recovery(&errors)) {
                Ok(value) => Self::ok(value),
                Err(exception) => Self::failed(appended(errors, handler(exception))),
            },
            State::Success(_) => self,
        }
    }

    /// Replaces a failed outcome with the outcome returned by `recovery`.
    ///
    /// A successful outcome is returned unchanged and `recovery` is not invoked.
    pub fn or_else(self, recovery: impl FnOnce(&[Error]) -> Self) -> Self {
        match self.state {
            State::Failed(errors) => recovery(&errors),
            State::Success(_) => self,
        }
    }

    /// Like [`or_else`](Self::or_else), but a panic in `recovery` appends the error produced by
    /// the global catch handler.
    pub fn or_else_try(self, recovery: impl FnOnce(&[Error]) -> Self) -> Self {
        self.or_else_try_with(recovery, settings::translate)
    }

    /// Like [`or_else`](Self::or_else), but a panic in `recovery` appends the error produced by
    /// `handler`.
    pub fn or_else_try_with(self, recovery: impl FnOnce(&[Error]) -> Self, handler: impl FnOnce(Exception) -> Error) -> Self {
        match self.state {
            State::Failed(errors) => match capture("or_else_try", || recovery(&errors)) {
                Ok(outcome) => outcome,
                Err(exception) => Self::failed(appended(errors, handler(exception))),
            },
            State::Success(_) => self,
        }
    }

    /// Replaces the errors of a failed outcome with the ones returned by `mapper`.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns no errors.
    #[track_caller]
    pub fn map_errors_on_failed<I>(self, mapper: impl FnOnce(Vec<Error>) -> I) -> Self
    where
        I: IntoIterator<Item = Error>,
    {
        match self.state {
            State::Failed(errors) => Self::fail_many(mapper(errors)),
            State::Success(_) => self,
        }
    }

    /// Like [`then_on_fail_with_exception`](crate::ConclusionExt::then_on_fail_with_exception),
    /// but a panic in `action` appends the error produced by the global catch handler.
    pub fn then_on_fail_with_exception_try<E>(self, action: impl FnOnce(&E, &Error)) -> Self
    where
        E: StdError + 'static,
    {
        self.then_on_fail_with_exception_try_with(action, settings::translate)
    }

    /// Like [`then_on_fail_with_exception`](crate::ConclusionExt::then_on_fail_with_exception),
    /// but a panic in `action` appends the error produced by `handler`.
    pub fn then_on_fail_with_exception_try_with<E>(
        self,
        action: impl FnOnce(&E, &Error),
        handler: impl FnOnce(Exception) -> Error,
    ) -> Self
    where
        E: StdError + 'static,
    {
        let State::Failed(errors) = self.state else {
            return self;
        };

        let caught = first_exception::<E>(&errors)
            .and_then(|(exception, error)| capture("then_on_fail_with_exception_try", || action(exception, error)).err());

        match caught {
            Some(exception) => Self::failed(appended(errors, handler(exception))),
            None => Self::failed(errors),
        }
    }
}

fn appended(mut errors: Vec<Error>, error: Error) -> Vec<Error> {
    errors.push(error);
    errors
}

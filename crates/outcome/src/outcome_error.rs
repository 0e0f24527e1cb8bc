// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

use crate::telemetry;

/// An error raised by misuse of an [`Outcome`](crate::Outcome).
///
/// The `try_*` accessors return this error. Their non-`try` counterparts panic with it as the
/// payload, which the `*_try` combinators never capture: misuse always reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum OutcomeError {
    /// An outcome could not be constructed, for example a failure without any error.
    #[error("invalid outcome construction: {0}")]
    InvalidConstruction(Cow<'static, str>),

    /// An operation that requires a successful outcome was attempted on a failed one.
    #[error("outcome is in failed state, can't do operation: {operation}")]
    OperationOnFailed {
        /// The name of the attempted operation.
        operation: &'static str,
    },
}

impl OutcomeError {
    pub(crate) const EMPTY_FAILURE: Self = Self::InvalidConstruction(Cow::Borrowed("can't create failed outcome without errors"));

    /// Panics with this error as the payload.
    ///
    /// The standard panic hook can't print a typed payload, so the message is logged first.
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        telemetry::misused(&self);
        std::panic::panic_any(self)
    }
}

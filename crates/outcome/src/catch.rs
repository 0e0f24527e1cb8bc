// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use crate::{Exception, OutcomeError, telemetry};

/// Runs `f`, converting a panic into an [`Exception`].
///
/// State captured by `f` is dropped on panic and never observed again. Misuse panics are not
/// captured, see [`into_exception`].
pub(crate) fn capture<R>(operation: &'static str, f: impl FnOnce() -> R) -> Result<R, Exception> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let exception = into_exception(payload);
        telemetry::caught(operation, &exception);
        exception
    })
}

/// Converts a caught panic payload into an [`Exception`].
///
/// An [`OutcomeError`] payload signals misuse of the API and keeps unwinding.
pub(crate) fn into_exception(payload: Box<dyn Any + Send>) -> Exception {
    if payload.is::<OutcomeError>() {
        resume_unwind(payload);
    }

    Exception::from_panic(payload)
}

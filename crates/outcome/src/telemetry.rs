// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Log events emitted by the crate.
//!
//! All events are compiled out unless the `logs` feature is enabled.

use crate::{Exception, OutcomeError};

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn caught(operation: &'static str, exception: &Exception) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "outcome.catch",
        tracing::Level::WARN,
        outcome.operation = operation,
        outcome.exception = %exception,
    );
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn async_panicked(exception: &Exception) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "outcome.async",
        tracing::Level::WARN,
        outcome.exception = %exception,
    );
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn settings_swapped(change: &'static str) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "outcome.settings",
        tracing::Level::INFO,
        outcome.settings.change = change,
    );
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn misused(error: &OutcomeError) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "outcome.misuse",
        tracing::Level::ERROR,
        outcome.misuse = %error,
    );
}

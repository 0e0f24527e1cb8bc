// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Immutable success/failure outcomes with aggregated errors and chaining combinators.
//!
//! # Why
//!
//! [`Result`] stops at the first error. Validation, batch processing and fan-out calls often need
//! to report every failure at once, with the causes of each failure preserved. This crate models
//! such operations as an [`Outcome`]: either a success with a value, or a failure with one or more
//! [`Error`]s. Each error carries a message, the errors that caused it, and optionally the
//! [`Exception`] that produced it.
//!
//! # Core Types
//!
//! - [`Outcome`]: The immutable outcome of an operation. `Outcome<()>` is the valueless variant.
//! - [`Error`]: An immutable error with a message and a tree of causing errors.
//! - [`Exception`]: A captured failure raised by a continuation, inspectable by downcasting.
//! - [`AsyncOutcome`]: An outcome produced by a deferred computation that runs at most once.
//! - [`OutcomeBuilder`]: Accumulates errors from several steps into one outcome.
//! - [`Conclusion`]: The status and errors shared by all outcome types.
//!
//! # Chaining
//!
//! Continuations attached with [`then`](Outcome::then), [`and_then`](Outcome::and_then) or
//! [`on_success`](Outcome::on_success) run only on success. A failure skips them and reaches the
//! end of the chain with its errors unchanged. Recovery continuations such as
//! [`then_on_fail`](Outcome::then_on_fail) and [`or_else`](Outcome::or_else) run only on failure.
//!
//! ```rust
//! use outcome::{Error, Outcome};
//!
//! fn validate_name(name: &str) -> Outcome {
//!     Outcome::fail_if(name.is_empty(), (), "name is empty")
//! }
//!
//! fn validate_age(age: u32) -> Outcome {
//!     Outcome::fail_if(age > 150, (), Error::new("age is out of range"))
//! }
//!
//! let outcome = Outcome::combine([validate_name(""), validate_age(200)]);
//!
//! assert_eq!(outcome.to_string(), "Failed: name is empty; age is out of range");
//! ```
//!
//! # Catching Panics
//!
//! Each continuation combinator has a `*_try` variant that catches a panic raised by the
//! continuation and appends it to the outcome as an exceptional error. The conversion from the
//! captured [`Exception`] to an [`Error`] is performed by the catch handler in the global
//! [`settings`], or by the handler passed to the matching `*_try_with` variant.
//!
//! Use [`Exception::raise`] to panic with a typed error that can be found again later.
//!
//! Panics caused by misusing the API, such as reading the value of a failed outcome, are never
//! captured. They carry an [`OutcomeError`] payload and keep unwinding to the caller.
//!
//! Capturing relies on unwinding. With `panic = "abort"` a panicking continuation aborts the
//! process and the `*_try` variants behave like their plain counterparts.
//!
//! The panic hook runs before a panic is captured, so the default hook still prints the panic
//! message and, if enabled, a backtrace for every captured panic. Install a custom hook with
//! [`std::panic::set_hook`] to silence or redirect that output.
//!
//! ```rust
//! use outcome::{ConclusionExt, Exception, Outcome};
//!
//! let outcome = Outcome::ok("config.toml")
//!     .then_try(|path| -> String { Exception::raise(std::io::Error::other(format!("{path} not found"))) });
//!
//! let error = outcome.try_get_exception::<std::io::Error>().unwrap();
//! assert_eq!(error.to_string(), "config.toml not found");
//! ```
//!
//! # Features
//!
//! - `logs` (default): Emits `tracing` events when a panic is captured and when the global
//!   settings change.

mod async_outcome;
mod builder;
mod catch;
mod conclusion;
mod error;
mod errors_ext;
mod exception;
mod on;
mod outcome;
mod outcome_error;
pub mod settings;
mod telemetry;
mod then;

#[cfg(test)]
mod testing;

pub use async_outcome::AsyncOutcome;
pub use builder::OutcomeBuilder;
pub use conclusion::{Conclusion, ConclusionExt};
pub use error::{Error, ErrorKind};
pub use errors_ext::ErrorsExt;
pub use exception::{Exception, Panicked};
pub use outcome::{IntoOutcome, Outcome};
pub use outcome_error::OutcomeError;
pub use settings::{CatchHandler, Settings, SettingsBuilder};

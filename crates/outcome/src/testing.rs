// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test utilities for log validation and misuse panics.

use std::io::Write;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::OutcomeError;

/// Runs `f` and returns the [`OutcomeError`] it panicked with.
///
/// Panics if `f` returns or panics with any other payload.
pub(crate) fn misuse_of<R>(f: impl FnOnce() -> R) -> OutcomeError {
    let Err(payload) = catch_unwind(AssertUnwindSafe(f)) else {
        panic!("expected a misuse panic, but the closure returned");
    };

    match payload.downcast::<OutcomeError>() {
        Ok(error) => *error,
        Err(_) => panic!("expected a misuse panic, but the payload is of another type"),
    }
}

/// Captures formatted log output into a shared buffer.
///
/// Install the subscriber with `set_default()` so that only events of the current thread land in
/// the buffer.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).to_string()
    }

    pub fn assert_contains(&self, expected: &str) {
        let output = self.output();
        assert!(
            output.contains(expected),
            "log output does not contain '{expected}', got:\n{output}"
        );
    }

    #[must_use]
    pub fn subscriber(&self) -> impl tracing::Subscriber {
        tracing_subscriber::registry().with(tracing_subscriber::fmt::layer().with_writer(self.clone()).with_ansi(false))
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogCaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

#[derive(Debug)]
pub(crate) struct LogCaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for LogCaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

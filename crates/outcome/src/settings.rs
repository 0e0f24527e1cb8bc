// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Process-wide settings consulted by the `*_try` combinators.
//!
//! The settings hold the catch handler: the function that turns an [`Exception`] captured by a
//! `*_try` combinator into the [`Error`] appended to the outcome. By default the handler wraps the
//! exception in an exceptional error.
//!
//! Settings are global state. Readers always observe either the previous or the new settings as a
//! whole, never a mix of both.
//!
//! # Examples
//!
//! ```rust
//! use outcome::{Error, Exception, Settings, settings};
//!
//! let previous = settings::replace(
//!     Settings::builder()
//!         .catch_handler(|exception| Error::exceptional_with_message("operation crashed", exception))
//!         .build(),
//! );
//!
//! assert_eq!(settings::translate(Exception::new("boom")).message(), "operation crashed");
//!
//! settings::replace((*previous).clone());
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::{Error, Exception, telemetry};

/// A function converting a captured exception into an error.
pub type CatchHandler = Arc<dyn Fn(Exception) -> Error + Send + Sync>;

/// Settings shared by all outcomes in the process.
#[derive(Clone)]
pub struct Settings {
    catch_handler: CatchHandler,
}

impl Settings {
    /// Creates a builder initialized with the default settings.
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder {
            settings: Self::default(),
        }
    }

    /// Returns the catch handler.
    #[must_use]
    pub fn catch_handler(&self) -> &CatchHandler {
        &self.catch_handler
    }

    /// Converts an exception into an error using the catch handler.
    #[must_use]
    pub fn translate(&self, exception: Exception) -> Error {
        (self.catch_handler)(exception)
    }

    /// Returns a builder initialized with these settings.
    #[must_use]
    pub fn to_builder(&self) -> SettingsBuilder {
        SettingsBuilder { settings: self.clone() }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catch_handler: Arc::new(|exception: Exception| Error::exceptional(exception)),
        }
    }
}

impl fmt::Debug for Settings {
    #[cfg_attr(test, mutants::skip)] // Handlers are opaque, nothing to mutate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings").finish_non_exhaustive()
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Clone)]
#[must_use]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Sets the function converting captured exceptions into errors.
    pub fn catch_handler(mut self, handler: impl Fn(Exception) -> Error + Send + Sync + 'static) -> Self {
        self.settings.catch_handler = Arc::new(handler);
        self
    }

    /// Builds the settings.
    #[must_use]
    pub fn build(self) -> Settings {
        self.settings
    }
}

static CURRENT: LazyLock<RwLock<Arc<Settings>>> = LazyLock::new(|| RwLock::new(Arc::new(Settings::default())));

/// Returns a snapshot of the current settings.
#[must_use]
pub fn current() -> Arc<Settings> {
    Arc::clone(&*CURRENT.read())
}

/// Replaces the current settings, returning the previous ones.
pub fn replace(settings: Settings) -> Arc<Settings> {
    let previous = std::mem::replace(&mut *CURRENT.write(), Arc::new(settings));
    telemetry::settings_swapped("replace");
    previous
}

/// Derives new settings from the current ones and installs them atomically.
///
/// `change` runs while the settings are locked, so it must not call back into this module.
pub fn update(change: impl FnOnce(&Settings) -> Settings) -> Arc<Settings> {
    let previous = {
        let mut current = CURRENT.write();
        let next = Arc::new(change(&current));
        std::mem::replace(&mut *current, next)
    };

    telemetry::settings_swapped("update");
    previous
}

/// Restores the default settings, returning the previous ones.
pub fn reset() -> Arc<Settings> {
    let previous = std::mem::replace(&mut *CURRENT.write(), Arc::new(Settings::default()));
    telemetry::settings_swapped("reset");
    previous
}

/// Converts an exception into an error using the current catch handler.
#[must_use]
pub fn translate(exception: Exception) -> Error {
    current().translate(exception)
}

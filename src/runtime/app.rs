//! The application trait and its exit-code policy.

use std::fmt::Display;

use super::ConfigError;
use crate::effect::Effect;

/// A program whose whole behavior is one effect.
///
/// [`Runtime::run_app`](super::Runtime::run_app) builds the effect, runs it
/// once and reports the result.
pub trait App {
    /// The failure type of the application's effect.
    type Error: Display + 'static;

    /// The success type of the application's effect.
    type Output: 'static;

    /// The name attached to the `app` span.
    fn name(&self) -> &str {
        "app"
    }

    /// Builds the effect describing the application.
    fn effect(&self) -> Effect<Self::Error, Self::Output>;
}

/// Maps a failed application to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitPolicy {
    error_code: u8,
}

impl ExitPolicy {
    /// Creates a policy that exits with `error_code` on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroExitCode`] if `error_code` is zero, since a
    /// failure must not look like a success.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::runtime::{ConfigError, ExitPolicy};
    ///
    /// assert_eq!(ExitPolicy::new(3).unwrap().error_code(), 3);
    /// assert_eq!(ExitPolicy::new(0), Err(ConfigError::ZeroExitCode));
    /// ```
    pub const fn new(error_code: u8) -> Result<Self, ConfigError> {
        if error_code == 0 {
            Err(ConfigError::ZeroExitCode)
        } else {
            Ok(Self { error_code })
        }
    }

    /// Returns the failure exit code.
    #[must_use]
    pub const fn error_code(self) -> u8 {
        self.error_code
    }
}

impl Default for ExitPolicy {
    fn default() -> Self {
        Self { error_code: 1 }
    }
}

//! Logging effects.
//!
//! These constructors describe a log record; the record is only emitted when
//! the effect is run, once per run. Records go through [`tracing`], so
//! whatever subscriber is active at run time (for example the one installed
//! by [`Runtime`](crate::runtime::Runtime)) receives them.
//!
//! # Examples
//!
//! ```rust
//! use fecto::effect::{Effect, Fault};
//!
//! let effect = Effect::<Fault, ()>::log_info("loading configuration")
//!     .then(Effect::success(42));
//!
//! assert_eq!(effect.run().unwrap(), 42);
//! ```

use std::time::Instant;

use super::{Effect, Outcome};

/// The `tracing` target used for records emitted by logging effects.
pub const LOG_TARGET: &str = "fecto";

macro_rules! log_constructor {
    ($(#[$attribute:meta])* $name:ident, $level:ident) => {
        $(#[$attribute])*
        pub fn $name<S>(message: S) -> Self
        where
            S: Into<String>,
        {
            let message = message.into();
            Self::new(move || {
                tracing::$level!(target: LOG_TARGET, "{}", message);
                Outcome::Success(())
            })
        }
    };
}

impl<E> Effect<E, ()>
where
    E: 'static,
{
    log_constructor!(
        /// Creates an effect that emits a `TRACE` record when run.
        log_trace,
        trace
    );

    log_constructor!(
        /// Creates an effect that emits a `DEBUG` record when run.
        log_debug,
        debug
    );

    log_constructor!(
        /// Creates an effect that emits an `INFO` record when run.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use fecto::effect::Effect;
        ///
        /// let effect: Effect<String, ()> = Effect::log_info("hello");
        /// // Nothing is logged until the effect runs
        /// assert_eq!(effect.run(), Ok(()));
        /// ```
        log_info,
        info
    );

    log_constructor!(
        /// Creates an effect that emits a `WARN` record when run.
        log_warn,
        warn
    );

    log_constructor!(
        /// Creates an effect that emits an `ERROR` record when run.
        ///
        /// The effect itself still succeeds.
        log_error,
        error
    );
}

impl<E, A> Effect<E, A>
where
    E: 'static,
    A: 'static,
{
    /// Wraps an effect in a named, timed span.
    ///
    /// When run, enters an `INFO` span named `effect` with a `name` field,
    /// logs `message`, runs `operation`, then records the elapsed time in
    /// milliseconds: at `DEBUG` on success, at `WARN` on failure. The
    /// operation's outcome is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let lookup: Effect<String, u32> = Effect::success(12);
    /// let timed = Effect::log_span("weather-api", "Fetching weather data", lookup);
    /// assert_eq!(timed.run(), Ok(12));
    /// ```
    pub fn log_span<N, M>(name: N, message: M, operation: Self) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        let name = name.into();
        let message = message.into();
        Self::new(move || {
            let span = tracing::info_span!(target: LOG_TARGET, "effect", name = %name);
            let _entered = span.enter();
            tracing::info!(target: LOG_TARGET, "{message}");

            let started = Instant::now();
            let outcome = operation.evaluate();
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            if outcome.is_success() {
                tracing::debug!(target: LOG_TARGET, elapsed_ms, "span completed");
            } else {
                tracing::warn!(target: LOG_TARGET, elapsed_ms, "span failed");
            }
            outcome
        })
    }
}

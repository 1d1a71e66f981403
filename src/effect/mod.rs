//! Effect system for deferred computations with an error channel.
//!
//! This module provides the [`Effect`] type, a description of work that,
//! when run, produces exactly one of a value or an error, together with the
//! combinators used to build larger effects out of smaller ones.
//!
//! # Effect
//!
//! Constructing an effect never runs anything. Work happens inside
//! [`Effect::run`] / [`Effect::evaluate`], every time they are called.
//!
//! ```rust
//! use fecto::effect::{Effect, Fault};
//!
//! let effect = Effect::<Fault, _>::success(10)
//!     .map(|x| x * 2)
//!     .flat_map(|x| Effect::success(x + 1));
//!
//! assert_eq!(effect.run().unwrap(), 21);
//! ```
//!
//! # Recovering from Failures
//!
//! ```rust
//! use fecto::effect::{Effect, Fault};
//!
//! let effect = Effect::<Fault, i32>::fail(Fault::new("offline"))
//!     .recover(|_| Effect::success(0));
//!
//! assert_eq!(effect.run().unwrap(), 0);
//! ```
//!
//! # Capturing Panics
//!
//! Only [`Effect::attempt`], [`Effect::attempt_fallible`] and the batch
//! operators move a panic into the error channel:
//!
//! ```rust
//! use fecto::effect::Effect;
//!
//! let effect = Effect::attempt(|| -> i32 { panic!("test error") });
//! assert!(effect.run().unwrap_err().is_panic());
//! ```

// =============================================================================
// Outcome and Errors
// =============================================================================

mod fault;
mod outcome;

pub use fault::{Fault, SharedError};
pub use outcome::Outcome;

// =============================================================================
// Effect
// =============================================================================

mod deferred;

pub use deferred::{Effect, Pure};

// =============================================================================
// Logging Effects
// =============================================================================

mod logging;

pub use logging::LOG_TARGET;

// =============================================================================
// Variadic Sequencing Macros
// =============================================================================

mod sequence_macro;

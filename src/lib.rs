//! # fecto
//!
//! A lazily-evaluated effect type with a success channel and an error
//! channel, plus the combinators and batch operators needed to build
//! programs out of effects.
//!
//! ## Overview
//!
//! - **Effect**: [`Effect<E, A>`](effect::Effect) describes a computation;
//!   nothing happens until it is run, and running it again repeats the work
//! - **Combinators**: `map`, `flat_map`, `then`, `zip`, `recover`, `fold`, ...
//! - **Sequencing Macros**: [`chain_all!`] and [`pipeline!`]
//! - **Batch Operators**: traverse, sequence, filter, partition and `for_all`
//!   over many items
//! - **Runtime**: a thread-scoped logging subscriber and an application
//!   entry point that maps results to exit codes
//!
//! ## Feature Flags
//!
//! - `effect`: The effect type and its combinators
//! - `batch`: Batch operators (implies `effect`)
//! - `runtime`: Logging runtime and application entry point (implies `effect`)
//!
//! All three are enabled by default.
//!
//! ## Example
//!
//! ```rust
//! use fecto::prelude::*;
//!
//! fn parse(input: &'static str) -> Effect<Fault, i32> {
//!     Effect::attempt_fallible(move || input.parse::<i32>())
//! }
//!
//! let total = batch::traverse(vec!["1", "2", "3"], parse).map(|values| values.iter().sum::<i32>());
//! assert_eq!(total.run().unwrap(), 6);
//!
//! let broken = batch::traverse(vec!["1", "two"], parse);
//! assert!(broken.run().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use fecto::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "effect")]
    pub use crate::effect::*;

    #[cfg(feature = "effect")]
    pub use crate::{chain_all, pipeline};

    #[cfg(feature = "batch")]
    pub use crate::batch;

    #[cfg(feature = "runtime")]
    pub use crate::runtime::{App, ExitPolicy, Runtime, RuntimeConfig};
}

#[cfg(feature = "effect")]
pub mod effect;

#[cfg(feature = "batch")]
pub mod batch;

#[cfg(feature = "runtime")]
pub mod runtime;

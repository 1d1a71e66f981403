//! Batch operators over sequences of inputs or effects.
//!
//! Each operator turns many effects into one. The returned effect does
//! nothing until it is run; when run, it drives the per-item effects strictly
//! in the order the items were supplied.
//!
//! # Overview
//!
//! - [`traverse`]: Apply an effectful function to every item, collecting the values
//! - [`sequence`]: Run a list of effects, collecting their values
//! - [`filter`]: Keep the items whose effectful predicate yields `true`
//! - [`partition`]: Run everything, splitting errors from values
//! - [`for_all`]: Check an effectful predicate against every item
//!
//! All operators except [`partition`] stop at the first failure.
//!
//! # Panics as Failures
//!
//! Unlike [`Effect::map`](crate::effect::Effect::map) and friends, the batch
//! operators are capture boundaries: a panic raised while calling the user
//! function, or while running the effect it returned, is converted into
//! `E::from(Fault::Panicked { .. })` and treated exactly like a failed effect.
//! Captured panics are not reported to the process panic hook; see
//! [`Fault::catch_unwind`](crate::effect::Fault::catch_unwind).
//!
//! # Examples
//!
//! ```rust
//! use fecto::batch;
//! use fecto::effect::{Effect, Fault};
//!
//! let doubled = batch::traverse(vec![1, 2, 3], |x| Effect::<Fault, _>::success(x * 2));
//! assert_eq!(doubled.run().unwrap(), vec![2, 4, 6]);
//!
//! let (failures, successes) = batch::partition(vec![1, 2, 3, 4], |x| {
//!     if x % 2 == 0 {
//!         Effect::success(x * 10)
//!     } else {
//!         Effect::fail(Fault::new(format!("Odd number: {x}")))
//!     }
//! })
//! .run_infallible();
//! assert_eq!(successes, vec![20, 40]);
//! assert_eq!(failures.len(), 2);
//! ```

use crate::effect::{Fault, Outcome};

mod collect;
mod partition;
mod select;

pub use collect::{sequence, traverse};
pub use partition::partition;
pub use select::{filter, for_all};

/// The `tracing` target used by the batch operators.
pub(crate) const BATCH_TARGET: &str = "fecto::batch";

/// Runs `computation`, converting a panic raised inside it into a failure.
pub(crate) fn evaluate_guarded<E, B, C>(computation: C) -> Outcome<E, B>
where
    C: FnOnce() -> Outcome<E, B>,
    E: From<Fault>,
{
    match Fault::catch_unwind(computation) {
        Ok(outcome) => outcome,
        Err(fault) => Outcome::Failure(E::from(fault)),
    }
}

//! Predicate operators: `filter` and `for_all`.

use std::rc::Rc;

use super::{BATCH_TARGET, evaluate_guarded};
use crate::effect::{Effect, Fault, Outcome};

/// Keeps the items whose predicate effect succeeds with `true`.
///
/// The kept items are the original items, in their original order. The first
/// predicate that fails or panics fails the whole operation; later items are
/// never checked.
///
/// # Examples
///
/// ```rust
/// use fecto::batch::filter;
/// use fecto::effect::{Effect, Fault};
///
/// let evens = filter(vec![1, 2, 3, 4, 5], |x| Effect::<Fault, _>::success(x % 2 == 0));
/// assert_eq!(evens.run().unwrap(), vec![2, 4]);
/// ```
pub fn filter<I, T, E, P>(items: I, predicate: P) -> Effect<E, Vec<T>>
where
    I: IntoIterator<Item = T>,
    T: Clone + 'static,
    E: From<Fault> + 'static,
    P: Fn(T) -> Effect<E, bool> + 'static,
{
    let items: Rc<[T]> = items.into_iter().collect();
    Effect::new(move || {
        let mut kept = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match evaluate_guarded(|| predicate(item.clone()).evaluate()) {
                Outcome::Success(true) => kept.push(item.clone()),
                Outcome::Success(false) => {}
                Outcome::Failure(error) => {
                    tracing::trace!(target: BATCH_TARGET, index, "filter short-circuited");
                    return Outcome::Failure(error);
                }
            }
        }
        Outcome::Success(kept)
    })
}

/// Checks that the predicate effect yields `true` for every item.
///
/// Stops at the first `false` and succeeds with `false` without checking the
/// remaining items. A predicate that fails or panics before any `false` is
/// found fails the whole operation. Empty input, including an absent one
/// (`None`), succeeds with `true` without calling the predicate.
///
/// # Examples
///
/// ```rust
/// use fecto::batch::for_all;
/// use fecto::effect::{Effect, Fault};
///
/// let is_even = |x: i32| Effect::<Fault, _>::success(x % 2 == 0);
///
/// assert!(for_all(vec![2, 4, 6], is_even).run().unwrap());
/// assert!(!for_all(vec![2, 4, 5, 8], is_even).run().unwrap());
/// assert!(for_all(None::<i32>, is_even).run().unwrap());
/// ```
pub fn for_all<I, T, E, P>(items: I, predicate: P) -> Effect<E, bool>
where
    I: IntoIterator<Item = T>,
    T: Clone + 'static,
    E: From<Fault> + 'static,
    P: Fn(T) -> Effect<E, bool> + 'static,
{
    let items: Rc<[T]> = items.into_iter().collect();
    Effect::new(move || {
        for (index, item) in items.iter().enumerate() {
            match evaluate_guarded(|| predicate(item.clone()).evaluate()) {
                Outcome::Success(true) => {}
                Outcome::Success(false) => {
                    tracing::trace!(target: BATCH_TARGET, index, "for_all found a counterexample");
                    return Outcome::Success(false);
                }
                Outcome::Failure(error) => {
                    tracing::trace!(target: BATCH_TARGET, index, "for_all short-circuited");
                    return Outcome::Failure(error);
                }
            }
        }
        Outcome::Success(true)
    })
}

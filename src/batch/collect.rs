//! Collecting operators: `traverse` and `sequence`.

use std::rc::Rc;

use super::{BATCH_TARGET, evaluate_guarded};
use crate::effect::{Effect, Fault, Outcome};

/// Applies `function` to every item in order and collects the values.
///
/// The values keep the order and length of `items`. The first item whose
/// effect fails, or whose call or effect panics, fails the whole operation;
/// later items are never processed. With no items the result is an empty
/// vector and `function` is never called.
///
/// # Arguments
///
/// * `items` - The inputs, captured when the effect is built.
/// * `function` - Builds the effect for one item.
///
/// # Examples
///
/// ```rust
/// use fecto::batch::traverse;
/// use fecto::effect::{Effect, Fault};
///
/// let effect = traverse(vec![3, 1, 2], |x| Effect::<Fault, _>::success(x));
/// assert_eq!(effect.run().unwrap(), vec![3, 1, 2]);
///
/// let failing = traverse(vec![1, 2, 3], |x| {
///     if x == 2 {
///         Effect::fail(Fault::new("Error on item 2"))
///     } else {
///         Effect::success(x * 2)
///     }
/// });
/// assert_eq!(failing.run().unwrap_err().to_string(), "Error on item 2");
/// ```
pub fn traverse<I, T, E, B, F>(items: I, function: F) -> Effect<E, Vec<B>>
where
    I: IntoIterator<Item = T>,
    T: Clone + 'static,
    E: From<Fault> + 'static,
    B: 'static,
    F: Fn(T) -> Effect<E, B> + 'static,
{
    let items: Rc<[T]> = items.into_iter().collect();
    Effect::new(move || {
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match evaluate_guarded(|| function(item.clone()).evaluate()) {
                Outcome::Success(value) => values.push(value),
                Outcome::Failure(error) => {
                    tracing::trace!(target: BATCH_TARGET, index, "traverse short-circuited");
                    return Outcome::Failure(error);
                }
            }
        }
        Outcome::Success(values)
    })
}

/// Runs already-built effects in order and collects their values.
///
/// The first failure or panic stops the operation; later effects are never
/// run. With no effects the result is an empty vector.
///
/// Effects with different value types can be collected by mapping them into
/// a common enum first.
///
/// # Examples
///
/// ```rust
/// use fecto::batch::sequence;
/// use fecto::effect::{Effect, Fault};
///
/// let effects = (0..5).map(Effect::<Fault, i32>::success);
/// assert_eq!(sequence(effects).run().unwrap(), vec![0, 1, 2, 3, 4]);
/// ```
pub fn sequence<I, E, A>(effects: I) -> Effect<E, Vec<A>>
where
    I: IntoIterator<Item = Effect<E, A>>,
    E: From<Fault> + 'static,
    A: 'static,
{
    let effects: Rc<[Effect<E, A>]> = effects.into_iter().collect();
    Effect::new(move || {
        let mut values = Vec::with_capacity(effects.len());
        for (index, effect) in effects.iter().enumerate() {
            match evaluate_guarded(|| effect.evaluate()) {
                Outcome::Success(value) => values.push(value),
                Outcome::Failure(error) => {
                    tracing::trace!(target: BATCH_TARGET, index, "sequence short-circuited");
                    return Outcome::Failure(error);
                }
            }
        }
        Outcome::Success(values)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    #[rstest]
    fn test_traverse_empty_never_calls_function() {
        let effect = traverse(Vec::<i32>::new(), |_| -> Effect<Fault, i32> {
            unreachable!("function must not be called")
        });
        assert!(effect.run().unwrap().is_empty());
    }

    #[rstest]
    fn test_traverse_short_circuits() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&calls);

        let effect = traverse(vec![1, 2, 3], move |x| {
            recorder.borrow_mut().push(x);
            if x == 2 {
                Effect::fail(Fault::new("two"))
            } else {
                Effect::success(x)
            }
        });

        assert_eq!(effect.run().unwrap_err().to_string(), "two");
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[rstest]
    fn test_sequence_empty() {
        let effect = sequence(Vec::<Effect<Fault, i32>>::new());
        assert!(effect.run().unwrap().is_empty());
    }
}

//! The non-short-circuiting `partition` operator.

use std::convert::Infallible;
use std::rc::Rc;

use super::evaluate_guarded;
use crate::effect::{Effect, Fault, Outcome};

/// Runs `function` on every item and splits the errors from the values.
///
/// Every item is visited exactly once, in order, whatever happens to the
/// others. Errors (including panics, captured as
/// [`Fault::Panicked`]) and values are each kept in the order they were
/// encountered. The resulting effect never fails.
///
/// # Examples
///
/// ```rust
/// use fecto::batch::partition;
/// use fecto::effect::{Effect, Fault};
///
/// let effect = partition(vec![1, 2, 3, 4, 5], |x| {
///     if x % 2 == 0 {
///         Effect::success(x * 10)
///     } else {
///         Effect::fail(Fault::new(format!("Odd number: {x}")))
///     }
/// });
///
/// let (failures, successes) = effect.run_infallible();
/// assert_eq!(successes, vec![20, 40]);
/// let messages: Vec<String> = failures.iter().map(ToString::to_string).collect();
/// assert_eq!(messages, ["Odd number: 1", "Odd number: 3", "Odd number: 5"]);
/// ```
pub fn partition<I, T, E, B, F>(items: I, function: F) -> Effect<Infallible, (Vec<E>, Vec<B>)>
where
    I: IntoIterator<Item = T>,
    T: Clone + 'static,
    E: From<Fault> + 'static,
    B: 'static,
    F: Fn(T) -> Effect<E, B> + 'static,
{
    let items: Rc<[T]> = items.into_iter().collect();
    Effect::new(move || {
        let mut failures = Vec::new();
        let mut successes = Vec::new();
        for item in items.iter() {
            match evaluate_guarded(|| function(item.clone()).evaluate()) {
                Outcome::Success(value) => successes.push(value),
                Outcome::Failure(error) => failures.push(error),
            }
        }
        Outcome::Success((failures, successes))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_partition_empty() {
        let (failures, successes) =
            partition(Vec::<i32>::new(), |x| Effect::<Fault, _>::success(x)).run_infallible();
        assert!(failures.is_empty());
        assert!(successes.is_empty());
    }

    #[rstest]
    fn test_partition_all_failures() {
        let (failures, successes) = partition(vec![1, 2, 3], |x| {
            Effect::<Fault, i32>::fail(Fault::new(format!("Error with {x}")))
        })
        .run_infallible();

        assert!(successes.is_empty());
        let messages: Vec<String> = failures.iter().map(ToString::to_string).collect();
        assert_eq!(messages, ["Error with 1", "Error with 2", "Error with 3"]);
    }
}

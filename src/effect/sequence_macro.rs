//! The `chain_all!` and `pipeline!` macros for variadic sequencing.
//!
//! Both expand to ordinary [`Effect`](crate::effect::Effect) combinator calls,
//! so the effects they build are as lazy as the ones written by hand.

/// Sequences effects left to right, keeping the value of the last one.
///
/// `chain_all!(a, b, c)` is equivalent to `a.then(b).then(c)`. The first
/// failure stops the chain; later effects are never run.
///
/// # Syntax
///
/// - `chain_all!()` - Returns [`Effect::unit()`](crate::effect::Effect::unit)
/// - `chain_all!(a)` - Returns `a`
/// - `chain_all!(a, b, ...)` - Returns `a.then(b)...`
///
/// The effects only need to share an error type; their value types may
/// differ because every value except the last is discarded.
///
/// # Examples
///
/// ```
/// use fecto::chain_all;
/// use fecto::effect::{Effect, Fault};
///
/// let effect: Effect<Fault, &str> = chain_all!(
///     Effect::log_info("step one"),
///     Effect::success(2),
///     Effect::success("done"),
/// );
/// assert_eq!(effect.run().unwrap(), "done");
///
/// let empty: Effect<Fault, ()> = chain_all!();
/// assert_eq!(empty.run().unwrap(), ());
/// ```
#[macro_export]
macro_rules! chain_all {
    () => {
        $crate::effect::Effect::unit()
    };

    ($first:expr $(, $remaining:expr)* $(,)?) => {
        $first $(.then($remaining))*
    };
}

/// Threads a value through a series of dependent steps.
///
/// `pipeline!(f, g, h)` is equivalent to `f(()).flat_map(g).flat_map(h)`,
/// except that `f` is not called until the effect is run. The first step
/// receives `()`, every later step receives the previous step's value.
///
/// # Syntax
///
/// - `pipeline!()` - Returns `Effect::success(())`
/// - `pipeline!(f)` - Runs `f(())`
/// - `pipeline!(f, g, ...)` - Feeds each value into the next step
///
/// # Examples
///
/// ```
/// use fecto::pipeline;
/// use fecto::effect::{Effect, Fault};
///
/// let effect: Effect<Fault, String> = pipeline!(
///     |()| Effect::success(3),
///     |count: i32| Effect::success(count * 2),
///     |count: i32| Effect::success(format!("total: {count}")),
/// );
/// assert_eq!(effect.run().unwrap(), "total: 6");
/// ```
#[macro_export]
macro_rules! pipeline {
    () => {
        $crate::effect::Effect::success(())
    };

    ($first:expr $(, $step:expr)* $(,)?) => {
        $crate::effect::Effect::suspend({
            let first_step = $first;
            move || first_step(())
        })
        $(.flat_map($step))*
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::{Effect, Fault};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_chain_all_empty_is_unit() {
        let effect: Effect<Fault, ()> = chain_all!();
        assert!(effect.run().is_ok());
    }

    #[test]
    fn test_chain_all_single() {
        let effect: Effect<Fault, i32> = chain_all!(Effect::success(7));
        assert_eq!(effect.run().unwrap(), 7);
    }

    #[test]
    fn test_chain_all_keeps_last_value() {
        let effect: Effect<String, i32> =
            chain_all!(Effect::success(1), Effect::success(2), Effect::success(3));
        assert_eq!(effect.run(), Ok(3));
    }

    #[test]
    fn test_chain_all_stops_at_first_failure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let third_log = Rc::clone(&log);

        let effect: Effect<String, i32> = chain_all!(
            Effect::success(1),
            Effect::<String, i32>::fail("second".to_string()),
            Effect::new(move || {
                third_log.borrow_mut().push("third");
                crate::effect::Outcome::Success(3)
            }),
        );

        assert_eq!(effect.run(), Err("second".to_string()));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_pipeline_empty_is_unit_success() {
        let effect: Effect<Fault, ()> = pipeline!();
        assert!(effect.run().is_ok());
    }

    #[test]
    fn test_pipeline_feeds_values_forward() {
        let effect: Effect<String, i32> = pipeline!(
            |()| Effect::success(1),
            |value: i32| Effect::success(value + 1),
            |value: i32| Effect::success(value * 10),
        );
        assert_eq!(effect.run(), Ok(20));
    }
}

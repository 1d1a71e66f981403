#![cfg(feature = "effect")]
//! Property-based tests for the Effect monad and functor laws.
//!
//! - Left Identity: success(a).flat_map(f) == f(a)
//! - Right Identity: m.flat_map(success) == m
//! - Associativity: m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
//! - Functor Identity / Composition
//!
//! Effects are compared by the outcome they produce when run.

use fecto::chain_all;
use fecto::effect::{Effect, Outcome};
use proptest::prelude::*;

fn outcome_strategy() -> impl Strategy<Value = Outcome<String, i32>> {
    prop_oneof![
        any::<i32>().prop_map(Outcome::<String, i32>::Success),
        "[a-z]{1,8}".prop_map(Outcome::<String, i32>::Failure),
    ]
}

fn effect_of(outcome: Outcome<String, i32>) -> Effect<String, i32> {
    Effect::new(move || outcome.clone())
}

fn halve_or_fail(n: i32) -> Effect<String, i32> {
    if n % 2 == 0 {
        Effect::success(n / 2)
    } else {
        Effect::fail(format!("odd: {n}"))
    }
}

fn increment(n: i32) -> Effect<String, i32> {
    Effect::success(n.wrapping_add(1))
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity Law: success(a).flat_map(f) == f(a)
    #[test]
    fn prop_effect_left_identity(value: i32) {
        let left = Effect::success(value).flat_map(halve_or_fail).evaluate();
        let right = halve_or_fail(value).evaluate();

        prop_assert_eq!(left, right);
    }

    /// Right Identity Law: m.flat_map(success) == m
    #[test]
    fn prop_effect_right_identity(outcome in outcome_strategy()) {
        let left = effect_of(outcome.clone()).flat_map(Effect::success).evaluate();

        prop_assert_eq!(left, outcome);
    }

    /// Associativity Law: m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
    #[test]
    fn prop_effect_associativity(outcome in outcome_strategy()) {
        let left = effect_of(outcome.clone())
            .flat_map(halve_or_fail)
            .flat_map(increment)
            .evaluate();
        let right = effect_of(outcome)
            .flat_map(|x| halve_or_fail(x).flat_map(increment))
            .evaluate();

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Identity: m.map(id) == m
    #[test]
    fn prop_effect_functor_identity(outcome in outcome_strategy()) {
        let mapped = effect_of(outcome.clone()).map(|x| x).evaluate();

        prop_assert_eq!(mapped, outcome);
    }

    /// Composition: m.map(f).map(g) == m.map(|x| g(f(x)))
    #[test]
    fn prop_effect_functor_composition(outcome in outcome_strategy()) {
        let first = |x: i32| x.wrapping_mul(3);
        let second = |x: i32| x.wrapping_sub(7);

        let left = effect_of(outcome.clone()).map(first).map(second).evaluate();
        let right = effect_of(outcome).map(move |x| second(first(x))).evaluate();

        prop_assert_eq!(left, right);
    }

    /// map(f) == flat_map(|x| success(f(x)))
    #[test]
    fn prop_map_agrees_with_flat_map(outcome in outcome_strategy()) {
        let left = effect_of(outcome.clone()).map(|x| x.wrapping_neg()).evaluate();
        let right = effect_of(outcome)
            .flat_map(|x| Effect::success(x.wrapping_neg()))
            .evaluate();

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Sequencing and Recovery
// =============================================================================

proptest! {
    /// unit() is the left identity of then
    #[test]
    fn prop_unit_then_is_identity(outcome in outcome_strategy()) {
        let left = Effect::unit().then(effect_of(outcome.clone())).evaluate();

        prop_assert_eq!(left, outcome);
    }

    /// chain_all!(a, b) == a.then(b)
    #[test]
    fn prop_chain_all_matches_then(
        first in outcome_strategy(),
        second in outcome_strategy(),
    ) {
        let chained = chain_all!(effect_of(first.clone()), effect_of(second.clone())).evaluate();
        let manual = effect_of(first).then(effect_of(second)).evaluate();

        prop_assert_eq!(chained, manual);
    }

    /// Recovering with a constant always yields a success
    #[test]
    fn prop_recover_always_succeeds(outcome in outcome_strategy(), fallback: i32) {
        let recovered = effect_of(outcome.clone())
            .recover(move |_| Effect::success(fallback))
            .evaluate();

        let expected = match outcome {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => fallback,
        };
        prop_assert_eq!(recovered, Outcome::Success(expected));
    }

    /// Running twice produces the same outcome for a pure effect
    #[test]
    fn prop_rerun_is_stable(outcome in outcome_strategy()) {
        let effect = effect_of(outcome).map(|x| x.wrapping_add(5));

        prop_assert_eq!(effect.evaluate(), effect.evaluate());
    }
}

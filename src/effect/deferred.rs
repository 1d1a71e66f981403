//! Effect - a deferred computation with a success and an error channel.
//!
//! The `Effect` type represents a computation that, when run, produces either
//! a value or an error. Nothing happens until [`Effect::run`] (or
//! [`Effect::evaluate`]) is called, and every call runs the computation again
//! from the start.
//!
//! # Design Philosophy
//!
//! An effect "describes" work but doesn't "perform" it. Combinators build new
//! descriptions out of old ones; running happens at the program's edge.
//!
//! Only [`Effect::attempt`], [`Effect::attempt_fallible`] and the batch
//! operators turn a panic into a failure. A panic inside a function passed to
//! [`Effect::map`], [`Effect::flat_map`] and the other combinators unwinds
//! straight out of `run`: a value in the error channel is an expected failure,
//! a panic is a defect.
//!
//! # Examples
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
//! # Deferred Execution
//!
//! ```rust
//! use fecto::effect::{Effect, Fault};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let runs = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&runs);
//!
//! let effect = Effect::<Fault, _>::from_result(move || {
//!     counter.set(counter.get() + 1);
//!     Ok(counter.get())
//! });
//!
//! // Not executed yet
//! assert_eq!(runs.get(), 0);
//!
//! // Every run executes again
//! assert_eq!(effect.run().unwrap(), 1);
//! assert_eq!(effect.run().unwrap(), 2);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use super::{Fault, Outcome};

/// A lazily evaluated computation producing either an `A` or an `E`.
///
/// # Type Parameters
///
/// - `E`: The error type. [`Infallible`] marks an effect that cannot fail.
/// - `A`: The type of the value produced on success.
///
/// # Monad Laws
///
/// `Effect` satisfies the monad laws:
///
/// 1. **Left Identity**: `Effect::success(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Effect::success) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct Effect<E, A> {
    /// The wrapped computation. Uses Rc so that an effect can be shared by
    /// several combinators and run any number of times.
    run_function: Rc<dyn Fn() -> Outcome<E, A>>,
}

/// An effect with no error channel.
pub type Pure<A> = Effect<Infallible, A>;

impl<E, A> Clone for Effect<E, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Rc::clone(&self.run_function),
        }
    }
}

impl<E, A> fmt::Debug for Effect<E, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Effect(<deferred>)")
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<E, A> Effect<E, A>
where
    E: 'static,
    A: 'static,
{
    /// Creates an effect from a closure that produces an [`Outcome`].
    ///
    /// The closure is not called until the effect is run, and is called again
    /// on every run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::{Effect, Outcome};
    ///
    /// let effect: Effect<String, i32> = Effect::new(|| Outcome::Success(42));
    /// assert_eq!(effect.run(), Ok(42));
    /// ```
    pub fn new<F>(computation: F) -> Self
    where
        F: Fn() -> Outcome<E, A> + 'static,
    {
        Self {
            run_function: Rc::new(computation),
        }
    }

    /// Creates an effect from a closure that returns a `Result`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect = Effect::from_result(|| "42".parse::<i32>());
    /// assert_eq!(effect.run(), Ok(42));
    /// ```
    pub fn from_result<F>(computation: F) -> Self
    where
        F: Fn() -> Result<A, E> + 'static,
    {
        Self::new(move || Outcome::from(computation()))
    }

    /// Wraps a value in an effect that always succeeds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::success(42);
    /// assert_eq!(effect.run(), Ok(42));
    /// ```
    pub fn success(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move || Outcome::Success(value.clone()))
    }

    /// Creates an effect that always fails with the given error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::fail("boom".to_string());
    /// assert_eq!(effect.run(), Err("boom".to_string()));
    /// ```
    pub fn fail(error: E) -> Self
    where
        E: Clone,
    {
        Self::new(move || Outcome::Failure(error.clone()))
    }

    /// Defers the construction of an effect until it is run.
    ///
    /// Useful when building the inner effect itself calls user code that must
    /// not run early.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::suspend(|| Effect::success(7));
    /// assert_eq!(effect.run(), Ok(7));
    /// ```
    pub fn suspend<F>(factory: F) -> Self
    where
        F: Fn() -> Self + 'static,
    {
        Self::new(move || factory().evaluate())
    }

    // =========================================================================
    // Running
    // =========================================================================

    /// Runs the effect and returns the tagged outcome.
    ///
    /// Every call performs the full computation again; nothing is cached.
    pub fn evaluate(&self) -> Outcome<E, A> {
        (self.run_function)()
    }

    /// Runs the effect and returns its value or its error.
    ///
    /// This is where the work happens. Panics raised by functions given to
    /// the combinators are not caught here.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::success(1).map(|x| x + 1);
    /// assert_eq!(effect.run(), Ok(2));
    /// // An effect can be run again
    /// assert_eq!(effect.run(), Ok(2));
    /// ```
    pub fn run(&self) -> Result<A, E> {
        self.evaluate().into_result()
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Transforms the success value, leaving a failure untouched.
    ///
    /// `function` is only called when this effect succeeds. A panic in
    /// `function` propagates out of `run`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::success(21).map(|x| x * 2);
    /// assert_eq!(effect.run(), Ok(42));
    /// ```
    pub fn map<B, F>(self, function: F) -> Effect<E, B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        Effect::new(move || self.evaluate().map(&function))
    }

    /// Replaces the success value with the result of `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, &str> = Effect::success(1).map_to(|| "replaced");
    /// assert_eq!(effect.run(), Ok("replaced"));
    /// ```
    pub fn map_to<B, F>(self, function: F) -> Effect<E, B>
    where
        F: Fn() -> B + 'static,
        B: 'static,
    {
        self.map(move |_| function())
    }

    /// Transforms the error, leaving a success untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::fail("boom".to_string());
    /// assert_eq!(effect.map_error(|error| error.len()).run(), Err(4));
    /// ```
    pub fn map_error<E2, F>(self, function: F) -> Effect<E2, A>
    where
        F: Fn(E) -> E2 + 'static,
        E2: 'static,
    {
        Effect::new(move || self.evaluate().map_failure(&function))
    }

    // =========================================================================
    // Sequencing
    // =========================================================================

    /// Chains a computation that depends on the success value.
    ///
    /// On failure `function` is never called and the error passes through
    /// unchanged. On success the outcome of the returned effect is adopted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::success(10).flat_map(|x| Effect::success(x * 2));
    /// assert_eq!(effect.run(), Ok(20));
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Effect<E, B>
    where
        F: Fn(A) -> Effect<E, B> + 'static,
        B: 'static,
    {
        Effect::new(move || match self.evaluate() {
            Outcome::Success(value) => function(value).evaluate(),
            Outcome::Failure(error) => Outcome::Failure(error),
        })
    }

    /// Alias for `flat_map`.
    pub fn and_then<B, F>(self, function: F) -> Effect<E, B>
    where
        F: Fn(A) -> Effect<E, B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two effects, discarding the value of the first.
    ///
    /// `next` stays dormant until this effect has succeeded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::success(10).then(Effect::success(20));
    /// assert_eq!(effect.run(), Ok(20));
    /// ```
    pub fn then<B>(self, next: Effect<E, B>) -> Effect<E, B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next.clone())
    }

    /// Pairs the values of two effects.
    ///
    /// `other` is only run if this effect succeeded; the first failure wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, (i32, &str)> = Effect::success(1).zip(Effect::success("one"));
    /// assert_eq!(effect.run(), Ok((1, "one")));
    /// ```
    pub fn zip<B>(self, other: Effect<E, B>) -> Effect<E, (A, B)>
    where
        B: 'static,
    {
        Effect::new(move || {
            self.evaluate()
                .and_then(|first| other.evaluate().map(|second| (first, second)))
        })
    }

    // =========================================================================
    // Recovery and Folding
    // =========================================================================

    /// Recovers from a failure by switching to the effect built by `handler`.
    ///
    /// A success passes through without calling `handler`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, usize> = Effect::fail("four".to_string())
    ///     .recover(|error| Effect::success(error.len()));
    /// assert_eq!(effect.run(), Ok(4));
    /// ```
    pub fn recover<H>(self, handler: H) -> Self
    where
        H: Fn(E) -> Self + 'static,
    {
        Self::new(move || match self.evaluate() {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => handler(error).evaluate(),
        })
    }

    /// Folds both channels into a single value. The result never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::fail("bad".to_string());
    /// let folded = effect.fold(|error| format!("Error: {error}"), |value| value.to_string());
    /// assert_eq!(folded.run_infallible(), "Error: bad");
    /// ```
    pub fn fold<B, F, G>(self, on_failure: F, on_success: G) -> Effect<Infallible, B>
    where
        F: Fn(E) -> B + 'static,
        G: Fn(A) -> B + 'static,
        B: 'static,
    {
        Effect::new(move || Outcome::Success(self.evaluate().fold(&on_failure, &on_success)))
    }

    /// Routes to one of two follow-up effects depending on the outcome.
    ///
    /// Unlike [`fold`](Self::fold), the branches may themselves fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, i32> = Effect::success(5);
    /// let routed = effect.fold_effect(
    ///     |value| Effect::success(value * 2),
    ///     |_| Effect::fail("unreachable".to_string()),
    /// );
    /// assert_eq!(routed.run(), Ok(10));
    /// ```
    pub fn fold_effect<B, S, F>(self, on_success: S, on_failure: F) -> Effect<E, B>
    where
        S: Fn(A) -> Effect<E, B> + 'static,
        F: Fn(E) -> Effect<E, B> + 'static,
        B: 'static,
    {
        Effect::new(move || match self.evaluate() {
            Outcome::Success(value) => on_success(value).evaluate(),
            Outcome::Failure(error) => on_failure(error).evaluate(),
        })
    }

    /// Checks whether the effect succeeds, without exposing the value.
    pub fn is_success(self) -> Effect<Infallible, bool> {
        Effect::new(move || Outcome::Success(self.evaluate().is_success()))
    }

    /// Checks whether the effect fails, without exposing the error.
    pub fn is_failure(self) -> Effect<Infallible, bool> {
        Effect::new(move || Outcome::Success(self.evaluate().is_failure()))
    }

    // =========================================================================
    // Variadic Sequencing
    // =========================================================================

    /// Runs effects left to right, keeping the last value.
    ///
    /// Stops at the first failure. With no effects the result is
    /// `Success(None)`; see [`chain_all!`](crate::chain_all) for the variadic
    /// form whose empty case is [`Effect::unit`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, Option<i32>> =
    ///     Effect::chain_all(vec![Effect::success(1), Effect::success(2)]);
    /// assert_eq!(effect.run(), Ok(Some(2)));
    ///
    /// let empty: Effect<String, Option<i32>> = Effect::chain_all(Vec::new());
    /// assert_eq!(empty.run(), Ok(None));
    /// ```
    pub fn chain_all<I>(effects: I) -> Effect<E, Option<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        let effects: Vec<Self> = effects.into_iter().collect();
        Effect::new(move || {
            let mut last = None;
            for effect in &effects {
                match effect.evaluate() {
                    Outcome::Success(value) => last = Some(value),
                    Outcome::Failure(error) => return Outcome::Failure(error),
                }
            }
            Outcome::Success(last)
        })
    }

    /// Threads a value through a series of dependent steps.
    ///
    /// The first step receives `None`, every later step receives the previous
    /// step's value. Stops at the first failure. With no steps the result is
    /// `Success(None)`. No step is called before the effect is run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// fn start(_: Option<i32>) -> Effect<String, i32> {
    ///     Effect::success(1)
    /// }
    ///
    /// fn add_ten(previous: Option<i32>) -> Effect<String, i32> {
    ///     Effect::success(previous.unwrap_or_default() + 10)
    /// }
    ///
    /// let steps = [start as fn(Option<i32>) -> Effect<String, i32>, add_ten];
    /// assert_eq!(Effect::pipeline(steps).run(), Ok(Some(11)));
    /// ```
    pub fn pipeline<I, F>(steps: I) -> Effect<E, Option<A>>
    where
        I: IntoIterator<Item = F>,
        F: Fn(Option<A>) -> Self + 'static,
    {
        let steps: Vec<F> = steps.into_iter().collect();
        Effect::new(move || {
            let mut current = None;
            for step in &steps {
                match step(current.take()).evaluate() {
                    Outcome::Success(value) => current = Some(value),
                    Outcome::Failure(error) => return Outcome::Failure(error),
                }
            }
            Outcome::Success(current)
        })
    }
}

// =============================================================================
// Unit and Infallible Effects
// =============================================================================

impl<E> Effect<E, ()>
where
    E: 'static,
{
    /// Creates an effect that succeeds with `()`.
    ///
    /// This is the identity element for sequencing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect: Effect<String, ()> = Effect::unit();
    /// assert_eq!(effect.run(), Ok(()));
    /// ```
    pub fn unit() -> Self {
        Self::success(())
    }
}

impl<A> Effect<Infallible, A>
where
    A: 'static,
{
    /// Runs an effect that cannot fail and returns its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::{Effect, Pure};
    ///
    /// let effect: Pure<i32> = Effect::success(3);
    /// assert_eq!(effect.run_infallible(), 3);
    /// ```
    pub fn run_infallible(&self) -> A {
        match self.evaluate() {
            Outcome::Success(value) => value,
            Outcome::Failure(never) => match never {},
        }
    }

    /// Lifts an effect that cannot fail into any error channel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::{Effect, Fault};
    ///
    /// let checked = Effect::<Fault, i32>::fail(Fault::new("no")).is_failure();
    /// let widened: Effect<Fault, bool> = checked.widen_error();
    /// assert!(widened.run().unwrap());
    /// ```
    pub fn widen_error<E>(self) -> Effect<E, A>
    where
        E: 'static,
    {
        Effect::new(move || Outcome::Success(self.run_infallible()))
    }
}

// =============================================================================
// Capture Boundary
// =============================================================================

impl<A> Effect<Fault, A>
where
    A: 'static,
{
    /// Converts a function that might panic into an effect.
    ///
    /// When run, a panic inside `function` becomes a
    /// [`Fault::Panicked`] failure; otherwise its return value is the success.
    /// The panic is not reported to the panic hook.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let effect = Effect::attempt(|| 6 * 7);
    /// assert_eq!(effect.run().unwrap(), 42);
    ///
    /// let panicking = Effect::attempt(|| -> i32 { panic!("test error") });
    /// assert_eq!(panicking.run().unwrap_err().to_string(), "test error");
    /// ```
    pub fn attempt<F>(function: F) -> Self
    where
        F: Fn() -> A + 'static,
    {
        Self::new(move || Fault::catch_unwind(&function).into())
    }

    /// Converts a fallible function into an effect.
    ///
    /// When run, both an `Err` returned by `function` and a panic inside it
    /// become failures.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Effect;
    ///
    /// let parsed = Effect::attempt_fallible(|| "42".parse::<i32>());
    /// assert_eq!(parsed.run().unwrap(), 42);
    ///
    /// let invalid = Effect::attempt_fallible(|| "forty-two".parse::<i32>());
    /// assert!(invalid.run().is_err());
    /// ```
    pub fn attempt_fallible<F, X>(function: F) -> Self
    where
        F: Fn() -> Result<A, X> + 'static,
        X: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(move || match Fault::catch_unwind(&function) {
            Ok(Ok(value)) => Outcome::Success(value),
            Ok(Err(error)) => Outcome::Failure(Fault::new(error)),
            Err(fault) => Outcome::Failure(fault),
        })
    }
}

static_assertions::assert_impl_all!(Effect<Fault, i32>: Clone, fmt::Debug);
static_assertions::assert_not_impl_any!(Effect<Fault, i32>: Send, Sync);

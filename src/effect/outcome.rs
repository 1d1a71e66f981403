//! Outcome type - the tagged result of running an effect.
//!
//! This module provides the `Outcome<E, A>` type, which is either a
//! `Success(A)` or a `Failure(E)`. Every [`Effect`](super::Effect) produces
//! exactly one outcome each time it is evaluated, and every combinator decides
//! its control flow by inspecting it.
//!
//! # Examples
//!
//! ```rust
//! use fecto::effect::Outcome;
//!
//! let success: Outcome<String, i32> = Outcome::Success(42);
//! let failure: Outcome<String, i32> = Outcome::Failure("boom".to_string());
//!
//! assert!(success.is_success());
//! assert!(failure.is_failure());
//!
//! // Using fold to handle both cases
//! let described = failure.fold(
//!     |error| format!("failed: {error}"),
//!     |value| format!("value: {value}"),
//! );
//! assert_eq!(described, "failed: boom");
//! ```

/// The result of evaluating an effect: exactly one of a value or an error.
///
/// Unlike a pair of optional slots, an `Outcome` can never hold both or
/// neither, so an `A` that is itself `()` or `None` is never confused with the
/// absence of an error.
///
/// # Type Parameters
///
/// * `E` - The error type
/// * `A` - The success value type
///
/// # Examples
///
/// ```rust
/// use fecto::effect::Outcome;
///
/// let outcome: Outcome<String, i32> = Outcome::Success(21);
/// assert_eq!(outcome.map(|value| value * 2), Outcome::Success(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome<E, A> {
    /// The computation produced a value.
    Success(A),
    /// The computation produced an error.
    Failure(E),
}

impl<E, A> Outcome<E, A> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is a `Success`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Success(1);
    /// assert!(outcome.is_success());
    /// ```
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if this is a `Failure`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Failure("error");
    /// assert!(outcome.is_failure());
    /// ```
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    // =========================================================================
    // Value Extraction (Consuming)
    // =========================================================================

    /// Converts the outcome into an `Option<A>`, discarding any error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Success(42);
    /// assert_eq!(outcome.success(), Some(42));
    /// ```
    #[inline]
    pub fn success(self) -> Option<A> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Converts the outcome into an `Option<E>`, discarding any value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Failure("error");
    /// assert_eq!(outcome.failure(), Some("error"));
    /// ```
    #[inline]
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Collapses the outcome into a standard `Result`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Success(42);
    /// assert_eq!(outcome.into_result(), Ok(42));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<A, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Applies a function to the success value, leaving a failure untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Success(20);
    /// assert_eq!(outcome.map(|value| value + 1), Outcome::Success(21));
    ///
    /// let failed: Outcome<&str, i32> = Outcome::Failure("error");
    /// assert_eq!(failed.map(|value| value + 1), Outcome::Failure("error"));
    /// ```
    #[inline]
    pub fn map<B, F>(self, function: F) -> Outcome<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success(value) => Outcome::Success(function(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Applies a function to the error, leaving a success untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let failed: Outcome<&str, i32> = Outcome::Failure("error");
    /// assert_eq!(failed.map_failure(str::len), Outcome::Failure(5));
    /// ```
    #[inline]
    pub fn map_failure<F2, F>(self, function: F) -> Outcome<F2, A>
    where
        F: FnOnce(E) -> F2,
    {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(function(error)),
        }
    }

    /// Chains a function that produces another outcome, short-circuiting on
    /// failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Success(4);
    /// let halved = outcome.and_then(|value| {
    ///     if value % 2 == 0 { Outcome::Success(value / 2) } else { Outcome::Failure("odd") }
    /// });
    /// assert_eq!(halved, Outcome::Success(2));
    /// ```
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Outcome<E, B>
    where
        F: FnOnce(A) -> Outcome<E, B>,
    {
        match self {
            Self::Success(value) => function(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Applies one of two functions depending on the variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Outcome;
    ///
    /// let outcome: Outcome<&str, i32> = Outcome::Success(42);
    /// assert_eq!(outcome.fold(|error| error.len() as i32, |value| value), 42);
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, failure_function: F, success_function: G) -> T
    where
        F: FnOnce(E) -> T,
        G: FnOnce(A) -> T,
    {
        match self {
            Self::Success(value) => success_function(value),
            Self::Failure(error) => failure_function(error),
        }
    }

    /// Borrows the contents of the outcome.
    #[inline]
    pub const fn as_ref(&self) -> Outcome<&E, &A> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<E, A> From<Result<A, E>> for Outcome<E, A> {
    /// Converts a `Result` to an `Outcome`.
    ///
    /// `Ok(a)` becomes `Success(a)`, and `Err(e)` becomes `Failure(e)`.
    #[inline]
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<E, A> From<Outcome<E, A>> for Result<A, E> {
    #[inline]
    fn from(outcome: Outcome<E, A>) -> Self {
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_outcome_success_construction() {
        let outcome: Outcome<String, i32> = Outcome::Success(42);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
    }

    #[rstest]
    fn test_outcome_failure_construction() {
        let outcome: Outcome<String, i32> = Outcome::Failure("error".to_string());
        assert!(outcome.is_failure());
        assert!(!outcome.is_success());
    }

    #[rstest]
    fn test_unit_success_is_not_an_error() {
        let outcome: Outcome<(), ()> = Outcome::Success(());
        assert!(outcome.is_success());
        assert_eq!(outcome.failure(), None);
    }

    #[rstest]
    #[case(Outcome::Success(3), Outcome::Success(6))]
    #[case(Outcome::Failure("error"), Outcome::Failure("error"))]
    fn test_map_only_touches_success(
        #[case] input: Outcome<&'static str, i32>,
        #[case] expected: Outcome<&'static str, i32>,
    ) {
        assert_eq!(input.map(|value| value * 2), expected);
    }

    #[rstest]
    fn test_and_then_short_circuits() {
        let failed: Outcome<&str, i32> = Outcome::Failure("first");
        let chained = failed.and_then(|_| -> Outcome<&str, i32> {
            unreachable!("must not be called on failure")
        });
        assert_eq!(chained, Outcome::Failure("first"));
    }

    #[rstest]
    fn test_result_conversion_roundtrip() {
        let ok: Result<i32, String> = Ok(42);
        let outcome: Outcome<String, i32> = ok.into();
        assert_eq!(outcome, Outcome::Success(42));
        let result: Result<i32, String> = outcome.into();
        assert_eq!(result, Ok(42));

        let err: Result<i32, String> = Err("error".to_string());
        let outcome: Outcome<String, i32> = err.into();
        assert_eq!(outcome.into_result(), Err("error".to_string()));
    }
}

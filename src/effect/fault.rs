//! Fault - the reference error type for effects that may raise.
//!
//! Rust code "raises" in one of two ways: by returning an `Err` or by
//! panicking. A [`Fault`] records either, so that the capture boundaries
//! ([`Effect::attempt`](super::Effect::attempt),
//! [`Effect::attempt_fallible`](super::Effect::attempt_fallible) and the batch
//! operators) can move a raise into the error channel.
//!
//! # Examples
//!
//! ```rust
//! use fecto::effect::Fault;
//!
//! let fault = Fault::new("disk full");
//! assert_eq!(fault.to_string(), "disk full");
//! assert!(!fault.is_panic());
//!
//! let captured = Fault::catch_unwind(|| -> i32 { panic!("exploded") });
//! assert_eq!(captured.unwrap_err().to_string(), "exploded");
//! ```

use std::any::Any;
use std::cell::Cell;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Once};

/// Shared, dynamically typed error raised by user code.
pub type SharedError = Arc<dyn Error + Send + Sync>;

/// An error raised by user code, or a panic captured at a capture boundary.
///
/// Cloning a `Fault` shares the underlying error, so a failure that is
/// replayed by a re-run effect keeps its identity.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Fault {
    /// An error value raised by user code.
    #[error("{0}")]
    Raised(SharedError),
    /// A panic captured while running user code.
    #[error("{message}")]
    Panicked {
        /// The panic payload rendered as text.
        message: String,
    },
}

impl Fault {
    /// Creates a fault from any error or message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Fault;
    ///
    /// let from_message = Fault::new("Odd number: 3");
    /// assert_eq!(from_message.to_string(), "Odd number: 3");
    ///
    /// let from_error = Fault::new(std::fmt::Error);
    /// assert_eq!(from_error.to_string(), "an error occurred when formatting an argument");
    /// ```
    pub fn new<X>(error: X) -> Self
    where
        X: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::Raised(Arc::from(error.into()))
    }

    /// Returns `true` if this fault was produced by a captured panic.
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }

    /// Returns the raised error, if this fault was not a panic.
    pub fn raised(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Raised(error) => Some(error.as_ref()),
            Self::Panicked { .. } => None,
        }
    }

    /// Returns `true` if both faults share the same raised error.
    ///
    /// Two panics are never considered the same fault.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Raised(left), Self::Raised(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Runs a closure, converting a panic into a [`Fault::Panicked`].
    ///
    /// This is the single place where unwinding is caught. Callers decide
    /// whether they are a capture boundary; the core combinators never call
    /// it.
    ///
    /// A captured panic is not reported to the process panic hook, so no
    /// "thread panicked" message or backtrace is printed for it. The first
    /// capture wraps the hook installed at that time; panics outside a
    /// capture still reach it. A hook set later with
    /// [`std::panic::set_hook`] replaces the wrapper and sees every panic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fecto::effect::Fault;
    ///
    /// assert_eq!(Fault::catch_unwind(|| 42).unwrap(), 42);
    ///
    /// let fault = Fault::catch_unwind(|| -> i32 { panic!("oops") }).unwrap_err();
    /// assert!(fault.is_panic());
    /// ```
    pub fn catch_unwind<T, F>(function: F) -> Result<T, Self>
    where
        F: FnOnce() -> T,
    {
        let _capturing = Capturing::enter();
        catch_unwind(AssertUnwindSafe(function)).map_err(|payload| Self::Panicked {
            message: panic_message(payload.as_ref()),
        })
    }
}

// =============================================================================
// Quiet Panic Hook
// =============================================================================

thread_local! {
    static CAPTURE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Marks the current thread as inside [`Fault::catch_unwind`] until dropped.
struct Capturing;

impl Capturing {
    fn enter() -> Self {
        if !std::thread::panicking() {
            QUIET_HOOK.call_once(install_quiet_hook);
        }
        CAPTURE_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self
    }
}

impl Drop for Capturing {
    fn drop(&mut self) {
        CAPTURE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn install_quiet_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // With panic=abort nothing is caught, so the message must still print.
        let captured =
            cfg!(panic = "unwind") && CAPTURE_DEPTH.try_with(Cell::get).unwrap_or(0) > 0;
        if !captured {
            previous(info);
        }
    }));
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, thiserror::Error)]
    #[error("validation failed for {field}")]
    struct ValidationError {
        field: &'static str,
    }

    #[rstest]
    fn test_fault_new_keeps_message() {
        let fault = Fault::new("Error on item 2");
        assert_eq!(fault.to_string(), "Error on item 2");
        assert!(!fault.is_panic());
    }

    #[rstest]
    fn test_fault_raised_can_be_downcast() {
        let fault = Fault::new(ValidationError { field: "name" });
        let raised = fault.raised().unwrap();
        let validation = raised.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.field, "name");
    }

    #[rstest]
    fn test_clone_shares_identity() {
        let fault = Fault::new("shared");
        let cloned = fault.clone();
        assert!(fault.same_as(&cloned));
        assert!(!fault.same_as(&Fault::new("shared")));
    }

    #[rstest]
    fn test_catch_unwind_str_payload() {
        let fault = Fault::catch_unwind(|| -> i32 { panic!("static message") }).unwrap_err();
        assert!(fault.is_panic());
        assert_eq!(fault.to_string(), "static message");
    }

    #[rstest]
    fn test_catch_unwind_string_payload() {
        let item = 3;
        let fault = Fault::catch_unwind(|| -> i32 { panic!("Runtime error with {item}") }).unwrap_err();
        assert_eq!(fault.to_string(), "Runtime error with 3");
    }

    #[rstest]
    fn test_catch_unwind_unknown_payload() {
        let fault =
            Fault::catch_unwind(|| -> i32 { std::panic::panic_any(17_u8) }).unwrap_err();
        assert_eq!(fault.to_string(), "Unknown panic");
    }

    #[rstest]
    fn test_catch_unwind_passes_value_through() {
        assert_eq!(Fault::catch_unwind(|| "fine").unwrap(), "fine");
    }
}

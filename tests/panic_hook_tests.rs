#![cfg(feature = "batch")]
//! Captured panics stay out of the process panic hook.
//!
//! The panic hook is process-wide, so this file holds a single test and runs
//! in its own test binary.

use fecto::batch::traverse;
use fecto::effect::{Effect, Fault};
use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_captured_panics_skip_the_hook_and_others_reach_it() {
    let reported = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&reported);
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let attempted = Effect::attempt(|| -> i32 { panic!("quiet attempt") });
    assert_eq!(attempted.run().unwrap_err().to_string(), "quiet attempt");

    let traversed = traverse(vec![1, 2], |x| -> Effect<Fault, i32> {
        assert!(x != 2, "quiet traverse");
        Effect::success(x)
    });
    assert!(traversed.run().unwrap_err().is_panic());

    assert_eq!(reported.load(Ordering::SeqCst), 0);

    let uncaught = panic::catch_unwind(|| {
        Effect::<Fault, i32>::success(1)
            .map(|_| -> i32 { panic!("loud map") })
            .run()
    });
    assert!(uncaught.is_err());
    assert_eq!(reported.load(Ordering::SeqCst), 1);

    drop(panic::take_hook());
}

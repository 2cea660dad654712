//! Panic-expectation helpers
//!
//! The unit under test signals failure by panicking; a typed payload is
//! delivered with `std::panic::panic_any`. Each helper runs the body under
//! `catch_unwind`, classifies how it terminated as a [`PanicOutcome`], and
//! projects the outcome onto a single pass/fail record. A panic never
//! propagates past a helper, whatever its payload type.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::runner::TestRunner;

/// How a guarded body terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicOutcome {
    /// Ran to completion without panicking.
    Completed,
    /// Panicked with a payload of the expected type.
    MatchedExpected,
    /// Panicked with some other payload type.
    OtherPanic,
}

impl PanicOutcome {
    /// Classifies a `catch_unwind` result against expected payload type `T`.
    pub fn classify<T: Any>(result: Result<(), Box<dyn Any + Send>>) -> Self {
        match result {
            Ok(()) => Self::Completed,
            Err(payload) if payload.downcast_ref::<T>().is_some() => Self::MatchedExpected,
            Err(_) => Self::OtherPanic,
        }
    }
}

impl TestRunner {
    /// Runs `body` and records whether a panic with payload type `T` was
    /// observed, compared against `expected`.
    ///
    /// A panic with any other payload counts as "not observed", not as a
    /// crash; with `expected = false` this asserts `T` is never thrown while
    /// tolerating unrelated panics.
    pub fn expect_panic<T: Any>(&mut self, body: impl FnOnce(), expected: bool) {
        self.with_cleanup(|runner| {
            let outcome = PanicOutcome::classify::<T>(panic::catch_unwind(AssertUnwindSafe(body)));
            let observed = outcome == PanicOutcome::MatchedExpected;
            runner.record(observed == expected);
        });
    }

    /// Pass iff `body` panics with a payload of type `T`.
    pub fn panics_with<T: Any>(&mut self, body: impl FnOnce()) {
        self.expect_panic::<T>(body, true);
    }

    /// Pass iff `body` never panics with a payload of type `T`.
    pub fn never_panics_with<T: Any>(&mut self, body: impl FnOnce()) {
        self.expect_panic::<T>(body, false);
    }

    /// Pass iff `body` panics at all, whatever the payload.
    pub fn panics(&mut self, body: impl FnOnce()) {
        self.with_cleanup(|runner| {
            let outcome = panic::catch_unwind(AssertUnwindSafe(body));
            runner.record(outcome.is_err());
        });
    }

    /// Pass iff `body` runs to completion without panicking.
    pub fn never_panics(&mut self, body: impl FnOnce()) {
        self.with_cleanup(|runner| {
            let outcome = panic::catch_unwind(AssertUnwindSafe(body));
            runner.record(outcome.is_ok());
        });
    }
}

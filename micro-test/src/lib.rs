//! Micro Test - a minimal inline unit-test runner
//!
//! This crate implements a small assertion library that a host program embeds
//! directly in its entry point: declare a `TestRunner`, name each test with
//! [`TestRunner::begin`], evaluate conditions with the comparison and
//! panic-expectation helpers, and get a colorized pass/fail report plus a
//! final summary when the runner is dropped.

pub mod capture;
pub mod panicking;
pub mod report;
pub mod runner;

pub use capture::{DiagnosticCapture, ErrorSink, SinkHandle};
pub use panicking::PanicOutcome;
pub use report::{ReportMode, ReportModeError, VERSION};
pub use runner::{FixtureHook, TestRunner};

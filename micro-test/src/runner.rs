//! The test runner
//!
//! [`TestRunner`] owns all run state: pass/fail counters, the active test's
//! description, the optional fixture hooks, the diagnostic capture, and the
//! report verbosity. One instance drives an entire run, from the banner
//! printed at construction to the summary printed on drop.

use std::panic::{self, AssertUnwindSafe};
use std::process;

use tracing::{debug, trace};

use crate::capture::{DiagnosticCapture, SinkHandle};
use crate::report::{self, ReportMode};

/// A setup or cleanup procedure bracketing each test's body.
pub type FixtureHook = Box<dyn FnMut()>;

#[derive(Default)]
struct Fixture {
    setup: Option<FixtureHook>,
    cleanup: Option<FixtureHook>,
}

/// Inline unit-test runner.
///
/// Single-threaded by design: one instance, one logical thread, from
/// construction to drop. Construction installs the process-wide diagnostic
/// capture, so at most one runner may be alive at a time.
pub struct TestRunner {
    passed: u32,
    failed: u32,
    mode: ReportMode,
    description: String,
    last_result: bool,
    fixture: Fixture,
    capture: DiagnosticCapture,
}

impl TestRunner {
    /// Builds a runner from `std::env::args`, printing the banner.
    pub fn new() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }

    /// Builds a runner from explicit invocation arguments.
    ///
    /// An unrecognized verbosity selector prints usage text and terminates
    /// the process with status 1 before any test runs.
    pub fn from_args(args: &[String]) -> Self {
        let mode = match ReportMode::parse(args) {
            Ok(mode) => mode,
            Err(_) => {
                let program = args.first().map(String::as_str).unwrap_or("micro-test");
                println!("{}", report::usage(program));
                process::exit(1);
            }
        };
        Self::with_mode(mode)
    }

    /// Builds a runner with a fixed report mode, bypassing argument parsing.
    pub fn with_mode(mode: ReportMode) -> Self {
        let capture = DiagnosticCapture::install();
        println!("{}", report::banner());
        debug!(?mode, "test runner started");

        Self {
            passed: 0,
            failed: 0,
            mode,
            description: String::new(),
            last_result: false,
            fixture: Fixture::default(),
            capture,
        }
    }

    /// Begins a new test's scope.
    ///
    /// Runs the fixture setup hook (if set) exactly once, then stores the
    /// description for the assertion that follows. A panicking setup hook
    /// propagates to the caller; the runner does not swallow setup failures.
    pub fn begin(&mut self, description: impl Into<String>) {
        if let Some(setup) = self.fixture.setup.as_mut() {
            setup();
        }
        self.description = description.into();
        trace!(test = %self.description, "test started");
    }

    /// Records a boolean outcome for the current test.
    pub fn check(&mut self, status: bool) {
        self.with_cleanup(|runner| runner.record(status));
    }

    /// Installs a fixture pair; `setup` runs at [`TestRunner::begin`],
    /// `cleanup` after each recorded assertion.
    pub fn fixture(&mut self, setup: impl FnMut() + 'static, cleanup: impl FnMut() + 'static) {
        self.set_fixture(Some(Box::new(setup)), Some(Box::new(cleanup)));
    }

    /// Replaces the fixture hooks; either side may be unset.
    pub fn set_fixture(&mut self, setup: Option<FixtureHook>, cleanup: Option<FixtureHook>) {
        self.fixture = Fixture { setup, cleanup };
    }

    /// Removes both fixture hooks.
    pub fn clear_fixture(&mut self) {
        self.set_fixture(None, None);
    }

    // Boolean helpers.

    pub fn is_true(&mut self, value: bool) {
        self.check(value);
    }

    pub fn is_false(&mut self, value: bool) {
        self.check(!value);
    }

    // Comparison helpers. Cross-type bounds let `&str` and `String` compare
    // by content in either argument order.

    pub fn eq<L, R>(&mut self, left: L, right: R)
    where
        L: PartialEq<R>,
    {
        self.check(left == right);
    }

    pub fn ne<L, R>(&mut self, left: L, right: R)
    where
        L: PartialEq<R>,
    {
        self.check(left != right);
    }

    pub fn lt<L, R>(&mut self, left: L, right: R)
    where
        L: PartialOrd<R>,
    {
        self.check(left < right);
    }

    pub fn gt<L, R>(&mut self, left: L, right: R)
    where
        L: PartialOrd<R>,
    {
        self.check(left > right);
    }

    pub fn le<L, R>(&mut self, left: L, right: R)
    where
        L: PartialOrd<R>,
    {
        self.check(left <= right);
    }

    pub fn ge<L, R>(&mut self, left: L, right: R)
    where
        L: PartialOrd<R>,
    {
        self.check(left >= right);
    }

    /// Records a single aggregate result for a set of pre-computed
    /// conditions: pass only if every one is true, with a short-circuit to
    /// one failing record on the first false value in order.
    pub fn all(&mut self, conditions: impl IntoIterator<Item = bool>) {
        for condition in conditions {
            if !condition {
                self.check(false);
                return;
            }
        }
        self.check(true);
    }

    // Self-check helpers for the library's own health-check program. On
    // disagreement with the most recent result they terminate the process,
    // so they must never be used as ordinary assertions.

    pub fn should_pass(&self) {
        if !self.last_result {
            println!("Error! Unexpected test result.");
            process::exit(1);
        }
    }

    pub fn should_fail(&self) {
        if self.last_result {
            println!("Error! Unexpected test result.");
            process::exit(1);
        }
    }

    /// Returns a writer that routes diagnostics from code under test into
    /// the capture instead of stderr. Captured output is discarded after
    /// every assertion.
    pub fn diagnostics(&self) -> SinkHandle {
        self.capture.sink().handle()
    }

    /// Currently captured diagnostic output.
    pub fn captured(&self) -> String {
        self.capture.sink().contents()
    }

    pub fn passed(&self) -> u32 {
        self.passed
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn total(&self) -> u32 {
        self.passed + self.failed
    }

    /// Runs `body`, then the fixture cleanup hook exactly once, whether
    /// `body` returns normally or unwinds. The error sink is drained last on
    /// every path, so the next test starts with a clean capture.
    pub(crate) fn with_cleanup(&mut self, body: impl FnOnce(&mut Self)) {
        let mut cleanup = self.fixture.cleanup.take();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(self)));

        if let Some(hook) = cleanup.as_mut() {
            hook();
        }
        self.fixture.cleanup = cleanup;
        self.capture.sink().drain();

        if let Err(payload) = outcome {
            panic::resume_unwind(payload);
        }
    }

    pub(crate) fn record(&mut self, status: bool) {
        if status {
            self.passed += 1;
            if self.mode.shows_passes() {
                println!("{}", report::pass_line(&self.description));
            }
        } else {
            self.failed += 1;
            if self.mode.shows_failures() {
                println!("{}", report::fail_line(&self.description));
            }
        }
        self.last_result = status;
        trace!(test = %self.description, status, "assertion recorded");
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::with_mode(ReportMode::default())
    }
}

impl Drop for TestRunner {
    fn drop(&mut self) {
        println!("{}", report::summary(self.passed, self.failed));
        debug!(
            total = self.total(),
            passed = self.passed,
            failed = self.failed,
            "test runner finished"
        );
        // Dropping `capture` restores the previous panic hook.
    }
}

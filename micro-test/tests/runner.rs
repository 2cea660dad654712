//! Behavioral tests for the test runner.

use std::cell::RefCell;
use std::io::Write;
use std::panic::{self, panic_any, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use micro_test::{ReportMode, TestRunner};

// The diagnostic capture owns the process panic hook, so tests that build a
// runner must not overlap.
static RUNNER_GATE: Mutex<()> = Mutex::new(());

fn gate() -> MutexGuard<'static, ()> {
    RUNNER_GATE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn runner() -> TestRunner {
    TestRunner::with_mode(ReportMode::SummaryOnly)
}

#[test]
fn each_record_increments_exactly_one_counter() {
    let _gate = gate();
    let mut test = runner();

    test.begin("a passing record");
    test.check(true);
    assert_eq!((test.passed(), test.failed()), (1, 0));

    test.begin("a failing record");
    test.check(false);
    assert_eq!((test.passed(), test.failed()), (1, 1));
}

#[test]
fn eq_and_ne_are_duals() {
    let _gate = gate();
    let mut test = runner();

    test.begin("identical values");
    test.eq(12, 12);
    test.begin("identical values, negated");
    test.ne(12, 12);

    test.begin("distinct values");
    test.eq(123, 321);
    test.begin("distinct values, negated");
    test.ne(123, 321);

    assert_eq!((test.passed(), test.failed()), (2, 2));
}

#[test]
fn ordering_helpers_follow_the_predicates() {
    let _gate = gate();
    let mut test = runner();

    test.begin("less-than");
    test.lt(12, 19);
    test.begin("greater-than");
    test.gt(100, 10);
    test.begin("less-or-equal on equal values");
    test.le(12, 12);
    test.begin("greater-or-equal on equal values");
    test.ge(12, 12);

    assert_eq!((test.passed(), test.failed()), (4, 0));
}

#[test]
fn string_comparison_is_by_content_in_either_order() {
    let _gate = gate();
    let mut test = runner();

    test.begin("two literals, same content");
    test.eq("Boat", "Boat");
    test.begin("literal and owned string");
    test.eq("Boat", String::from("Boat"));
    test.begin("owned string and literal");
    test.eq(String::from("Boat"), "Boat");
    test.begin("two owned strings");
    test.eq(String::from("Elephant"), String::from("Elephant"));
    assert_eq!((test.passed(), test.failed()), (4, 0));

    test.begin("different content");
    test.eq("Boat", "Goat");
    test.begin("different content, owned right");
    test.eq("Boat", String::from("Goat"));
    test.begin("different content, owned left");
    test.eq(String::from("Boat"), "Goat");
    assert_eq!((test.passed(), test.failed()), (4, 3));

    test.begin("different content, negated");
    test.ne(String::from("Elephant"), "Horse");
    assert_eq!((test.passed(), test.failed()), (5, 3));
}

#[test]
fn all_records_exactly_one_aggregate_result() {
    let _gate = gate();
    let mut test = runner();

    test.begin("every condition holds");
    test.all([true, true, true]);
    assert_eq!((test.passed(), test.failed()), (1, 0));

    test.begin("first condition fails");
    test.all([false, true, true]);
    test.begin("last condition fails");
    test.all([true, true, false]);
    test.begin("every condition fails");
    test.all([false, false, false]);

    // One record per call, regardless of argument count.
    assert_eq!((test.passed(), test.failed()), (1, 3));
}

#[test]
fn typed_panic_expectation_round_trip() {
    let _gate = gate();
    let mut test = runner();

    test.begin("typed payload is observed");
    test.panics_with::<i32>(|| panic_any(1));

    test.begin("wrong payload type is not a match");
    test.panics_with::<i32>(|| panic_any("boom"));

    test.begin("no panic is not a match");
    test.panics_with::<i32>(|| {});

    test.begin("no panic satisfies the negated form");
    test.never_panics_with::<i32>(|| {});

    test.begin("unrelated panic type satisfies the negated form");
    test.never_panics_with::<i32>(|| panic_any("unrelated"));

    assert_eq!((test.passed(), test.failed()), (3, 2));
}

#[test]
fn untyped_panic_helpers() {
    let _gate = gate();
    let mut test = runner();

    test.begin("any panic counts");
    test.panics(|| panic!("anything"));
    test.begin("absence of a panic counts against panics()");
    test.panics(|| {});

    test.begin("quiet body passes never_panics");
    test.never_panics(|| {});
    test.begin("panicking body fails never_panics");
    test.never_panics(|| panic_any(0u8));

    assert_eq!((test.passed(), test.failed()), (2, 2));
}

#[test]
fn fixture_runs_setup_before_body_and_cleanup_after() {
    let _gate = gate();
    let mut test = runner();

    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let setup_log = Rc::clone(&log);
    let cleanup_log = Rc::clone(&log);
    test.fixture(
        move || setup_log.borrow_mut().push("setup"),
        move || cleanup_log.borrow_mut().push("cleanup"),
    );

    test.begin("a test in a fixture");
    log.borrow_mut().push("body");
    test.check(true);

    assert_eq!(*log.borrow(), ["setup", "body", "cleanup"]);

    test.clear_fixture();
    test.begin("a test after the fixture is cleared");
    test.check(true);
    assert_eq!(*log.borrow(), ["setup", "body", "cleanup"]);
}

#[test]
fn cleanup_runs_even_when_the_body_panics() {
    let _gate = gate();
    let mut test = runner();

    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let setup_log = Rc::clone(&log);
    let cleanup_log = Rc::clone(&log);
    test.fixture(
        move || setup_log.borrow_mut().push("setup"),
        move || cleanup_log.borrow_mut().push("cleanup"),
    );

    test.begin("a panicking test body");
    test.panics(|| panic_any("body blew up"));

    assert_eq!(*log.borrow(), ["setup", "cleanup"]);
    assert_eq!((test.passed(), test.failed()), (1, 0));
}

#[test]
fn setup_panic_propagates_out_of_begin() {
    let _gate = gate();
    let mut test = runner();

    test.fixture(|| panic!("setup exploded"), || {});
    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        test.begin("never reached");
    }));
    assert!(unwound.is_err());

    // Nothing was recorded, and the runner stays usable afterwards.
    assert_eq!(test.total(), 0);
    test.clear_fixture();
    test.begin("after the failed setup");
    test.check(true);
    assert_eq!((test.passed(), test.failed()), (1, 0));
}

#[test]
fn sink_is_drained_after_cleanup_output_too() {
    let _gate = gate();
    let mut test = runner();

    let mut diag = test.diagnostics();
    test.fixture(
        || {},
        move || {
            writeln!(diag, "cleanup chatter").unwrap();
        },
    );

    test.begin("a test whose cleanup is noisy");
    test.check(true);
    assert!(test.captured().is_empty());
}

#[test]
fn diagnostics_are_captured_and_drained_per_assertion() {
    let _gate = gate();
    let mut test = runner();

    test.begin("a noisy test body");
    let mut diag = test.diagnostics();
    writeln!(diag, "incidental warning").unwrap();
    assert!(test.captured().contains("incidental warning"));

    test.check(true);
    assert!(test.captured().is_empty());

    // Panic reports land in the capture too, and are likewise drained.
    test.begin("a panicking body");
    test.panics(|| panic!("should be captured"));
    assert!(test.captured().is_empty());
}

#[test]
fn end_to_end_tally() {
    let _gate = gate();
    let mut test = runner();

    test.begin("first");
    test.check(true);
    test.begin("second");
    test.check(false);
    test.begin("third");
    test.all([true, false, true]);

    assert_eq!(test.total(), 3);
    assert_eq!(test.passed(), 1);
    assert_eq!(test.failed(), 2);
}

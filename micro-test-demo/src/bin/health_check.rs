//! Micro Test health check
//!
//! Verifies every assertion helper with a passing and a failing probe,
//! confirming each via `should_pass`/`should_fail`. On any disagreement the
//! runner terminates the process with a non-zero status, so reaching the
//! final notice means the library itself is healthy.
//!
//! Run this before shipping changes to the runner.

use std::cell::RefCell;
use std::panic::panic_any;
use std::rc::Rc;

use anyhow::Result;
use micro_test::TestRunner;

struct Person {
    name: String,
}

impl Person {
    fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

struct Probe;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    tracing::debug!("health check starting");

    let mut test = TestRunner::new();

    //=========================
    // Fixture
    //=========================
    let people: Rc<RefCell<Vec<Person>>> = Rc::new(RefCell::new(Vec::new()));
    let setup_people = Rc::clone(&people);
    let cleanup_people = Rc::clone(&people);
    test.fixture(
        move || {
            setup_people.borrow_mut().extend([
                Person::new("Same"),
                Person::new("Other"),
                Person::new("Same"),
            ]);
        },
        move || cleanup_people.borrow_mut().clear(),
    );

    let name = |index: usize| people.borrow()[index].name();

    test.begin("Person 1 and person 1 have the same name");
    {
        test.eq(name(0), name(0));
        test.should_pass();
    }
    test.begin("Person 1 and person 1 have the same name");
    {
        test.ne(name(0), name(0));
        test.should_fail();
    }
    test.begin("Person 1 and person 2 don't have the same name");
    {
        test.ne(name(0), name(1));
        test.should_pass();
    }
    test.begin("Person 1 and person 2 don't have the same name");
    {
        test.eq(name(0), name(1));
        test.should_fail();
    }
    test.begin("Person 1 and person 3 have the same name");
    {
        test.eq(name(0), name(2));
        test.should_pass();
    }
    test.begin("Person 1 and person 3 have the same name");
    {
        test.ne(name(0), name(2));
        test.should_fail();
    }
    test.clear_fixture();

    //=========================
    // Booleans
    //=========================
    test.begin("Plain boolean check");
    {
        test.check(true);
        test.should_pass();
    }
    test.begin("Plain boolean check");
    {
        test.check(false);
        test.should_fail();
    }
    test.begin("Helper for 'true'");
    {
        test.is_true(true);
        test.should_pass();
    }
    test.begin("Helper for 'true'");
    {
        test.is_true(false);
        test.should_fail();
    }
    test.begin("Helper for 'false'");
    {
        test.is_false(false);
        test.should_pass();
    }
    test.begin("Helper for 'false'");
    {
        test.is_false(true);
        test.should_fail();
    }

    //=========================
    // Comparisons
    //=========================
    test.begin("Helper for ==");
    {
        test.eq(12, 12);
        test.should_pass();
    }
    test.begin("Helper for ==");
    {
        test.eq(12, 21);
        test.should_fail();
    }
    test.begin("Helper for !=");
    {
        test.ne(123, 321);
        test.should_pass();
    }
    test.begin("Helper for !=");
    {
        test.ne(123, 123);
        test.should_fail();
    }
    test.begin("Helper for <");
    {
        test.lt(12, 19);
        test.should_pass();
    }
    test.begin("Helper for <");
    {
        test.lt(19, 12);
        test.should_fail();
    }
    test.begin("Helper for >");
    {
        test.gt(100, 10);
        test.should_pass();
    }
    test.begin("Helper for >");
    {
        test.gt(10, 100);
        test.should_fail();
    }
    test.begin("Helper for <=");
    {
        test.le(12, 12);
        test.should_pass();
    }
    test.begin("Helper for <=");
    {
        test.le(13, 12);
        test.should_fail();
    }
    test.begin("Helper for >=");
    {
        test.ge(12, 12);
        test.should_pass();
    }
    test.begin("Helper for >=");
    {
        test.ge(12, 13);
        test.should_fail();
    }

    //=========================
    // Panic expectations
    //=========================
    test.begin("Panic with a float payload");
    {
        test.panics_with::<f64>(|| panic_any(12.34f64));
        test.should_pass();
    }
    test.begin("Panic with a float payload");
    {
        test.panics_with::<f64>(|| {});
        test.should_fail();
    }
    test.begin("Panic with a unit-struct payload");
    {
        test.panics_with::<Probe>(|| panic_any(Probe));
        test.should_pass();
    }
    test.begin("Integer payload never raised");
    {
        // Not the payload we are looking for.
        test.never_panics_with::<i32>(|| panic_any(Probe));
        test.should_pass();
    }
    test.begin("Integer payload never raised");
    {
        test.never_panics_with::<i32>(|| panic_any(1));
        test.should_fail();
    }
    test.begin("Any panic at all");
    {
        test.panics(|| panic!("boom"));
        test.should_pass();
    }
    test.begin("Any panic at all");
    {
        test.panics(|| {});
        test.should_fail();
    }
    test.begin("No panic of any kind");
    {
        test.never_panics(|| {});
        test.should_pass();
    }
    test.begin("No panic of any kind");
    {
        test.never_panics(|| panic!("boom"));
        test.should_fail();
    }

    //=========================
    // Compounds
    //=========================
    test.begin("Compound where the first condition fails");
    {
        test.all([false, true, true]);
        test.should_fail();
    }
    test.begin("Compound where the last condition fails");
    {
        test.all([true, true, false]);
        test.should_fail();
    }
    test.begin("Compound where every condition fails");
    {
        test.all([false, false, false]);
        test.should_fail();
    }
    test.begin("Compound where every condition holds");
    {
        test.all([true, true, true]);
        test.should_pass();
    }

    //=========================
    // Strings
    //=========================
    test.begin("Two literal comparison");
    {
        test.eq("Boat", "Boat");
        test.should_pass();
    }
    test.begin("Two literal comparison");
    {
        test.eq("Boat", "Goat");
        test.should_fail();
    }
    test.begin("Literal with owned string comparison");
    {
        test.eq("Boat", String::from("Boat"));
        test.should_pass();
    }
    test.begin("Literal with owned string comparison");
    {
        test.eq("Boat", String::from("Goat"));
        test.should_fail();
    }
    test.begin("Owned string with literal comparison");
    {
        test.eq(String::from("Boat"), "Boat");
        test.should_pass();
    }
    test.begin("Owned string with literal comparison");
    {
        test.eq(String::from("Boat"), "Goat");
        test.should_fail();
    }
    test.begin("Two owned string comparison");
    {
        test.eq(String::from("Elephant"), String::from("Elephant"));
        test.should_pass();
    }
    test.begin("Two owned string comparison");
    {
        test.eq(String::from("Elephant"), String::from("Horse"));
        test.should_fail();
    }
    test.begin("Two different literal comparison");
    {
        test.ne("Boat", "Goat");
        test.should_pass();
    }
    test.begin("Two different literal comparison");
    {
        test.ne("Goat", "Goat");
        test.should_fail();
    }
    test.begin("Literal with different owned string comparison");
    {
        test.ne("Boat", String::from("Goat"));
        test.should_pass();
    }
    test.begin("Literal with different owned string comparison");
    {
        test.ne("Goat", String::from("Goat"));
        test.should_fail();
    }
    test.begin("Owned string with different literal comparison");
    {
        test.ne(String::from("Boat"), "Goat");
        test.should_pass();
    }
    test.begin("Owned string with different literal comparison");
    {
        test.ne(String::from("Goat"), "Goat");
        test.should_fail();
    }
    test.begin("Two different owned string comparison");
    {
        test.ne(String::from("Elephant"), String::from("Horse"));
        test.should_pass();
    }
    test.begin("Two different owned string comparison");
    {
        test.ne(String::from("Elephant"), String::from("Elephant"));
        test.should_fail();
    }

    // This must be the last line of the health check.
    println!("\nMICRO TEST VERIFICATION SUCCESSFUL\n");
    Ok(())
}

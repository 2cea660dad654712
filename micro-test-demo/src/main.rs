//! Micro Test showcase
//!
//! A host program that embeds the runner in its entry point: named tests,
//! fixtures, comparison helpers, compound conditions, and panic
//! expectations, with the report printed as the run progresses.

use std::cell::RefCell;
use std::io::Write;
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

    fn name(&self) -> &str {
        &self.name
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    tracing::debug!("demo host starting");

    let mut test = TestRunner::new();

    test.begin("This will pass");
    {
        test.check(true);
    }
    test.begin("This will fail");
    {
        test.check(false);
    }

    // A fixture brackets each test between begin() and the assertion.
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

    test.begin("First and third person share a name");
    {
        let (first, third) = {
            let people = people.borrow();
            (people[0].name().to_string(), people[2].name().to_string())
        };
        test.eq(first, third);
    }
    test.begin("First and second person differ");
    {
        let (first, second) = {
            let people = people.borrow();
            (people[0].name().to_string(), people[1].name().to_string())
        };
        test.ne(first, second);
    }
    test.clear_fixture();

    test.begin("Comparison helpers");
    {
        test.all([12 == 12, 12 < 19, 100 > 10, 12 <= 12, 12 >= 12]);
    }
    test.begin("String comparison is by content");
    {
        test.eq("Boat", String::from("Boat"));
    }

    test.begin("Checking a panic is raised (passing test)");
    {
        test.panics_with::<i32>(|| panic_any(1));
    }
    test.begin("Expecting a panic, but none is raised (failing test)");
    {
        test.panics_with::<i32>(|| {});
    }
    test.begin("Panic not expected (passing test)");
    {
        test.never_panics(|| {});
    }

    test.begin("Diagnostics from a test body stay out of the report");
    {
        let mut diag = test.diagnostics();
        writeln!(diag, "some incidental output from the code under test")?;
        test.check(true);
    }

    Ok(())
}

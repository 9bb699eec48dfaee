//! Subcase tree exploration through the full public API: registration,
//! session, replay counts, and visitation order.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::RecordingReporter;
use ramify::{subcase, test_case, Session, SessionConfig, TestRegistry};

fn run(registry: TestRegistry) -> RecordingReporter {
    let mut session = Session::new(registry, SessionConfig::default()).unwrap();
    let mut reporter = RecordingReporter::default();
    session.run(&mut reporter);
    reporter
}

#[test]
fn body_without_subcases_runs_exactly_once() {
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let mut registry = TestRegistry::new();
    test_case!(registry, "plain", move |_ctx| *c.borrow_mut() += 1);

    let reporter = run(registry);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(reporter.finished, vec![("plain".to_string(), 1, false, None)]);
}

#[test]
fn three_flat_leaves_visit_in_declaration_order() {
    let visits = Rc::new(RefCell::new(Vec::new()));
    let v = visits.clone();
    let mut registry = TestRegistry::new();
    test_case!(registry, "flat", move |ctx| {
        let v = v.clone();
        subcase!(ctx, "a", {
            v.borrow_mut().push("a");
        });
        subcase!(ctx, "b", {
            v.borrow_mut().push("b");
        });
        subcase!(ctx, "c", {
            v.borrow_mut().push("c");
        });
    });

    let reporter = run(registry);
    assert_eq!(*visits.borrow(), vec!["a", "b", "c"]);
    // One replay per leaf plus the final pass that enters nothing.
    assert_eq!(reporter.finished[0].1, 4);
}

#[test]
fn nested_tree_explores_depth_first() {
    let visits = Rc::new(RefCell::new(Vec::new()));
    let v = visits.clone();
    let mut registry = TestRegistry::new();
    test_case!(registry, "nested", move |ctx| {
        let v = v.clone();
        subcase!(ctx, "A", {
            let v = v.clone();
            subcase!(ctx, "B", {
                v.borrow_mut().push("A/B");
            });
            subcase!(ctx, "C", {
                v.borrow_mut().push("A/C");
            });
        });
        subcase!(ctx, "D", {
            v.borrow_mut().push("D");
        });
    });

    let reporter = run(registry);
    assert_eq!(*visits.borrow(), vec!["A/B", "A/C", "D"]);
    // The parent is re-entered on the way to each of its leaves.
    assert_eq!(
        reporter.subcases,
        vec!["A", "A/B", "A", "A/C", "D"]
    );
    assert_eq!(reporter.finished[0].1, 4);
}

#[test]
fn shared_setup_and_teardown_run_on_every_replay() {
    let setups = Rc::new(RefCell::new(0));
    let teardowns = Rc::new(RefCell::new(0));
    let s = setups.clone();
    let t = teardowns.clone();
    let mut registry = TestRegistry::new();
    test_case!(registry, "fixture", move |ctx| {
        *s.borrow_mut() += 1;
        subcase!(ctx, "a", {});
        subcase!(ctx, "b", {});
        *t.borrow_mut() += 1;
    });

    let reporter = run(registry);
    assert_eq!(reporter.finished[0].1, 3);
    assert_eq!(*setups.borrow(), 3);
    assert_eq!(*teardowns.borrow(), 3);
}

#[test]
fn identical_sibling_signatures_are_conflated() {
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let mut registry = TestRegistry::new();
    test_case!(registry, "dup", move |ctx| {
        let c = c.clone();
        // Same name, file, and line: one signature, so one visit.
        for _ in 0..2 {
            ctx.subcase("same", "dup.rs", 7, |_| {
                *c.borrow_mut() += 1;
            });
        }
    });

    let reporter = run(registry);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(reporter.finished[0].1, 2);
}

#[test]
fn fatal_failure_in_one_branch_still_explores_siblings() {
    let visits = Rc::new(RefCell::new(Vec::new()));
    let v = visits.clone();
    let mut registry = TestRegistry::new();
    test_case!(registry, "fatal", move |ctx| {
        let v = v.clone();
        subcase!(ctx, "broken", {
            ramify::require!(ctx, false);
            v.borrow_mut().push("unreachable");
        });
        subcase!(ctx, "healthy", {
            v.borrow_mut().push("healthy");
        });
    });

    let reporter = run(registry);
    assert_eq!(*visits.borrow(), vec!["healthy"]);
    let (_, replays, failed, crashed) = &reporter.finished[0];
    assert_eq!(*replays, 3);
    assert!(*failed);
    assert!(crashed.is_none());
}

#[test]
fn bdd_aliases_prefix_the_subcase_names() {
    let mut registry = TestRegistry::new();
    ramify::scenario!(registry, "a stack", |ctx| {
        ramify::given!(ctx, "one element", {
            ramify::when!(ctx, "popped", {
                ramify::then!(ctx, "it is empty", {});
            });
        });
    });

    let reporter = run(registry);
    assert_eq!(reporter.started, vec!["Scenario: a stack"]);
    assert_eq!(
        reporter.subcases,
        vec![
            "given: one element",
            "given: one element/when: popped",
            "given: one element/when: popped/then: it is empty",
        ]
    );
}

//! The replay loop: runs one test body to subcase exhaustion.
//!
//! Each replay executes the whole test body from the top; the walker state
//! fast-forwards past branches that earlier replays completed, so shared
//! setup and teardown code re-runs on every replay while each leaf subcase
//! path executes exactly once. The loop stops when a replay enters zero
//! subcases - for a test with N leaf paths and no crashes that is exactly
//! N + 1 replays (the last one confirms exhaustion).
//!
//! Precondition: the test body's control flow must be deterministic between
//! replays. If subcase declarations appear in a different order on different
//! replays (e.g. random branching), termination cannot be guaranteed; that
//! is a caller responsibility, not defended against here.
//!
//! This is also the unwind boundary. [`FatalSignal`] raised by a failing
//! require-severity assertion is consumed here and exploration continues
//! with the next replay (the aborted path was marked explored on the way
//! out). Any other panic is a crashed test: the replay is abandoned, the
//! crash is reported, and no further replays are attempted for that test -
//! partial subcase coverage is accepted, not retried.

use std::panic::{self, AssertUnwindSafe};

use crate::assertion::{panic_message, FatalSignal};
use crate::config::SessionConfig;
use crate::context::TestContext;
use crate::registry::TestDescriptor;
use crate::report::Reporter;
use crate::session::RunStats;
use crate::subcase::WalkerState;

/// What one full exploration of a test case produced.
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// Number of times the test body was invoked.
    pub replays: usize,
    /// Any assertion failed or the body crashed.
    pub failed: bool,
    /// Panic message of an uncaught (non-signal) unwind, if one occurred.
    pub crashed: Option<String>,
}

/// Runs `desc`'s body repeatedly until every reachable leaf subcase path has
/// been visited once, or the body crashes.
pub fn run_case(
    desc: &TestDescriptor,
    config: &SessionConfig,
    stats: &mut RunStats,
    reporter: &mut dyn Reporter,
) -> CaseReport {
    let mut walk = WalkerState::new();
    let mut replays = 0;
    let mut crashed = None;
    let failed_before = stats.assertions_failed;

    loop {
        walk.begin_replay();
        replays += 1;

        let result = {
            let mut ctx = TestContext::new(desc, config, stats, reporter, &mut walk);
            panic::catch_unwind(AssertUnwindSafe(move || (desc.body)(&mut ctx)))
        };

        match result {
            Ok(()) => {}
            // A require failure aborted this replay; it was recorded when it
            // was raised, and remaining branches still get their replays.
            Err(payload) if payload.is::<FatalSignal>() => {}
            Err(payload) => {
                crashed = Some(panic_message(payload.as_ref()));
                break;
            }
        }

        if walk.entered_this_replay() == 0 {
            break;
        }
    }

    let failed = crashed.is_some() || stats.assertions_failed > failed_before;
    CaseReport {
        replays,
        failed,
        crashed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(body: impl Fn(&mut TestContext<'_>) + 'static) -> (CaseReport, RunStats) {
        let desc = TestDescriptor::new("", "t", "runner.rs", 1, body);
        let config = SessionConfig::default();
        let mut stats = RunStats::default();
        let mut reporter = NullReporter;
        let report = run_case(&desc, &config, &mut stats, &mut reporter);
        (report, stats)
    }

    #[test]
    fn body_without_subcases_runs_once() {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let (report, _) = run(move |_| *c.borrow_mut() += 1);
        assert_eq!(report.replays, 1);
        assert_eq!(*count.borrow(), 1);
        assert!(!report.failed);
    }

    #[test]
    fn three_flat_leaves_take_four_replays() {
        let visits = Rc::new(RefCell::new(Vec::new()));
        let v = visits.clone();
        let (report, _) = run(move |ctx| {
            let v = v.clone();
            ctx.subcase("a", "runner.rs", 10, {
                let v = v.clone();
                move |_| v.borrow_mut().push("a")
            });
            ctx.subcase("b", "runner.rs", 11, {
                let v = v.clone();
                move |_| v.borrow_mut().push("b")
            });
            ctx.subcase("c", "runner.rs", 12, {
                let v = v.clone();
                move |_| v.borrow_mut().push("c")
            });
        });
        assert_eq!(report.replays, 4);
        assert_eq!(*visits.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn nested_subcases_explore_depth_first_in_lexical_order() {
        let visits = Rc::new(RefCell::new(Vec::new()));
        let v = visits.clone();
        let (report, _) = run(move |ctx| {
            let v = v.clone();
            ctx.subcase("A", "runner.rs", 20, {
                let v = v.clone();
                move |ctx| {
                    ctx.subcase("B", "runner.rs", 21, {
                        let v = v.clone();
                        move |_| v.borrow_mut().push("A/B")
                    });
                    ctx.subcase("C", "runner.rs", 22, {
                        let v = v.clone();
                        move |_| v.borrow_mut().push("A/C")
                    });
                }
            });
            ctx.subcase("D", "runner.rs", 23, {
                let v = v.clone();
                move |_| v.borrow_mut().push("D")
            });
        });
        assert_eq!(*visits.borrow(), vec!["A/B", "A/C", "D"]);
        // Three leaves, plus the confirming final pass.
        assert_eq!(report.replays, 4);
    }

    #[test]
    fn setup_reruns_on_every_replay() {
        let setups = Rc::new(RefCell::new(0));
        let s = setups.clone();
        let (report, _) = run(move |ctx| {
            *s.borrow_mut() += 1;
            ctx.subcase("a", "runner.rs", 30, |_| {});
            ctx.subcase("b", "runner.rs", 31, |_| {});
        });
        assert_eq!(report.replays, 3);
        assert_eq!(*setups.borrow(), 3);
    }

    #[test]
    fn crash_abandons_remaining_replays() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let visits = Rc::new(RefCell::new(Vec::new()));
        let v = visits.clone();
        let (report, _) = run(move |ctx| {
            let v = v.clone();
            ctx.subcase("boom", "runner.rs", 40, |_| panic!("exploded"));
            ctx.subcase("never", "runner.rs", 41, {
                let v = v.clone();
                move |_| v.borrow_mut().push("never")
            });
        });

        std::panic::set_hook(hook);

        assert!(report.failed);
        assert_eq!(report.crashed.as_deref(), Some("exploded"));
        assert!(visits.borrow().is_empty());
    }
}

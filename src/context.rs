//! The per-test execution context handed to every test body.
//!
//! A [`TestContext`] threads the session pieces - configuration, statistics,
//! reporter, walker state - through one replay of one test body. Test code
//! interacts with it through the macro surface ([`crate::macros`]); the
//! methods here are the routing layer between the assertion engine's
//! outcomes and the rest of the session.

use std::panic::{self, AssertUnwindSafe};

use crate::assertion::{self, AssertionOutcome, FatalSignal, Severity};
use crate::config::SessionConfig;
use crate::debugger;
use crate::registry::TestDescriptor;
use crate::report::{AssertionEvent, Reporter};
use crate::session::RunStats;
use crate::subcase::{SubcaseSignature, WalkerState};

/// Execution context for one replay of one test body.
pub struct TestContext<'r> {
    desc: &'r TestDescriptor,
    config: &'r SessionConfig,
    stats: &'r mut RunStats,
    reporter: &'r mut dyn Reporter,
    walk: &'r mut WalkerState,
}

impl<'r> TestContext<'r> {
    pub(crate) fn new(
        desc: &'r TestDescriptor,
        config: &'r SessionConfig,
        stats: &'r mut RunStats,
        reporter: &'r mut dyn Reporter,
        walk: &'r mut WalkerState,
    ) -> Self {
        Self {
            desc,
            config,
            stats,
            reporter,
            walk,
        }
    }

    /// The chain of subcases currently entered, outermost first.
    pub fn current_path(&self) -> &[SubcaseSignature] {
        self.walk.path()
    }

    /// Declares a subcase block; `body` runs only when the walker decides
    /// this branch is the one explored during the current replay.
    ///
    /// The leave bookkeeping must run even when `body` unwinds (a fatal
    /// assertion or a crash), so the body is guarded and the payload
    /// re-raised afterwards - the walker then knows the aborted path and
    /// later replays still discover its siblings.
    pub fn subcase(
        &mut self,
        name: &'static str,
        file: &'static str,
        line: u32,
        body: impl FnOnce(&mut TestContext<'r>),
    ) {
        let sig = SubcaseSignature { name, file, line };
        if !self.walk.try_enter(sig) {
            return;
        }
        let path = self.walk.path().to_vec();
        self.reporter.subcase_entered(self.desc, &path);

        let result = {
            let this = &mut *self;
            panic::catch_unwind(AssertUnwindSafe(move || body(this)))
        };
        self.walk.leave();
        if let Err(payload) = result {
            panic::resume_unwind(payload);
        }
    }

    /// Routes a finished assertion outcome: statistics, reporting, debugger
    /// break, and the fatal unwind signal for require severity.
    pub fn process(
        &mut self,
        outcome: AssertionOutcome,
        label: &'static str,
        expression: &str,
        file: &'static str,
        line: u32,
    ) {
        self.stats.assertions += 1;
        let failed = !outcome.passed;
        if failed {
            self.stats.assertions_failed += 1;
        }

        if failed || self.config.success {
            let event = AssertionEvent {
                descriptor: self.desc,
                path: self.walk.path(),
                outcome: &outcome,
                label,
                expression,
                file,
                line,
            };
            self.reporter.assertion(&event);
        }

        if failed {
            if !self.config.no_breaks && debugger::is_debugger_attached() {
                debugger::break_into_debugger();
            }
            if outcome.severity == Severity::Require && !self.config.no_throw {
                panic::panic_any(FatalSignal);
            }
        }
    }

    /// Panic-expectation assertion: passes iff `f` panics.
    ///
    /// Under `no_throw` the guarded expression is not executed at all and
    /// nothing is recorded, matching the "panic assertions are no-ops"
    /// configuration semantics.
    pub fn assert_panics(
        &mut self,
        severity: Severity,
        label: &'static str,
        expression: &str,
        file: &'static str,
        line: u32,
        f: impl FnOnce(),
    ) {
        if self.config.no_throw {
            return;
        }
        let outcome = assertion::evaluate_panics(severity, f);
        self.process(outcome, label, expression, file, line);
    }

    /// Passes iff `f` panics with a payload downcastable to `E`.
    pub fn assert_panics_as<E: std::any::Any>(
        &mut self,
        severity: Severity,
        type_name: &str,
        label: &'static str,
        expression: &str,
        file: &'static str,
        line: u32,
        f: impl FnOnce(),
    ) {
        if self.config.no_throw {
            return;
        }
        let outcome = assertion::evaluate_panics_as::<E>(severity, type_name, f);
        self.process(outcome, label, expression, file, line);
    }

    /// Passes iff `f` completes without panicking.
    pub fn assert_no_panic(
        &mut self,
        severity: Severity,
        label: &'static str,
        expression: &str,
        file: &'static str,
        line: u32,
        f: impl FnOnce(),
    ) {
        if self.config.no_throw {
            return;
        }
        let outcome = assertion::evaluate_no_panic(severity, f);
        self.process(outcome, label, expression, file, line);
    }
}

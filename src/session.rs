//! Session orchestration: filtering, the per-case loop, and the exit status.
//!
//! A [`Session`] owns a populated registry plus the run configuration. It
//! compiles the filter patterns up front (rejecting bad patterns before any
//! test runs), then either lists the selected cases or runs each one through
//! the replay loop, aggregating [`RunStats`] along the way.
//!
//! While a run is in progress the default panic hook is replaced with a
//! silent one: every assertion failure at require severity unwinds, and the
//! stock hook would spam stderr with backtrace notices for panics the engine
//! catches deliberately. The previous hook is restored before `run` returns,
//! crash or no crash.

use std::panic;

use serde::Serialize;

use crate::config::SessionConfig;
use crate::errors::ConfigError;
use crate::filter::TestFilter;
use crate::registry::TestRegistry;
use crate::report::Reporter;
use crate::runner;

/// Aggregate counters for one run.
///
/// An assertion counts as failed according to its recorded outcome, warn
/// severity included; a case counts as failed when any of its assertions
/// failed or its body crashed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub cases: usize,
    pub cases_failed: usize,
    pub assertions: usize,
    pub assertions_failed: usize,
}

/// One configured test run over a populated registry.
pub struct Session {
    config: SessionConfig,
    filter: TestFilter,
    registry: TestRegistry,
    stats: RunStats,
}

impl Session {
    /// Compiles the configuration's filter patterns; an invalid or empty
    /// pattern fails here, before anything executes.
    pub fn new(registry: TestRegistry, config: SessionConfig) -> Result<Self, ConfigError> {
        let filter = config.build_filter()?;
        Ok(Self {
            config,
            filter,
            registry,
            stats: RunStats::default(),
        })
    }

    /// Whether the configuration asks for a query (listing) rather than a
    /// run; hosts embedding the engine can use this to skip their own work
    /// after `run` returns.
    pub fn should_exit(&self) -> bool {
        self.config.list_only
    }

    /// Statistics accumulated so far (complete after [`run`](Self::run)).
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Runs (or lists) every registered case the filter selects and returns
    /// the process exit status: 0 for a clean run, 1 for any failure, and
    /// always 0 under `no_exit_code`.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> i32 {
        let selected: Vec<_> = self.registry.matching(&self.filter);

        if self.config.list_only {
            for desc in &selected {
                reporter.test_listed(desc);
            }
            return self.exit_status(selected.is_empty());
        }

        let matched_none = selected.is_empty();
        reporter.run_started(selected.len());

        let hook_guard = RestorePanicHook(Some(panic::take_hook()));
        panic::set_hook(Box::new(|_| {}));

        for desc in selected {
            reporter.test_started(desc);
            let report = runner::run_case(desc, &self.config, &mut self.stats, reporter);
            self.stats.cases += 1;
            if report.failed {
                self.stats.cases_failed += 1;
            }
            reporter.test_finished(desc, &report);
        }

        drop(hook_guard);

        reporter.run_finished(&self.stats);
        self.exit_status(matched_none)
    }

    fn exit_status(&self, matched_none: bool) -> i32 {
        if self.config.no_exit_code {
            return 0;
        }
        if matched_none && self.config.fail_on_empty {
            return 1;
        }
        if self.stats.cases_failed > 0 || self.stats.assertions_failed > 0 {
            1
        } else {
            0
        }
    }
}

/// Puts the host's panic hook back when dropped, so a panic escaping a
/// reporter callback cannot leak the silent hook into the host process.
struct RestorePanicHook(Option<Box<dyn Fn(&panic::PanicHookInfo<'_>) + Send + Sync + 'static>>);

impl Drop for RestorePanicHook {
    fn drop(&mut self) {
        if let Some(hook) = self.0.take() {
            panic::set_hook(hook);
        }
    }
}

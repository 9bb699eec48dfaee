//! Shared recording reporter for the integration tests.

#![allow(dead_code)]

use ramify::{AssertionEvent, CaseReport, Reporter, RunStats, SubcaseSignature, TestDescriptor};

/// One assertion as the engine reported it.
pub struct RecordedAssertion {
    pub label: &'static str,
    pub expression: String,
    pub passed: bool,
    pub decomposition: String,
    /// Subcase names active when the assertion ran, outermost first.
    pub path: Vec<String>,
}

/// Captures every event in order so tests can assert on the exact sequence.
#[derive(Default)]
pub struct RecordingReporter {
    pub started: Vec<String>,
    pub listed: Vec<String>,
    /// One entry per actual subcase entry, as a "/"-joined path.
    pub subcases: Vec<String>,
    pub assertions: Vec<RecordedAssertion>,
    /// (test name, replays, failed, crash message) per finished test.
    pub finished: Vec<(String, usize, bool, Option<String>)>,
    pub final_stats: Option<RunStats>,
}

fn join_path(path: &[SubcaseSignature]) -> String {
    path.iter().map(|s| s.name).collect::<Vec<_>>().join("/")
}

impl Reporter for RecordingReporter {
    fn test_started(&mut self, desc: &TestDescriptor) {
        self.started.push(desc.name.clone());
    }

    fn test_listed(&mut self, desc: &TestDescriptor) {
        self.listed.push(desc.name.clone());
    }

    fn subcase_entered(&mut self, _desc: &TestDescriptor, path: &[SubcaseSignature]) {
        self.subcases.push(join_path(path));
    }

    fn assertion(&mut self, event: &AssertionEvent<'_>) {
        self.assertions.push(RecordedAssertion {
            label: event.label,
            expression: event.expression.to_string(),
            passed: event.outcome.passed,
            decomposition: event.outcome.decomposition.clone(),
            path: event.path.iter().map(|s| s.name.to_string()).collect(),
        });
    }

    fn test_finished(&mut self, desc: &TestDescriptor, report: &CaseReport) {
        self.finished.push((
            desc.name.clone(),
            report.replays,
            report.failed,
            report.crashed.clone(),
        ));
    }

    fn run_finished(&mut self, stats: &RunStats) {
        self.final_stats = Some(stats.clone());
    }
}

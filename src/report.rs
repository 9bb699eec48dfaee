//! Reporting: the engine-to-reporter event surface and the two bundled
//! reporters.
//!
//! The engine itself performs no console formatting. Every assertion and
//! every test start/end is exposed through the [`Reporter`] trait; hosts can
//! plug in their own implementation or use [`ConsoleReporter`] (colored,
//! human-oriented) or [`JsonReporter`] (machine-oriented).

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::assertion::AssertionOutcome;
use crate::registry::TestDescriptor;
use crate::runner::CaseReport;
use crate::session::RunStats;
use crate::subcase::SubcaseSignature;

/// Everything a reporter learns about one evaluated assertion.
pub struct AssertionEvent<'a> {
    pub descriptor: &'a TestDescriptor,
    /// Subcase chain active when the assertion ran, outermost first.
    pub path: &'a [SubcaseSignature],
    pub outcome: &'a AssertionOutcome,
    /// Label of the macro form, e.g. `CHECK_EQ`.
    pub label: &'static str,
    /// Source text of the asserted expression.
    pub expression: &'a str,
    pub file: &'static str,
    pub line: u32,
}

/// Receives run/test/subcase/assertion events.
///
/// All methods have empty defaults so implementations only override what they
/// render. Failing assertions are always delivered; passing ones only when
/// the session was configured with `success`.
pub trait Reporter {
    fn run_started(&mut self, _total: usize) {}
    fn test_started(&mut self, _desc: &TestDescriptor) {}
    fn test_listed(&mut self, _desc: &TestDescriptor) {}
    fn subcase_entered(&mut self, _desc: &TestDescriptor, _path: &[SubcaseSignature]) {}
    fn assertion(&mut self, _event: &AssertionEvent<'_>) {}
    fn test_finished(&mut self, _desc: &TestDescriptor, _report: &CaseReport) {}
    fn run_finished(&mut self, _stats: &RunStats) {}
}

// ============================================================================
// CONSOLE REPORTER
// ============================================================================

/// Human-oriented reporter writing colored output to stdout.
pub struct ConsoleReporter {
    stream: StandardStream,
}

impl ConsoleReporter {
    /// Auto-detects color support on stdout.
    pub fn new() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::with_choice(choice)
    }

    pub fn with_choice(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    fn colored(&mut self, text: &str, color: Color) {
        let _ = self.stream.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = write!(self.stream, "{}", text);
        let _ = self.stream.reset();
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.stream, "{}", text);
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn run_started(&mut self, total: usize) {
        self.line(&format!("running {} test cases", total));
    }

    fn test_listed(&mut self, desc: &TestDescriptor) {
        if desc.suite.is_empty() {
            self.line(&desc.name);
        } else {
            self.line(&format!("{}::{}", desc.suite, desc.name));
        }
    }

    fn assertion(&mut self, event: &AssertionEvent<'_>) {
        if event.outcome.passed {
            self.colored("ok", Color::Green);
            let _ = writeln!(
                self.stream,
                ": {}:{}: {}( {} )",
                event.file, event.line, event.label, event.expression
            );
            return;
        }
        self.colored("failed", Color::Red);
        let _ = writeln!(
            self.stream,
            ": {}:{}: {}( {} )",
            event.file, event.line, event.label, event.expression
        );
        self.line(&format!("  values: {}", event.outcome.decomposition));
        if !event.path.is_empty() {
            let chain: Vec<&str> = event.path.iter().map(|s| s.name).collect();
            self.line(&format!("  in subcase: {}", chain.join(" > ")));
        }
    }

    fn test_finished(&mut self, desc: &TestDescriptor, report: &CaseReport) {
        let name = if desc.suite.is_empty() {
            desc.name.clone()
        } else {
            format!("{}::{}", desc.suite, desc.name)
        };
        match &report.crashed {
            Some(message) => {
                self.colored("CRASH", Color::Red);
                self.line(&format!(": {} [{}] ({})", name, desc.file, message));
            }
            None if report.failed => {
                self.colored("FAIL", Color::Red);
                self.line(&format!(": {} [{}]", name, desc.file));
            }
            None => {
                self.colored("PASS", Color::Green);
                self.line(&format!(": {} [{}]", name, desc.file));
            }
        }
    }

    fn run_finished(&mut self, stats: &RunStats) {
        let _ = writeln!(self.stream);
        let _ = write!(
            self.stream,
            "test cases: {} | assertions: {} | ",
            stats.cases, stats.assertions
        );
        if stats.cases_failed == 0 && stats.assertions_failed == 0 {
            self.colored("all passed", Color::Green);
        } else {
            self.colored(
                &format!(
                    "{} cases failed, {} assertions failed",
                    stats.cases_failed, stats.assertions_failed
                ),
                Color::Red,
            );
        }
        let _ = writeln!(self.stream);
    }
}

// ============================================================================
// JSON REPORTER
// ============================================================================

/// Machine-oriented reporter: buffers events, emits one JSON document at the
/// end of the run.
pub struct JsonReporter<W: Write = io::Stdout> {
    events: Vec<serde_json::Value>,
    writer: W,
}

impl JsonReporter<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for JsonReporter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            events: Vec::new(),
            writer,
        }
    }

    /// Recovers the writer, e.g. to inspect a buffered document.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn test_listed(&mut self, desc: &TestDescriptor) {
        self.events.push(serde_json::json!({
            "event": "listed",
            "suite": desc.suite,
            "name": desc.name,
            "file": desc.file,
            "line": desc.line,
        }));
    }

    fn assertion(&mut self, event: &AssertionEvent<'_>) {
        let path: Vec<&str> = event.path.iter().map(|s| s.name).collect();
        self.events.push(serde_json::json!({
            "event": "assertion",
            "suite": event.descriptor.suite,
            "test": event.descriptor.name,
            "subcases": path,
            "label": event.label,
            "expression": event.expression,
            "file": event.file,
            "line": event.line,
            "passed": event.outcome.passed,
            "severity": event.outcome.severity,
            "decomposition": event.outcome.decomposition,
            "panicked": event.outcome.panicked,
        }));
    }

    fn test_finished(&mut self, desc: &TestDescriptor, report: &CaseReport) {
        self.events.push(serde_json::json!({
            "event": "test",
            "suite": desc.suite,
            "name": desc.name,
            "file": desc.file,
            "line": desc.line,
            "replays": report.replays,
            "failed": report.failed,
            "crashed": report.crashed,
        }));
    }

    fn run_finished(&mut self, stats: &RunStats) {
        let document = serde_json::json!({
            "events": self.events,
            "stats": stats,
        });
        if let Ok(text) = serde_json::to_string_pretty(&document) {
            let _ = writeln!(self.writer, "{}", text);
        }
    }
}

/// Silent reporter for embedding and for exercising the engine in tests.
#[derive(Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

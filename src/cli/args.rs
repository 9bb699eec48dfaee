//! Defines the command-line arguments for a ramify test runner binary.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure. Hosts call
//! `RunnerArgs::parse()` (or `parse_from` when the test runner shares a
//! binary with other flags) and convert the result into a
//! [`SessionConfig`](crate::config::SessionConfig).

use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;

use crate::config::SessionConfig;
use crate::report::{ConsoleReporter, JsonReporter, Reporter};

/// The runner's argument structure.
///
/// Filter flags are repeatable; each occurrence adds one glob pattern
/// (`*` matches any run, `?` any single character).
#[derive(Debug, Parser)]
#[command(
    name = "ramify",
    version,
    about = "In-process test runner with subcases and expression decomposition."
)]
pub struct RunnerArgs {
    /// Run only test cases whose name matches the pattern.
    #[arg(long = "test-case", value_name = "PATTERN")]
    pub test_case: Vec<String>,

    /// Skip test cases whose name matches the pattern.
    #[arg(long = "test-case-exclude", value_name = "PATTERN")]
    pub test_case_exclude: Vec<String>,

    /// Run only test cases whose suite matches the pattern.
    #[arg(long = "test-suite", value_name = "PATTERN")]
    pub test_suite: Vec<String>,

    /// Skip test cases whose suite matches the pattern.
    #[arg(long = "test-suite-exclude", value_name = "PATTERN")]
    pub test_suite_exclude: Vec<String>,

    /// Run only test cases registered from a matching source file.
    #[arg(long = "source-file", value_name = "PATTERN")]
    pub source_file: Vec<String>,

    /// Skip test cases registered from a matching source file.
    #[arg(long = "source-file-exclude", value_name = "PATTERN")]
    pub source_file_exclude: Vec<String>,

    /// Report passing assertions as well as failing ones.
    #[arg(long)]
    pub success: bool,

    /// Disable unwinding: require downgrades to check and panic-expectation
    /// assertions become no-ops.
    #[arg(long = "no-throw")]
    pub no_throw: bool,

    /// Never break into an attached debugger on failure.
    #[arg(long = "no-breaks")]
    pub no_breaks: bool,

    /// Always exit 0, even when tests fail.
    #[arg(long = "no-exit-code")]
    pub no_exit_code: bool,

    /// Exit 1 when the filters select no test cases at all.
    #[arg(long = "fail-on-empty")]
    pub fail_on_empty: bool,

    /// List the selected test cases instead of running them.
    #[arg(long = "list-test-cases")]
    pub list_test_cases: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReporterKind::Console)]
    pub reporter: ReporterKind,

    /// Disable colored console output.
    #[arg(long = "no-colors")]
    pub no_colors: bool,
}

/// Which bundled reporter renders the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReporterKind {
    /// Human-oriented colored output.
    Console,
    /// One JSON document on stdout at the end of the run.
    Json,
}

impl RunnerArgs {
    /// Builds the reporter the arguments select.
    pub fn build_reporter(&self) -> Box<dyn Reporter> {
        match self.reporter {
            ReporterKind::Json => Box::new(JsonReporter::new()),
            ReporterKind::Console if self.no_colors => {
                Box::new(ConsoleReporter::with_choice(ColorChoice::Never))
            }
            ReporterKind::Console => Box::new(ConsoleReporter::new()),
        }
    }

    /// Converts the parsed arguments into an engine configuration.
    pub fn into_config(self) -> SessionConfig {
        SessionConfig {
            name_filters: self.test_case,
            name_excludes: self.test_case_exclude,
            suite_filters: self.test_suite,
            suite_excludes: self.test_suite_exclude,
            file_filters: self.source_file,
            file_excludes: self.source_file_exclude,
            success: self.success,
            no_throw: self.no_throw,
            no_breaks: self.no_breaks,
            no_exit_code: self.no_exit_code,
            fail_on_empty: self.fail_on_empty,
            list_only: self.list_test_cases,
        }
    }
}

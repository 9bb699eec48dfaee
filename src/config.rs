//! Session configuration.
//!
//! A [`SessionConfig`] is assembled by the host (usually from the CLI, see
//! [`crate::cli`]), validated once by [`SessionConfig::build_filter`], and
//! immutable for the rest of the run.

use serde::Serialize;

use crate::errors::ConfigError;
use crate::filter::{compile_patterns, TestFilter};

/// Immutable-after-setup run configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionConfig {
    /// Glob inclusion patterns over suite names.
    pub suite_filters: Vec<String>,
    pub suite_excludes: Vec<String>,
    /// Glob inclusion patterns over test names.
    pub name_filters: Vec<String>,
    pub name_excludes: Vec<String>,
    /// Glob inclusion patterns over source files.
    pub file_filters: Vec<String>,
    pub file_excludes: Vec<String>,

    /// Report successful assertions too, not only failures.
    pub success: bool,
    /// Panic-expectation assertions become no-ops and require-severity
    /// failures no longer abort the test body (downgraded to check routing).
    pub no_throw: bool,
    /// Never break into an attached debugger.
    pub no_breaks: bool,
    /// Always report success through the exit status.
    pub no_exit_code: bool,
    /// Non-zero exit status when zero test cases matched the filters.
    pub fail_on_empty: bool,
    /// List the selected test cases instead of running them; the session's
    /// `should_exit` answers true so hosts skip their own main logic.
    pub list_only: bool,
}

impl SessionConfig {
    /// Compiles the six pattern lists. This is the configuration validation
    /// step: it runs before any test executes, and a bad pattern rejects the
    /// whole configuration.
    pub fn build_filter(&self) -> Result<TestFilter, ConfigError> {
        Ok(TestFilter {
            suite_include: compile_patterns(&self.suite_filters)?,
            suite_exclude: compile_patterns(&self.suite_excludes)?,
            name_include: compile_patterns(&self.name_filters)?,
            name_exclude: compile_patterns(&self.name_excludes)?,
            file_include: compile_patterns(&self.file_filters)?,
            file_exclude: compile_patterns(&self.file_excludes)?,
        })
    }
}

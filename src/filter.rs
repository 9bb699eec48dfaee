//! Glob-style filtering of test descriptors.
//!
//! Filter patterns understand `*` (any sequence) and `?` (any single
//! character); everything else matches literally. Patterns are compiled once
//! into anchored regexes and applied over three independent dimensions -
//! suite name, test name, and source file. Within a dimension a descriptor
//! passes when it matches at least one inclusion pattern (or the dimension
//! has none) and no exclusion pattern.

use regex::Regex;

use crate::errors::ConfigError;
use crate::registry::TestDescriptor;

/// One compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a glob pattern. Empty patterns are rejected: they would
    /// silently match nothing and usually indicate a mangled command line.
    pub fn new(glob: &str) -> Result<Self, ConfigError> {
        if glob.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        let regex =
            Regex::new(&glob_to_regex(glob)).map_err(|source| ConfigError::InvalidPattern {
                pattern: glob.to_string(),
                source,
            })?;
        Ok(Self {
            raw: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    for ch in glob.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    out
}

/// Include/exclude pattern sets over suite, name, and source file.
#[derive(Debug, Clone, Default)]
pub struct TestFilter {
    pub suite_include: Vec<Pattern>,
    pub suite_exclude: Vec<Pattern>,
    pub name_include: Vec<Pattern>,
    pub name_exclude: Vec<Pattern>,
    pub file_include: Vec<Pattern>,
    pub file_exclude: Vec<Pattern>,
}

impl TestFilter {
    /// True when the descriptor passes every dimension.
    pub fn allows(&self, desc: &TestDescriptor) -> bool {
        dimension_allows(&self.suite_include, &self.suite_exclude, &desc.suite)
            && dimension_allows(&self.name_include, &self.name_exclude, &desc.name)
            && dimension_allows(&self.file_include, &self.file_exclude, desc.file)
    }
}

fn dimension_allows(include: &[Pattern], exclude: &[Pattern], text: &str) -> bool {
    if !include.is_empty() && !include.iter().any(|p| p.matches(text)) {
        return false;
    }
    !exclude.iter().any(|p| p.matches(text))
}

/// Compiles a list of raw glob strings; the first bad pattern aborts.
pub fn compile_patterns(globs: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    globs.iter().map(|g| Pattern::new(g)).collect()
}

//! Error taxonomy for configuration and session setup.
//!
//! Assertion failures are not errors in this taxonomy: non-fatal ones are
//! recorded in the run statistics and fatal ones travel as the typed unwind
//! signal [`crate::assertion::FatalSignal`]. Everything that can go wrong
//! before a run starts is an ordinary `Result` carrying one of these
//! variants, reported to the caller before any test executes.

use thiserror::Error;

/// Rejected session configuration. No partial run occurs after one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid filter pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("empty filter pattern")]
    EmptyPattern,
}

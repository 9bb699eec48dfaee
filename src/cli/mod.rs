//! Command-line surface for binaries embedding the engine.
//!
//! The engine is a library; a host binary registers its tests, parses
//! [`RunnerArgs`](args::RunnerArgs) from its own `main`, and hands the
//! resulting configuration to a [`Session`](crate::session::Session).

pub mod args;

pub use args::{ReporterKind, RunnerArgs};

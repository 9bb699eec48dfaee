//! ramify: an in-process test-execution engine with subcases, expression
//! decomposition, and three assertion severities.
//!
//! A host binary builds a [`TestRegistry`], registers bodies with
//! [`test_case!`], and runs a [`Session`]. Inside a body, [`subcase!`]
//! declares branch points; the session replays the body until every leaf
//! subcase path has executed exactly once, re-running shared setup on each
//! replay. Assertions come in warn / check / require severities: warn and
//! check record failures and continue, require aborts the current replay.
//!
//! ```no_run
//! use ramify::{check, subcase, test_case, Session, SessionConfig, TestRegistry};
//!
//! let mut registry = TestRegistry::new();
//! test_case!(registry, "vec push", |ctx| {
//!     let mut v = vec![1];
//!     subcase!(ctx, "push one", {
//!         v.push(2);
//!         check!(ctx, (v.len()) == 2);
//!     });
//!     subcase!(ctx, "push two", {
//!         v.push(2);
//!         v.push(3);
//!         check!(ctx, (v.len()) == 3);
//!     });
//! });
//!
//! let mut session = Session::new(registry, SessionConfig::default()).unwrap();
//! let mut reporter = ramify::ConsoleReporter::new();
//! std::process::exit(session.run(&mut reporter));
//! ```

pub use crate::approx::{approx, Approx};
pub use crate::assertion::{AssertionOutcome, BinaryOp, Severity};
pub use crate::config::SessionConfig;
pub use crate::context::TestContext;
pub use crate::errors::ConfigError;
pub use crate::registry::{CaseId, TestDescriptor, TestRegistry};
pub use crate::render::{Opaque, Render};
pub use crate::report::{AssertionEvent, ConsoleReporter, JsonReporter, NullReporter, Reporter};
pub use crate::runner::CaseReport;
pub use crate::session::{RunStats, Session};
pub use crate::subcase::SubcaseSignature;

pub mod approx;
pub mod assertion;
pub mod cli;
pub mod config;
pub mod context;
pub mod debugger;
pub mod errors;
pub mod filter;
pub mod macros;
pub mod registry;
pub mod render;
pub mod report;
pub mod runner;
pub mod session;
pub mod subcase;

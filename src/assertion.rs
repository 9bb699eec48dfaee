//! The assertion engine: comparison, decomposition, and outcome
//! classification.
//!
//! Two evaluation paths produce identical [`AssertionOutcome`] semantics:
//!
//! 1. **Capture path** - [`capture`] wraps the left operand in a
//!    [`Captured`] builder; the comparison method supplies the operator and
//!    right operand. This is the general form behind `check!(ctx, a == b)`.
//! 2. **Typed path** - the `compare_*` functions take both already-typed
//!    operands directly, skipping the intermediate builder. This is the form
//!    behind the `check_eq!`-style macros and exists purely to reduce
//!    compiled overhead, never to change behavior.
//!
//! The engine computes outcomes only. Routing a failing outcome - counting
//! it, reporting it, raising [`FatalSignal`] for require severity - is the
//! job of [`crate::context::TestContext`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::render::Render;

// ============================================================================
// SEVERITY AND OPERATORS
// ============================================================================

/// How a failing assertion is routed.
///
/// `Warn` and `Check` record the failure and continue; `Require` additionally
/// aborts the remainder of the current test/subcase body via [`FatalSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warn,
    Check,
    Require,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warn => "WARN",
            Severity::Check => "CHECK",
            Severity::Require => "REQUIRE",
        }
    }
}

/// The six comparison operators assertions understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// The transient result of evaluating one assertion.
///
/// `panicked` records that evaluating or stringifying the expression itself
/// panicked (distinct from the panic-expectation assertion family, where a
/// panic may be the passing condition).
#[derive(Debug, Clone, Serialize)]
pub struct AssertionOutcome {
    pub passed: bool,
    pub decomposition: String,
    pub severity: Severity,
    pub panicked: bool,
}

/// Unwind payload raised when a require-severity assertion fails.
///
/// This is deliberate control flow, not an error value: it must cross
/// arbitrarily deep nested subcase frames without each frame forwarding it,
/// and is consumed only at the runner's replay boundary. Leaking it past the
/// session orchestrator is a defect.
#[derive(Debug)]
pub struct FatalSignal;

// ============================================================================
// TYPED COMPARISON PATH
// ============================================================================

/// Equality assertions for types that only supply `PartialEq`.
pub fn compare_eq<L, R>(severity: Severity, negated: bool, lhs: &L, rhs: &R) -> AssertionOutcome
where
    L: PartialEq<R> + Render,
    R: Render,
{
    let op = if negated { BinaryOp::Ne } else { BinaryOp::Eq };
    guarded(severity, || {
        let passed = if negated { lhs != rhs } else { lhs == rhs };
        (passed, decompose_binary(lhs, op, rhs))
    })
}

/// Ordered assertions; handles all six operators.
///
/// `<=` and `>=` are synthesized as a not-equal check followed by the strict
/// comparison so that types supplying only equality and strict ordering
/// remain usable. This exact policy is load-bearing for partially ordered
/// types and must not be replaced with native `<=`/`>=`.
pub fn compare_ord<L, R>(severity: Severity, op: BinaryOp, lhs: &L, rhs: &R) -> AssertionOutcome
where
    L: PartialOrd<R> + Render,
    R: Render,
{
    guarded(severity, || {
        let passed = match op {
            BinaryOp::Eq => lhs == rhs,
            BinaryOp::Ne => lhs != rhs,
            BinaryOp::Lt => lhs < rhs,
            BinaryOp::Gt => lhs > rhs,
            BinaryOp::Le => {
                if lhs != rhs {
                    lhs < rhs
                } else {
                    true
                }
            }
            BinaryOp::Ge => {
                if lhs != rhs {
                    lhs > rhs
                } else {
                    true
                }
            }
        };
        (passed, decompose_binary(lhs, op, rhs))
    })
}

/// Unary assertions: a boolean condition, optionally negated.
pub fn evaluate_unary(severity: Severity, value: bool, negated: bool) -> AssertionOutcome {
    AssertionOutcome {
        passed: value != negated,
        decomposition: value.render(),
        severity,
        panicked: false,
    }
}

// ============================================================================
// CAPTURE PATH
// ============================================================================

/// Starts the capture evaluation path with the left operand.
pub fn capture<L: Render>(severity: Severity, lhs: L) -> Captured<L> {
    Captured { severity, lhs }
}

/// A captured left operand awaiting an operator and right operand.
///
/// Each comparison method consumes the builder and yields the finished
/// outcome; there is no deferred evaluation beyond holding the left value.
pub struct Captured<L> {
    severity: Severity,
    lhs: L,
}

impl<L: Render> Captured<L> {
    pub fn eq<R: Render>(self, rhs: R) -> AssertionOutcome
    where
        L: PartialEq<R>,
    {
        compare_eq(self.severity, false, &self.lhs, &rhs)
    }

    pub fn ne<R: Render>(self, rhs: R) -> AssertionOutcome
    where
        L: PartialEq<R>,
    {
        compare_eq(self.severity, true, &self.lhs, &rhs)
    }

    pub fn lt<R: Render>(self, rhs: R) -> AssertionOutcome
    where
        L: PartialOrd<R>,
    {
        compare_ord(self.severity, BinaryOp::Lt, &self.lhs, &rhs)
    }

    pub fn le<R: Render>(self, rhs: R) -> AssertionOutcome
    where
        L: PartialOrd<R>,
    {
        compare_ord(self.severity, BinaryOp::Le, &self.lhs, &rhs)
    }

    pub fn gt<R: Render>(self, rhs: R) -> AssertionOutcome
    where
        L: PartialOrd<R>,
    {
        compare_ord(self.severity, BinaryOp::Gt, &self.lhs, &rhs)
    }

    pub fn ge<R: Render>(self, rhs: R) -> AssertionOutcome
    where
        L: PartialOrd<R>,
    {
        compare_ord(self.severity, BinaryOp::Ge, &self.lhs, &rhs)
    }
}

// ============================================================================
// PANIC-EXPECTATION FAMILY
// ============================================================================

/// Passes iff the guarded closure panics.
pub fn evaluate_panics(severity: Severity, f: impl FnOnce()) -> AssertionOutcome {
    let observed = observe(f);
    let panicked = observed.is_some();
    AssertionOutcome {
        passed: panicked,
        decomposition: match observed {
            Some(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
            None => "did not panic".to_string(),
        },
        severity,
        panicked,
    }
}

/// Passes iff the guarded closure panics with a payload of type `E`.
pub fn evaluate_panics_as<E: Any>(
    severity: Severity,
    type_name: &str,
    f: impl FnOnce(),
) -> AssertionOutcome {
    let observed = observe(f);
    let panicked = observed.is_some();
    let (passed, decomposition) = match observed {
        Some(payload) if payload.is::<E>() => (true, format!("panicked as {}", type_name)),
        Some(payload) => (
            false,
            format!(
                "panicked with a different payload: {}",
                panic_message(payload.as_ref())
            ),
        ),
        None => (false, "did not panic".to_string()),
    };
    AssertionOutcome {
        passed,
        decomposition,
        severity,
        panicked,
    }
}

/// Passes iff the guarded closure completes normally.
pub fn evaluate_no_panic(severity: Severity, f: impl FnOnce()) -> AssertionOutcome {
    let observed = observe(f);
    let panicked = observed.is_some();
    AssertionOutcome {
        passed: !panicked,
        decomposition: match observed {
            Some(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
            None => "did not panic".to_string(),
        },
        severity,
        panicked,
    }
}

/// Extracts a human-readable message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ============================================================================
// INTERNAL
// ============================================================================

fn decompose_binary<L: Render, R: Render>(lhs: &L, op: BinaryOp, rhs: &R) -> String {
    format!("{} {} {}", lhs.render(), op.symbol(), rhs.render())
}

/// Runs comparison + stringification; a panic inside either becomes a failed
/// outcome marked `panicked` instead of propagating. [`FatalSignal`] is
/// always re-raised: it belongs to the replay boundary, not here.
fn guarded(severity: Severity, f: impl FnOnce() -> (bool, String)) -> AssertionOutcome {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok((passed, decomposition)) => AssertionOutcome {
            passed,
            decomposition,
            severity,
            panicked: false,
        },
        Err(payload) => {
            if payload.is::<FatalSignal>() {
                panic::resume_unwind(payload);
            }
            AssertionOutcome {
                passed: false,
                decomposition: format!(
                    "panicked while evaluating: {}",
                    panic_message(payload.as_ref())
                ),
                severity,
                panicked: true,
            }
        }
    }
}

/// Runs the guarded closure of a panic-expectation assertion, capturing the
/// payload. [`FatalSignal`] is re-raised, never treated as a user panic.
fn observe(f: impl FnOnce()) -> Option<Box<dyn Any + Send>> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => {
            if payload.is::<FatalSignal>() {
                panic::resume_unwind(payload);
            }
            Some(payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_pass_with_decomposition() {
        let outcome = compare_eq(Severity::Check, false, &3, &3);
        assert!(outcome.passed);
        assert_eq!(outcome.decomposition, "3 == 3");
    }

    #[test]
    fn unequal_values_fail_with_decomposition() {
        let outcome = compare_eq(Severity::Check, false, &3, &4);
        assert!(!outcome.passed);
        assert_eq!(outcome.decomposition, "3 == 4");
    }

    #[test]
    fn capture_and_typed_paths_agree() {
        let fast = compare_ord(Severity::Require, BinaryOp::Le, &2, &5);
        let captured = capture(Severity::Require, 2).le(5);
        assert_eq!(fast.passed, captured.passed);
        assert_eq!(fast.decomposition, captured.decomposition);
        assert_eq!(fast.decomposition, "2 <= 5");
    }

    #[test]
    fn le_equality_branch_answers_without_ordering() {
        // The synthesized form short-circuits on equality.
        let outcome = compare_ord(Severity::Check, BinaryOp::Le, &7, &7);
        assert!(outcome.passed);
    }

    #[test]
    fn le_on_nan_preserves_source_policy() {
        // NaN != NaN, so the strict compare decides; NaN < NaN is false.
        let outcome = compare_ord(Severity::Check, BinaryOp::Le, &f64::NAN, &f64::NAN);
        assert!(!outcome.passed);
    }

    #[test]
    fn negated_unary_inverts() {
        assert!(evaluate_unary(Severity::Check, false, true).passed);
        assert!(!evaluate_unary(Severity::Check, true, true).passed);
        assert_eq!(
            evaluate_unary(Severity::Warn, true, false).decomposition,
            "true"
        );
    }

    #[test]
    fn panics_family_classifies_payloads() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let outcome = evaluate_panics(Severity::Check, || panic!("boom"));
        assert!(outcome.passed);
        assert!(outcome.decomposition.contains("boom"));

        let outcome = evaluate_panics(Severity::Check, || {});
        assert!(!outcome.passed);

        // The argument must not be const-evaluable: rustc folds constant
        // format args into a `&str` payload, and this branch needs a `String`.
        let outcome = evaluate_panics_as::<String>(Severity::Check, "String", || {
            panic!("typed {}", std::hint::black_box(1))
        });
        assert!(outcome.passed);

        let outcome = evaluate_panics_as::<u32>(Severity::Check, "u32", || panic!("str payload"));
        assert!(!outcome.passed);

        let outcome = evaluate_no_panic(Severity::Check, || {});
        assert!(outcome.passed);

        std::panic::set_hook(hook);
    }
}

//! The user-facing macro surface.
//!
//! Three families, each at warn / check / require severity:
//!
//! * decomposing forms - `check!(ctx, a == b)` splits the comparison at the
//!   top-level operator and reports both operand values on failure;
//! * typed forms - `check_eq!(ctx, a, b)` and friends take the operands
//!   separately, skipping operator matching;
//! * panic expectations - `check_panics!`, `check_panics_as!`,
//!   `check_no_panic!` guard a closure instead of comparing values.
//!
//! The decomposing forms accept a single token tree on the left of the
//! operator, so compound left operands need parentheses:
//! `check!(ctx, (a + b) == c)`. The typed forms have no such restriction.
//!
//! `subcase!` and `test_case!` wire bodies into the walker and the registry;
//! the BDD aliases (`scenario!`, `given!`, `when!`, `then!`) are thin
//! renames over those with a readable prefix baked into the name.

// ============================================================================
// REGISTRATION AND SUBCASES
// ============================================================================

/// Registers a test case body with a registry, capturing the call site.
#[macro_export]
macro_rules! test_case {
    ($registry:expr, $name:expr, $body:expr $(,)?) => {
        $registry.add($name, file!(), line!(), $body)
    };
}

/// Declares a subcase block inside a test body.
///
/// The first argument must be the context binding itself; the block sees it
/// under the same name.
#[macro_export]
macro_rules! subcase {
    ($ctx:ident, $name:expr, $body:block) => {
        $ctx.subcase($name, file!(), line!(), |$ctx| $body)
    };
}

// ============================================================================
// DECOMPOSING ASSERTIONS
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __ramify_decompose {
    ($ctx:expr, $sev:ident, $label:expr, $lhs:tt == $rhs:expr) => {{
        let outcome =
            $crate::assertion::capture($crate::assertion::Severity::$sev, &$lhs).eq(&$rhs);
        $ctx.process(
            outcome,
            $label,
            concat!(stringify!($lhs), " == ", stringify!($rhs)),
            file!(),
            line!(),
        );
    }};
    ($ctx:expr, $sev:ident, $label:expr, $lhs:tt != $rhs:expr) => {{
        let outcome =
            $crate::assertion::capture($crate::assertion::Severity::$sev, &$lhs).ne(&$rhs);
        $ctx.process(
            outcome,
            $label,
            concat!(stringify!($lhs), " != ", stringify!($rhs)),
            file!(),
            line!(),
        );
    }};
    ($ctx:expr, $sev:ident, $label:expr, $lhs:tt <= $rhs:expr) => {{
        let outcome =
            $crate::assertion::capture($crate::assertion::Severity::$sev, &$lhs).le(&$rhs);
        $ctx.process(
            outcome,
            $label,
            concat!(stringify!($lhs), " <= ", stringify!($rhs)),
            file!(),
            line!(),
        );
    }};
    ($ctx:expr, $sev:ident, $label:expr, $lhs:tt >= $rhs:expr) => {{
        let outcome =
            $crate::assertion::capture($crate::assertion::Severity::$sev, &$lhs).ge(&$rhs);
        $ctx.process(
            outcome,
            $label,
            concat!(stringify!($lhs), " >= ", stringify!($rhs)),
            file!(),
            line!(),
        );
    }};
    ($ctx:expr, $sev:ident, $label:expr, $lhs:tt < $rhs:expr) => {{
        let outcome =
            $crate::assertion::capture($crate::assertion::Severity::$sev, &$lhs).lt(&$rhs);
        $ctx.process(
            outcome,
            $label,
            concat!(stringify!($lhs), " < ", stringify!($rhs)),
            file!(),
            line!(),
        );
    }};
    ($ctx:expr, $sev:ident, $label:expr, $lhs:tt > $rhs:expr) => {{
        let outcome =
            $crate::assertion::capture($crate::assertion::Severity::$sev, &$lhs).gt(&$rhs);
        $ctx.process(
            outcome,
            $label,
            concat!(stringify!($lhs), " > ", stringify!($rhs)),
            file!(),
            line!(),
        );
    }};
    ($ctx:expr, $sev:ident, $label:expr, $cond:expr) => {{
        let outcome =
            $crate::assertion::evaluate_unary($crate::assertion::Severity::$sev, $cond, false);
        $ctx.process(outcome, $label, stringify!($cond), file!(), line!());
    }};
}

/// Lowest-severity assertion: a failure is recorded and reported, execution
/// always continues.
///
/// Operand decomposition requires a single token tree left of the operator;
/// see [`check!`](crate::check) for the parenthesization rule.
#[macro_export]
macro_rules! warn {
    ($ctx:expr, $($expr:tt)+) => {
        $crate::__ramify_decompose!($ctx, Warn, "WARN", $($expr)+)
    };
}

/// Non-fatal assertion: a failure is recorded and the replay continues.
///
/// The comparison is decomposed only when the left operand is a single token
/// tree: `check!(ctx, x == 3)` reports `5 == 3`, but a compound left operand
/// like `v.len() == 3` is matched as one boolean expression and reports only
/// `false`. Parenthesize to get operand values back:
/// `check!(ctx, (v.len()) == 3)`. The typed forms (`check_eq!` and friends)
/// have no such restriction.
#[macro_export]
macro_rules! check {
    ($ctx:expr, $($expr:tt)+) => {
        $crate::__ramify_decompose!($ctx, Check, "CHECK", $($expr)+)
    };
}

/// Fatal assertion: a failure aborts the current replay.
///
/// Operand decomposition requires a single token tree left of the operator;
/// see [`check!`](crate::check) for the parenthesization rule.
#[macro_export]
macro_rules! require {
    ($ctx:expr, $($expr:tt)+) => {
        $crate::__ramify_decompose!($ctx, Require, "REQUIRE", $($expr)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ramify_unary_false {
    ($ctx:expr, $sev:ident, $label:expr, $cond:expr) => {{
        let outcome =
            $crate::assertion::evaluate_unary($crate::assertion::Severity::$sev, $cond, true);
        $ctx.process(outcome, $label, stringify!($cond), file!(), line!());
    }};
}

/// Passes when the expression is false; warn severity.
#[macro_export]
macro_rules! warn_false {
    ($ctx:expr, $cond:expr $(,)?) => {
        $crate::__ramify_unary_false!($ctx, Warn, "WARN_FALSE", $cond)
    };
}

/// Passes when the expression is false; check severity.
#[macro_export]
macro_rules! check_false {
    ($ctx:expr, $cond:expr $(,)?) => {
        $crate::__ramify_unary_false!($ctx, Check, "CHECK_FALSE", $cond)
    };
}

/// Passes when the expression is false; require severity.
#[macro_export]
macro_rules! require_false {
    ($ctx:expr, $cond:expr $(,)?) => {
        $crate::__ramify_unary_false!($ctx, Require, "REQUIRE_FALSE", $cond)
    };
}

// ============================================================================
// TYPED (FAST) ASSERTIONS
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __ramify_typed {
    ($ctx:expr, $sev:ident, $method:ident, $label:expr, $lhs:expr, $rhs:expr) => {{
        let outcome =
            $crate::assertion::capture($crate::assertion::Severity::$sev, &$lhs).$method(&$rhs);
        $ctx.process(
            outcome,
            $label,
            concat!(stringify!($lhs), ", ", stringify!($rhs)),
            file!(),
            line!(),
        );
    }};
}

/// Warn-severity equality.
#[macro_export]
macro_rules! warn_eq {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Warn, eq, "WARN_EQ", $lhs, $rhs)
    };
}

/// Warn-severity inequality.
#[macro_export]
macro_rules! warn_ne {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Warn, ne, "WARN_NE", $lhs, $rhs)
    };
}

/// Warn-severity less-than.
#[macro_export]
macro_rules! warn_lt {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Warn, lt, "WARN_LT", $lhs, $rhs)
    };
}

/// Warn-severity less-or-equal.
#[macro_export]
macro_rules! warn_le {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Warn, le, "WARN_LE", $lhs, $rhs)
    };
}

/// Warn-severity greater-than.
#[macro_export]
macro_rules! warn_gt {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Warn, gt, "WARN_GT", $lhs, $rhs)
    };
}

/// Warn-severity greater-or-equal.
#[macro_export]
macro_rules! warn_ge {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Warn, ge, "WARN_GE", $lhs, $rhs)
    };
}

/// Check-severity equality.
#[macro_export]
macro_rules! check_eq {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Check, eq, "CHECK_EQ", $lhs, $rhs)
    };
}

/// Check-severity inequality.
#[macro_export]
macro_rules! check_ne {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Check, ne, "CHECK_NE", $lhs, $rhs)
    };
}

/// Check-severity less-than.
#[macro_export]
macro_rules! check_lt {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Check, lt, "CHECK_LT", $lhs, $rhs)
    };
}

/// Check-severity less-or-equal.
#[macro_export]
macro_rules! check_le {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Check, le, "CHECK_LE", $lhs, $rhs)
    };
}

/// Check-severity greater-than.
#[macro_export]
macro_rules! check_gt {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Check, gt, "CHECK_GT", $lhs, $rhs)
    };
}

/// Check-severity greater-or-equal.
#[macro_export]
macro_rules! check_ge {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Check, ge, "CHECK_GE", $lhs, $rhs)
    };
}

/// Require-severity equality.
#[macro_export]
macro_rules! require_eq {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Require, eq, "REQUIRE_EQ", $lhs, $rhs)
    };
}

/// Require-severity inequality.
#[macro_export]
macro_rules! require_ne {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Require, ne, "REQUIRE_NE", $lhs, $rhs)
    };
}

/// Require-severity less-than.
#[macro_export]
macro_rules! require_lt {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Require, lt, "REQUIRE_LT", $lhs, $rhs)
    };
}

/// Require-severity less-or-equal.
#[macro_export]
macro_rules! require_le {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Require, le, "REQUIRE_LE", $lhs, $rhs)
    };
}

/// Require-severity greater-than.
#[macro_export]
macro_rules! require_gt {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Require, gt, "REQUIRE_GT", $lhs, $rhs)
    };
}

/// Require-severity greater-or-equal.
#[macro_export]
macro_rules! require_ge {
    ($ctx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::__ramify_typed!($ctx, Require, ge, "REQUIRE_GE", $lhs, $rhs)
    };
}

// ============================================================================
// PANIC EXPECTATIONS
// ============================================================================

/// Passes when the expression panics; warn severity.
#[macro_export]
macro_rules! warn_panics {
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.assert_panics(
            $crate::assertion::Severity::Warn,
            "WARN_PANICS",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression panics; check severity.
#[macro_export]
macro_rules! check_panics {
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.assert_panics(
            $crate::assertion::Severity::Check,
            "CHECK_PANICS",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression panics; require severity.
#[macro_export]
macro_rules! require_panics {
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.assert_panics(
            $crate::assertion::Severity::Require,
            "REQUIRE_PANICS",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression panics with a payload of the named type.
#[macro_export]
macro_rules! warn_panics_as {
    ($ctx:expr, $ty:ty, $body:expr $(,)?) => {
        $ctx.assert_panics_as::<$ty>(
            $crate::assertion::Severity::Warn,
            stringify!($ty),
            "WARN_PANICS_AS",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression panics with a payload of the named type.
#[macro_export]
macro_rules! check_panics_as {
    ($ctx:expr, $ty:ty, $body:expr $(,)?) => {
        $ctx.assert_panics_as::<$ty>(
            $crate::assertion::Severity::Check,
            stringify!($ty),
            "CHECK_PANICS_AS",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression panics with a payload of the named type.
#[macro_export]
macro_rules! require_panics_as {
    ($ctx:expr, $ty:ty, $body:expr $(,)?) => {
        $ctx.assert_panics_as::<$ty>(
            $crate::assertion::Severity::Require,
            stringify!($ty),
            "REQUIRE_PANICS_AS",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression completes without panicking; warn severity.
#[macro_export]
macro_rules! warn_no_panic {
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.assert_no_panic(
            $crate::assertion::Severity::Warn,
            "WARN_NO_PANIC",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression completes without panicking; check severity.
#[macro_export]
macro_rules! check_no_panic {
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.assert_no_panic(
            $crate::assertion::Severity::Check,
            "CHECK_NO_PANIC",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

/// Passes when the expression completes without panicking; require severity.
#[macro_export]
macro_rules! require_no_panic {
    ($ctx:expr, $body:expr $(,)?) => {
        $ctx.assert_no_panic(
            $crate::assertion::Severity::Require,
            "REQUIRE_NO_PANIC",
            stringify!($body),
            file!(),
            line!(),
            || {
                let _ = $body;
            },
        )
    };
}

// ============================================================================
// BDD ALIASES
// ============================================================================

/// `test_case!` with a "Scenario: " name prefix.
#[macro_export]
macro_rules! scenario {
    ($registry:expr, $name:expr, $body:expr $(,)?) => {
        $crate::test_case!($registry, concat!("Scenario: ", $name), $body)
    };
}

/// `subcase!` with a "given: " name prefix.
#[macro_export]
macro_rules! given {
    ($ctx:ident, $name:expr, $body:block) => {
        $crate::subcase!($ctx, concat!("given: ", $name), $body)
    };
}

/// `subcase!` with a "when: " name prefix.
#[macro_export]
macro_rules! when {
    ($ctx:ident, $name:expr, $body:block) => {
        $crate::subcase!($ctx, concat!("when: ", $name), $body)
    };
}

/// `subcase!` with an "and when: " name prefix.
#[macro_export]
macro_rules! and_when {
    ($ctx:ident, $name:expr, $body:block) => {
        $crate::subcase!($ctx, concat!("and when: ", $name), $body)
    };
}

/// `subcase!` with a "then: " name prefix.
#[macro_export]
macro_rules! then {
    ($ctx:ident, $name:expr, $body:block) => {
        $crate::subcase!($ctx, concat!("then: ", $name), $body)
    };
}

/// `subcase!` with an "and then: " name prefix.
#[macro_export]
macro_rules! and_then {
    ($ctx:ident, $name:expr, $body:block) => {
        $crate::subcase!($ctx, concat!("and then: ", $name), $body)
    };
}

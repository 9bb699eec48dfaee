//! Approximate floating-point equality targets for assertions.
//!
//! Comparing computed floats for exact equality is almost always wrong;
//! [`approx`] builds a target that compares equal to any `f64` within a
//! combined relative-and-absolute tolerance:
//!
//! ```text
//! |candidate - value| < epsilon * (scale + max(|candidate|, |value|))
//! ```
//!
//! Equality is implemented in both directions, so the target can sit on
//! either side of `==` or `!=` in an assertion, and it renders as
//! `Approx( value )` in decompositions.

use crate::render::Render;

/// An approximate comparison target with adjustable tolerance.
///
/// ```
/// use ramify::approx;
///
/// let sum = 0.1_f64 + 0.2;
/// assert!(sum == approx(0.3));
/// assert!(1.0_f64 == approx(1.1).epsilon(0.1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approx {
    value: f64,
    epsilon: f64,
    scale: f64,
}

/// Builds an [`Approx`] target with the default tolerance.
pub fn approx(value: f64) -> Approx {
    Approx::new(value)
}

impl Approx {
    /// Default tolerance: epsilon is 100 times the `f32` machine epsilon
    /// (loose enough to absorb accumulated rounding), scale is 1.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            epsilon: f32::EPSILON as f64 * 100.0,
            scale: 1.0,
        }
    }

    /// Replaces the relative tolerance factor.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Replaces the scale term. A scale of 0 makes the tolerance purely
    /// relative to the operand magnitudes.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    fn admits(&self, candidate: f64) -> bool {
        (candidate - self.value).abs()
            < self.epsilon * (self.scale + candidate.abs().max(self.value.abs()))
    }
}

impl PartialEq<f64> for Approx {
    fn eq(&self, other: &f64) -> bool {
        self.admits(*other)
    }
}

impl PartialEq<Approx> for f64 {
    fn eq(&self, other: &Approx) -> bool {
        other.admits(*self)
    }
}

impl Render for Approx {
    fn render(&self) -> String {
        format!("Approx( {} )", self.value.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorbs_accumulated_rounding() {
        let sum = 0.1_f64 + 0.2;
        assert!(sum != 0.3);
        assert!(sum == approx(0.3));
        assert!(approx(0.3) == sum);
    }

    #[test]
    fn rejects_genuinely_different_values() {
        assert!(1.0_f64 != approx(1.1));
        assert!(approx(1.1) != 1.0);
    }

    #[test]
    fn epsilon_widens_the_tolerance() {
        assert!(1.0_f64 != approx(1.1));
        assert!(1.0_f64 == approx(1.1).epsilon(0.1));
    }

    #[test]
    fn zero_scale_makes_the_tolerance_relative_only() {
        // With scale 0 the tolerance is proportional to the operand
        // magnitudes, so near zero almost nothing is admitted.
        assert!(1e-9_f64 != approx(0.0).scale(0.0));
        assert!(100.0_f64 == approx(100.0 + 1e-7).scale(0.0));
        // The default scale keeps an absolute floor for comparisons at zero.
        assert!(0.0_f64 == approx(0.0));
    }

    #[test]
    fn renders_with_the_wrapped_value() {
        assert_eq!(approx(0.25).render(), "Approx( 0.25 )");
    }
}

//! Value-to-text rendering for assertion decompositions.
//!
//! Assertions report their operands as text, e.g. `3 == 4`. The engine never
//! inspects operand types beyond this capability: anything that implements
//! [`Render`] can appear in an assertion. Types without a sensible textual
//! form can be wrapped in [`Opaque`], which renders as the fixed placeholder
//! `"{?}"` instead of failing.
//!
//! Rendering Invariant: `render` must be deterministic for identical input -
//! reported decompositions are part of the stable user-facing output.

use std::fmt;

/// Placeholder produced for values with no usable textual form.
pub const OPAQUE_PLACEHOLDER: &str = "{?}";

/// Converts a value to its display text for assertion decompositions.
///
/// Implemented out of the box for the primitive types, strings, references,
/// and `Option`s of renderable values. For your own types either implement
/// this directly or use [`crate::render_via_display!`] when a `Display`
/// implementation already exists.
pub trait Render {
    fn render(&self) -> String;
}

/// Wrapper that renders any value as [`OPAQUE_PLACEHOLDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Opaque<T>(pub T);

impl<T> Render for Opaque<T> {
    fn render(&self) -> String {
        OPAQUE_PLACEHOLDER.to_string()
    }
}

/// Implements [`Render`] for types that already implement `Display`.
#[macro_export]
macro_rules! render_via_display {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::render::Render for $t {
                fn render(&self) -> String {
                    ::std::string::ToString::to_string(self)
                }
            }
        )*
    };
}

render_via_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize, f32, f64, String
);

impl Render for str {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render> Render for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(v) => format!("Some({})", v.render()),
            None => "None".to_string(),
        }
    }
}

impl<T: Render> Render for Vec<T> {
    fn render(&self) -> String {
        render_sequence(self.iter())
    }
}

impl<T: Render> Render for [T] {
    fn render(&self) -> String {
        render_sequence(self.iter())
    }
}

fn render_sequence<'a, T: Render + 'a>(items: impl Iterator<Item = &'a T>) -> String {
    let rendered: Vec<String> = items.map(Render::render).collect();
    format!("[{}]", rendered.join(", "))
}

impl<T> fmt::Display for Opaque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(OPAQUE_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_render_via_display() {
        assert_eq!(3i32.render(), "3");
        assert_eq!(true.render(), "true");
        assert_eq!("abc".render(), "abc");
        assert_eq!(2.5f64.render(), "2.5");
    }

    #[test]
    fn opaque_renders_placeholder() {
        struct NoText;
        assert_eq!(Opaque(NoText).render(), "{?}");
    }

    #[test]
    fn sequences_render_elementwise() {
        assert_eq!(vec![1, 2, 3].render(), "[1, 2, 3]");
        assert_eq!(Some(7u8).render(), "Some(7)");
    }

    #[test]
    fn rendering_is_deterministic() {
        let v = vec!["a", "b"];
        assert_eq!(v.render(), v.render());
    }
}

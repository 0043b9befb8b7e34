#![forbid(unsafe_code)]

//! Minimal 2D geometry in presentation-surface coordinates.
//!
//! Coordinates are `f64` points with the origin at the top-left and `y`
//! growing downward, matching what drag gestures report. Only vertical
//! components drive snap decisions, but the full vectors are carried so the
//! host can feed gesture values through unchanged.

/// A location on the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Origin (top-left of the surface).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A translation (displacement) on the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Zero translation.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a translation vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_constants() {
        assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
        assert_eq!(Vec2::ZERO, Vec2::new(0.0, 0.0));
        assert!(Vec2::ZERO.is_zero());
    }

    #[test]
    fn nonzero_vector() {
        assert!(!Vec2::new(0.0, -3.5).is_zero());
    }
}

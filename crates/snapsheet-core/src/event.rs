#![forbid(unsafe_code)]

//! The drag gesture contract between the host framework and snapsheet.
//!
//! The host's continuous-drag primitive reports one [`DragUpdate`] per frame
//! while the gesture is live, and a final update with the same shape when the
//! gesture ends. snapsheet never synthesizes these events.
//!
//! # Invariants
//!
//! 1. `translation` is cumulative from the gesture's start, not a per-frame
//!    delta.
//! 2. `predicted_end_location` is the gesture's projected resting point if
//!    released at the current velocity; for a stationary release it equals
//!    `location`.

use crate::geometry::{Point, Vec2};

/// One frame of a continuous drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragUpdate {
    /// Cumulative translation since the gesture began.
    pub translation: Vec2,
    /// Current pointer location.
    pub location: Point,
    /// Projected resting location at the current velocity.
    pub predicted_end_location: Point,
}

impl DragUpdate {
    /// Create a drag update.
    pub const fn new(translation: Vec2, location: Point, predicted_end_location: Point) -> Self {
        Self {
            translation,
            location,
            predicted_end_location,
        }
    }

    /// Vertical fling direction signal: positive when the gesture is headed
    /// downward, negative when headed upward, zero for a stationary release.
    pub fn direction(&self) -> f64 {
        self.predicted_end_location.y - self.location.y
    }
}

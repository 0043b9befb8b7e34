#![forbid(unsafe_code)]

//! Live drag gesture state.
//!
//! [`DragState`] is transient: it is owned exclusively by the active gesture
//! and reset to `Inactive` the moment the gesture ends. Both accessors are
//! total, so callers never branch on the variant themselves.

use crate::geometry::Vec2;

/// State of the drag gesture currently manipulating a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Inactive,
    /// A gesture is live with the given cumulative translation.
    Dragging {
        /// Cumulative translation since the gesture began.
        translation: Vec2,
    },
}

impl DragState {
    /// The current translation; zero while inactive.
    pub fn translation(self) -> Vec2 {
        match self {
            Self::Inactive => Vec2::ZERO,
            Self::Dragging { translation } => translation,
        }
    }

    /// Whether a gesture is live.
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_is_zero() {
        assert_eq!(DragState::Inactive.translation(), Vec2::ZERO);
        assert!(!DragState::Inactive.is_dragging());
    }

    #[test]
    fn dragging_reports_translation() {
        let state = DragState::Dragging {
            translation: Vec2::new(2.0, -30.0),
        };
        assert_eq!(state.translation(), Vec2::new(2.0, -30.0));
        assert!(state.is_dragging());
    }

    #[test]
    fn default_is_inactive() {
        assert_eq!(DragState::default(), DragState::Inactive);
    }
}

#![forbid(unsafe_code)]

//! Visual parameter derivation: pure functions from interaction state to the
//! scale, corner radius, and darkening values the host applies to its view
//! tree.
//!
//! Two coordinated surfaces are derived:
//!
//! - **Backdrop**: the primary content behind the sheet shrinks, rounds, and
//!   dims as the sheet opens; a live drag previews that settled state
//!   continuously.
//! - **Sheet**: the sheet itself carries a fixed mask radius, except at
//!   fullscreen where pulling on it rounds the corners back in.
//!
//! # Invariants
//!
//! 1. Every interpolated value is clamped between its idle value and its
//!    resting value; no branch can overshoot.
//! 2. With the drawer open and no residual drag, the backdrop sits exactly
//!    at the resting values (scale 0.9, radius 15, darkening 0.3).
//! 3. All functions are total and side-effect free.

use snapsheet_core::position::{PositionMetrics, SheetPosition};
use web_time::Duration;

/// Backdrop scale once the drawer has settled open.
const REST_SCALE: f64 = 0.9;
/// Backdrop scale change per point of drag.
const SCALE_RATE: f64 = 0.0002;
/// Backdrop corner radius once the drawer has settled open.
const REST_CORNER_RADIUS: f64 = 15.0;
/// Backdrop corner radius change per point of drag.
const CORNER_RADIUS_RATE: f64 = 0.03;
/// Backdrop darkening opacity once the drawer has settled open.
const REST_DARKENING: f64 = 0.3;
/// Backdrop darkening change per point of drag.
const DARKENING_RATE: f64 = 0.001;

/// Mask radius of the sheet itself.
const SHEET_CORNER_RADIUS: f64 = 20.0;
/// Radius gained per point of drag while pulling a fullscreen sheet.
const FULLSCREEN_RADIUS_RATE: f64 = 0.1;

/// Delay before the settle animation of a fullscreen sheet.
const FULLSCREEN_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Derived backdrop parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropVisuals {
    /// Uniform scale of the primary content.
    pub scale: f64,
    /// Rounded-rect mask radius of the primary content.
    pub corner_radius: f64,
    /// Opacity of the darkening overlay.
    pub darkening: f64,
}

/// Derive the backdrop visuals from the live drag height and the drawer
/// state (`drawer_open` means the sheet rests at `Open` or `Fullscreen`).
///
/// Upward drags (negative height) pull the backdrop toward its settled-open
/// look; downward drags release it back toward idle. Once the drawer is
/// open, the settled values hold for the non-interpolating branches
/// regardless of residual drag offset.
pub fn backdrop_visuals(drag_height: f64, drawer_open: bool) -> BackdropVisuals {
    let travel = drag_height.abs();
    if drag_height < 0.0 {
        BackdropVisuals {
            scale: if drawer_open {
                REST_SCALE
            } else {
                (1.0 - travel * SCALE_RATE).max(REST_SCALE)
            },
            corner_radius: if drawer_open {
                REST_CORNER_RADIUS
            } else {
                (travel * CORNER_RADIUS_RATE).min(REST_CORNER_RADIUS)
            },
            darkening: if drawer_open {
                REST_DARKENING
            } else {
                (travel * DARKENING_RATE).min(REST_DARKENING)
            },
        }
    } else {
        BackdropVisuals {
            scale: if drawer_open {
                (REST_SCALE + travel * SCALE_RATE).min(1.0)
            } else {
                1.0
            },
            corner_radius: if drawer_open {
                (REST_CORNER_RADIUS - travel * CORNER_RADIUS_RATE).max(0.0)
            } else {
                0.0
            },
            darkening: if drawer_open {
                (REST_DARKENING - travel * DARKENING_RATE).max(0.0)
            } else {
                0.0
            },
        }
    }
}

/// Mask radius of the sheet for the given position and drag height.
///
/// A fullscreen sheet sits flush with the screen corners; pulling on it
/// rounds the corners back in proportionally, capped at the normal radius.
pub fn sheet_corner_radius(position: SheetPosition, drag_height: f64) -> f64 {
    if position == SheetPosition::Fullscreen {
        (drag_height.abs() * FULLSCREEN_RADIUS_RATE).min(SHEET_CORNER_RADIUS)
    } else {
        SHEET_CORNER_RADIUS
    }
}

/// Vertical offset of the sheet: resting offset plus live drag, never above
/// the top of the surface.
pub fn sheet_offset(position: SheetPosition, drag_height: f64, metrics: &PositionMetrics) -> f64 {
    (position.offset_from_top(metrics) + drag_height).max(0.0)
}

/// Derived parameters for one entry of a modal stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackEntryVisuals {
    /// Rounded-rect mask radius of the entry.
    pub corner_radius: f64,
    /// Uniform scale of the entry.
    pub scale: f64,
    /// Opacity of the darkening overlay drawn over the entry.
    pub darkening: f64,
}

/// Visuals for a stack entry given its derived visibility.
///
/// An active entry renders full size with the sheet radius; a backgrounded
/// entry is demoted to the settled-open backdrop look; anything else renders
/// untouched and square (it is either off-screen or fully covered).
pub fn stack_entry_visuals(active: bool, backgrounded: bool) -> StackEntryVisuals {
    if active {
        StackEntryVisuals {
            corner_radius: SHEET_CORNER_RADIUS,
            scale: 1.0,
            darkening: 0.0,
        }
    } else if backgrounded {
        StackEntryVisuals {
            corner_radius: REST_CORNER_RADIUS,
            scale: REST_SCALE,
            darkening: REST_DARKENING,
        }
    } else {
        StackEntryVisuals {
            corner_radius: 0.0,
            scale: 1.0,
            darkening: 0.0,
        }
    }
}

/// Spring curve handed to the host's animation engine. Never interpolated
/// here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    pub stiffness: f64,
    pub damping: f64,
    pub initial_velocity: f64,
    /// Delay before the animation starts.
    pub delay: Duration,
}

impl SpringSpec {
    /// The settle spring used for every snap transition.
    pub const fn settle() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            initial_velocity: 10.0,
            delay: Duration::ZERO,
        }
    }

    /// The settle spring for a sheet resting at `position`: fullscreen
    /// settles after a long delay, everything else immediately.
    pub fn settle_for(position: SheetPosition) -> Self {
        let mut spec = Self::settle();
        if position == SheetPosition::Fullscreen {
            spec.delay = FULLSCREEN_SETTLE_DELAY;
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn settled_open_backdrop_at_rest() {
        let visuals = backdrop_visuals(0.0, true);
        assert_eq!(visuals.scale, REST_SCALE);
        assert_eq!(visuals.corner_radius, REST_CORNER_RADIUS);
        assert_eq!(visuals.darkening, REST_DARKENING);
    }

    #[test]
    fn idle_backdrop_when_not_open() {
        let visuals = backdrop_visuals(0.0, false);
        assert_eq!(visuals.scale, 1.0);
        assert_eq!(visuals.corner_radius, 0.0);
        assert_eq!(visuals.darkening, 0.0);
    }

    #[test]
    fn upward_drag_previews_open_look() {
        // 250 points of upward drag: halfway toward the settled scale.
        let visuals = backdrop_visuals(-250.0, false);
        assert_eq!(visuals.scale, 1.0 - 250.0 * SCALE_RATE);
        assert_eq!(visuals.corner_radius, 250.0 * CORNER_RADIUS_RATE);
        assert_eq!(visuals.darkening, 250.0 * DARKENING_RATE);
    }

    #[test]
    fn upward_drag_clamps_at_rest_values() {
        let visuals = backdrop_visuals(-10_000.0, false);
        assert_eq!(visuals.scale, REST_SCALE);
        assert_eq!(visuals.corner_radius, REST_CORNER_RADIUS);
        assert_eq!(visuals.darkening, REST_DARKENING);
    }

    #[test]
    fn downward_drag_while_open_releases_toward_idle() {
        let visuals = backdrop_visuals(200.0, true);
        assert_eq!(visuals.scale, REST_SCALE + 200.0 * SCALE_RATE);
        assert_eq!(visuals.corner_radius, REST_CORNER_RADIUS - 200.0 * CORNER_RADIUS_RATE);
        assert_eq!(visuals.darkening, REST_DARKENING - 200.0 * DARKENING_RATE);
    }

    #[test]
    fn downward_drag_while_open_clamps_at_idle() {
        let visuals = backdrop_visuals(10_000.0, true);
        assert_eq!(visuals.scale, 1.0);
        assert_eq!(visuals.corner_radius, 0.0);
        assert_eq!(visuals.darkening, 0.0);
    }

    #[test]
    fn sheet_radius_fixed_below_fullscreen() {
        assert_eq!(sheet_corner_radius(SheetPosition::Open, -300.0), 20.0);
        assert_eq!(sheet_corner_radius(SheetPosition::Closed, 0.0), 20.0);
    }

    #[test]
    fn fullscreen_radius_grows_with_drag() {
        assert_eq!(sheet_corner_radius(SheetPosition::Fullscreen, 0.0), 0.0);
        assert_eq!(sheet_corner_radius(SheetPosition::Fullscreen, 100.0), 10.0);
        assert_eq!(sheet_corner_radius(SheetPosition::Fullscreen, 500.0), 20.0);
    }

    #[test]
    fn sheet_offset_never_above_top() {
        let metrics = PositionMetrics::new(900.0);
        assert_eq!(sheet_offset(SheetPosition::Open, -200.0, &metrics), 0.0);
        assert_eq!(sheet_offset(SheetPosition::Open, 100.0, &metrics), 156.0);
    }

    #[test]
    fn stack_entry_visual_table() {
        let active = stack_entry_visuals(true, false);
        assert_eq!(active.corner_radius, 20.0);
        assert_eq!(active.scale, 1.0);
        assert_eq!(active.darkening, 0.0);

        let demoted = stack_entry_visuals(false, true);
        assert_eq!(demoted.corner_radius, 15.0);
        assert_eq!(demoted.scale, 0.9);
        assert_eq!(demoted.darkening, 0.3);

        let hidden = stack_entry_visuals(false, false);
        assert_eq!(hidden.corner_radius, 0.0);
        assert_eq!(hidden.scale, 1.0);
        assert_eq!(hidden.darkening, 0.0);
    }

    #[test]
    fn spring_spec_constants() {
        let spec = SpringSpec::settle();
        assert_eq!(spec.stiffness, 300.0);
        assert_eq!(spec.damping, 30.0);
        assert_eq!(spec.initial_velocity, 10.0);
        assert_eq!(spec.delay, Duration::ZERO);

        let fullscreen = SpringSpec::settle_for(SheetPosition::Fullscreen);
        assert_eq!(fullscreen.delay, Duration::from_secs(3));
        assert_eq!(
            SpringSpec::settle_for(SheetPosition::Open).delay,
            Duration::ZERO
        );
    }

    proptest! {
        // Scale stays within [0.9, 1.0] for every branch.
        #[test]
        fn scale_always_bounded(h in -5_000.0f64..5_000.0, open in any::<bool>()) {
            let visuals = backdrop_visuals(h, open);
            prop_assert!(visuals.scale >= REST_SCALE && visuals.scale <= 1.0);
            prop_assert!(visuals.corner_radius >= 0.0 && visuals.corner_radius <= REST_CORNER_RADIUS);
            prop_assert!(visuals.darkening >= 0.0 && visuals.darkening <= REST_DARKENING);
        }

        // While open, a downward drag scales the backdrop
        // back up monotonically, saturating at 1.
        #[test]
        fn open_downward_scale_is_monotone(h in 0.0f64..5_000.0) {
            let visuals = backdrop_visuals(h, true);
            prop_assert_eq!(visuals.scale, (REST_SCALE + h * SCALE_RATE).min(1.0));

            let further = backdrop_visuals(h + 50.0, true);
            prop_assert!(further.scale >= visuals.scale);
        }

        // Not-open upward drags interpolate monotonically toward the rest
        // values without overshoot.
        #[test]
        fn closed_upward_drag_is_monotone(h in 0.0f64..5_000.0) {
            let visuals = backdrop_visuals(-h, false);
            let further = backdrop_visuals(-(h + 50.0), false);
            prop_assert!(further.scale <= visuals.scale);
            prop_assert!(further.corner_radius >= visuals.corner_radius);
            prop_assert!(further.darkening >= visuals.darkening);
        }
    }
}

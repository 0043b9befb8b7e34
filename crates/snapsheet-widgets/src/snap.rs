#![forbid(unsafe_code)]

//! Snap-position resolution for a drag release.
//!
//! Given the sheet's resting position and the final gesture update, pick the
//! position the sheet settles into. The candidate stops are bracketed around
//! the release offset, a fling overrides proximity, and `Fullscreen` is
//! inert in both directions: a fullscreen sheet ignores drag releases, and
//! no release ever snaps *to* fullscreen (that transition belongs to the
//! auto-promotion timer).
//!
//! # Invariants
//!
//! 1. The result is always one of `Open`, `PartiallyRevealed`, `Closed`, or
//!    the unchanged input position.
//! 2. A nonzero direction signal decides regardless of proximity: downward
//!    flings snap to the lower stop, upward flings to the higher stop.
//! 3. An exactly equidistant release snaps to the lower stop.

use snapsheet_core::event::DragUpdate;
use snapsheet_core::position::{PositionMetrics, SheetPosition};
use tracing::debug;

/// Resolve the resting position after a drag release.
pub fn resolve_snap(
    position: SheetPosition,
    drag: &DragUpdate,
    metrics: &PositionMetrics,
) -> SheetPosition {
    // Drag-to-dismiss is disabled while fullscreen.
    if position == SheetPosition::Fullscreen {
        return position;
    }

    let offset_from_top = position.offset_from_top(metrics) + drag.translation.y;

    // Bracket the release offset around the `PartiallyRevealed` threshold.
    let (higher_stop, lower_stop) = if offset_from_top <= metrics.partially_revealed_offset() {
        (SheetPosition::Open, SheetPosition::PartiallyRevealed)
    } else {
        (SheetPosition::PartiallyRevealed, SheetPosition::Closed)
    };

    let nearest = if offset_from_top - higher_stop.offset_from_top(metrics)
        < lower_stop.offset_from_top(metrics) - offset_from_top
    {
        higher_stop
    } else {
        lower_stop
    };

    let direction = drag.direction();
    let resolved = if direction > 0.0 {
        lower_stop
    } else if direction < 0.0 {
        higher_stop
    } else {
        nearest
    };

    debug!(
        ?position,
        ?resolved,
        offset_from_top,
        direction,
        "resolved snap position"
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use snapsheet_core::geometry::{Point, Vec2};

    const VIEWPORT: f64 = 900.0;

    fn metrics() -> PositionMetrics {
        PositionMetrics::new(VIEWPORT)
    }

    fn release(translation_y: f64, direction: f64) -> DragUpdate {
        let location = Point::new(0.0, 400.0);
        DragUpdate::new(
            Vec2::new(0.0, translation_y),
            location,
            Point::new(location.x, location.y + direction),
        )
    }

    #[test]
    fn small_drag_from_open_stays_open() {
        let resolved = resolve_snap(SheetPosition::Open, &release(30.0, 0.0), &metrics());
        assert_eq!(resolved, SheetPosition::Open);
    }

    #[test]
    fn long_drag_from_open_reaches_partially_revealed() {
        // 56 + 400 = 456 < 500 (threshold), but closer to the lower stop.
        let resolved = resolve_snap(SheetPosition::Open, &release(400.0, 0.0), &metrics());
        assert_eq!(resolved, SheetPosition::PartiallyRevealed);
    }

    #[test]
    fn drag_below_threshold_brackets_to_closed() {
        // 56 + 700 = 756, past the threshold and closer to closed (942).
        let resolved = resolve_snap(SheetPosition::Open, &release(700.0, 0.0), &metrics());
        assert_eq!(resolved, SheetPosition::Closed);
    }

    #[test]
    fn downward_fling_overrides_proximity() {
        // Barely moved from open, but flung downward.
        let resolved = resolve_snap(SheetPosition::Open, &release(10.0, 250.0), &metrics());
        assert_eq!(resolved, SheetPosition::PartiallyRevealed);
    }

    #[test]
    fn upward_fling_overrides_proximity() {
        // Resting just above the closed stop, flung upward.
        let resolved = resolve_snap(
            SheetPosition::Closed,
            &release(-100.0, -250.0),
            &metrics(),
        );
        assert_eq!(resolved, SheetPosition::PartiallyRevealed);
    }

    #[test]
    fn fullscreen_ignores_drag_release() {
        let resolved = resolve_snap(
            SheetPosition::Fullscreen,
            &release(500.0, 300.0),
            &metrics(),
        );
        assert_eq!(resolved, SheetPosition::Fullscreen);
    }

    #[test]
    fn equidistant_release_prefers_lower_stop() {
        let metrics = metrics();
        let open = SheetPosition::Open.offset_from_top(&metrics);
        let partial = metrics.partially_revealed_offset();
        let midpoint = (open + partial) / 2.0;
        let resolved = resolve_snap(
            SheetPosition::Open,
            &release(midpoint - open, 0.0),
            &metrics,
        );
        assert_eq!(resolved, SheetPosition::PartiallyRevealed);
    }

    proptest! {
        // With no fling, the resolver picks the bracket
        // endpoint nearest to the release offset (ties go to the lower stop).
        #[test]
        fn nearest_stop_wins_for_stationary_release(offset in 0.0f64..942.0) {
            let metrics = metrics();
            let translation = offset - SheetPosition::Open.offset_from_top(&metrics);
            let resolved = resolve_snap(SheetPosition::Open, &release(translation, 0.0), &metrics);

            let threshold = metrics.partially_revealed_offset();
            let (higher, lower) = if offset <= threshold {
                (SheetPosition::Open, SheetPosition::PartiallyRevealed)
            } else {
                (SheetPosition::PartiallyRevealed, SheetPosition::Closed)
            };
            let to_higher = offset - higher.offset_from_top(&metrics);
            let to_lower = lower.offset_from_top(&metrics) - offset;
            let expected = if to_higher < to_lower { higher } else { lower };
            prop_assert_eq!(resolved, expected);
        }

        // Any nonzero direction signal decides the stop
        // outright, regardless of proximity.
        #[test]
        fn fling_direction_overrides_nearest(
            offset in 0.0f64..942.0,
            direction in prop::sample::select(vec![-300.0f64, -1.0, 1.0, 300.0]),
        ) {
            let metrics = metrics();
            let translation = offset - SheetPosition::Open.offset_from_top(&metrics);
            let resolved = resolve_snap(
                SheetPosition::Open,
                &release(translation, direction),
                &metrics,
            );

            let threshold = metrics.partially_revealed_offset();
            let expected = if direction > 0.0 {
                if offset <= threshold { SheetPosition::PartiallyRevealed } else { SheetPosition::Closed }
            } else if offset <= threshold {
                SheetPosition::Open
            } else {
                SheetPosition::PartiallyRevealed
            };
            prop_assert_eq!(resolved, expected);
        }

        // Fullscreen never appears as a snap result for non-fullscreen input.
        #[test]
        fn fullscreen_is_never_a_snap_target(
            translation in -1000.0f64..1000.0,
            direction in -500.0f64..500.0,
        ) {
            let resolved = resolve_snap(
                SheetPosition::PartiallyRevealed,
                &release(translation, direction),
                &metrics(),
            );
            prop_assert_ne!(resolved, SheetPosition::Fullscreen);
        }
    }
}

#![forbid(unsafe_code)]

//! Snap positions and their vertical offset table.
//!
//! A sheet settles into one of a fixed set of resting positions, each mapping
//! to an offset from the top of the presentation surface. The offsets depend
//! on the viewport height, so they live in [`PositionMetrics`] rather than on
//! the enum itself.
//!
//! # Invariants
//!
//! 1. `offset_from_top` is total over all positions.
//! 2. Offsets are ordered `Fullscreen (0) < Open < PartiallyRevealed <
//!    Closed` for any sane viewport height; the snap resolver relies on this
//!    ordering when bracketing a drag release.
//! 3. `Closed` is off-screen below the surface (`viewport_height + margin`).

/// Default offset of [`SheetPosition::Open`] from the top, in points.
pub const DEFAULT_OPEN_OFFSET: f64 = 56.0;
/// Offset of [`SheetPosition::Occluded`] from the top, in points.
pub const DEFAULT_OCCLUDED_OFFSET: f64 = 30.0;
/// Margin added below the viewport for [`SheetPosition::Closed`] so the
/// sheet's rounded top edge clears the screen entirely.
pub const CLOSED_MARGIN: f64 = 42.0;
/// Divisor mapping viewport height to the `PartiallyRevealed` offset.
const PARTIALLY_REVEALED_DIVISOR: f64 = 1.8;

/// Resting positions of a sheet relative to the top of the surface.
///
/// The first four are the single-sheet positions; `Base`, `Backgrounded`,
/// and `Occluded` only occur for entries managed by a modal stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetPosition {
    /// Pinned to the very top; drag-to-dismiss is disabled here.
    Fullscreen,
    /// Fully open with a small gap at the top.
    Open,
    /// Peeking over the lower part of the surface.
    PartiallyRevealed,
    /// Off-screen below the surface.
    #[default]
    Closed,
    /// Stack variant: the bottom-most entry, flush with the top.
    Base,
    /// Stack variant: visually demoted behind a pulled-up entry.
    Backgrounded,
    /// Stack variant: almost fully covered by the entry above.
    Occluded,
}

impl SheetPosition {
    /// Offset from the top of the presentation surface, in points.
    pub fn offset_from_top(self, metrics: &PositionMetrics) -> f64 {
        match self {
            Self::Fullscreen | Self::Base | Self::Backgrounded => 0.0,
            Self::Open => metrics.open_offset,
            Self::PartiallyRevealed => metrics.partially_revealed_offset(),
            Self::Occluded => metrics.occluded_offset,
            Self::Closed => metrics.closed_offset(),
        }
    }

    /// Whether the sheet counts as an open drawer (`Open` or `Fullscreen`).
    pub fn is_drawer_open(self) -> bool {
        matches!(self, Self::Open | Self::Fullscreen)
    }
}

/// Viewport-derived offsets for the snap positions.
///
/// Built from the viewport height; individual offsets can be overridden with
/// the builder methods (the stacked-modal manager uses a tighter `Open`
/// offset than a standalone sheet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMetrics {
    viewport_height: f64,
    open_offset: f64,
    occluded_offset: f64,
    closed_margin: f64,
}

impl PositionMetrics {
    /// Create metrics for a viewport of the given height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            open_offset: DEFAULT_OPEN_OFFSET,
            occluded_offset: DEFAULT_OCCLUDED_OFFSET,
            closed_margin: CLOSED_MARGIN,
        }
    }

    /// Override the `Open` offset.
    pub fn open_offset(mut self, offset: f64) -> Self {
        self.open_offset = offset;
        self
    }

    /// Override the `Occluded` offset.
    pub fn occluded_offset(mut self, offset: f64) -> Self {
        self.occluded_offset = offset;
        self
    }

    /// Override the below-viewport margin used by `Closed`.
    pub fn closed_margin(mut self, margin: f64) -> Self {
        self.closed_margin = margin;
        self
    }

    /// The viewport height these metrics were built from.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Offset of `PartiallyRevealed`: a bit more than half the viewport.
    pub fn partially_revealed_offset(&self) -> f64 {
        self.viewport_height / PARTIALLY_REVEALED_DIVISOR
    }

    /// Offset of `Closed`: fully below the viewport.
    pub fn closed_offset(&self) -> f64 {
        self.viewport_height + self.closed_margin
    }
}

#![forbid(unsafe_code)]

//! Single-sheet presenter state machine.
//!
//! A [`Sheet`] owns the bound position (an [`Observable`] the host reads,
//! writes through [`Sheet::set_position`], and subscribes to for redraws),
//! the live drag state, and the auto-fullscreen promotion timer. The host
//! forwards drag gesture events and polls [`Sheet::tick`] from its event
//! loop; everything else is derived queries.
//!
//! # Invariants
//!
//! 1. Drag state is transient: it is `Inactive` whenever no gesture is live.
//! 2. At most one auto-fullscreen deadline is pending; it is armed on every
//!    entry into `Open` (with fullscreen enabled) and cancelled by any drag
//!    start or any move away from `Open`.
//! 3. The promotion at fire time re-checks live state: still `Open`, no
//!    drag translation, fullscreen enabled.
//!
//! # Failure Modes
//!
//! - A promotion deadline elapsing during a drag is spent with no effect;
//!   the sheet stays where the eventual drag release snaps it.

use snapsheet_core::drag::DragState;
use snapsheet_core::event::DragUpdate;
use snapsheet_core::geometry::Vec2;
use snapsheet_core::position::{PositionMetrics, SheetPosition};
use snapsheet_runtime::reactive::Observable;
use snapsheet_runtime::timer::OneShotTimer;
use tracing::debug;
use web_time::{Duration, Instant};

use crate::snap::resolve_snap;
use crate::visual::{self, BackdropVisuals, SpringSpec};

/// Delay between a sheet settling at `Open` and its promotion to
/// `Fullscreen`.
pub const AUTO_FULLSCREEN_DELAY: Duration = Duration::from_secs(1);

/// Presenter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetConfig {
    metrics: PositionMetrics,
    fullscreen_enabled: bool,
    auto_fullscreen_delay: Duration,
}

impl SheetConfig {
    /// Configuration for a viewport of the given height, with auto-
    /// fullscreen promotion enabled.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            metrics: PositionMetrics::new(viewport_height),
            fullscreen_enabled: true,
            auto_fullscreen_delay: AUTO_FULLSCREEN_DELAY,
        }
    }

    /// Override the position metrics.
    pub fn metrics(mut self, metrics: PositionMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Enable or disable auto-fullscreen promotion.
    pub fn fullscreen_enabled(mut self, enabled: bool) -> Self {
        self.fullscreen_enabled = enabled;
        self
    }

    /// Override the promotion delay.
    pub fn auto_fullscreen_delay(mut self, delay: Duration) -> Self {
        self.auto_fullscreen_delay = delay;
        self
    }
}

/// Draggable snap-to-position sheet presenter.
pub struct Sheet {
    position: Observable<SheetPosition>,
    drag: DragState,
    auto_fullscreen: OneShotTimer,
    config: SheetConfig,
}

impl Sheet {
    /// Create a closed sheet.
    pub fn new(config: SheetConfig) -> Self {
        Self::with_position(config, SheetPosition::Closed)
    }

    /// Create a sheet resting at `position`.
    pub fn with_position(config: SheetConfig, position: SheetPosition) -> Self {
        Self {
            position: Observable::new(position),
            drag: DragState::Inactive,
            auto_fullscreen: OneShotTimer::new(),
            config,
        }
    }

    /// Handle to the bound position. The host may read it, subscribe to it,
    /// and hold clones; programmatic writes go through
    /// [`Sheet::set_position`] so timer bookkeeping stays correct.
    pub fn position(&self) -> Observable<SheetPosition> {
        self.position.clone()
    }

    /// The current resting position.
    pub fn current_position(&self) -> SheetPosition {
        self.position.get()
    }

    /// The live drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether the sheet counts as an open drawer.
    pub fn is_drawer_open(&self) -> bool {
        self.current_position().is_drawer_open()
    }

    /// Per-frame drag gesture update. Starting or continuing a drag cancels
    /// any pending auto-fullscreen promotion.
    pub fn on_drag_update(&mut self, update: DragUpdate) {
        // A fullscreen sheet does not track the finger.
        let translation = if self.current_position() == SheetPosition::Fullscreen {
            Vec2::ZERO
        } else {
            update.translation
        };
        self.drag = DragState::Dragging { translation };
        self.auto_fullscreen.cancel();
    }

    /// Final drag gesture event: snap to the resolved position.
    pub fn on_drag_end(&mut self, now: Instant, update: DragUpdate) {
        self.drag = DragState::Inactive;
        let resolved = resolve_snap(self.current_position(), &update, &self.config.metrics);
        self.apply_position(now, resolved);
    }

    /// Programmatic position change with the same timer bookkeeping a snap
    /// transition gets. A no-op when the sheet is already there.
    pub fn set_position(&mut self, now: Instant, position: SheetPosition) {
        if position == self.current_position() {
            return;
        }
        self.apply_position(now, position);
    }

    fn apply_position(&mut self, now: Instant, position: SheetPosition) {
        self.position.set(position);
        if position == SheetPosition::Open && self.config.fullscreen_enabled {
            debug!("sheet settled open, arming auto-fullscreen promotion");
            self.auto_fullscreen
                .arm(now, self.config.auto_fullscreen_delay);
        } else {
            self.auto_fullscreen.cancel();
        }
    }

    /// Poll the auto-fullscreen timer. The promotion condition is evaluated
    /// against live state at poll time: still `Open`, zero drag translation,
    /// fullscreen enabled.
    pub fn tick(&mut self, now: Instant) {
        if !self.auto_fullscreen.fire(now) {
            return;
        }
        if self.current_position() == SheetPosition::Open
            && self.drag.translation().is_zero()
            && self.config.fullscreen_enabled
        {
            debug!("auto-fullscreen promotion fired");
            self.position.set(SheetPosition::Fullscreen);
        } else {
            debug!("auto-fullscreen promotion suppressed by live state");
        }
    }

    /// Whether a promotion deadline is pending.
    pub fn is_promotion_pending(&self) -> bool {
        self.auto_fullscreen.is_armed()
    }

    /// Vertical offset of the sheet including the live drag.
    pub fn offset_from_top(&self) -> f64 {
        visual::sheet_offset(
            self.current_position(),
            self.drag.translation().y,
            &self.config.metrics,
        )
    }

    /// Backdrop visuals for the current frame.
    pub fn backdrop_visuals(&self) -> BackdropVisuals {
        visual::backdrop_visuals(self.drag.translation().y, self.is_drawer_open())
    }

    /// Mask radius of the sheet for the current frame.
    pub fn corner_radius(&self) -> f64 {
        visual::sheet_corner_radius(self.current_position(), self.drag.translation().y)
    }

    /// Settle animation for the host's easing engine, or `None` while a drag
    /// is live (the sheet tracks the finger directly).
    pub fn animation(&self) -> Option<SpringSpec> {
        if self.drag.is_dragging() {
            None
        } else {
            Some(SpringSpec::settle_for(self.current_position()))
        }
    }
}

impl std::fmt::Debug for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sheet")
            .field("position", &self.current_position())
            .field("drag", &self.drag)
            .field("promotion_pending", &self.auto_fullscreen.is_armed())
            .finish()
    }
}

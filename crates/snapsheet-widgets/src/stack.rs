#![forbid(unsafe_code)]

//! Stacked-modal manager.
//!
//! A [`ModalStack`] owns an ordered sequence of modal entries; index order is
//! significant. The entry after a modal (`next`) decides how that modal
//! renders: when the next entry has been pulled up, the modal below it is
//! *backgrounded* (scaled down and dimmed), and the front-most interactive
//! entry is *active*.
//!
//! # Invariants
//!
//! - Entry ids are unique for the lifetime of the process.
//! - At most one entry is mid-drag at a time; gesture events for any other
//!   entry are dropped while a drag is live.
//! - Each entry carries its own auto-fullscreen deadline; at most one is
//!   pending per entry, and it fires at most once per arm cycle.
//!
//! # Failure Modes
//!
//! - Lookups for unknown ids return `Err(StackError::NotFound)` or `None`;
//!   nothing panics.
//! - `is_first` on an empty stack is `false`.

use std::sync::atomic::{AtomicU64, Ordering};

use snapsheet_core::event::DragUpdate;
use snapsheet_core::geometry::Vec2;
use snapsheet_core::position::{PositionMetrics, SheetPosition};
use snapsheet_runtime::reactive::Observable;
use snapsheet_runtime::timer::OneShotTimer;
use tracing::debug;
use web_time::{Duration, Instant};

use crate::sheet::AUTO_FULLSCREEN_DELAY;
use crate::snap::resolve_snap;
use crate::visual::{self, StackEntryVisuals};

/// `Open` offset used by stacked modals: tighter than a standalone sheet so
/// the demoted entries behind it stay visible at the top edge.
pub const STACK_OPEN_OFFSET: f64 = 20.0;

/// Global counter for unique modal ids.
static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a modal in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(u64);

impl ModalId {
    fn next() -> Self {
        Self(MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Errors from stack lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// No entry with the given id exists in the stack.
    NotFound(ModalId),
}

impl std::fmt::Display for StackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "no modal with id {} in the stack", id.id()),
        }
    }
}

impl std::error::Error for StackError {}

/// One modal in the stack: opaque owned content plus interaction state.
#[derive(Debug)]
pub struct ModalEntry<C> {
    id: ModalId,
    content: C,
    position: SheetPosition,
    fullscreen_enabled: bool,
    drag_offset: Vec2,
    auto_fullscreen: OneShotTimer,
}

impl<C> ModalEntry<C> {
    /// Create an entry at the default `Base` position.
    pub fn new(content: C) -> Self {
        Self {
            id: ModalId::next(),
            content,
            position: SheetPosition::Base,
            fullscreen_enabled: false,
            drag_offset: Vec2::ZERO,
            auto_fullscreen: OneShotTimer::new(),
        }
    }

    /// Set the initial position.
    pub fn position(mut self, position: SheetPosition) -> Self {
        self.position = position;
        self
    }

    /// Enable auto-fullscreen promotion for this entry.
    pub fn fullscreen_enabled(mut self, enabled: bool) -> Self {
        self.fullscreen_enabled = enabled;
        self
    }

    /// This entry's unique id.
    pub fn id(&self) -> ModalId {
        self.id
    }

    /// The owned content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the owned content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// The entry's current resting position.
    pub fn current_position(&self) -> SheetPosition {
        self.position
    }

    /// The entry's live drag offset (zero when not mid-drag).
    pub fn drag_offset(&self) -> Vec2 {
        self.drag_offset
    }

    /// Whether auto-fullscreen promotion is enabled for this entry.
    pub fn is_fullscreen_enabled(&self) -> bool {
        self.fullscreen_enabled
    }
}

/// Ordered stack of modals with gesture routing and visibility derivation.
pub struct ModalStack<C> {
    modals: Vec<ModalEntry<C>>,
    metrics: PositionMetrics,
    auto_fullscreen_delay: Duration,
    /// Id of the entry currently mid-drag, if any.
    active_drag: Option<ModalId>,
    /// Bumped on every observable mutation; the presentation layer
    /// subscribes to this for redraws.
    revision: Observable<u64>,
}

impl<C> ModalStack<C> {
    /// Create an empty stack for a viewport of the given height.
    pub fn new(viewport_height: f64) -> Self {
        Self::with_metrics(PositionMetrics::new(viewport_height).open_offset(STACK_OPEN_OFFSET))
    }

    /// Create an empty stack with custom position metrics.
    pub fn with_metrics(metrics: PositionMetrics) -> Self {
        Self {
            modals: Vec::new(),
            metrics,
            auto_fullscreen_delay: AUTO_FULLSCREEN_DELAY,
            active_drag: None,
            revision: Observable::new(0),
        }
    }

    /// Override the auto-fullscreen promotion delay.
    pub fn auto_fullscreen_delay(mut self, delay: Duration) -> Self {
        self.auto_fullscreen_delay = delay;
        self
    }

    /// Handle to the revision counter. Each observable mutation of the stack
    /// bumps it, so subscribing to this is the redraw signal.
    pub fn changes(&self) -> Observable<u64> {
        self.revision.clone()
    }

    fn touch(&self) {
        self.revision.update(|r| *r += 1);
    }

    // --- Stack operations ---

    /// Push an entry on top of the stack; it becomes the "next" modal of the
    /// previous top. Returns its id.
    pub fn push(&mut self, entry: ModalEntry<C>) -> ModalId {
        let id = entry.id;
        debug!(id = id.id(), position = ?entry.position, "pushing modal");
        self.modals.push(entry);
        self.touch();
        id
    }

    /// Remove an entry by id, returning it. The drag lock is released if the
    /// removed entry held it.
    pub fn remove(&mut self, id: ModalId) -> Option<ModalEntry<C>> {
        let index = self.modals.iter().position(|m| m.id == id)?;
        if self.active_drag == Some(id) {
            self.active_drag = None;
        }
        let entry = self.modals.remove(index);
        self.touch();
        Some(entry)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.modals.len()
    }

    /// Whether the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modals.is_empty()
    }

    /// Entries in stack order, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &ModalEntry<C>> {
        self.modals.iter()
    }

    // --- Lookups ---

    /// Index of the entry with the given id.
    pub fn index_of(&self, id: ModalId) -> Result<usize, StackError> {
        self.modals
            .iter()
            .position(|m| m.id == id)
            .ok_or(StackError::NotFound(id))
    }

    /// The entry with the given id.
    pub fn get(&self, id: ModalId) -> Option<&ModalEntry<C>> {
        self.modals.iter().find(|m| m.id == id)
    }

    /// Mutable access to the entry with the given id. Position changes must
    /// go through [`ModalStack::set_position`]; this is for content.
    pub fn get_mut(&mut self, id: ModalId) -> Option<&mut ModalEntry<C>> {
        self.modals.iter_mut().find(|m| m.id == id)
    }

    /// The entry presented above/after the given one, or `None` for the last
    /// entry.
    pub fn next(&self, id: ModalId) -> Option<&ModalEntry<C>> {
        let index = self.index_of(id).ok()?;
        self.modals.get(index + 1)
    }

    /// Whether the given id is the first (bottom-most, primary) entry.
    /// `false` on an empty stack or for unknown ids.
    pub fn is_first(&self, id: ModalId) -> bool {
        self.modals.first().is_some_and(|m| m.id == id)
    }

    // --- Derived visibility ---

    /// Whether the entry is the front-most interactive modal.
    ///
    /// An entry with nothing above it is active whenever it occupies one of
    /// the single-sheet positions. An entry with something above it is
    /// active only while that next entry stays down (`PartiallyRevealed` or
    /// `Closed`) and the entry is not the primary one.
    pub fn is_active(&self, id: ModalId) -> bool {
        let Some(entry) = self.get(id) else {
            return false;
        };
        match self.next(id) {
            Some(next) => {
                matches!(
                    next.position,
                    SheetPosition::PartiallyRevealed | SheetPosition::Closed
                ) && !self.is_first(id)
            }
            None => matches!(
                entry.position,
                SheetPosition::Open
                    | SheetPosition::PartiallyRevealed
                    | SheetPosition::Closed
                    | SheetPosition::Fullscreen
            ),
        }
    }

    /// Whether the entry is visually demoted because the modal above it has
    /// been pulled up.
    pub fn is_backgrounded(&self, id: ModalId) -> bool {
        match self.next(id) {
            Some(next) => !matches!(
                next.position,
                SheetPosition::Base | SheetPosition::Closed | SheetPosition::PartiallyRevealed
            ),
            None => false,
        }
    }

    /// Visual parameters for the entry, derived from its visibility.
    pub fn entry_visuals(&self, id: ModalId) -> StackEntryVisuals {
        visual::stack_entry_visuals(self.is_active(id), self.is_backgrounded(id))
    }

    /// Vertical offset of the entry including its live drag. Entries that
    /// are not active sit at their resting offset.
    pub fn entry_offset(&self, id: ModalId) -> Result<f64, StackError> {
        let index = self.index_of(id)?;
        let entry = &self.modals[index];
        if self.is_active(id) {
            Ok(visual::sheet_offset(
                entry.position,
                entry.drag_offset.y,
                &self.metrics,
            ))
        } else {
            Ok(entry.position.offset_from_top(&self.metrics))
        }
    }

    // --- Position changes ---

    /// Programmatic position change (modals routinely reposition each other).
    /// Performs the same timer bookkeeping as a snap transition.
    pub fn set_position(
        &mut self,
        now: Instant,
        id: ModalId,
        position: SheetPosition,
    ) -> Result<(), StackError> {
        let index = self.index_of(id)?;
        if self.modals[index].position == position {
            return Ok(());
        }
        self.apply_position(now, index, position);
        self.touch();
        Ok(())
    }

    fn apply_position(&mut self, now: Instant, index: usize, position: SheetPosition) {
        let delay = self.auto_fullscreen_delay;
        let entry = &mut self.modals[index];
        entry.position = position;
        if position == SheetPosition::Open && entry.fullscreen_enabled {
            debug!(id = entry.id.id(), "modal settled open, arming promotion");
            entry.auto_fullscreen.arm(now, delay);
        } else {
            entry.auto_fullscreen.cancel();
        }
    }

    // --- Gesture routing ---

    /// Per-frame drag update for the given entry. Only one entry may be
    /// mid-drag; updates for any other entry are dropped while a drag is
    /// live. Starting a drag cancels the entry's pending promotion.
    pub fn on_drag_update(
        &mut self,
        id: ModalId,
        update: DragUpdate,
    ) -> Result<(), StackError> {
        let index = self.index_of(id)?;
        if self.active_drag.is_some_and(|active| active != id) {
            debug!(id = id.id(), "dropping drag update, another modal is mid-drag");
            return Ok(());
        }
        self.active_drag = Some(id);

        let entry = &mut self.modals[index];
        // A fullscreen modal does not track the finger.
        entry.drag_offset = if entry.position == SheetPosition::Fullscreen {
            Vec2::ZERO
        } else {
            update.translation
        };
        entry.auto_fullscreen.cancel();
        self.touch();
        Ok(())
    }

    /// Final drag event for the given entry. Resolves the snap position,
    /// clears the drag lock, and arms the promotion when the entry settles
    /// at `Open` with fullscreen enabled.
    pub fn on_drag_end(
        &mut self,
        now: Instant,
        id: ModalId,
        update: DragUpdate,
    ) -> Result<SheetPosition, StackError> {
        let index = self.index_of(id)?;
        if self.active_drag.is_some_and(|active| active != id) {
            debug!(id = id.id(), "dropping drag end, another modal is mid-drag");
            return Ok(self.modals[index].position);
        }
        self.active_drag = None;

        let entry = &mut self.modals[index];
        entry.drag_offset = Vec2::ZERO;
        let resolved = resolve_snap(entry.position, &update, &self.metrics);
        self.apply_position(now, index, resolved);
        self.touch();
        Ok(resolved)
    }

    /// Poll every entry's auto-fullscreen deadline. Promotion conditions are
    /// evaluated against live state at poll time: the entry is still `Open`,
    /// not mid-drag, and fullscreen is enabled.
    pub fn tick(&mut self, now: Instant) {
        let mut changed = false;
        let dragging = self.active_drag;
        for entry in &mut self.modals {
            if !entry.auto_fullscreen.fire(now) {
                continue;
            }
            if entry.position == SheetPosition::Open
                && dragging != Some(entry.id)
                && entry.drag_offset.is_zero()
                && entry.fullscreen_enabled
            {
                debug!(id = entry.id.id(), "auto-fullscreen promotion fired");
                entry.position = SheetPosition::Fullscreen;
                changed = true;
            } else {
                debug!(id = entry.id.id(), "auto-fullscreen promotion suppressed");
            }
        }
        if changed {
            self.touch();
        }
    }
}

impl<C> std::fmt::Debug for ModalStack<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalStack")
            .field("len", &self.modals.len())
            .field("active_drag", &self.active_drag)
            .finish()
    }
}

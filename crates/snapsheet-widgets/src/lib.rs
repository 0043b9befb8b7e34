#![forbid(unsafe_code)]

//! Interaction logic for snapsheet: snap-position resolution, visual
//! parameter derivation, the single-sheet presenter, and the stacked-modal
//! manager.
//!
//! Nothing here renders. The host framework feeds drag gesture events in and
//! reads positions, offsets, and visual parameters (scale, corner radius,
//! darkening opacity, spring specs) back out.

pub mod sheet;
pub mod snap;
pub mod stack;
pub mod visual;

pub use sheet::{AUTO_FULLSCREEN_DELAY, Sheet, SheetConfig};
pub use snap::resolve_snap;
pub use stack::{ModalEntry, ModalId, ModalStack, StackError, STACK_OPEN_OFFSET};
pub use visual::{
    BackdropVisuals, SpringSpec, StackEntryVisuals, backdrop_visuals, sheet_corner_radius,
    sheet_offset, stack_entry_visuals,
};

#![forbid(unsafe_code)]

//! Core data types for snapsheet: geometry, the drag gesture contract, and
//! the snap-position offset table.
//!
//! Everything in this crate is pure data. Gesture recognition, rendering,
//! and animation belong to the host UI framework; these types describe the
//! values flowing across that boundary.

pub mod drag;
pub mod event;
pub mod geometry;
pub mod position;

pub use drag::DragState;
pub use event::DragUpdate;
pub use geometry::{Point, Vec2};
pub use position::{PositionMetrics, SheetPosition};

#![forbid(unsafe_code)]

//! Public facade for the snapsheet workspace.
//!
//! Re-exports the member crates under stable paths and provides a
//! [`prelude`] with the types most applications touch: the sheet presenter,
//! the modal stack, and the gesture/position vocabulary they share.
//!
//! ```
//! use snapsheet::prelude::*;
//!
//! let sheet = Sheet::new(SheetConfig::new(900.0));
//! assert_eq!(sheet.current_position(), SheetPosition::Closed);
//! ```

pub use snapsheet_core as core;
pub use snapsheet_runtime as runtime;
pub use snapsheet_widgets as widgets;

/// Commonly used types, one `use` away.
pub mod prelude {
    pub use snapsheet_core::drag::DragState;
    pub use snapsheet_core::event::DragUpdate;
    pub use snapsheet_core::geometry::{Point, Vec2};
    pub use snapsheet_core::position::{PositionMetrics, SheetPosition};
    pub use snapsheet_runtime::reactive::{Observable, Subscription};
    pub use snapsheet_widgets::{
        BackdropVisuals, ModalEntry, ModalId, ModalStack, Sheet, SheetConfig, SpringSpec,
        StackEntryVisuals, StackError,
    };
}

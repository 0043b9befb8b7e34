#![forbid(unsafe_code)]

//! Runtime support for snapsheet: reactive observable state and the one-shot
//! deadline timer that drives auto-fullscreen promotion.
//!
//! Everything here is single-threaded and UI-event-driven. State is shared
//! through `Rc<RefCell>`; there are no worker threads and no locks. Timers
//! are deadlines polled by the host's event loop rather than scheduled
//! callbacks, so a firing timer always observes state as it is at poll time.

pub mod reactive;
pub mod timer;

pub use reactive::{Observable, Subscription};
pub use timer::OneShotTimer;

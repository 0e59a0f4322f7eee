//! Background tasks module
//! 
//! The countdown clock and the presentation coordinator, each owning the
//! timers they register.

pub mod coordinator;
pub mod countdown;

// Re-export main types
pub use coordinator::{PresentationCoordinator, POPUP_DURATION};
pub use countdown::{CountdownClock, TICK_PERIOD};

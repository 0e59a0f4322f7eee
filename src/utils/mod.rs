//! Utility functions module
//! 
//! Scoped timers, explicit event subscriptions, clocks and signal handling
//! used throughout the application.

pub mod clock;
pub mod signals;
pub mod subscription;
pub mod timer;

// Re-export main types
pub use clock::{Clock, ManualClock, ShiftedClock, SystemClock};
pub use signals::shutdown_signal;
pub use subscription::{OnceSubscription, PersistentSubscription};
pub use timer::TimerHandle;

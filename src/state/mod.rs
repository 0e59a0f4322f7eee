//! State management module
//! 
//! This module contains the countdown values and the presentation state
//! machine, free of timers and I/O.

pub mod presentation;
pub mod remaining;
pub mod target;

// Re-export main types
pub use presentation::{AudioStage, Phase, PresentationState};
pub use remaining::RemainingDuration;
pub use target::TargetMoment;

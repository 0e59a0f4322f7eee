//! Undangan - a wedding invitation with a live countdown
//! 
//! This library provides the countdown to the celebration, the guest
//! personalization read from the invitation link, and the coordinator that
//! sequences the welcome gate, background music readiness and the music
//! popup.

pub mod config;
pub mod invitation;
pub mod services;
pub mod state;
pub mod tasks;
pub mod terminal;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use invitation::Invitation;
pub use state::{PresentationState, RemainingDuration, TargetMoment};
pub use tasks::{CountdownClock, PresentationCoordinator};
pub use utils::signals::shutdown_signal;

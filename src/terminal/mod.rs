//! Terminal presentation module
//! 
//! Renders the invitation as text or JSON and parses guest interactions.

pub mod interaction;
pub mod render;
pub mod snapshot;

pub use interaction::Interaction;
pub use render::{render_content, render_countdown, render_gate, render_status};
pub use snapshot::Snapshot;

//! External environment module
//! 
//! This module contains the audio element the page plays its background
//! music through.

pub mod media;

// Re-export main types
pub use media::*;

//! AI components

pub mod boss;
pub mod chaser;


// Re-export all components
pub use boss::*;
pub use chaser::*;

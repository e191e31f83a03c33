//! AI systems

pub mod boss;
pub mod chase;

// Re-export all systems
pub use boss::*;
pub use chase::*;

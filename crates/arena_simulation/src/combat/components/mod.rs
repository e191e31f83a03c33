//! Combat components

pub mod effects;
pub mod loadout;
pub mod melee;
pub mod missile;
pub mod ranged;

#[cfg(test)]
mod ranged_tests;

// Re-export all components
pub use effects::*;
pub use loadout::*;
pub use melee::*;
pub use missile::*;
pub use ranged::*;

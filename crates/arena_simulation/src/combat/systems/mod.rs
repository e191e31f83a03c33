//! Combat systems

pub mod damage;
pub mod loadout;
pub mod melee;
pub mod missile;
pub mod ranged;

// Re-export all systems
pub use damage::*;
pub use loadout::*;
pub use melee::*;
pub use missile::*;
pub use ranged::*;

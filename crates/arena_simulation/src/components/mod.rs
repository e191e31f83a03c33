//! ECS Components для combatant entity
//!
//! Организация по доменам:
//! - actor: классификация (CombatantKind), Health, Hurtbox
//! - player: player marker + input intent (PlayerControl)
//! - movement: горизонтальные helpers (move_towards, face_towards)
//! - timer: countdown helper для f32 таймеров

pub mod actor;
pub mod movement;
pub mod player;
pub mod timer;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
pub use timer::{countdown, reached};

//! Physics module (in-ECS, без внешнего physics engine)
//!
//! - spatial: overlap sphere + hit-scan raycast по сферическим hurtbox'ам
//! - movement: player movement/aim из PlayerControl

pub mod movement;
pub mod spatial;

// Re-export основных типов
pub use movement::drive_player;
pub use spatial::{overlap_sphere, raycast, RayHit, SpatialCandidate};

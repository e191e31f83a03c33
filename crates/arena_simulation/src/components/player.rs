//! Player marker + input intent

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// AI (boss, chasers) ищет цель через `With<Player>`.
/// В single-player режиме ровно один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Intent игрока от внешнего input collaborator'а
///
/// `move_input`: WASD/stick в плоскости XZ (x → X, y → Z).
/// `aim_point`: точка в мире под курсором (None = не поворачиваться).
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerControl {
    pub move_input: Vec2,
    pub aim_point: Option<Vec3>,
    pub speed: f32,
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self {
            move_input: Vec2::ZERO,
            aim_point: None,
            speed: 6.0,
        }
    }
}

//! Горизонтальные movement helpers (top-down, плоскость XZ)

use bevy::prelude::*;

/// Нормализованное горизонтальное направление `from → to` (y = 0)
///
/// Совпадающие позиции (или чисто вертикальный offset) → `Vec3::ZERO`.
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Vec3 {
    let mut delta = to - from;
    delta.y = 0.0;
    delta.normalize_or_zero()
}

/// Сдвигает `current` к `target` не больше чем на `max_step` (без overshoot)
pub fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_step
    }
}

/// Поворачивает transform лицом к точке (только yaw)
///
/// Если точка совпадает с позицией: rotation не меняется.
pub fn face_towards(transform: &mut Transform, point: Vec3) {
    face_direction(transform, point - transform.translation);
}

pub fn face_direction(transform: &mut Transform, direction: Vec3) {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() > f32::EPSILON {
        transform.look_to(flat, Vec3::Y);
    }
}

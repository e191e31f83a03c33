//! Spatial queries для combat resolvers
//!
//! Brute-force по списку кандидатов: combatant'ов на арене десятки, не тысячи.
//! Layer/tag фильтр применяет вызывающая система (CombatantKind predicate),
//! сюда приходят уже отфильтрованные кандидаты.

use bevy::prelude::*;

/// Кандидат для spatial query: entity + центр и радиус hurtbox'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialCandidate {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
}

impl SpatialCandidate {
    pub fn new(entity: Entity, center: Vec3, radius: f32) -> Self {
        Self {
            entity,
            center,
            radius,
        }
    }
}

/// Ближайшее пересечение луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

/// Все кандидаты, чей hurtbox пересекает сферу (center, radius)
///
/// Порядок результата не значим.
pub fn overlap_sphere(
    center: Vec3,
    radius: f32,
    candidates: impl IntoIterator<Item = SpatialCandidate>,
) -> Vec<Entity> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.center.distance(center) <= radius + candidate.radius)
        .map(|candidate| candidate.entity)
        .collect()
}

/// Ближайший hurtbox вдоль луча в пределах `max_distance`
///
/// Нулевое направление ничего не находит. Origin внутри сферы → hit на distance 0.
pub fn raycast(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    candidates: impl IntoIterator<Item = SpatialCandidate>,
) -> Option<RayHit> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO || max_distance < 0.0 {
        return None;
    }

    let mut nearest: Option<RayHit> = None;
    for candidate in candidates {
        let Some(distance) = ray_sphere_distance(origin, direction, candidate.center, candidate.radius)
        else {
            continue;
        };
        if distance > max_distance {
            continue;
        }
        if nearest.is_none_or(|hit| distance < hit.distance) {
            nearest = Some(RayHit {
                entity: candidate.entity,
                point: origin + direction * distance,
                distance,
            });
        }
    }
    nearest
}

/// Distance до первого пересечения луча (direction нормализован) со сферой
fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;

    // Снаружи и смотрим от сферы
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()).max(0.0))
}

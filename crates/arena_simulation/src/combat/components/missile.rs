//! Ракета босса (projectile)

use bevy::prelude::*;
use serde::Deserialize;

use crate::components::countdown;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissileConfig {
    pub speed: f32,
    pub lifetime: f32,
    pub damage: f32,
    pub contact_radius: f32,
}

impl Default for MissileConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            lifetime: 2.0,
            damage: 1.0,
            contact_radius: 0.3,
        }
    }
}

/// Летит по прямой из shoot point босса. Валидная цель только игрок
#[derive(Component, Debug, Clone)]
pub struct BossMissile {
    pub owner: Entity,
    pub direction: Vec3,
    pub speed: f32,
    pub remaining_lifetime: f32,
    pub damage: f32,
    pub contact_radius: f32,
}

impl BossMissile {
    pub fn new(owner: Entity, direction: Vec3, config: &MissileConfig) -> Self {
        Self {
            owner,
            direction: direction.normalize_or_zero(),
            speed: config.speed,
            remaining_lifetime: config.lifetime,
            damage: config.damage,
            contact_radius: config.contact_radius,
        }
    }

    /// Displacement за tick; по окончании lifetime ракета expired
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.remaining_lifetime = countdown(self.remaining_lifetime, dt);
        self.direction * self.speed * dt
    }

    pub fn expired(&self) -> bool {
        self.remaining_lifetime <= 0.0
    }
}

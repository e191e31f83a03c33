//! Chaser: обычный враг, бежит к игроку и бьёт контактом

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChaserConfig {
    pub speed: f32,
    pub contact_damage: f32,
    /// Дополнительный зазор контакта поверх суммы hurtbox радиусов
    pub contact_radius: f32,
}

impl Default for ChaserConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            contact_damage: 1.0,
            contact_radius: 0.2,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Chaser {
    pub speed: f32,
    pub contact_damage: f32,
    pub contact_radius: f32,
}

impl From<&ChaserConfig> for Chaser {
    fn from(config: &ChaserConfig) -> Self {
        Self {
            speed: config.speed,
            contact_damage: config.contact_damage,
            contact_radius: config.contact_radius,
        }
    }
}

impl Default for Chaser {
    fn default() -> Self {
        Self::from(&ChaserConfig::default())
    }
}

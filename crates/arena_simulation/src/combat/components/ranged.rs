//! Ranged weapon компоненты
//!
//! Hit-scan стрельба с cooldown, запас патронов и reload cycle.

use bevy::prelude::*;
use serde::Deserialize;

use crate::components::countdown;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RangedConfig {
    pub time_between_shots: f32,
    pub capacity: u32,
    pub reload_time: f32,
    /// Дальность hit-scan (метры)
    pub max_distance: f32,
    pub damage: f32,
}

impl Default for RangedConfig {
    fn default() -> Self {
        Self {
            time_between_shots: 0.5,
            capacity: 10,
            reload_time: 2.0,
            max_distance: 10.0,
            damage: 10.0,
        }
    }
}

/// Состояние патронов, сохраняемое между weapon switch'ами
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmmoSnapshot {
    pub ammo: u32,
    pub reload_remaining: f32,
}

/// Что произошло за один tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangedTick {
    pub fired: bool,
    pub reload_started: bool,
    pub reloaded: bool,
}

/// Состояние ranged оружия
///
/// Инвариант: `can_fire == false` пока `ammo == 0`; стрельба снова доступна
/// только после reload, и тогда ammo уже равен capacity.
#[derive(Component, Debug, Clone)]
pub struct RangedWeapon {
    config: RangedConfig,
    ammo: u32,
    cooldown_remaining: f32,
    reload_remaining: f32,
    can_fire: bool,
    /// Weapon mode toggle. Выключенное оружие не стреляет и не перезаряжается
    pub enabled: bool,
    /// Fire input (зажатый курок)
    pub trigger_held: bool,
}

impl Default for RangedWeapon {
    fn default() -> Self {
        Self::new(RangedConfig::default())
    }
}

impl RangedWeapon {
    pub fn new(config: RangedConfig) -> Self {
        let ammo = config.capacity;
        Self {
            config,
            ammo,
            cooldown_remaining: 0.0,
            reload_remaining: 0.0,
            can_fire: ammo > 0,
            enabled: true,
            trigger_held: false,
        }
    }

    pub fn config(&self) -> &RangedConfig {
        &self.config
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn capacity(&self) -> u32 {
        self.config.capacity
    }

    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    pub fn is_reloading(&self) -> bool {
        !self.can_fire
    }

    pub fn reload_remaining(&self) -> f32 {
        self.reload_remaining
    }

    pub fn tick(&mut self, dt: f32) -> RangedTick {
        let mut result = RangedTick::default();
        if !self.enabled {
            return result;
        }

        self.cooldown_remaining = countdown(self.cooldown_remaining, dt);

        if !self.can_fire {
            self.reload_remaining = countdown(self.reload_remaining, dt);
            if self.reload_remaining == 0.0 {
                self.ammo = self.config.capacity;
                self.can_fire = self.ammo > 0;
                result.reloaded = true;
            }
        }

        if self.trigger_held && self.can_fire && self.ammo > 0 && self.cooldown_remaining == 0.0 {
            self.ammo -= 1;
            self.cooldown_remaining = self.config.time_between_shots;
            result.fired = true;

            if self.ammo == 0 {
                self.begin_reload();
                result.reload_started = true;
            }
        }

        result
    }

    pub fn snapshot(&self) -> AmmoSnapshot {
        AmmoSnapshot {
            ammo: self.ammo,
            reload_remaining: self.reload_remaining,
        }
    }

    pub fn restore(&mut self, snapshot: AmmoSnapshot) {
        self.ammo = snapshot.ammo.min(self.config.capacity);
        if self.ammo > 0 {
            self.can_fire = true;
            self.reload_remaining = 0.0;
        } else {
            self.can_fire = false;
            self.reload_remaining = if snapshot.reload_remaining > 0.0 {
                snapshot.reload_remaining
            } else {
                self.config.reload_time
            };
        }
    }

    fn begin_reload(&mut self) {
        self.can_fire = false;
        self.reload_remaining = self.config.reload_time;
    }
}

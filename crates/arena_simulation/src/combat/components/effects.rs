//! Post-hit эффекты: invulnerability window, knockback, damage flash
//!
//! Три независимых таймера. Tick или перезапуск одного не трогает остальные
//! (конец flash не отменяет идущий knockback).

use bevy::prelude::*;
use serde::Deserialize;

use crate::components::countdown;

/// Остаточная скорость knockback, ниже которой velocity обнуляется
const KNOCKBACK_REST_SPEED: f32 = 0.05;

// ============================================================================
// Damage Response (config)
// ============================================================================

/// Реакция combatant'а на применённый hit
///
/// Длительности в секундах. `knockback_duration == 0` (или нулевая force)
/// выключает knockback целиком: так настроен босс.
#[derive(Component, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DamageResponse {
    pub invulnerability_duration: f32,
    /// Период toggle видимости во время invulnerability (0 = без flicker)
    pub flicker_interval: f32,
    pub knockback_force: f32,
    pub knockback_duration: f32,
    /// Скорость затухания (lerp factor в секунду)
    pub knockback_decay: f32,
    pub flash_duration: f32,
    /// Задержка между смертью и удалением из симуляции
    pub death_delay: f32,
}

impl DamageResponse {
    pub fn player() -> Self {
        Self {
            invulnerability_duration: 1.5,
            flicker_interval: 0.1,
            knockback_force: 5.0,
            knockback_duration: 0.3,
            knockback_decay: 5.0,
            flash_duration: 0.1,
            death_delay: 1.0,
        }
    }

    pub fn enemy() -> Self {
        Self {
            invulnerability_duration: 0.2,
            flicker_interval: 0.1,
            knockback_force: 3.0,
            knockback_duration: 0.2,
            knockback_decay: 5.0,
            flash_duration: 0.1,
            death_delay: 1.0,
        }
    }

    /// Босс: без invulnerability и knockback. Удалением управляет BossBrain
    pub fn boss() -> Self {
        Self {
            invulnerability_duration: 0.0,
            flicker_interval: 0.0,
            knockback_force: 0.0,
            knockback_duration: 0.0,
            knockback_decay: 0.0,
            flash_duration: 0.1,
            death_delay: 2.0,
        }
    }

    pub fn has_knockback(&self) -> bool {
        self.knockback_force > 0.0 && self.knockback_duration > 0.0
    }
}

impl Default for DamageResponse {
    fn default() -> Self {
        Self::enemy()
    }
}

// ============================================================================
// Damage Effects (runtime state)
// ============================================================================

#[derive(Component, Debug, Clone, Default)]
pub struct DamageEffects {
    invulnerable_remaining: f32,
    flicker_interval: f32,
    flicker_timer: f32,
    hidden: bool,
    knockback_velocity: Vec3,
    knockback_remaining: f32,
    knockback_decay: f32,
    flash_remaining: f32,
}

impl DamageEffects {
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_remaining > 0.0
    }

    /// True пока открыто knockback окно
    pub fn is_knocked_back(&self) -> bool {
        self.knockback_remaining > 0.0
    }

    /// Во время knockback собственный movement/aim отключён
    pub fn controls_suspended(&self) -> bool {
        self.is_knocked_back()
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_remaining > 0.0
    }

    /// Flicker для renderer'а (true = спрятать mesh в этом кадре)
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn knockback_velocity(&self) -> Vec3 {
        self.knockback_velocity
    }

    pub fn invulnerable_remaining(&self) -> f32 {
        self.invulnerable_remaining
    }

    pub fn begin_invulnerability(&mut self, duration: f32, flicker_interval: f32) {
        if duration <= 0.0 {
            return;
        }
        self.invulnerable_remaining = duration;
        self.flicker_interval = flicker_interval.max(0.0);
        self.flicker_timer = 0.0;
        self.hidden = false;
    }

    pub fn begin_knockback(&mut self, velocity: Vec3, duration: f32, decay: f32) {
        if duration <= 0.0 {
            return;
        }
        self.knockback_velocity = velocity;
        self.knockback_remaining = duration;
        self.knockback_decay = decay.max(0.0);
    }

    pub fn begin_flash(&mut self, duration: f32) {
        self.flash_remaining = self.flash_remaining.max(duration);
    }

    /// Tick всех эффектов; возвращает knockback displacement за этот tick
    pub fn tick(&mut self, dt: f32) -> Vec3 {
        self.tick_invulnerability(dt);
        self.flash_remaining = countdown(self.flash_remaining, dt);
        self.tick_knockback(dt)
    }

    fn tick_invulnerability(&mut self, dt: f32) {
        if self.invulnerable_remaining <= 0.0 {
            return;
        }

        self.invulnerable_remaining = countdown(self.invulnerable_remaining, dt);
        if self.invulnerable_remaining == 0.0 {
            self.hidden = false;
            self.flicker_timer = 0.0;
            return;
        }

        if self.flicker_interval > 0.0 {
            self.flicker_timer += dt;
            while self.flicker_timer >= self.flicker_interval {
                self.flicker_timer -= self.flicker_interval;
                self.hidden = !self.hidden;
            }
        }
    }

    fn tick_knockback(&mut self, dt: f32) -> Vec3 {
        if self.knockback_velocity == Vec3::ZERO && self.knockback_remaining <= 0.0 {
            return Vec3::ZERO;
        }

        let displacement = self.knockback_velocity * dt;
        self.knockback_remaining = countdown(self.knockback_remaining, dt);

        // Затухание продолжается и после закрытия control window
        let falloff = (self.knockback_decay * dt).clamp(0.0, 1.0);
        self.knockback_velocity = self.knockback_velocity.lerp(Vec3::ZERO, falloff);

        if !self.is_knocked_back()
            && self.knockback_velocity.length_squared() < KNOCKBACK_REST_SPEED * KNOCKBACK_REST_SPEED
        {
            self.knockback_velocity = Vec3::ZERO;
        }

        displacement
    }
}

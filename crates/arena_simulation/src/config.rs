//! Combat tuning (TOML)
//!
//! `CombatTuning`: единый resource со всеми числами боя. Default = базовый
//! баланс; `assets/combat_tuning.toml` может переопределить любую секцию
//! частично (отсутствующие поля берутся из Default соответствующего типа).

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::ai::{BossConfig, ChaserConfig};
use crate::combat::components::{DamageResponse, RangedConfig, SwingTable};

pub const DEFAULT_TUNING_PATH: &str = "assets/combat_tuning.toml";

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Общие параметры combatant'а
///
/// Если секция задана, `max_health` и `hurtbox_radius` обязательны. Частично
/// заданная таблица `response` добирает недостающие поля из enemy preset'а.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CombatantTuning {
    pub max_health: u32,
    pub hurtbox_radius: f32,
    #[serde(default)]
    pub response: DamageResponse,
}

impl CombatantTuning {
    pub fn player() -> Self {
        Self {
            max_health: 5,
            hurtbox_radius: 0.5,
            response: DamageResponse::player(),
        }
    }

    pub fn enemy() -> Self {
        Self {
            max_health: 30,
            hurtbox_radius: 0.5,
            response: DamageResponse::enemy(),
        }
    }

    pub fn boss() -> Self {
        Self {
            max_health: 100,
            hurtbox_radius: 1.0,
            response: DamageResponse::boss(),
        }
    }
}

/// Boss секция: combatant параметры + поведение
///
/// Любое отсутствующее поле берётся из boss preset'а.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_health: u32,
    pub hurtbox_radius: f32,
    pub response: DamageResponse,
    pub behavior: BossConfig,
}

impl BossTuning {
    pub fn combatant(&self) -> CombatantTuning {
        CombatantTuning {
            max_health: self.max_health,
            hurtbox_radius: self.hurtbox_radius,
            response: self.response.clone(),
        }
    }
}

impl Default for BossTuning {
    fn default() -> Self {
        let combatant = CombatantTuning::boss();
        Self {
            max_health: combatant.max_health,
            hurtbox_radius: combatant.hurtbox_radius,
            response: combatant.response,
            behavior: BossConfig::default(),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct CombatTuning {
    #[serde(default = "CombatantTuning::player")]
    pub player: CombatantTuning,
    #[serde(default = "CombatantTuning::enemy")]
    pub enemy: CombatantTuning,
    #[serde(default)]
    pub boss: BossTuning,
    #[serde(default)]
    pub melee: SwingTable,
    #[serde(default)]
    pub ranged: RangedConfig,
    #[serde(default)]
    pub chaser: ChaserConfig,
    #[serde(default = "default_player_speed")]
    pub player_speed: f32,
}

fn default_player_speed() -> f32 {
    6.0
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            player: CombatantTuning::player(),
            enemy: CombatantTuning::enemy(),
            boss: BossTuning::default(),
            melee: SwingTable::default(),
            ranged: RangedConfig::default(),
            chaser: ChaserConfig::default(),
            player_speed: default_player_speed(),
        }
    }
}

impl CombatTuning {
    /// Parse + validate
    pub fn from_toml_str(source: &str) -> Result<Self, TuningError> {
        let tuning: CombatTuning = toml::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Load с fallback на Default (warning в лог)
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(err) => {
                crate::logger::log_warning(&format!(
                    "⚠️ Tuning {:?} not loaded ({}), using defaults",
                    path.as_ref(),
                    err
                ));
                Self::default()
            }
        }
    }

    /// Отклоняет конфигурацию, на которой симуляция зависнет или сломается
    ///
    /// Все числа обязаны быть конечными: NaN/inf в таймере = countdown,
    /// который никогда не истекает.
    pub fn validate(&self) -> Result<(), TuningError> {
        let boss = self.boss.combatant();
        for (name, combatant) in [
            ("player", &self.player),
            ("enemy", &self.enemy),
            ("boss", &boss),
        ] {
            if combatant.max_health == 0 {
                return invalid(format!("{name}.max_health must be positive"));
            }
            non_negative(&format!("{name}.hurtbox_radius"), combatant.hurtbox_radius)?;
            let response = &combatant.response;
            for (field, value) in [
                ("invulnerability_duration", response.invulnerability_duration),
                ("flicker_interval", response.flicker_interval),
                ("knockback_force", response.knockback_force),
                ("knockback_duration", response.knockback_duration),
                ("knockback_decay", response.knockback_decay),
                ("flash_duration", response.flash_duration),
                ("death_delay", response.death_delay),
            ] {
                non_negative(&format!("{name}.response.{field}"), value)?;
            }
        }

        let melee = &self.melee;
        non_negative("melee.expire_time", melee.expire_time)?;
        non_negative("melee.accept_input_window", melee.accept_input_window)?;
        finite("melee.attack_offset", melee.attack_offset)?;
        if melee.accept_input_window >= melee.expire_time {
            return invalid(format!(
                "melee.accept_input_window ({}) must be shorter than melee.expire_time ({})",
                melee.accept_input_window, melee.expire_time
            ));
        }
        for (index, swing) in melee.swings.iter().enumerate() {
            let swing_name = format!("melee swing {}", index + 1);
            non_negative(&format!("{swing_name} delay"), swing.delay)?;
            non_negative(&format!("{swing_name} radius"), swing.radius)?;
            non_negative(&format!("{swing_name} damage"), swing.damage)?;
            // Swing обязан отработать до того как откроется следующий input
            if swing.delay >= melee.accept_input_window {
                return invalid(format!(
                    "{swing_name} delay ({}) must be in [0, accept_input_window)",
                    swing.delay
                ));
            }
        }

        let ranged = &self.ranged;
        if ranged.capacity == 0 {
            return invalid("ranged.capacity must be positive".to_string());
        }
        non_negative("ranged.time_between_shots", ranged.time_between_shots)?;
        non_negative("ranged.reload_time", ranged.reload_time)?;
        non_negative("ranged.max_distance", ranged.max_distance)?;
        non_negative("ranged.damage", ranged.damage)?;

        let boss = &self.boss.behavior;
        for (field, value) in [
            ("speed", boss.speed),
            ("shooting_interval", boss.shooting_interval),
            ("idle_duration", boss.idle_duration),
            ("first_pattern_duration", boss.first_pattern_duration),
            ("second_pattern_duration", boss.second_pattern_duration),
            ("orbit_radius", boss.orbit_radius),
            ("charge_speed_multiplier", boss.charge_speed_multiplier),
            ("charge_duration", boss.charge_duration),
            ("charge_overshoot", boss.charge_overshoot),
            ("transition_pause", boss.transition_pause),
            ("death_duration", boss.death_duration),
            ("missile.speed", boss.missile.speed),
            ("missile.lifetime", boss.missile.lifetime),
            ("missile.damage", boss.missile.damage),
            ("missile.contact_radius", boss.missile.contact_radius),
        ] {
            non_negative(&format!("boss.behavior.{field}"), value)?;
        }
        // Знак задаёт направление orbit / сторону shoot point
        finite("boss.behavior.orbit_speed", boss.orbit_speed)?;
        finite("boss.behavior.shoot_offset", boss.shoot_offset)?;
        if !(0.0..=1.0).contains(&boss.summon_fraction) {
            return invalid(format!(
                "boss.behavior.summon_fraction ({}) must be within [0, 1]",
                boss.summon_fraction
            ));
        }

        non_negative("player_speed", self.player_speed)?;
        non_negative("chaser.speed", self.chaser.speed)?;
        non_negative("chaser.contact_damage", self.chaser.contact_damage)?;
        non_negative("chaser.contact_radius", self.chaser.contact_radius)?;

        Ok(())
    }
}

fn finite(name: &str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        invalid(format!("{name} must be finite, got {value}"))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), TuningError> {
    finite(name, value)?;
    if value < 0.0 {
        return invalid(format!("{name} must not be negative, got {value}"));
    }
    Ok(())
}

fn invalid(message: String) -> Result<(), TuningError> {
    crate::logger::log_error(&format!("❌ Rejected tuning: {}", message));
    Err(TuningError::Invalid(message))
}

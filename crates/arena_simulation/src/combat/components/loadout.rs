//! Weapon mode switch: melee ↔ ranged

use bevy::prelude::*;

use super::melee::MeleeCombo;
use super::ranged::{AmmoSnapshot, RangedWeapon};

pub const DEFAULT_SWITCH_COOLDOWN: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponMode {
    #[default]
    Melee,
    Ranged,
}

impl WeaponMode {
    pub fn other(self) -> Self {
        match self {
            WeaponMode::Melee => WeaponMode::Ranged,
            WeaponMode::Ranged => WeaponMode::Melee,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched(WeaponMode),
    CoolingDown,
    /// Идёт melee combo, а switch не forced
    ComboInProgress,
}

/// Активный weapon mode + ammo, сохранённый пока ranged убран
#[derive(Component, Debug, Clone)]
pub struct WeaponLoadout {
    mode: WeaponMode,
    pub switch_cooldown: f32,
    since_last_switch: f32,
    saved_ammo: Option<AmmoSnapshot>,
}

impl Default for WeaponLoadout {
    fn default() -> Self {
        Self::new(WeaponMode::Melee)
    }
}

impl WeaponLoadout {
    pub fn new(mode: WeaponMode) -> Self {
        Self {
            mode,
            switch_cooldown: DEFAULT_SWITCH_COOLDOWN,
            // Первый switch cooldown не блокирует
            since_last_switch: DEFAULT_SWITCH_COOLDOWN,
            saved_ammo: None,
        }
    }

    pub fn mode(&self) -> WeaponMode {
        self.mode
    }

    pub fn saved_ammo(&self) -> Option<AmmoSnapshot> {
        self.saved_ammo
    }

    pub fn tick(&mut self, dt: f32) {
        self.since_last_switch += dt;
    }

    /// Применяет enable флаги текущего mode без переключения
    pub fn apply(&self, melee: &mut MeleeCombo, ranged: &mut RangedWeapon) {
        melee.enabled = self.mode == WeaponMode::Melee;
        ranged.enabled = self.mode == WeaponMode::Ranged;
        if !ranged.enabled {
            ranged.trigger_held = false;
        }
    }

    /// Переключение weapon mode
    pub fn toggle(
        &mut self,
        melee: &mut MeleeCombo,
        ranged: &mut RangedWeapon,
        force: bool,
    ) -> SwitchOutcome {
        if self.since_last_switch < self.switch_cooldown {
            return SwitchOutcome::CoolingDown;
        }
        if melee.in_progress() && !force {
            return SwitchOutcome::ComboInProgress;
        }

        melee.reset_combo();

        let next = self.mode.other();
        match next {
            WeaponMode::Melee => {
                self.saved_ammo = Some(ranged.snapshot());
            }
            WeaponMode::Ranged => {
                if let Some(snapshot) = self.saved_ammo.take() {
                    ranged.restore(snapshot);
                }
            }
        }

        self.mode = next;
        self.since_last_switch = 0.0;
        self.apply(melee, ranged);
        SwitchOutcome::Switched(next)
    }
}

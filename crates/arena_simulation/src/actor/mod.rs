//! Actor spawn bundles
//!
//! Компоненты player / enemy / boss собираются из `CombatTuning`, чтобы
//! headless binary, тесты и внешний host спавнили одинаковые сущности.

use bevy::prelude::*;

use crate::ai::{BossBrain, Chaser};
use crate::combat::components::{
    DamageEffects, MeleeCombo, RangedWeapon, WeaponLoadout, WeaponMode,
};
use crate::components::{CombatantKind, Health, Hurtbox, Player, PlayerControl};
use crate::config::{CombatTuning, CombatantTuning};

fn combatant(kind: CombatantKind, tuning: &CombatantTuning) -> impl Bundle {
    (
        kind,
        Health::new(tuning.max_health),
        Hurtbox {
            radius: tuning.hurtbox_radius,
        },
        DamageEffects::default(),
        tuning.response.clone(),
    )
}

/// Player: melee активен, ranged выключен (WeaponMode::Melee)
pub fn player_bundle(tuning: &CombatTuning, position: Vec3) -> impl Bundle {
    let loadout = WeaponLoadout::new(WeaponMode::Melee);
    let mut melee = MeleeCombo::new(tuning.melee.clone());
    let mut ranged = RangedWeapon::new(tuning.ranged.clone());
    loadout.apply(&mut melee, &mut ranged);

    (
        Player,
        combatant(CombatantKind::Player, &tuning.player),
        PlayerControl {
            speed: tuning.player_speed,
            ..PlayerControl::default()
        },
        melee,
        ranged,
        loadout,
        Transform::from_translation(position),
    )
}

pub fn enemy_bundle(tuning: &CombatTuning, position: Vec3) -> impl Bundle {
    (
        combatant(CombatantKind::Enemy, &tuning.enemy),
        Chaser::from(&tuning.chaser),
        Transform::from_translation(position),
    )
}

/// Boss: home position = точка спавна (Idling возвращается сюда)
pub fn boss_bundle(tuning: &CombatTuning, position: Vec3) -> impl Bundle {
    (
        combatant(CombatantKind::Boss, &tuning.boss.combatant()),
        BossBrain::new(tuning.boss.behavior.clone(), position),
        Transform::from_translation(position),
    )
}

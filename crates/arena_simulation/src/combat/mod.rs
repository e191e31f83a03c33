//! Combat system module
//!
//! ECS ответственность:
//! - Health + post-hit effects (invulnerability, knockback, flash)
//! - Melee combo (3 удара, input window, dedup целей за swing)
//! - Ranged hit-scan (cooldown, ammo, reload)
//! - Weapon mode switch (melee ↔ ranged, сохранение ammo)
//! - Boss missiles
//!
//! Все атаки пишут `DamageRequest`; `apply_damage_requests` единственная точка
//! мутации Health (sync point между attacker и defender state).

use bevy::prelude::*;

pub mod components;
pub mod damage;
pub mod error;
pub mod events;
pub mod systems;


// Re-export основных типов
pub use components::*;
pub use damage::{
    resolve_hit, round_damage, DamageDealt, DamageRequest, DamageSource, Dead, DespawnAfter,
    EntityDied, HitIgnored, HitOutcome,
};
pub use error::CombatConfigError;
pub use events::{MeleeAttackIntent, WeaponSwitchIntent};

use crate::presentation::PresentationCue;
use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (60Hz).
///
/// Порядок выполнения (через SimulationSet):
/// 1. Effects: tick_damage_effects
/// 2. Loadout: process_weapon_switches
/// 3. Weapons: update_melee_combos → update_ranged_weapons
/// 4. Behavior: advance_boss_missiles (после AI систем)
/// 5. Damage: apply_damage_requests
/// 6. Death: schedule_despawn_on_death → despawn_after_timeout
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<MeleeAttackIntent>()
            .add_event::<WeaponSwitchIntent>()
            .add_event::<PresentationCue>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Effects,
                SimulationSet::Loadout,
                SimulationSet::Weapons,
                SimulationSet::Behavior,
                SimulationSet::Damage,
                SimulationSet::Death,
                SimulationSet::Bookkeeping,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_damage_effects.in_set(SimulationSet::Effects),
                systems::process_weapon_switches.in_set(SimulationSet::Loadout),
                (systems::update_melee_combos, systems::update_ranged_weapons)
                    .chain()
                    .in_set(SimulationSet::Weapons),
                systems::advance_boss_missiles
                    .in_set(SimulationSet::Behavior)
                    .after(crate::ai::systems::enemy_contact_damage),
                systems::apply_damage_requests.in_set(SimulationSet::Damage),
                (systems::schedule_despawn_on_death, systems::despawn_after_timeout)
                    .chain()
                    .in_set(SimulationSet::Death),
            ),
        );
    }
}

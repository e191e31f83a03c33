//! Weapon mode switch система

use bevy::prelude::*;

use crate::combat::components::{MeleeCombo, RangedWeapon, SwitchOutcome, WeaponLoadout};
use crate::combat::events::WeaponSwitchIntent;

/// Система: switch cooldown + обработка WeaponSwitchIntent
pub fn process_weapon_switches(
    mut intents: EventReader<WeaponSwitchIntent>,
    mut query: Query<(&mut WeaponLoadout, &mut MeleeCombo, &mut RangedWeapon)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut loadout, _, _) in query.iter_mut() {
        loadout.tick(delta);
    }

    for intent in intents.read() {
        let Ok((mut loadout, mut melee, mut ranged)) = query.get_mut(intent.entity) else {
            continue;
        };

        match loadout.toggle(&mut melee, &mut ranged, intent.force) {
            SwitchOutcome::Switched(mode) => {
                crate::logger::log(&format!("🎭 Weapon mode → {:?} ({:?})", mode, intent.entity));
            }
            SwitchOutcome::ComboInProgress => {
                crate::logger::log(&format!(
                    "🎭 Switch blocked: combo in progress ({:?})",
                    intent.entity
                ));
            }
            SwitchOutcome::CoolingDown => {}
        }
    }
}

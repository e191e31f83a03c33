//! Melee combo системы

use bevy::prelude::*;

use crate::combat::components::{MeleeCombo, MeleePress};
use crate::combat::damage::{DamageRequest, DamageSource, Dead};
use crate::combat::events::MeleeAttackIntent;
use crate::components::{CombatantKind, Hurtbox};
use crate::physics::{overlap_sphere, SpatialCandidate};
use crate::presentation::{PresentationCue, SoundKind};

/// Система: tick melee combo, резолв готовых swing'ов, затем attack input'ы
///
/// Таймеры идут до input'ов, поэтому input после третьего swing'а сбрасывает
/// combo на следующем tick.
pub fn update_melee_combos(
    mut intents: EventReader<MeleeAttackIntent>,
    mut wielders: Query<(Entity, &mut MeleeCombo, &Transform), Without<Dead>>,
    targets: Query<(Entity, &Transform, &Hurtbox, &CombatantKind), Without<Dead>>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut cues: EventWriter<PresentationCue>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut combo, transform) in wielders.iter_mut() {
        for swing in combo.tick(delta) {
            resolve_swing(
                entity,
                &mut combo,
                transform,
                swing,
                &targets,
                &mut damage_requests,
            );
        }
    }

    for intent in intents.read() {
        let Ok((_, mut combo, _)) = wielders.get_mut(intent.attacker) else {
            continue;
        };

        match combo.press_attack() {
            MeleePress::Swing(swing) => {
                cues.write(PresentationCue::PlaySound(SoundKind::Melee));
                crate::logger::log(&format!(
                    "⚔️ Melee swing {} started (attacker: {:?})",
                    swing, intent.attacker
                ));
            }
            MeleePress::ComboEnd => {
                cues.write(PresentationCue::PlaySound(SoundKind::Melee));
                crate::logger::log(&format!("⚔️ Combo finished (attacker: {:?})", intent.attacker));
            }
            MeleePress::Locked => {
                cues.write(PresentationCue::PlaySound(SoundKind::Melee));
            }
            MeleePress::Disabled => {}
        }
    }
}

/// Overlap query вокруг attack point; каждая цель получает урон максимум раз за swing
fn resolve_swing(
    attacker: Entity,
    combo: &mut MeleeCombo,
    transform: &Transform,
    swing: u8,
    targets: &Query<(Entity, &Transform, &Hurtbox, &CombatantKind), Without<Dead>>,
    damage_requests: &mut EventWriter<DamageRequest>,
) {
    let spec = match combo.table().swing(swing) {
        Ok(spec) => *spec,
        Err(err) => {
            crate::logger::log_error(&format!("Melee swing rejected: {}", err));
            return;
        }
    };

    let origin =
        transform.translation + transform.forward().as_vec3() * combo.table().attack_offset;

    let candidates = targets
        .iter()
        .filter(|(entity, _, _, kind)| *entity != attacker && kind.is_melee_target())
        .map(|(entity, target_transform, hurtbox, _)| {
            SpatialCandidate::new(entity, target_transform.translation, hurtbox.radius)
        });

    for target in overlap_sphere(origin, spec.radius, candidates) {
        if !combo.register_hit(target) {
            continue;
        }
        damage_requests.write(DamageRequest {
            attacker: Some(attacker),
            target,
            amount: spec.damage,
            source_position: transform.translation,
            source: DamageSource::Melee,
        });
    }
}

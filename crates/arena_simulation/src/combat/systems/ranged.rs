//! Ranged weapon системы (hit-scan)

use bevy::prelude::*;

use crate::combat::components::RangedWeapon;
use crate::combat::damage::{DamageRequest, DamageSource, Dead};
use crate::components::{CombatantKind, Hurtbox};
use crate::physics::{raycast, SpatialCandidate};
use crate::presentation::{EffectKind, PresentationCue, SoundKind};

/// Система: tick ranged оружия, hit-scan выстрел вдоль forward стрелка
///
/// Патрон тратится на каждый выстрел, попал или нет.
pub fn update_ranged_weapons(
    mut shooters: Query<(Entity, &mut RangedWeapon, &Transform), Without<Dead>>,
    targets: Query<(Entity, &Transform, &Hurtbox, &CombatantKind), Without<Dead>>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut cues: EventWriter<PresentationCue>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut weapon, transform) in shooters.iter_mut() {
        let tick = weapon.tick(delta);

        if tick.reloaded {
            crate::logger::log(&format!("🔫 Reloaded: {} rounds ({:?})", weapon.ammo(), entity));
        }
        if tick.reload_started {
            cues.write(PresentationCue::PlaySound(SoundKind::Reloading));
            crate::logger::log(&format!("🔫 Out of ammo, reloading ({:?})", entity));
        }
        if !tick.fired {
            continue;
        }

        cues.write(PresentationCue::PlaySound(SoundKind::Shoot));

        let candidates = targets
            .iter()
            .filter(|(target, _, _, kind)| *target != entity && kind.is_ranged_target())
            .map(|(target, target_transform, hurtbox, _)| {
                SpatialCandidate::new(target, target_transform.translation, hurtbox.radius)
            });

        let Some(hit) = raycast(
            transform.translation,
            transform.forward().as_vec3(),
            weapon.config().max_distance,
            candidates,
        ) else {
            continue;
        };

        damage_requests.write(DamageRequest {
            attacker: Some(entity),
            target: hit.entity,
            amount: weapon.config().damage,
            source_position: transform.translation,
            source: DamageSource::Ranged,
        });
        cues.write(PresentationCue::SpawnEffect {
            kind: EffectKind::Impact,
            position: hit.point,
        });
    }
}

//! Полёт ракет босса + contact damage

use bevy::prelude::*;

use crate::combat::components::BossMissile;
use crate::combat::damage::{DamageRequest, DamageSource, Dead};
use crate::components::{Hurtbox, Player};
use crate::presentation::{EffectKind, PresentationCue};

/// Система: движение ракет, взрыв на игроке или по истечении lifetime
pub fn advance_boss_missiles(
    mut commands: Commands,
    mut missiles: Query<(Entity, &mut BossMissile, &mut Transform), Without<Player>>,
    players: Query<(Entity, &Transform, &Hurtbox), (With<Player>, Without<Dead>)>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut cues: EventWriter<PresentationCue>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let player = players.single().ok();

    for (entity, mut missile, mut transform) in missiles.iter_mut() {
        transform.translation += missile.advance(delta);

        if let Some((player_entity, player_transform, hurtbox)) = player {
            let reach = missile.contact_radius + hurtbox.radius;
            if transform.translation.distance(player_transform.translation) <= reach {
                damage_requests.write(DamageRequest {
                    attacker: Some(missile.owner),
                    target: player_entity,
                    amount: missile.damage,
                    source_position: transform.translation,
                    source: DamageSource::Missile,
                });
                cues.write(PresentationCue::SpawnEffect {
                    kind: EffectKind::Explosion,
                    position: transform.translation,
                });
                commands.entity(entity).despawn();
                continue;
            }
        }

        if missile.expired() {
            cues.write(PresentationCue::SpawnEffect {
                kind: EffectKind::Explosion,
                position: transform.translation,
            });
            commands.entity(entity).despawn();
        }
    }
}

//! Chaser systems: преследование игрока + contact damage

use bevy::prelude::*;

use crate::ai::components::Chaser;
use crate::combat::components::DamageEffects;
use crate::combat::{DamageRequest, DamageSource, Dead};
use crate::components::{face_towards, horizontal_direction, Hurtbox, Player};

/// Система: chaser двигается к игроку и смотрит на него
///
/// Пропускаем пока chaser в knockback (управление подавлено) или мертв.
/// Останавливается на контакте (сумма hurtbox радиусов), не залезая в игрока.
pub fn chase_player(
    mut chasers: Query<
        (&Chaser, &mut Transform, &Hurtbox, Option<&DamageEffects>),
        (Without<Dead>, Without<Player>),
    >,
    players: Query<(&Transform, &Hurtbox), (With<Player>, Without<Dead>)>,
    time: Res<Time<Fixed>>,
) {
    let Ok((player_transform, player_hurtbox)) = players.single() else {
        return;
    };
    let delta = time.delta_secs();
    let player = player_transform.translation;

    for (chaser, mut transform, hurtbox, effects) in chasers.iter_mut() {
        if effects.is_some_and(|effects| effects.controls_suspended()) {
            continue;
        }

        let stop_distance = hurtbox.radius + player_hurtbox.radius;
        let mut to_player = player - transform.translation;
        to_player.y = 0.0;
        let distance = to_player.length();

        if distance > stop_distance {
            let step = (chaser.speed * delta).min(distance - stop_distance);
            let direction = horizontal_direction(transform.translation, player);
            transform.translation += direction * step;
        }
        face_towards(&mut transform, player);
    }
}

/// Система: живой chaser в контакте с игроком → DamageRequest каждый tick
///
/// Спам ограничивает invulnerability window игрока.
pub fn enemy_contact_damage(
    chasers: Query<(Entity, &Chaser, &Transform, &Hurtbox), Without<Dead>>,
    players: Query<(Entity, &Transform, &Hurtbox), (With<Player>, Without<Dead>)>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    let Ok((player, player_transform, player_hurtbox)) = players.single() else {
        return;
    };

    for (entity, chaser, transform, hurtbox) in chasers.iter() {
        let reach = hurtbox.radius + player_hurtbox.radius + chaser.contact_radius;
        if transform.translation.distance(player_transform.translation) > reach {
            continue;
        }

        damage_requests.write(DamageRequest {
            attacker: Some(entity),
            target: player,
            amount: chaser.contact_damage,
            source_position: transform.translation,
            source: DamageSource::Contact,
        });
    }
}

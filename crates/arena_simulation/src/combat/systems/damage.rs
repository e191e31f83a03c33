//! Системы урона: применение DamageRequest, post-hit эффекты, смерть

use bevy::prelude::*;

use crate::ai::BossBrain;
use crate::combat::components::{DamageEffects, DamageResponse};
use crate::combat::damage::{
    resolve_hit, DamageDealt, DamageRequest, Dead, DespawnAfter, EntityDied, HitOutcome,
};
use crate::components::{CombatantKind, Health};
use crate::presentation::{PresentationCue, SoundKind};

/// Система: tick таймеров invulnerability / knockback / flash
///
/// Knockback displacement двигает Transform напрямую (своего контроллера у нас нет).
/// Мертвые entity тикают таймеры, но не смещаются.
pub fn tick_damage_effects(
    mut query: Query<(&mut DamageEffects, &mut Transform, Has<Dead>)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut effects, mut transform, is_dead) in query.iter_mut() {
        let displacement = effects.tick(delta);
        if !is_dead && displacement != Vec3::ZERO {
            transform.translation += displacement;
        }
    }
}

/// Система: применение DamageRequest (единственная точка мутации Health)
///
/// 1. resolve_hit (invulnerability / already dead → no-op)
/// 2. DamageDealt + flash/damaged cues
/// 3. При смерти: Dead marker, EntityDied, boss brain → Dead немедленно
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(
        &mut Health,
        &mut DamageEffects,
        &DamageResponse,
        &Transform,
        &CombatantKind,
        Option<&mut BossBrain>,
    )>,
    mut commands: Commands,
    mut damage_dealt: EventWriter<DamageDealt>,
    mut entity_died: EventWriter<EntityDied>,
    mut cues: EventWriter<PresentationCue>,
) {
    for request in requests.read() {
        let Ok((mut health, mut effects, response, transform, kind, brain)) =
            targets.get_mut(request.target)
        else {
            crate::logger::log_warning(&format!(
                "DamageRequest: target {:?} is not a combatant (despawned?)",
                request.target
            ));
            continue;
        };

        let outcome = resolve_hit(
            &mut health,
            &mut effects,
            response,
            request.amount,
            request.source_position,
            transform.translation,
        );

        let HitOutcome::Applied { damage, killed } = outcome else {
            continue;
        };

        damage_dealt.write(DamageDealt {
            attacker: request.attacker,
            target: request.target,
            damage,
            source: request.source,
            remaining: health.current,
        });
        cues.write(PresentationCue::Flash {
            entity: request.target,
            duration: response.flash_duration,
        });
        cues.write(PresentationCue::PlaySound(SoundKind::Damaged));

        crate::logger::log(&format!(
            "💥 {} {:?} took {} damage ({:?}), hp {}/{}",
            kind.as_str(),
            request.target,
            damage,
            request.source,
            health.current,
            health.max
        ));

        if !killed {
            continue;
        }

        // Death preempts whatever routine the boss is running
        if let Some(mut brain) = brain {
            brain.force_dead();
        }

        if let Ok(mut entity_commands) = commands.get_entity(request.target) {
            entity_commands.try_insert(Dead);
        }

        entity_died.write(EntityDied {
            entity: request.target,
            killer: request.attacker,
            kind: *kind,
        });
        cues.write(PresentationCue::PlaySound(SoundKind::Death));

        crate::logger::log_info(&format!(
            "💀 {} {:?} died (killer: {:?})",
            kind.as_str(),
            request.target,
            request.attacker
        ));
    }
}

/// Система: планирует удаление мёртвых combatant'ов
///
/// Boss удаляется своим brain'ом (Dead routine), ему DespawnAfter не ставим.
pub fn schedule_despawn_on_death(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    responses: Query<(&DamageResponse, Has<BossBrain>)>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for event in death_events.read() {
        let Ok((response, is_boss)) = responses.get(event.entity) else {
            continue;
        };
        if is_boss {
            continue;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.try_insert(DespawnAfter {
                despawn_time: now + response.death_delay,
            });
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}

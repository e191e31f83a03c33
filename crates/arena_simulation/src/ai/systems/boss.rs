//! Boss system: adapter между BossBrain и миром

use bevy::prelude::*;

use crate::ai::components::{BossBrain, BossCommand};
use crate::ai::events::SummonMinions;
use crate::combat::components::BossMissile;
use crate::combat::Dead;
use crate::components::{Health, Player};
use crate::presentation::{EffectKind, PresentationCue};
use crate::DeterministicRng;

/// Система: tick boss brain + выполнение BossCommand
///
/// Fire → spawn BossMissile, Summon → SummonMinions event + VFX,
/// Despawn → удаление босса (конец Dead routine).
pub fn run_boss_behavior(
    mut commands: Commands,
    mut bosses: Query<(Entity, &mut BossBrain, &mut Transform, &Health), Without<Player>>,
    players: Query<&Transform, (With<Player>, Without<Dead>)>,
    mut rng: ResMut<DeterministicRng>,
    mut summons: EventWriter<SummonMinions>,
    mut cues: EventWriter<PresentationCue>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let player = players.single().ok().map(|transform| transform.translation);

    for (entity, mut brain, mut transform, health) in bosses.iter_mut() {
        let was_dead = brain.is_dead();
        let actions = brain.tick(delta, &mut transform, player, health, &mut rng.rng);

        if !was_dead && brain.is_dead() {
            crate::logger::log_info(&format!("👑 Boss {:?} → Dead", entity));
        }

        for action in actions {
            match action {
                BossCommand::Fire { origin, direction } => {
                    commands.spawn((
                        BossMissile::new(entity, direction, &brain.config().missile),
                        Transform::from_translation(origin),
                    ));
                }
                BossCommand::Summon { position } => {
                    summons.write(SummonMinions {
                        boss: entity,
                        position,
                    });
                    cues.write(PresentationCue::SpawnEffect {
                        kind: EffectKind::Summon,
                        position,
                    });
                    crate::logger::log_info(&format!("👑 Boss summoning minions at {:?}", position));
                }
                BossCommand::SummonSkipped => {
                    crate::logger::log_warning("👑 Boss summon skipped: spawner unavailable");
                }
                BossCommand::StateChanged { from, to } => {
                    crate::logger::log_info(&format!(
                        "👑 Boss {:?}: {:?} → {:?} (hp {}/{}, {:.0}%)",
                        entity,
                        from,
                        to,
                        health.current,
                        health.max,
                        health.percentage()
                    ));
                }
                BossCommand::Despawn => {
                    crate::logger::log_info(&format!("👑 Boss {:?} defeated, removing", entity));
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

//! Headless арена
//!
//! Запускает Bevy App без рендера: игрок против босса, скриптованный input,
//! HUD в консоль раз в секунду.

use bevy::prelude::*;

use arena_simulation::combat::RangedWeapon;
use arena_simulation::config::DEFAULT_TUNING_PATH;
use arena_simulation::{
    boss_bundle, create_headless_app, enemy_bundle, log_info, player_bundle, CombatHud,
    CombatTuning, Dead, Health, KillTally, MatchOutcome, MeleeAttackIntent, Player,
    PlayerControl, SimulationSet, SummonMinions, WeaponSwitchIntent, SIMULATION_HZ,
};

const MAX_TICKS: u32 = 60 * 180;
const MINIONS_PER_SUMMON: usize = 3;

/// Host-side spawner: SummonMinions → chasers вокруг точки призыва
fn spawn_summoned_minions(
    mut commands: Commands,
    mut summons: EventReader<SummonMinions>,
    tuning: Res<CombatTuning>,
) {
    for summon in summons.read() {
        for index in 0..MINIONS_PER_SUMMON {
            let angle = index as f32 * std::f32::consts::TAU / MINIONS_PER_SUMMON as f32;
            let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * 3.0;
            commands.spawn(enemy_bundle(&tuning, summon.position + offset));
        }
    }
}

fn main() {
    let seed = 42;
    println!("Starting arena headless simulation (seed: {})", seed);

    let tuning = CombatTuning::load_or_default(DEFAULT_TUNING_PATH);

    let mut app = create_headless_app(seed);
    app.insert_resource(tuning.clone())
        .add_systems(
            FixedUpdate,
            spawn_summoned_minions.after(SimulationSet::Behavior),
        );

    let player = app
        .world_mut()
        .spawn(player_bundle(&tuning, Vec3::ZERO))
        .id();
    app.world_mut()
        .spawn(boss_bundle(&tuning, Vec3::new(0.0, 0.0, 12.0)));
    for x in [-6.0, 6.0] {
        app.world_mut()
            .spawn(enemy_bundle(&tuning, Vec3::new(x, 0.0, 6.0)));
    }

    // Первый update с нулевым delta
    app.update();

    let ticks_per_second = SIMULATION_HZ as u32;
    for tick in 1..=MAX_TICKS {
        script_player(&mut app, player, tick);
        app.update();

        if tick % ticks_per_second == 0 {
            println!("{}", app.world().resource::<CombatHud>());
        }

        if app.world().resource::<KillTally>().outcome() != MatchOutcome::InProgress {
            break;
        }
    }

    let tally = app.world().resource::<KillTally>();
    log_info(&format!(
        "🏁 Outcome: {:?} | kills {} | {:02}:{:02}",
        tally.outcome(),
        tally.kills,
        tally.minutes(),
        tally.seconds()
    ));
}

/// Скрипт игрока: цель = ближайший живой враг или босс, атака по таймеру,
/// переключение оружия каждые 8 секунд.
fn script_player(app: &mut App, player: Entity, tick: u32) {
    let world = app.world_mut();

    let Some(player_position) = world.get::<Transform>(player).map(|t| t.translation) else {
        return;
    };

    let mut targets =
        world.query_filtered::<&Transform, (With<Health>, Without<Player>, Without<Dead>)>();
    let target = targets
        .iter(world)
        .map(|transform| transform.translation)
        .min_by(|a, b| {
            a.distance_squared(player_position)
                .total_cmp(&b.distance_squared(player_position))
        });

    if let Some(mut control) = world.get_mut::<PlayerControl>(player) {
        control.aim_point = target;
        control.move_input = match target {
            Some(target) if target.distance(player_position) > 2.5 => {
                let direction = (target - player_position).normalize_or_zero();
                Vec2::new(direction.x, direction.z)
            }
            _ => Vec2::ZERO,
        };
    }

    if tick % (8 * SIMULATION_HZ as u32) == 0 {
        world.send_event(WeaponSwitchIntent {
            entity: player,
            force: false,
        });
    }

    if let Some(mut ranged) = world.get_mut::<RangedWeapon>(player) {
        ranged.trigger_held = true;
    }

    if tick % 20 == 0 {
        world.send_event(MeleeAttackIntent { attacker: player });
    }
}

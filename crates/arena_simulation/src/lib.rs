//! Arena Simulation Core
//!
//! ECS-симуляция боя top-down арены на Bevy 0.16 (headless).
//!
//! Подсистемы:
//! - combat: Health + post-hit effects, melee combo, ranged hit-scan, weapon switch
//! - ai: boss state machine (health-gated), chasers
//! - physics: in-ECS overlap/raycast по сферическим hurtbox'ам, player movement
//! - match_state: kill tally, match clock, HUD snapshot
//!
//! Rendering/audio/input делает внешний host: читает `PresentationCue` и `CombatHud`,
//! пишет `PlayerControl`, `MeleeAttackIntent`, `WeaponSwitchIntent`.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod match_state;
pub mod physics;
pub mod presentation;

// Re-export основных типов
pub use actor::{boss_bundle, enemy_bundle, player_bundle};
pub use ai::{AIPlugin, BossBrain, BossConfig, BossState, Chaser, SummonMinions};
pub use combat::{
    CombatPlugin, DamageDealt, DamageRequest, DamageSource, Dead, EntityDied, MeleeAttackIntent,
    WeaponSwitchIntent,
};
pub use components::*;
pub use config::{CombatTuning, TuningError};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use match_state::{CombatHud, KillTally, MatchOutcome, MatchPlugin};
pub use presentation::PresentationCue;

/// Порядок simulation tick'а (FixedUpdate, chained в CombatPlugin)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Invulnerability / knockback / flash таймеры
    Effects,
    /// Weapon mode switch
    Loadout,
    /// Melee combo + ranged fire → DamageRequest
    Weapons,
    /// Player movement, boss brain, chasers, missiles
    Behavior,
    /// DamageRequest → Health (единственная точка мутации)
    Damage,
    Death,
    /// Kill tally, clock, HUD
    Bookkeeping,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

        // Детерминистичный RNG (seed по умолчанию, если host не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<CombatTuning>()
            .add_plugins((CombatPlugin, AIPlugin, MatchPlugin));

        app.add_systems(
            FixedUpdate,
            physics::drive_player
                .in_set(SimulationSet::Behavior)
                .before(ai::systems::run_boss_behavior),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

pub const SIMULATION_HZ: f64 = 60.0;

/// Длительность одного simulation tick'а (совпадает с fixed timestep)
pub fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / SIMULATION_HZ)
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается ровно на один fixed tick за `app.update()`, поэтому
/// прогон не зависит от wall clock. Первый `update()` идёт с нулевым delta.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick_duration()))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

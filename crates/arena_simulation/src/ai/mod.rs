//! AI decision-making module
//!
//! - Boss: health-gated state machine (Idling / FirstPattern / SecondPattern / Dead)
//! - Chaser: обычные враги, преследование + contact damage

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{
    available_states, BossBrain, BossCommand, BossConfig, BossRoutine, BossState, Chaser,
    ChaserConfig, ShotTimer,
};
pub use events::SummonMinions;

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (SimulationSet::Behavior).
/// Порядок выполнения:
/// 1. run_boss_behavior: tick brain, missiles/summons/despawn
/// 2. chase_player: chasers двигаются к игроку
/// 3. enemy_contact_damage: DamageRequest за контакт
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SummonMinions>();

        app.add_systems(
            FixedUpdate,
            (
                systems::run_boss_behavior,
                systems::chase_player,
                systems::enemy_contact_damage,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Behavior),
        );
    }
}

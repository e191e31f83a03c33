//! Match state: kill tally, match clock, HUD snapshot

use bevy::prelude::*;

pub mod hud;
pub mod tally;

pub use hud::{BossHud, CombatHud};
pub use tally::{KillTally, MatchOutcome};

use crate::SimulationSet;

/// Match Plugin (SimulationSet::Bookkeeping)
pub struct MatchPlugin;

impl Plugin for MatchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KillTally>().init_resource::<CombatHud>();

        app.add_systems(
            FixedUpdate,
            (tally::record_kills, tally::tick_match_clock, hud::refresh_combat_hud)
                .chain()
                .in_set(SimulationSet::Bookkeeping),
        );
    }
}

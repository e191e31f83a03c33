//! Kill tally + match clock

use bevy::prelude::*;

use crate::combat::EntityDied;
use crate::components::CombatantKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchOutcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

/// Счёт матча: убийства, время, исход
///
/// Clock останавливается когда исход решён (босс убит или игрок погиб).
#[derive(Resource, Debug, Clone, Default)]
pub struct KillTally {
    pub kills: u32,
    pub elapsed: f32,
    pub boss_defeated: bool,
    pub player_lost: bool,
}

impl KillTally {
    pub fn add_kill(&mut self) {
        self.kills += 1;
    }

    pub fn minutes(&self) -> u32 {
        (self.elapsed / 60.0) as u32
    }

    pub fn seconds(&self) -> u32 {
        (self.elapsed % 60.0) as u32
    }

    /// Поражение приоритетнее победы (оба флага в одном tick → Defeat)
    pub fn outcome(&self) -> MatchOutcome {
        if self.player_lost {
            MatchOutcome::Defeat
        } else if self.boss_defeated {
            MatchOutcome::Victory
        } else {
            MatchOutcome::InProgress
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.outcome() == MatchOutcome::InProgress {
            self.elapsed += dt;
        }
    }
}

/// Система: match clock
pub fn tick_match_clock(mut tally: ResMut<KillTally>, time: Res<Time<Fixed>>) {
    tally.tick(time.delta_secs());
}

/// Система: EntityDied → kills / boss_defeated / player_lost
pub fn record_kills(mut death_events: EventReader<EntityDied>, mut tally: ResMut<KillTally>) {
    for event in death_events.read() {
        match event.kind {
            CombatantKind::Enemy => {
                tally.add_kill();
            }
            CombatantKind::Boss => {
                tally.boss_defeated = true;
                crate::logger::log_info("🏆 Boss defeated");
            }
            CombatantKind::Player => {
                tally.player_lost = true;
                crate::logger::log_info("☠️ Player lost");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_formatting() {
        let tally = KillTally {
            elapsed: 125.5,
            ..KillTally::default()
        };
        assert_eq!(tally.minutes(), 2);
        assert_eq!(tally.seconds(), 5);
    }

    #[test]
    fn test_clock_stops_when_decided() {
        let mut tally = KillTally::default();
        tally.tick(1.0);
        tally.boss_defeated = true;
        tally.tick(1.0);
        assert_eq!(tally.elapsed, 1.0);
        assert_eq!(tally.outcome(), MatchOutcome::Victory);

        tally.player_lost = true;
        assert_eq!(tally.outcome(), MatchOutcome::Defeat);
    }
}

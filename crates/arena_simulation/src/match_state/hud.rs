//! HUD snapshot (то, что presentation слой рисует каждый кадр)

use std::fmt;

use bevy::prelude::*;

use super::tally::{KillTally, MatchOutcome};
use crate::ai::{BossBrain, BossState};
use crate::combat::components::{RangedWeapon, WeaponLoadout, WeaponMode};
use crate::components::{Health, Player};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossHud {
    pub state: BossState,
    pub health_percentage: f32,
}

/// Read-only снимок для HUD (обновляется каждый tick)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CombatHud {
    pub player_health: u32,
    pub player_max_health: u32,
    pub ammo: u32,
    pub ammo_capacity: u32,
    pub can_fire: bool,
    pub weapon_mode: WeaponMode,
    pub boss: Option<BossHud>,
    pub kills: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub outcome: MatchOutcome,
}

impl fmt::Display for CombatHud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP {}/{} | {:?} | AMMO {}/{} ({}) | KILLS {} | {:02}:{:02}",
            self.player_health,
            self.player_max_health,
            self.weapon_mode,
            self.ammo,
            self.ammo_capacity,
            if self.can_fire { "ready" } else { "reloading" },
            self.kills,
            self.minutes,
            self.seconds
        )?;
        if let Some(boss) = self.boss {
            write!(f, " | BOSS {:?} {:.0}%", boss.state, boss.health_percentage)?;
        }
        Ok(())
    }
}

/// Система: собрать CombatHud из player / boss / tally
pub fn refresh_combat_hud(
    mut hud: ResMut<CombatHud>,
    players: Query<(&Health, Option<&RangedWeapon>, Option<&WeaponLoadout>), With<Player>>,
    bosses: Query<(&BossBrain, &Health)>,
    tally: Res<KillTally>,
) {
    let mut next = CombatHud {
        kills: tally.kills,
        minutes: tally.minutes(),
        seconds: tally.seconds(),
        outcome: tally.outcome(),
        ..CombatHud::default()
    };

    if let Ok((health, weapon, loadout)) = players.single() {
        next.player_health = health.current;
        next.player_max_health = health.max;
        if let Some(weapon) = weapon {
            next.ammo = weapon.ammo();
            next.ammo_capacity = weapon.capacity();
            next.can_fire = weapon.can_fire();
        }
        if let Some(loadout) = loadout {
            next.weapon_mode = loadout.mode();
        }
    }

    next.boss = bosses.iter().next().map(|(brain, health)| BossHud {
        state: brain.state(),
        health_percentage: health.percentage(),
    });

    if *hud != next {
        *hud = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_line_format() {
        let mut hud = CombatHud {
            player_health: 3,
            player_max_health: 5,
            ammo: 7,
            ammo_capacity: 10,
            can_fire: false,
            weapon_mode: WeaponMode::Ranged,
            kills: 4,
            minutes: 1,
            seconds: 5,
            ..Default::default()
        };
        assert_eq!(
            hud.to_string(),
            "HP 3/5 | Ranged | AMMO 7/10 (reloading) | KILLS 4 | 01:05"
        );

        hud.boss = Some(BossHud {
            state: BossState::SecondPattern,
            health_percentage: 33.4,
        });
        assert!(hud.to_string().ends_with(" | BOSS SecondPattern 33%"));
    }
}

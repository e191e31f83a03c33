//! Combat input events (intents от внешнего input collaborator'а)

use bevy::prelude::*;

/// Событие: нажата атака (melee combo input)
#[derive(Event, Debug, Clone)]
pub struct MeleeAttackIntent {
    pub attacker: Entity,
}

/// Событие: переключение weapon mode (melee ↔ ranged)
///
/// `force` пропускает проверку "combo в процессе" (cooldown всё равно действует).
#[derive(Event, Debug, Clone)]
pub struct WeaponSwitchIntent {
    pub entity: Entity,
    pub force: bool,
}

//! AI Events
//!
//! SummonMinions: интерфейс внешнего spawner'а (размещение миньонов не наше дело).

use bevy::prelude::*;

/// Событие: босс призывает миньонов в точке (позиция игрока на 70% SecondPattern)
#[derive(Event, Debug, Clone)]
pub struct SummonMinions {
    pub boss: Entity,
    pub position: Vec3,
}

//! Presentation sink: fire-and-forget сигналы для rendering/audio/VFX
//!
//! Ядро только пишет `PresentationCue`, никогда не читает и не ждёт результата.
//! Хост (renderer, audio) подписывается через `EventReader<PresentationCue>`.

use bevy::prelude::*;

/// Тип звука (каталог звуков хоста)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Melee,
    Shoot,
    Damaged,
    Death,
    Reloading,
}

/// Тип визуального эффекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Попадание hit-scan выстрела
    Impact,
    /// Взрыв ракеты босса
    Explosion,
    /// Эффект призыва миньонов (SecondPattern)
    Summon,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum PresentationCue {
    SpawnEffect { kind: EffectKind, position: Vec3 },
    PlaySound(SoundKind),
    /// Короткая вспышка материала entity после урона
    Flash { entity: Entity, duration: f32 },
}

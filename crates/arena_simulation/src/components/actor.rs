//! Базовые компоненты combatant'ов: классификация, здоровье, hurtbox

use bevy::prelude::*;

/// Тип combatant'а (замена строковых тегов "Player"/"Enemy"/"Boss")
///
/// Фильтры целей проверяются через equality, не через строки.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum CombatantKind {
    Player,
    Enemy,
    Boss,
}

impl CombatantKind {
    /// Melee combo бьёт только врагов и босса
    pub fn is_melee_target(&self) -> bool {
        matches!(self, CombatantKind::Enemy | CombatantKind::Boss)
    }

    /// Hit-scan слой: те же цели что и у melee
    pub fn is_ranged_target(&self) -> bool {
        matches!(self, CombatantKind::Enemy | CombatantKind::Boss)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CombatantKind::Player => "Player",
            CombatantKind::Enemy => "Enemy",
            CombatantKind::Boss => "Boss",
        }
    }
}

/// Здоровье combatant'а
///
/// Инвариант: 0 ≤ current ≤ max, max > 0.
/// Мутируется только через `take_damage` (из damage pipeline).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Health с произвольным current (clamped в [0, max])
    pub fn with_current(max: u32, current: u32) -> Self {
        let max = max.max(1);
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Возвращает фактически снятое количество HP
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount).min(self.max);
        before - self.current
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// current / max * 100 (0..=100)
    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.max as f32 * 100.0
    }
}

/// Сферический hurtbox для spatial queries (overlap / raycast)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub radius: f32,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.take_damage(30), 30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        assert_eq!(health.take_damage(100), 70);
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_heal_clamps() {
        let mut health = Health::with_current(100, 50);
        health.heal(80);
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_health_percentage() {
        let health = Health::with_current(100, 65);
        assert_eq!(health.percentage(), 65.0);

        let player = Health::with_current(5, 2);
        assert!((player.percentage() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_max_is_rejected() {
        let health = Health::new(0);
        assert_eq!(health.max, 1);
        assert_eq!(health.current, 1);
    }

    #[test]
    fn test_target_filters() {
        assert!(CombatantKind::Enemy.is_melee_target());
        assert!(CombatantKind::Boss.is_ranged_target());
        assert!(!CombatantKind::Player.is_melee_target());
        assert!(!CombatantKind::Player.is_ranged_target());
    }
}

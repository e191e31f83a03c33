//! Damage contract: requests, outcomes, death markers
//!
//! Все атакующие (melee, ranged, missiles, contact) только пишут `DamageRequest`.
//! Единственная точка мутации Health это `apply_damage_requests` (systems/damage.rs),
//! которая вызывает чистую `resolve_hit`.

use bevy::prelude::*;

use crate::combat::components::{DamageEffects, DamageResponse};
use crate::components::{horizontal_direction, CombatantKind, Health};

/// Источник урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Melee,
    Ranged,
    Missile,
    Contact,
}

/// Событие: запрос на урон (TakeDamage)
///
/// `source_position` используется только для направления knockback.
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub source_position: Vec3,
    pub source: DamageSource,
}

/// Событие: урон нанесен (после применения к Health)
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub source: DamageSource,
    pub remaining: u32,
}

/// Событие: entity умер (health дошёл до 0)
///
/// Генерируется ровно один раз на entity.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
    pub kind: CombatantKind,
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Мертвые не участвуют в spatial queries, движении и AI.
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Почему удар проигнорирован (нормальный no-op, не ошибка)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitIgnored {
    Invulnerable,
    AlreadyDead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Ignored(HitIgnored),
    Applied { damage: u32, killed: bool },
}

/// Применяет удар к combatant'у
///
/// - no-op если мертв или неуязвим
/// - `round(amount)` снимается с Health (clamp в [0, max])
/// - одновременно открываются три независимых эффекта: invulnerability, knockback, flash
/// - knockback направлен горизонтально от source к target; при совпадении позиций
///   направление нулевое (knockback без смещения)
pub fn resolve_hit(
    health: &mut Health,
    effects: &mut DamageEffects,
    response: &DamageResponse,
    amount: f32,
    source_position: Vec3,
    target_position: Vec3,
) -> HitOutcome {
    if !health.is_alive() {
        return HitOutcome::Ignored(HitIgnored::AlreadyDead);
    }
    if effects.is_invulnerable() {
        return HitOutcome::Ignored(HitIgnored::Invulnerable);
    }

    let damage = round_damage(amount);
    let dealt = health.take_damage(damage);

    effects.begin_invulnerability(response.invulnerability_duration, response.flicker_interval);
    if response.has_knockback() {
        let direction = horizontal_direction(source_position, target_position);
        effects.begin_knockback(
            direction * response.knockback_force,
            response.knockback_duration,
            response.knockback_decay,
        );
    }
    effects.begin_flash(response.flash_duration);

    HitOutcome::Applied {
        damage: dealt,
        killed: !health.is_alive(),
    }
}

/// round(max(amount, 0)); NaN → 0
pub fn round_damage(amount: f32) -> u32 {
    if amount.is_nan() || amount <= 0.0 {
        return 0;
    }
    amount.round().min(u32::MAX as f32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> (Health, DamageEffects, DamageResponse) {
        (Health::new(30), DamageEffects::default(), DamageResponse::enemy())
    }

    #[test]
    fn test_applied_hit_opens_all_windows() {
        let (mut health, mut effects, response) = enemy();
        let outcome = resolve_hit(
            &mut health,
            &mut effects,
            &response,
            10.4,
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
        );

        assert_eq!(outcome, HitOutcome::Applied { damage: 10, killed: false });
        assert_eq!(health.current, 20);
        assert!(effects.is_invulnerable());
        assert!(effects.is_knocked_back());
        assert!(effects.is_flashing());
        assert!((effects.knockback_velocity() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_invulnerable_hit_is_noop() {
        let (mut health, mut effects, response) = enemy();
        resolve_hit(&mut health, &mut effects, &response, 10.0, Vec3::ZERO, Vec3::X);
        let velocity = effects.knockback_velocity();

        let outcome = resolve_hit(&mut health, &mut effects, &response, 10.0, Vec3::Z, Vec3::X);
        assert_eq!(outcome, HitOutcome::Ignored(HitIgnored::Invulnerable));
        assert_eq!(health.current, 20);
        assert_eq!(effects.knockback_velocity(), velocity);
    }

    #[test]
    fn test_dead_target_is_noop() {
        let mut health = Health::with_current(30, 0);
        let mut effects = DamageEffects::default();
        let outcome = resolve_hit(
            &mut health,
            &mut effects,
            &DamageResponse::enemy(),
            5.0,
            Vec3::ZERO,
            Vec3::X,
        );
        assert_eq!(outcome, HitOutcome::Ignored(HitIgnored::AlreadyDead));
        assert!(!effects.is_invulnerable());
    }

    #[test]
    fn test_lethal_hit_reports_kill() {
        let (mut health, mut effects, response) = enemy();
        let outcome = resolve_hit(&mut health, &mut effects, &response, 99.0, Vec3::ZERO, Vec3::X);
        assert_eq!(outcome, HitOutcome::Applied { damage: 30, killed: true });
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_coincident_positions_give_zero_knockback() {
        let (mut health, mut effects, response) = enemy();
        resolve_hit(&mut health, &mut effects, &response, 1.0, Vec3::ONE, Vec3::ONE);
        assert_eq!(effects.knockback_velocity(), Vec3::ZERO);
        assert!(effects.is_knocked_back());
    }

    #[test]
    fn test_vertical_offset_is_ignored() {
        let (mut health, mut effects, response) = enemy();
        resolve_hit(
            &mut health,
            &mut effects,
            &response,
            1.0,
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let velocity = effects.knockback_velocity();
        assert_eq!(velocity.y, 0.0);
        assert!((velocity - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_boss_takes_every_hit() {
        let mut health = Health::new(100);
        let mut effects = DamageEffects::default();
        let response = DamageResponse::boss();

        resolve_hit(&mut health, &mut effects, &response, 35.0, Vec3::ZERO, Vec3::X);
        resolve_hit(&mut health, &mut effects, &response, 10.0, Vec3::ZERO, Vec3::X);
        assert_eq!(health.current, 55);
        assert_eq!(effects.knockback_velocity(), Vec3::ZERO);
        assert!(!effects.is_knocked_back());
    }

    #[test]
    fn test_round_damage() {
        assert_eq!(round_damage(14.5), 15);
        assert_eq!(round_damage(14.49), 14);
        assert_eq!(round_damage(-3.0), 0);
        assert_eq!(round_damage(f32::NAN), 0);
    }
}

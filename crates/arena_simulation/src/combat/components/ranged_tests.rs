//! Tests for RangedWeapon session.

#[cfg(test)]
mod tests {
    use super::super::ranged::*;

    const DT: f32 = 1.0 / 60.0;

    fn weapon(capacity: u32) -> RangedWeapon {
        RangedWeapon::new(RangedConfig {
            capacity,
            ..RangedConfig::default()
        })
    }

    /// Tick for `seconds`, counting shots.
    fn hold_trigger(weapon: &mut RangedWeapon, seconds: f32) -> usize {
        weapon.trigger_held = true;
        let ticks = (seconds / DT).round() as usize;
        (0..ticks).filter(|_| weapon.tick(DT).fired).count()
    }

    #[test]
    fn test_fires_immediately_then_respects_cooldown() {
        let mut weapon = RangedWeapon::default();
        weapon.trigger_held = true;

        assert!(weapon.tick(DT).fired);
        assert_eq!(weapon.ammo(), 9);
        assert!(!weapon.tick(DT).fired);

        // 0.5 s between shots → 2 shots per second
        let shots = hold_trigger(&mut weapon, 1.0);
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_no_fire_without_trigger() {
        let mut weapon = RangedWeapon::default();
        for _ in 0..120 {
            assert!(!weapon.tick(DT).fired);
        }
        assert_eq!(weapon.ammo(), 10);
    }

    #[test]
    fn test_empty_magazine_reloads_to_capacity() {
        let mut weapon = weapon(2);
        weapon.trigger_held = true;

        assert!(weapon.tick(DT).fired);
        hold_trigger(&mut weapon, 0.5);
        assert_eq!(weapon.ammo(), 0);
        assert!(!weapon.can_fire());
        assert!(weapon.is_reloading());

        // Trigger held during reload: no shots, countdown advances
        let shots = hold_trigger(&mut weapon, 1.9);
        assert_eq!(shots, 0);
        assert_eq!(weapon.ammo(), 0);
        assert!(weapon.reload_remaining() > 0.0);

        weapon.trigger_held = false;
        let mut reloaded = false;
        for _ in 0..12 {
            reloaded |= weapon.tick(DT).reloaded;
        }
        assert!(reloaded);
        assert_eq!(weapon.ammo(), 2);
        assert!(weapon.can_fire());
    }

    #[test]
    fn test_last_round_starts_reload() {
        let mut weapon = weapon(1);
        weapon.trigger_held = true;
        let tick = weapon.tick(DT);
        assert!(tick.fired);
        assert!(tick.reload_started);
        assert_eq!(weapon.ammo(), 0);
        assert!(!weapon.can_fire());
    }

    #[test]
    fn test_disabled_weapon_is_frozen() {
        let mut weapon = weapon(1);
        weapon.trigger_held = true;
        weapon.tick(DT);
        let remaining = weapon.reload_remaining();

        weapon.enabled = false;
        for _ in 0..300 {
            assert_eq!(weapon.tick(DT), RangedTick::default());
        }
        assert_eq!(weapon.reload_remaining(), remaining);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut weapon = RangedWeapon::default();
        weapon.trigger_held = true;
        weapon.tick(DT);
        let snapshot = weapon.snapshot();
        assert_eq!(snapshot.ammo, 9);

        let mut fresh = RangedWeapon::default();
        fresh.restore(snapshot);
        assert_eq!(fresh.ammo(), 9);
        assert!(fresh.can_fire());

        fresh.restore(AmmoSnapshot {
            ammo: 0,
            reload_remaining: 0.0,
        });
        assert!(!fresh.can_fire());
        assert_eq!(fresh.reload_remaining(), 2.0);
    }
}

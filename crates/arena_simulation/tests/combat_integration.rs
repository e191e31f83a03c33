//! Combat integration test
//!
//! Headless App с SimulationPlugin, время идёт ровно 1 fixed tick за update.
//!
//! Проверяем:
//! - Melee combo: урон по всем целям в радиусе, промах по дальним, kill tally
//! - Ranged: cooldown, расход патронов, reload cycle
//! - Weapon switch: блок во время combo, сохранение патронов
//! - Boss missile и contact damage по игроку (invulnerability window)

use bevy::prelude::*;
use arena_simulation::combat::{
    BossMissile, DamageEffects, DamageResponse, MissileConfig, RangedWeapon, WeaponLoadout,
    WeaponMode,
};
use arena_simulation::presentation::EffectKind;
use arena_simulation::*;

/// Helper: headless App + player в origin (смотрит в -Z), первый update уже прогнан
fn create_arena(seed: u64) -> (App, Entity) {
    let mut app = create_headless_app(seed);
    let tuning = CombatTuning::default();
    let player = app
        .world_mut()
        .spawn(player_bundle(&tuning, Vec3::ZERO))
        .id();

    // Первый update идёт с нулевым delta
    app.update();

    (app, player)
}

/// Helper: неподвижная цель (без Chaser)
fn spawn_dummy(app: &mut App, position: Vec3, hp: u32, response: DamageResponse) -> Entity {
    app.world_mut()
        .spawn((
            CombatantKind::Enemy,
            Health::new(hp),
            Hurtbox::default(),
            DamageEffects::default(),
            response,
            Transform::from_translation(position),
        ))
        .id()
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn health(app: &App, entity: Entity) -> u32 {
    app.world()
        .get::<Health>(entity)
        .map(|health| health.current)
        .unwrap_or(0)
}

fn weapon(app: &App, player: Entity) -> &RangedWeapon {
    app.world().get::<RangedWeapon>(player).unwrap()
}

/// Test: swing 1 и swing 2 бьют обе цели в радиусе, дальняя не задета
#[test]
fn test_melee_combo_hits_targets_in_range() {
    let (mut app, player) = create_arena(42);

    // Attack point = (0, 0, -1), радиус swing'а 2 + hurtbox 0.5
    let tough = spawn_dummy(&mut app, Vec3::new(0.0, 0.0, -1.5), 30, DamageResponse::enemy());
    let weak = spawn_dummy(&mut app, Vec3::new(0.8, 0.0, -1.0), 20, DamageResponse::enemy());
    let far = spawn_dummy(&mut app, Vec3::new(0.0, 0.0, 4.0), 30, DamageResponse::enemy());

    app.world_mut().send_event(MeleeAttackIntent { attacker: player });
    app.update();

    // Урон приходит после delay swing'а (0.4s), не сразу
    run_ticks(&mut app, 10);
    assert_eq!(health(&app, tough), 30);

    run_ticks(&mut app, 20);
    assert_eq!(health(&app, tough), 20, "swing 1 deals 10");
    assert_eq!(health(&app, weak), 10);
    assert_eq!(health(&app, far), 30, "target outside the swing radius is untouched");

    // Input window (0.6s) открыт, combo ещё не истёк (1.0s)
    run_ticks(&mut app, 10);
    app.world_mut().send_event(MeleeAttackIntent { attacker: player });
    app.update();
    run_ticks(&mut app, 30);

    assert_eq!(health(&app, tough), 5, "swing 2 deals 15");
    assert_eq!(health(&app, weak), 0);
    assert!(app.world().get::<Dead>(weak).is_some());
    assert_eq!(health(&app, far), 30);
    assert_eq!(app.world().resource::<KillTally>().kills, 1);

    // Death delay врага 1s → despawn
    run_ticks(&mut app, 70);
    assert!(app.world().get_entity(weak).is_err());
    assert!(app.world().get_entity(tough).is_ok());
}

/// Test: attack input во время lockout'а игнорируется
#[test]
fn test_melee_input_locked_during_window() {
    let (mut app, player) = create_arena(42);
    let target = spawn_dummy(&mut app, Vec3::new(0.0, 0.0, -1.5), 100, DamageResponse::boss());

    app.world_mut().send_event(MeleeAttackIntent { attacker: player });
    app.update();
    run_ticks(&mut app, 5);
    app.world_mut().send_event(MeleeAttackIntent { attacker: player });
    app.update();

    let combo = app.world().get::<combat::MeleeCombo>(player).unwrap();
    assert_eq!(combo.attack_count(), 1);

    run_ticks(&mut app, 30);
    assert_eq!(health(&app, target), 90, "only swing 1 resolved");
}

/// Test: полный цикл магазина: 10 выстрелов по 0.5s → reload 2s → снова огонь
#[test]
fn test_ranged_reload_cycle() {
    let (mut app, player) = create_arena(42);
    let target = spawn_dummy(&mut app, Vec3::new(0.0, 0.0, -5.0), 1000, DamageResponse::boss());

    app.world_mut()
        .get_mut::<RangedWeapon>(player)
        .unwrap()
        .trigger_held = true;
    app.world_mut().send_event(WeaponSwitchIntent {
        entity: player,
        force: false,
    });

    // Tick 1: switch (Loadout) и сразу выстрел (Weapons)
    app.update();
    assert_eq!(weapon(&app, player).ammo(), 9);
    assert_eq!(health(&app, target), 990);

    run_ticks(&mut app, 15);
    assert_eq!(weapon(&app, player).ammo(), 9, "cooldown 0.5s between shots");

    // Выстрел n на tick 1 + 30(n-1) → 10-й на tick 271
    run_ticks(&mut app, 269);
    assert_eq!(weapon(&app, player).ammo(), 0);
    assert!(!weapon(&app, player).can_fire());
    assert_eq!(health(&app, target), 900);

    // Reload 2s: tick 271 → 391
    run_ticks(&mut app, 100);
    assert_eq!(weapon(&app, player).ammo(), 0);
    assert!(weapon(&app, player).is_reloading());

    run_ticks(&mut app, 15);
    assert!(weapon(&app, player).can_fire());
    assert_eq!(weapon(&app, player).ammo(), 9, "reloaded and fired again");
    assert_eq!(health(&app, target), 890);

    let hud = app.world().resource::<CombatHud>();
    assert_eq!(hud.weapon_mode, WeaponMode::Ranged);
    assert_eq!(hud.ammo, 9);
    assert_eq!(hud.ammo_capacity, 10);
}

/// Test: выстрел в пустоту тратит патрон, урона нет
#[test]
fn test_ranged_miss_consumes_ammo() {
    let (mut app, player) = create_arena(42);
    let beside = spawn_dummy(&mut app, Vec3::new(3.0, 0.0, -5.0), 100, DamageResponse::boss());
    let beyond = spawn_dummy(&mut app, Vec3::new(0.0, 0.0, -12.0), 100, DamageResponse::boss());

    app.world_mut()
        .get_mut::<RangedWeapon>(player)
        .unwrap()
        .trigger_held = true;
    app.world_mut().send_event(WeaponSwitchIntent {
        entity: player,
        force: false,
    });
    app.update();

    assert_eq!(weapon(&app, player).ammo(), 9);
    assert_eq!(health(&app, beside), 100);
    assert_eq!(health(&app, beyond), 100, "max distance is 10m");
}

/// Test: switch блокируется во время combo, force проходит, патроны сохраняются
#[test]
fn test_weapon_switch_preserves_ammo() {
    let (mut app, player) = create_arena(42);

    app.world_mut().send_event(MeleeAttackIntent { attacker: player });
    app.update();

    app.world_mut().send_event(WeaponSwitchIntent {
        entity: player,
        force: false,
    });
    app.update();
    assert_eq!(
        app.world().get::<WeaponLoadout>(player).unwrap().mode(),
        WeaponMode::Melee,
        "combo in progress blocks a regular switch"
    );

    app.world_mut().send_event(WeaponSwitchIntent {
        entity: player,
        force: true,
    });
    app.world_mut()
        .get_mut::<RangedWeapon>(player)
        .unwrap()
        .trigger_held = true;
    app.update();
    assert_eq!(
        app.world().get::<WeaponLoadout>(player).unwrap().mode(),
        WeaponMode::Ranged
    );
    assert_eq!(weapon(&app, player).ammo(), 9);

    // Switch cooldown 0.3s
    run_ticks(&mut app, 20);
    assert_eq!(weapon(&app, player).ammo(), 9);
    app.world_mut().send_event(WeaponSwitchIntent {
        entity: player,
        force: false,
    });
    app.update();
    assert_eq!(
        app.world().get::<WeaponLoadout>(player).unwrap().mode(),
        WeaponMode::Melee
    );
    assert!(!weapon(&app, player).enabled);
    assert!(!weapon(&app, player).trigger_held);

    run_ticks(&mut app, 20);
    app.world_mut().send_event(WeaponSwitchIntent {
        entity: player,
        force: false,
    });
    app.update();
    assert_eq!(weapon(&app, player).ammo(), 9, "ammo restored after round trip");
    assert!(weapon(&app, player).enabled);
}

/// Test: missile летит к игроку, взрывается на контакте, наносит 1 урон
#[test]
fn test_boss_missile_damages_player() {
    let (mut app, player) = create_arena(42);
    let owner = app.world_mut().spawn_empty().id();

    app.world_mut().spawn((
        BossMissile::new(owner, Vec3::Z, &MissileConfig::default()),
        Transform::from_translation(Vec3::new(0.0, 0.0, -3.0)),
    ));

    run_ticks(&mut app, 20);

    assert_eq!(health(&app, player), 4);
    let effects = app.world().get::<DamageEffects>(player).unwrap();
    assert!(effects.is_invulnerable());

    let mut missiles = app.world_mut().query::<&BossMissile>();
    assert_eq!(missiles.iter(app.world()).count(), 0, "missile exploded");

    let hud = app.world().resource::<CombatHud>();
    assert_eq!(hud.player_health, 4);
    assert_eq!(hud.player_max_health, 5);
}

/// Test: промахнувшийся missile исчезает по lifetime
#[test]
fn test_boss_missile_expires() {
    let (mut app, player) = create_arena(42);
    let owner = app.world_mut().spawn_empty().id();

    app.world_mut().spawn((
        BossMissile::new(owner, Vec3::NEG_Z, &MissileConfig::default()),
        Transform::from_translation(Vec3::new(0.0, 0.0, -3.0)),
    ));

    run_ticks(&mut app, 60);
    let mut missiles = app.world_mut().query::<&BossMissile>();
    assert_eq!(missiles.iter(app.world()).count(), 1);

    // Истечение lifetime тоже взрывается (в точке, куда ракета долетела)
    let mut explosions = Vec::new();
    for _ in 0..70 {
        app.update();
        let cues = app.world().resource::<Events<PresentationCue>>();
        let mut cursor = cues.get_cursor();
        explosions.extend(cursor.read(cues).filter_map(|cue| match cue {
            PresentationCue::SpawnEffect {
                kind: EffectKind::Explosion,
                position,
            } => Some(*position),
            _ => None,
        }));
    }

    let mut missiles = app.world_mut().query::<&BossMissile>();
    assert_eq!(missiles.iter(app.world()).count(), 0);
    assert_eq!(health(&app, player), 5);

    let position = explosions.first().copied().expect("expired missile must explode");
    assert!(position.z < -20.0, "explosion at flight end, got {position:?}");
}

/// Test: chaser догоняет игрока, contact damage ограничен invulnerability window
#[test]
fn test_chaser_contact_damage() {
    let (mut app, player) = create_arena(42);
    let tuning = CombatTuning::default();
    app.world_mut()
        .spawn(enemy_bundle(&tuning, Vec3::new(3.0, 0.0, 0.0)));

    // Контакт на ~0.6s
    run_ticks(&mut app, 30);
    assert_eq!(health(&app, player), 5);

    run_ticks(&mut app, 30);
    assert_eq!(health(&app, player), 4);

    // Invulnerability 1.5s: контакт продолжается, но урона нет
    run_ticks(&mut app, 30);
    assert_eq!(health(&app, player), 4);
}

/// Test: смерть игрока → Defeat, clock останавливается
#[test]
fn test_player_death_ends_match() {
    let (mut app, player) = create_arena(42);

    app.world_mut().send_event(DamageRequest {
        attacker: None,
        target: player,
        amount: 10.0,
        source_position: Vec3::new(0.0, 0.0, -1.0),
        source: DamageSource::Contact,
    });
    app.update();

    assert!(app.world().get::<Dead>(player).is_some());
    let tally = app.world().resource::<KillTally>();
    assert_eq!(tally.outcome(), MatchOutcome::Defeat);
    assert_eq!(tally.kills, 0);
    let elapsed = tally.elapsed;

    run_ticks(&mut app, 30);
    assert_eq!(app.world().resource::<KillTally>().elapsed, elapsed);
    assert_eq!(
        app.world().resource::<CombatHud>().outcome,
        MatchOutcome::Defeat
    );
}

//! Boss Behavior State Machine
//!
//! Health-gated выбор между Idling / FirstPattern / SecondPattern. Dead терминальный.
//!
//! Архитектура:
//! - Каждая routine = явная фаза `BossRoutine` с accumulator'ом elapsed
//!   (вместо coroutine + running flag)
//! - Фазу двигает только `BossBrain::tick` (раз в fixed tick)
//! - `force_dead`: единственный внешний preempt (смерть прерывает любую routine)
//! - tick чистый: возвращает `BossCommand`, side effects делает система

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

use crate::combat::components::MissileConfig;
use crate::components::{
    countdown, face_direction, face_towards, horizontal_direction, move_towards, reached, Health,
};

/// Порог FirstPattern (health %, включительно)
pub const FIRST_PATTERN_THRESHOLD: f32 = 70.0;
/// Порог SecondPattern (health %, включительно)
pub const SECOND_PATTERN_THRESHOLD: f32 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossState {
    Idling,
    FirstPattern,
    SecondPattern,
    Dead,
}

/// Доступные состояния по health percentage
///
/// | health % | states |
/// |---|---|
/// | ≤ 0 | Dead |
/// | > 0 | Idling; + FirstPattern при ≤ 70; + SecondPattern при ≤ 35 |
pub fn available_states(health_percentage: f32) -> Vec<BossState> {
    if health_percentage <= 0.0 {
        return vec![BossState::Dead];
    }

    let mut states = vec![BossState::Idling];
    if health_percentage <= FIRST_PATTERN_THRESHOLD {
        states.push(BossState::FirstPattern);
    }
    if health_percentage <= SECOND_PATTERN_THRESHOLD {
        states.push(BossState::SecondPattern);
    }
    states
}

/// Параметры босса (секунды, метры, радианы/сек)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub speed: f32,
    pub shooting_interval: f32,
    pub idle_duration: f32,
    pub first_pattern_duration: f32,
    pub second_pattern_duration: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub charge_speed_multiplier: f32,
    pub charge_duration: f32,
    /// Насколько дальше игрока уходит charge
    pub charge_overshoot: f32,
    /// Пауза между routine и выбором следующего состояния
    pub transition_pause: f32,
    /// Доля second_pattern_duration до призыва миньонов
    pub summon_fraction: f32,
    pub death_duration: f32,
    /// Shoot point перед боссом (forward offset)
    pub shoot_offset: f32,
    /// Есть ли у босса summon spawner
    pub summon_minions: bool,
    pub missile: MissileConfig,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            shooting_interval: 2.0,
            idle_duration: 10.0,
            first_pattern_duration: 10.0,
            second_pattern_duration: 10.0,
            orbit_radius: 5.0,
            orbit_speed: 2.0,
            charge_speed_multiplier: 2.0,
            charge_duration: 2.0,
            charge_overshoot: 10.0,
            transition_pause: 1.0,
            summon_fraction: 0.7,
            death_duration: 2.0,
            shoot_offset: 1.0,
            summon_minions: true,
            missile: MissileConfig::default(),
        }
    }
}

/// Shot interval timer (countdown до нуля → выстрел → reset)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotTimer {
    pub interval: f32,
    pub remaining: f32,
}

impl ShotTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    /// true = стреляем в этот tick
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            self.remaining = self.interval;
            true
        } else {
            self.remaining = countdown(self.remaining, dt);
            false
        }
    }
}

/// Текущая фаза behavior routine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossRoutine {
    /// Routine для текущего state стартует на ближайшем tick
    Pending,
    Idling { elapsed: f32 },
    /// FirstPattern, фаза 1
    Orbiting { elapsed: f32, angle: f32 },
    /// FirstPattern, фаза 2
    Charging { elapsed: f32, target: Vec3 },
    /// SecondPattern до призыва
    Barrage { elapsed: f32 },
    /// SecondPattern после призыва (остаток длительности)
    AwaitingSummonEnd { elapsed: f32 },
    /// Пауза перед выбором следующего state
    Transition { elapsed: f32 },
    /// Игрока нет: routine вышла без перехода, ждём игрока и перезапускаем
    AwaitingPlayer,
    Dying { elapsed: f32 },
    /// Dead routine завершена, entity удаляется
    Gone,
}

/// Side effects одного tick'а (выполняет run_boss_behavior)
#[derive(Debug, Clone, PartialEq)]
pub enum BossCommand {
    Fire { origin: Vec3, direction: Vec3 },
    Summon { position: Vec3 },
    /// Spawner недоступен (или игрок пропал): призыв пропущен, pattern продолжается
    SummonSkipped,
    StateChanged { from: BossState, to: BossState },
    Despawn,
}

#[derive(Component, Debug, Clone)]
pub struct BossBrain {
    config: BossConfig,
    state: BossState,
    routine: BossRoutine,
    home_position: Vec3,
    shot_timer: ShotTimer,
}

impl BossBrain {
    pub fn new(config: BossConfig, home_position: Vec3) -> Self {
        let shot_timer = ShotTimer::new(config.shooting_interval);
        Self {
            config,
            state: BossState::Idling,
            routine: BossRoutine::Pending,
            home_position,
            shot_timer,
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    pub fn routine(&self) -> BossRoutine {
        self.routine
    }

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    pub fn home_position(&self) -> Vec3 {
        self.home_position
    }

    pub fn is_dead(&self) -> bool {
        self.state == BossState::Dead
    }

    /// Терминальный переход в Dead, прерывает текущую routine
    ///
    /// Возвращает false если босс уже мертв (повторный вызов: no-op).
    pub fn force_dead(&mut self) -> bool {
        if self.state == BossState::Dead {
            return false;
        }
        self.state = BossState::Dead;
        self.routine = BossRoutine::Pending;
        true
    }

    /// Один simulation tick
    pub fn tick(
        &mut self,
        dt: f32,
        transform: &mut Transform,
        player: Option<Vec3>,
        health: &Health,
        rng: &mut impl Rng,
    ) -> Vec<BossCommand> {
        let mut commands = Vec::new();

        if !health.is_alive() {
            self.force_dead();
        }

        if self.routine == BossRoutine::Pending {
            self.routine = self.start_routine(player);
        }

        self.routine = match self.routine {
            BossRoutine::Pending | BossRoutine::Gone => self.routine,

            BossRoutine::Idling { elapsed } => {
                if let Some(player) = player {
                    face_towards(transform, player);
                    transform.translation = move_towards(
                        transform.translation,
                        self.home_position,
                        self.config.speed * dt,
                    );
                    self.shoot(dt, transform, &mut commands);
                }

                let elapsed = elapsed + dt;
                if reached(elapsed, self.config.idle_duration) {
                    BossRoutine::Transition { elapsed: 0.0 }
                } else {
                    BossRoutine::Idling { elapsed }
                }
            }

            BossRoutine::Orbiting { elapsed, angle } => match player {
                None => BossRoutine::AwaitingPlayer,
                Some(player) => self.orbit(dt, transform, player, elapsed, angle, &mut commands),
            },

            BossRoutine::Charging { elapsed, target } => {
                transform.translation = move_towards(
                    transform.translation,
                    target,
                    self.config.speed * self.config.charge_speed_multiplier * dt,
                );

                let elapsed = elapsed + dt;
                if reached(elapsed, self.config.charge_duration) {
                    BossRoutine::Transition { elapsed: 0.0 }
                } else {
                    BossRoutine::Charging { elapsed, target }
                }
            }

            BossRoutine::Barrage { elapsed } => {
                if let Some(player) = player {
                    face_towards(transform, player);
                    self.shoot(dt, transform, &mut commands);
                }

                let elapsed = elapsed + dt;
                if reached(elapsed, self.summon_time()) {
                    commands.push(match player {
                        Some(position) if self.config.summon_minions => {
                            BossCommand::Summon { position }
                        }
                        _ => BossCommand::SummonSkipped,
                    });
                    BossRoutine::AwaitingSummonEnd { elapsed: 0.0 }
                } else {
                    BossRoutine::Barrage { elapsed }
                }
            }

            BossRoutine::AwaitingSummonEnd { elapsed } => {
                let elapsed = elapsed + dt;
                let remainder = self.config.second_pattern_duration - self.summon_time();
                if reached(elapsed, remainder) {
                    BossRoutine::Transition { elapsed: 0.0 }
                } else {
                    BossRoutine::AwaitingSummonEnd { elapsed }
                }
            }

            BossRoutine::Transition { elapsed } => {
                let elapsed = elapsed + dt;
                if reached(elapsed, self.config.transition_pause) {
                    self.pick_next_state(health, rng, &mut commands);
                    BossRoutine::Pending
                } else {
                    BossRoutine::Transition { elapsed }
                }
            }

            BossRoutine::AwaitingPlayer => {
                if player.is_some() {
                    BossRoutine::Pending
                } else {
                    BossRoutine::AwaitingPlayer
                }
            }

            BossRoutine::Dying { elapsed } => {
                let elapsed = elapsed + dt;
                if reached(elapsed, self.config.death_duration) {
                    commands.push(BossCommand::Despawn);
                    BossRoutine::Gone
                } else {
                    BossRoutine::Dying { elapsed }
                }
            }
        };

        commands
    }

    fn start_routine(&self, player: Option<Vec3>) -> BossRoutine {
        match self.state {
            BossState::Idling => BossRoutine::Idling { elapsed: 0.0 },
            BossState::FirstPattern if player.is_some() => BossRoutine::Orbiting {
                elapsed: 0.0,
                angle: 0.0,
            },
            BossState::SecondPattern if player.is_some() => BossRoutine::Barrage { elapsed: 0.0 },
            BossState::FirstPattern | BossState::SecondPattern => BossRoutine::AwaitingPlayer,
            BossState::Dead => BossRoutine::Dying { elapsed: 0.0 },
        }
    }

    /// Орбита вокруг игрока + стрельба; по окончании: charge через игрока
    fn orbit(
        &mut self,
        dt: f32,
        transform: &mut Transform,
        player: Vec3,
        elapsed: f32,
        angle: f32,
        commands: &mut Vec<BossCommand>,
    ) -> BossRoutine {
        let angle = angle + self.config.orbit_speed * dt;
        let orbit_point = Vec3::new(
            player.x + self.config.orbit_radius * angle.cos(),
            transform.translation.y,
            player.z + self.config.orbit_radius * angle.sin(),
        );

        transform.translation =
            move_towards(transform.translation, orbit_point, self.config.speed * dt);
        face_towards(transform, player);
        self.shoot(dt, transform, commands);

        let elapsed = elapsed + dt;
        if !reached(elapsed, self.config.first_pattern_duration) {
            return BossRoutine::Orbiting { elapsed, angle };
        }

        // Charge: позиция игрока фиксируется в этот момент
        let direction = horizontal_direction(transform.translation, player);
        let mut target = player + direction * self.config.charge_overshoot;
        target.y = transform.translation.y;
        face_direction(transform, direction);

        BossRoutine::Charging {
            elapsed: 0.0,
            target,
        }
    }

    fn shoot(&mut self, dt: f32, transform: &Transform, commands: &mut Vec<BossCommand>) {
        if self.shot_timer.tick(dt) {
            let direction = transform.forward().as_vec3();
            commands.push(BossCommand::Fire {
                origin: transform.translation + direction * self.config.shoot_offset,
                direction,
            });
        }
    }

    fn summon_time(&self) -> f32 {
        self.config.second_pattern_duration * self.config.summon_fraction
    }

    fn pick_next_state(
        &mut self,
        health: &Health,
        rng: &mut impl Rng,
        commands: &mut Vec<BossCommand>,
    ) {
        let states = available_states(health.percentage());
        let next = states[rng.gen_range(0..states.len())];

        if next == BossState::Dead {
            self.force_dead();
            return;
        }

        commands.push(BossCommand::StateChanged {
            from: self.state,
            to: next,
        });
        self.state = next;
    }
}

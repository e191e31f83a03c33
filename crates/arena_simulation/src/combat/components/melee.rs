//! Melee combo компоненты
//!
//! Combo из трёх ударов: input lockout window, отложенный урон на каждый swing,
//! dedup целей (одна цель получает максимум один hit за swing).

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::error::CombatConfigError;
use crate::components::{countdown, reached};

pub const COMBO_LENGTH: u8 = 3;

// ============================================================================
// Swing Table (config)
// ============================================================================

/// Параметры одного swing'а
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SwingSpec {
    /// Радиус overlap вокруг attack point (метры)
    pub radius: f32,
    pub damage: f32,
    /// Задержка между input и уроном (ход оружия)
    pub delay: f32,
}

/// Таблица swing'ов, индекс = номер swing'а 1..=3
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwingTable {
    pub swings: [SwingSpec; COMBO_LENGTH as usize],
    /// Столько без input посреди combo → combo сбрасывается
    pub expire_time: f32,
    /// Lockout после принятого input; строго короче `expire_time`
    pub accept_input_window: f32,
    /// Дистанция attack point перед атакующим
    pub attack_offset: f32,
}

impl Default for SwingTable {
    fn default() -> Self {
        Self {
            swings: [
                SwingSpec { radius: 2.0, damage: 10.0, delay: 0.4 },
                SwingSpec { radius: 2.0, damage: 15.0, delay: 0.4 },
                SwingSpec { radius: 2.2, damage: 25.0, delay: 0.5 },
            ],
            expire_time: 1.0,
            accept_input_window: 0.6,
            attack_offset: 1.0,
        }
    }
}

impl SwingTable {
    pub fn swing(&self, swing: u8) -> Result<&SwingSpec, CombatConfigError> {
        if swing == 0 || swing > COMBO_LENGTH {
            return Err(CombatConfigError::SwingOutOfRange {
                swing,
                max: COMBO_LENGTH,
            });
        }
        Ok(&self.swings[(swing - 1) as usize])
    }
}

// ============================================================================
// Combo Session
// ============================================================================

/// Результат attack input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeleePress {
    /// Swing `n` начат, урон после swing delay
    Swing(u8),
    /// Input после третьего swing'а: combo сбросится на следующем tick
    ComboEnd,
    /// Melee выключен (оружие переключено)
    Disabled,
    /// Ещё внутри input lockout window
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingSwing {
    swing: u8,
    remaining: f32,
}

/// Melee combo одного атакующего
///
/// `tick` идёт до обработки input'ов того же tick'а, поэтому после финального
/// input ровно один tick combo остаётся завершённым.
#[derive(Component, Debug, Clone)]
pub struct MeleeCombo {
    table: SwingTable,
    attack_count: u8,
    /// Время с последнего принятого input
    combo_timer: f32,
    accepting_input: bool,
    combo_end: bool,
    hit_targets: Vec<Entity>,
    pending: Vec<PendingSwing>,
    pub enabled: bool,
}

impl Default for MeleeCombo {
    fn default() -> Self {
        Self::new(SwingTable::default())
    }
}

impl MeleeCombo {
    pub fn new(table: SwingTable) -> Self {
        Self {
            table,
            attack_count: 0,
            combo_timer: 0.0,
            accepting_input: true,
            combo_end: false,
            hit_targets: Vec::new(),
            pending: Vec::new(),
            enabled: true,
        }
    }

    pub fn table(&self) -> &SwingTable {
        &self.table
    }

    pub fn attack_count(&self) -> u8 {
        self.attack_count
    }

    pub fn is_accepting_input(&self) -> bool {
        self.accepting_input
    }

    pub fn is_combo_end(&self) -> bool {
        self.combo_end
    }

    pub fn in_progress(&self) -> bool {
        self.attack_count > 0
    }

    pub fn pending_swings(&self) -> usize {
        self.pending.len()
    }

    /// Tick таймеров; возвращает swing'и, чей урон резолвится в этом tick
    pub fn tick(&mut self, dt: f32) -> Vec<u8> {
        if self.combo_end {
            self.reset_combo();
            return Vec::new();
        }

        self.combo_timer += dt;

        if self.attack_count > 0 && reached(self.combo_timer, self.table.expire_time) {
            self.reset_combo();
            return Vec::new();
        }

        if !self.accepting_input && reached(self.combo_timer, self.table.accept_input_window) {
            self.accepting_input = true;
        }

        let mut due = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.remaining = countdown(pending.remaining, dt);
            if pending.remaining == 0.0 {
                due.push(pending.swing);
                false
            } else {
                true
            }
        });
        due
    }

    /// Attack input
    pub fn press_attack(&mut self) -> MeleePress {
        if !self.enabled {
            return MeleePress::Disabled;
        }
        if !self.accepting_input {
            return MeleePress::Locked;
        }

        self.accepting_input = false;
        self.combo_timer = 0.0;
        self.hit_targets.clear();

        if self.attack_count >= COMBO_LENGTH {
            self.combo_end = true;
            return MeleePress::ComboEnd;
        }

        self.attack_count += 1;
        let swing = self.attack_count;
        // Здесь swing ∈ 1..=COMBO_LENGTH, lookup не падает
        let delay = self.table.swing(swing).map(|spec| spec.delay).unwrap_or(0.0);
        self.pending.push(PendingSwing {
            swing,
            remaining: delay,
        });
        MeleePress::Swing(swing)
    }

    /// Запоминает цель текущего swing'а; false если она уже получила hit
    pub fn register_hit(&mut self, target: Entity) -> bool {
        if self.hit_targets.contains(&target) {
            return false;
        }
        self.hit_targets.push(target);
        true
    }

    /// Сброс combo (switch, expiry, завершение)
    pub fn reset_combo(&mut self) {
        self.hit_targets.clear();
        self.pending.clear();
        self.attack_count = 0;
        self.combo_timer = 0.0;
        self.accepting_input = true;
        self.combo_end = false;
    }
}

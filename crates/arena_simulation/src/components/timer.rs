//! Countdown helper для f32 таймеров (секунды)

/// Остаток меньше этого считается нулём (накопление float ошибки от 1/60 шагов)
pub const TIMER_EPSILON: f32 = 1e-5;

/// `value - dt`, clamped в 0; хвост меньше TIMER_EPSILON схлопывается в 0
pub fn countdown(value: f32, dt: f32) -> f32 {
    let next = value - dt;
    if next <= TIMER_EPSILON {
        0.0
    } else {
        next
    }
}

/// `elapsed >= duration` с тем же допуском, что и countdown
pub fn reached(elapsed: f32, duration: f32) -> bool {
    elapsed + TIMER_EPSILON >= duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_snaps_float_tail() {
        let mut timer = 0.3_f32;
        for _ in 0..18 {
            timer = countdown(timer, 1.0 / 60.0);
        }
        assert_eq!(timer, 0.0);
    }

    #[test]
    fn test_reached() {
        let mut elapsed = 0.0_f32;
        for _ in 0..120 {
            elapsed += 1.0 / 60.0;
        }
        assert!(reached(elapsed, 2.0));
        assert!(!reached(1.9, 2.0));
    }
}

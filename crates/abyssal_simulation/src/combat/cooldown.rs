//! Cooldown gate - elapsed-time проверка для повторяемых действий
//!
//! Check-then-act: вызывающий сам делает `trigger` после `can_trigger`.
//! Один FixedUpdate тик = один поток, атомарность не нужна.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct CooldownGate {
    /// Минимальный интервал между срабатываниями (секунды)
    pub duration: f32,
    last_trigger: Option<f32>,
}

impl CooldownGate {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            last_trigger: None,
        }
    }

    /// Gate, который считается сработавшим в момент `now` (первое действие после паузы)
    pub fn triggered_at(duration: f32, now: f32) -> Self {
        let mut gate = Self::new(duration);
        gate.trigger(now);
        gate
    }

    pub fn can_trigger(&self, now: f32) -> bool {
        match self.last_trigger {
            None => true,
            Some(last) => now - last >= self.duration,
        }
    }

    pub fn trigger(&mut self, now: f32) {
        self.last_trigger = Some(now);
    }

    pub fn try_trigger(&mut self, now: f32) -> bool {
        if self.can_trigger(now) {
            self.trigger(now);
            true
        } else {
            false
        }
    }

    pub fn remaining(&self, now: f32) -> f32 {
        match self.last_trigger {
            None => 0.0,
            Some(last) => (self.duration - (now - last)).max(0.0),
        }
    }

    pub fn last_trigger(&self) -> Option<f32> {
        self.last_trigger
    }

    pub fn reset(&mut self) {
        self.last_trigger = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_blocks_until_duration_elapsed() {
        let mut gate = CooldownGate::new(1.0);
        assert!(gate.can_trigger(0.0));

        gate.trigger(10.0);
        assert!(!gate.can_trigger(10.0));
        assert!(!gate.can_trigger(10.99));
        assert!(gate.can_trigger(11.0));
        assert!(gate.can_trigger(50.0));
    }

    #[test]
    fn test_try_trigger_resets_timer() {
        let mut gate = CooldownGate::new(0.5);
        assert!(gate.try_trigger(1.0));
        assert!(!gate.try_trigger(1.2));
        assert!((gate.remaining(1.2) - 0.3).abs() < 1e-6);
        assert!(gate.try_trigger(1.5));
        assert_eq!(gate.last_trigger(), Some(1.5));
    }

    #[test]
    fn test_fixed_tick_accumulation() {
        let mut gate = CooldownGate::new(2.0);
        let dt = 1.0 / 60.0;
        let mut now = 0.0_f32;
        gate.trigger(now);

        let mut ticks = 0;
        while !gate.can_trigger(now) {
            now += dt;
            ticks += 1;
        }
        // 2 сек ≈ 120 тиков (±1 из-за f32)
        assert!((119..=121).contains(&ticks), "ticks = {}", ticks);
    }
}

//! Knockback - импульс от попадания, экспоненциально затухает

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Как knockback взаимодействует с преследованием (per-archetype)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum KnockbackPolicy {
    /// AI не двигается, пока knockback активен
    #[default]
    Freeze,
    /// Knockback складывается с обычным движением
    Blend,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Knockback {
    pub velocity: Vec3,
    /// Доля скорости, теряемая за секунду (lerp-фактор decay·dt)
    pub decay_rate: f32,
    /// Сила импульса по умолчанию при попадании
    pub strength: f32,
    /// Ниже этого модуля knockback считается закончившимся
    pub epsilon: f32,
    pub policy: KnockbackPolicy,
}

impl Default for Knockback {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            decay_rate: 10.0,
            strength: 15.0,
            epsilon: 0.1,
            policy: KnockbackPolicy::Freeze,
        }
    }
}

impl Knockback {
    pub fn from_config(config: &crate::config::KnockbackConfig) -> Self {
        Self {
            velocity: Vec3::ZERO,
            decay_rate: config.decay_rate,
            strength: config.strength,
            epsilon: config.epsilon,
            policy: config.policy,
        }
    }

    /// Перезаписывает (не накапливает) текущий knockback
    pub fn apply_impulse(&mut self, direction: Vec3, strength: f32) {
        self.velocity = direction.normalize_or_zero() * strength;
    }

    pub fn is_active(&self) -> bool {
        self.velocity.length() > self.epsilon
    }

    /// Затухание + смещение за тик; ноль, когда knockback закончился
    pub fn tick(&mut self, delta: f32) -> Vec3 {
        if !self.is_active() {
            self.velocity = Vec3::ZERO;
            return Vec3::ZERO;
        }

        let t = (self.decay_rate * delta).clamp(0.0, 1.0);
        self.velocity = self.velocity.lerp(Vec3::ZERO, t);
        self.velocity * delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_overwrites() {
        let mut knockback = Knockback::default();
        knockback.apply_impulse(Vec3::new(3.0, 0.0, 0.0), 10.0);
        knockback.apply_impulse(Vec3::new(0.0, 0.0, -1.0), 4.0);
        assert_eq!(knockback.velocity, Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn test_knockback_decays_to_rest() {
        let mut knockback = Knockback::default();
        knockback.apply_impulse(Vec3::X, 15.0);

        let dt = 1.0 / 60.0;
        let first = knockback.tick(dt);
        assert!(first.x > 0.0);
        assert!(knockback.velocity.x < 15.0);

        let mut travelled = first.x;
        for _ in 0..600 {
            travelled += knockback.tick(dt).x;
        }
        assert!(!knockback.is_active());
        assert_eq!(knockback.tick(dt), Vec3::ZERO);
        // Конечное смещение (геометрический ряд)
        assert!(travelled > 0.5 && travelled < 3.0, "travelled {}", travelled);
    }
}

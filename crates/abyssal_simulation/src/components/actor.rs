//! Базовые компоненты акторов: Health, Enemy

use bevy::prelude::*;

/// Здоровье (игрок, враг, босс - одна форма)
///
/// Инвариант: 0 ≤ current ≤ max. Переход Alive → Dead односторонний:
/// после смерти damage/heal/add_max_health - no-op.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    /// Длительность окна неуязвимости после попадания (0 = без окна)
    pub invincibility_duration: f32,
    /// До какого момента (elapsed secs) попадания игнорируются
    pub invincible_until: f32,
    dead: bool,
}

/// Результат `Health::take_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Мертв, неуязвим или amount == 0 - ничего не изменилось
    Ignored,
    Damaged { dealt: u32 },
    /// Этот удар убил (ровно один раз за жизнь entity)
    Killed { dealt: u32 },
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            invincibility_duration: 0.0,
            invincible_until: 0.0,
            dead: false,
        }
    }

    pub fn with_invincibility(mut self, duration: f32) -> Self {
        self.invincibility_duration = duration.max(0.0);
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_invincible(&self, now: f32) -> bool {
        now < self.invincible_until
    }

    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    pub fn take_damage(&mut self, amount: u32, now: f32) -> DamageOutcome {
        if self.dead || amount == 0 || self.is_invincible(now) {
            return DamageOutcome::Ignored;
        }

        let dealt = amount.min(self.current);
        self.current -= dealt;

        if self.current == 0 {
            self.dead = true;
            return DamageOutcome::Killed { dealt };
        }

        if self.invincibility_duration > 0.0 {
            self.invincible_until = now + self.invincibility_duration;
        }
        DamageOutcome::Damaged { dealt }
    }

    /// Возвращает реально восстановленное количество (0 = ничего не изменилось)
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.dead {
            return 0;
        }
        let healed = amount.min(self.max - self.current);
        self.current += healed;
        healed
    }

    /// Поднимает max и current на bonus (бонус = бесплатное лечение)
    pub fn add_max_health(&mut self, bonus: u32) -> bool {
        if self.dead || bonus == 0 {
            return false;
        }
        self.max = self.max.saturating_add(bonus);
        self.current = self.current.saturating_add(bonus).min(self.max);
        true
    }

    pub fn restore_full(&mut self) -> u32 {
        self.heal(self.max)
    }
}

/// Архетип врага (профиль поведения)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EnemyArchetype {
    CthulhuBoss,
    JellySlime,
    MiniSlime,
    Jellyfish,
    Seahorse,
    Roller,
}

impl EnemyArchetype {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyArchetype::CthulhuBoss => "Cthulhu",
            EnemyArchetype::JellySlime => "JellySlime",
            EnemyArchetype::MiniSlime => "MiniSlime",
            EnemyArchetype::Jellyfish => "Jellyfish",
            EnemyArchetype::Seahorse => "Seahorse",
            EnemyArchetype::Roller => "Roller",
        }
    }
}

/// Враг - всё, что входит в roster комнаты и получает урон от пуль игрока
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Health, crate::components::Velocity, crate::components::CollisionRadius)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_clamps_and_kills_once() {
        let mut health = Health::new(100);

        assert_eq!(health.take_damage(30, 0.0), DamageOutcome::Damaged { dealt: 30 });
        assert_eq!(health.current, 70);

        assert_eq!(health.take_damage(500, 0.0), DamageOutcome::Killed { dealt: 70 });
        assert_eq!(health.current, 0);
        assert!(health.is_dead());

        // Повторные удары после смерти - no-op
        for _ in 0..5 {
            assert_eq!(health.take_damage(10, 1.0), DamageOutcome::Ignored);
        }
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_invincibility_window() {
        let mut health = Health::new(100).with_invincibility(1.0);

        assert!(matches!(health.take_damage(10, 5.0), DamageOutcome::Damaged { .. }));
        assert_eq!(health.take_damage(10, 5.5), DamageOutcome::Ignored);
        assert_eq!(health.current, 90);

        // Окно закончилось
        assert!(matches!(health.take_damage(10, 6.0), DamageOutcome::Damaged { .. }));
        assert_eq!(health.current, 80);
    }

    #[test]
    fn test_heal_clamped_and_ignored_after_death() {
        let mut health = Health::new(100).with_invincibility(1.0);
        health.take_damage(50, 0.0);

        assert_eq!(health.heal(30), 30);
        assert_eq!(health.heal(100), 20);
        assert_eq!(health.current, 100);
        // heal не сбрасывает неуязвимость
        assert!(health.is_invincible(0.5));

        health.take_damage(100, 2.0);
        assert_eq!(health.heal(50), 0);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_add_max_health_grants_bonus_immediately() {
        let mut health = Health::new(100);
        health.take_damage(40, 0.0);

        assert!(health.add_max_health(25));
        assert_eq!(health.max, 125);
        assert_eq!(health.current, 85);
    }

    #[test]
    fn test_clamping_under_mixed_sequence() {
        let mut health = Health::new(50);
        let ops: [(bool, u32); 8] = [
            (true, 20), (false, 100), (true, 7), (false, 3),
            (true, 60), (false, 10), (true, 1), (false, 1),
        ];

        for (i, (is_damage, amount)) in ops.iter().enumerate() {
            if *is_damage {
                health.take_damage(*amount, i as f32);
            } else {
                health.heal(*amount);
            }
            assert!(health.current <= health.max);
        }
        assert!(health.is_dead());
    }
}

//! Player stat bonuses (награды за комнаты)
//!
//! Бонусы складываются аддитивно: +10% и +15% урона = ×1.25, не 1.10 × 1.15.
//! Множители - чистые функции накопленного бонуса.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{Health, Player};
use crate::combat::HealthChanged;
use crate::logger;

/// Категория награды
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum RewardKind {
    Health,
    Mana,
    Gold,
    Experience,
    MovementSpeed,
    AttackSpeed,
    BulletSpeed,
    Damage,
    SpecialItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardItem {
    pub name: String,
    pub kind: RewardKind,
    /// Плоское значение (Health → +max HP)
    pub value: u32,
    /// Процентный бонус (скорости, урон)
    pub percent: f32,
}

impl RewardItem {
    pub fn new(name: impl Into<String>, kind: RewardKind, value: u32, percent: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
            percent,
        }
    }

    pub fn percent(name: impl Into<String>, kind: RewardKind, percent: f32) -> Self {
        Self::new(name, kind, 0, percent)
    }

    /// Строка для истории наград: "Name +value +%pct"
    pub fn display(&self) -> String {
        let mut display = self.name.clone();
        if self.value > 0 {
            display.push_str(&format!(" +{}", self.value));
        }
        if self.percent > 0.0 {
            display.push_str(&format!(" +%{}", self.percent));
        }
        display
    }
}

/// Накопленные бонусы игрока за сессию
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerStats {
    pub movement_speed_bonus: f32,
    pub attack_speed_bonus: f32,
    pub bullet_speed_bonus: f32,
    pub damage_bonus: f32,
    pub max_health_bonus: u32,
    acquired: Vec<String>,
}

impl PlayerStats {
    /// Применяет награду; возвращает flat бонус к max HP (0 для прочих категорий)
    ///
    /// Отрицательные проценты игнорируются: бонусы только растут.
    pub fn apply_reward(&mut self, reward: &RewardItem) -> u32 {
        self.acquired.push(reward.display());
        let percent = reward.percent.max(0.0);

        match reward.kind {
            RewardKind::Health => {
                self.max_health_bonus = self.max_health_bonus.saturating_add(reward.value);
                return reward.value;
            }
            RewardKind::MovementSpeed => self.movement_speed_bonus += percent,
            RewardKind::AttackSpeed => self.attack_speed_bonus += percent,
            RewardKind::BulletSpeed => self.bullet_speed_bonus += percent,
            RewardKind::Damage => self.damage_bonus += percent,
            RewardKind::Mana | RewardKind::Gold | RewardKind::Experience | RewardKind::SpecialItem => {}
        }
        0
    }

    pub fn movement_speed_multiplier(&self) -> f32 {
        1.0 + self.movement_speed_bonus / 100.0
    }

    pub fn attack_speed_multiplier(&self) -> f32 {
        1.0 + self.attack_speed_bonus / 100.0
    }

    pub fn bullet_speed_multiplier(&self) -> f32 {
        1.0 + self.bullet_speed_bonus / 100.0
    }

    pub fn damage_multiplier(&self) -> f32 {
        1.0 + self.damage_bonus / 100.0
    }

    pub fn total_max_health(&self, base: u32) -> u32 {
        base.saturating_add(self.max_health_bonus)
    }

    pub fn acquired_rewards(&self) -> &[String] {
        &self.acquired
    }

    pub fn summary(&self) -> String {
        format!(
            "TOTAL STATISTICS\n\
             Movement Speed: +%{:.1}\n\
             Attack Speed: +%{:.1}\n\
             Bullet Speed: +%{:.1}\n\
             Damage: +%{:.1}\n\
             Max Health: +{}",
            self.movement_speed_bonus,
            self.attack_speed_bonus,
            self.bullet_speed_bonus,
            self.damage_bonus,
            self.max_health_bonus
        )
    }

    /// Новый забег: все бонусы и история обнуляются
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Event: выбор награды (reward UI)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ApplyReward(pub RewardItem);

/// Система: применение наград + flat HP бонус игроку
pub fn apply_rewards(
    mut rewards: EventReader<ApplyReward>,
    mut stats: ResMut<PlayerStats>,
    mut players: Query<(Entity, &mut Health), With<Player>>,
    mut changed_events: EventWriter<HealthChanged>,
) {
    for ApplyReward(reward) in rewards.read() {
        let health_bonus = stats.apply_reward(reward);
        logger::log_info(&format!("🎁 Reward applied: {}", reward.display()));

        if health_bonus == 0 {
            continue;
        }
        for (entity, mut health) in players.iter_mut() {
            if health.add_max_health(health_bonus) {
                changed_events.write(HealthChanged {
                    entity,
                    current: health.current,
                    max: health.max,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_bonus_is_additive() {
        let mut stats = PlayerStats::default();
        stats.apply_reward(&RewardItem::percent("Sharp Fins", RewardKind::Damage, 10.0));
        stats.apply_reward(&RewardItem::percent("Sharper Fins", RewardKind::Damage, 15.0));

        assert!((stats.damage_multiplier() - 1.25).abs() < 1e-6);
        assert_eq!(stats.movement_speed_multiplier(), 1.0);
    }

    #[test]
    fn test_health_reward_is_flat() {
        let mut stats = PlayerStats::default();
        let bonus = stats.apply_reward(&RewardItem::new("Oxygen Tank", RewardKind::Health, 20, 0.0));

        assert_eq!(bonus, 20);
        assert_eq!(stats.total_max_health(100), 120);
    }

    #[test]
    fn test_non_stat_rewards_recorded_only() {
        let mut stats = PlayerStats::default();
        stats.apply_reward(&RewardItem::new("Gold Pile", RewardKind::Gold, 50, 0.0));
        stats.apply_reward(&RewardItem::percent("Cursed Idol", RewardKind::Damage, -30.0));

        assert_eq!(stats.damage_multiplier(), 1.0);
        assert_eq!(stats.acquired_rewards(), &["Gold Pile +50".to_string(), "Cursed Idol".to_string()]);
    }

    #[test]
    fn test_reward_display_and_summary() {
        let reward = RewardItem::new("Swift Current", RewardKind::MovementSpeed, 0, 12.5);
        assert_eq!(reward.display(), "Swift Current +%12.5");

        let mut stats = PlayerStats::default();
        stats.apply_reward(&reward);
        assert!(stats.summary().contains("Movement Speed: +%12.5"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut stats = PlayerStats::default();
        stats.apply_reward(&RewardItem::percent("Rapid Fire", RewardKind::AttackSpeed, 20.0));
        stats.reset();

        assert_eq!(stats, PlayerStats::default());
        assert!(stats.acquired_rewards().is_empty());
    }
}

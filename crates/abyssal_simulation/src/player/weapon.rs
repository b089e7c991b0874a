//! Оружие игрока: пули вдоль facing, параметры масштабируются PlayerStats

use bevy::prelude::*;

use crate::combat::{CooldownGate, Dead, Projectile, ProjectileFaction, ProjectileSpec};
use crate::components::Player;
use crate::config::GunConfig;
use crate::player::{PlayerInput, PlayerStats};
use crate::spatial::flat_forward;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerGun {
    pub damage: f32,
    pub bullet_speed: f32,
    pub lifetime: f32,
    pub knockback: f32,
    pub radius: f32,
    /// Базовый интервал между выстрелами (делится на attack speed множитель)
    pub fire_interval: f32,
    pub gate: CooldownGate,
    /// Высота дула над Transform игрока
    pub muzzle_height: f32,
}

impl PlayerGun {
    pub fn from_config(config: &GunConfig) -> Self {
        Self {
            damage: config.damage,
            bullet_speed: config.bullet_speed,
            lifetime: config.lifetime,
            knockback: config.knockback,
            radius: config.radius,
            fire_interval: config.fire_interval,
            gate: CooldownGate::new(config.fire_interval),
            muzzle_height: 0.0,
        }
    }

    /// Пуля с учётом бонусов (урон округляется, knockback растёт вместе с уроном)
    pub fn bullet(&self, stats: &PlayerStats) -> ProjectileSpec {
        let damage_multiplier = stats.damage_multiplier();
        ProjectileSpec {
            damage: (self.damage * damage_multiplier).round().max(0.0) as u32,
            speed: self.bullet_speed * stats.bullet_speed_multiplier(),
            lifetime: self.lifetime,
            radius: self.radius,
            faction: ProjectileFaction::Friendly,
            knockback: Some(self.knockback * damage_multiplier),
        }
    }

    pub fn effective_interval(&self, stats: &PlayerStats) -> f32 {
        self.fire_interval / stats.attack_speed_multiplier().max(f32::EPSILON)
    }
}

/// Event: игрок выстрелил
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShotFired {
    pub shooter: Entity,
    pub projectile: Entity,
    pub damage: u32,
}

/// Система: стрельба по удерживаемому fire
pub fn fire_player_gun(
    mut commands: Commands,
    mut shooters: Query<(Entity, &Transform, &PlayerInput, &mut PlayerGun), (With<Player>, Without<Dead>)>,
    stats: Res<PlayerStats>,
    mut shot_events: EventWriter<ShotFired>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, input, mut gun) in shooters.iter_mut() {
        if !input.fire {
            continue;
        }

        gun.gate.duration = gun.effective_interval(&stats);
        if !gun.gate.try_trigger(now) {
            continue;
        }

        let spec = gun.bullet(&stats);
        let origin = transform.translation + Vec3::Y * gun.muzzle_height;
        let projectile = commands
            .spawn((
                Projectile::new(spec, flat_forward(transform), Some(entity)),
                Transform::from_translation(origin),
            ))
            .id();

        shot_events.write(ShotFired {
            shooter: entity,
            projectile,
            damage: spec.damage,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{RewardItem, RewardKind};

    #[test]
    fn test_bullet_scales_with_stats() {
        let gun = PlayerGun::from_config(&GunConfig::default());
        let mut stats = PlayerStats::default();
        stats.apply_reward(&RewardItem::percent("Harpoon Tips", RewardKind::Damage, 50.0));
        stats.apply_reward(&RewardItem::percent("Jet Rounds", RewardKind::BulletSpeed, 20.0));
        stats.apply_reward(&RewardItem::percent("Quick Reload", RewardKind::AttackSpeed, 25.0));

        let bullet = gun.bullet(&stats);
        assert_eq!(bullet.damage, 15);
        assert!((bullet.speed - 30.0).abs() < 1e-4);
        assert!((bullet.knockback.unwrap_or_default() - 22.5).abs() < 1e-4);
        assert!((gun.effective_interval(&stats) - 0.2).abs() < 1e-6);
        assert_eq!(bullet.faction, ProjectileFaction::Friendly);
    }
}

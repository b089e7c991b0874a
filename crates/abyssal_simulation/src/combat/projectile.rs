//! Снаряды: лазеры, пули, детёныши морского конька
//!
//! Прямая линия с постоянной скоростью. Исчезают по lifetime или на первом
//! подходящем столкновении: цель своей фракции → урон + destroy, препятствие →
//! destroy без урона, всё остальное - насквозь.

use bevy::prelude::*;

use crate::combat::DamageRequest;
use crate::components::{CollisionRadius, Enemy, Health, Obstacle, Player};
use crate::spatial::{flat, flat_distance, sphere_overlaps_box, within_reach};

/// Кого снаряд может ранить
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ProjectileFaction {
    /// Выпущен врагом, бьёт игрока
    Hostile,
    /// Выпущен игроком, бьёт врагов
    Friendly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub damage: u32,
    pub speed: f32,
    pub lifetime: f32,
    pub radius: f32,
    pub faction: ProjectileFaction,
    pub knockback: Option<f32>,
}

impl ProjectileSpec {
    pub fn hostile_laser(config: &crate::config::LaserConfig) -> Self {
        Self {
            damage: config.damage,
            speed: config.speed,
            lifetime: config.lifetime,
            radius: config.radius,
            faction: ProjectileFaction::Hostile,
            knockback: None,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
    pub lifetime: f32,
    pub age: f32,
    pub radius: f32,
    pub faction: ProjectileFaction,
    pub knockback: Option<f32>,
    pub source: Option<Entity>,
    spent: bool,
}

impl Projectile {
    pub fn new(spec: ProjectileSpec, direction: Vec3, source: Option<Entity>) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            speed: spec.speed,
            damage: spec.damage,
            lifetime: spec.lifetime,
            age: 0.0,
            radius: spec.radius,
            faction: spec.faction,
            knockback: spec.knockback,
            source,
            spent: false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }
}

/// Углы веера (градусы) относительно базового направления
///
/// Один снаряд не разбрасывается - летит ровно по базе.
pub fn spread_angles(count: u32, spread_angle: f32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = spread_angle / (n - 1) as f32;
            (0..n).map(|i| -spread_angle / 2.0 + step * i as f32).collect()
        }
    }
}

/// Направления веера (поворот вокруг +Y)
pub fn spread_directions(base: Vec3, count: u32, spread_angle: f32) -> Vec<Vec3> {
    spread_angles(count, spread_angle)
        .into_iter()
        .map(|angle| Quat::from_rotation_y(angle.to_radians()) * base)
        .collect()
}

/// Event: снаряд попал в цель
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub damage: u32,
}

/// Система: движение + lifetime
pub fn move_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        if projectile.spent {
            continue;
        }

        transform.translation += projectile.direction * projectile.speed * delta;
        projectile.age += delta;

        if projectile.age >= projectile.lifetime {
            projectile.spent = true;
            commands.entity(entity).despawn();
        }
    }
}

/// Система: столкновения снарядов (overlap сфер / сфера vs box)
pub fn resolve_projectile_hits(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &Transform)>,
    players: Query<(Entity, &Transform, &CollisionRadius, &Health), With<Player>>,
    enemies: Query<(Entity, &Transform, &CollisionRadius, &Health), (With<Enemy>, Without<Player>)>,
    obstacles: Query<(&Transform, &Obstacle)>,
    mut damage_events: EventWriter<DamageRequest>,
    mut hit_events: EventWriter<ProjectileHit>,
) {
    for (entity, mut projectile, transform) in projectiles.iter_mut() {
        if projectile.spent {
            continue;
        }
        let position = transform.translation;

        let candidates: Vec<(Entity, Vec3, f32)> = match projectile.faction {
            ProjectileFaction::Hostile => players
                .iter()
                .filter(|(_, _, _, health)| health.is_alive())
                .map(|(e, t, r, _)| (e, t.translation, r.0))
                .collect(),
            ProjectileFaction::Friendly => enemies
                .iter()
                .filter(|(_, _, _, health)| health.is_alive())
                .map(|(e, t, r, _)| (e, t.translation, r.0))
                .collect(),
        };

        // Первое подходящее столкновение = ближайшая перекрывающаяся цель
        let hit = candidates
            .into_iter()
            .filter(|(_, target_pos, body)| within_reach(position, *target_pos, projectile.radius + body))
            .min_by(|a, b| flat_distance(position, a.1).total_cmp(&flat_distance(position, b.1)));

        if let Some((target, _, _)) = hit {
            let mut request = DamageRequest::new(target, projectile.damage)
                .with_direction(flat(projectile.direction));
            if let Some(strength) = projectile.knockback {
                request = request.with_knockback(strength);
            }
            if let Some(source) = projectile.source {
                request = request.from_source(source);
            }
            damage_events.write(request);
            hit_events.write(ProjectileHit {
                projectile: entity,
                target,
                damage: projectile.damage,
            });
            projectile.spent = true;
            commands.entity(entity).despawn();
            continue;
        }

        let blocked = obstacles.iter().any(|(obstacle_transform, obstacle)| {
            sphere_overlaps_box(position, projectile.radius, obstacle_transform.translation, obstacle.half_extents)
        });
        if blocked {
            projectile.spent = true;
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::signed_angle_y;

    #[test]
    fn test_spread_three_lasers_twenty_degrees() {
        assert_eq!(spread_angles(3, 20.0), vec![-10.0, 0.0, 10.0]);

        let base = Vec3::NEG_Z;
        let directions = spread_directions(base, 3, 20.0);
        let angles: Vec<f32> = directions.iter().map(|d| signed_angle_y(base, *d)).collect();

        assert!((angles[0] + 10.0).abs() < 1e-3);
        assert!(angles[1].abs() < 1e-3);
        assert!((angles[2] - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_projectile_not_spread() {
        let base = Vec3::new(1.0, 0.0, 1.0).normalize();
        let directions = spread_directions(base, 1, 45.0);
        assert_eq!(directions.len(), 1);
        assert!(directions[0].distance(base) < 1e-6);
    }

    #[test]
    fn test_spread_even_distribution() {
        let angles = spread_angles(5, 40.0);
        assert_eq!(angles, vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
        assert!(spread_angles(0, 10.0).is_empty());
    }
}

//! AI movement systems (knockback, rotation, pursuit).

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState, PlayerTarget, PursuitStyle};
use crate::combat::{Dead, Knockback, KnockbackPolicy};
use crate::components::{Enemy, Obstacle, Velocity};
use crate::spatial::{flat, flat_forward, ray_hits_box, rotate_toward};

/// Желаемая скорость для текущего стиля преследования (до проверки препятствий)
pub fn pursuit_velocity(style: PursuitStyle, transform: &Transform, target: Vec3, move_speed: f32) -> Vec3 {
    let offset = flat(target - transform.translation);
    let distance = offset.length();

    match style {
        PursuitStyle::Advance { stop_distance } => {
            // Движение в текущем facing → изогнутая траектория при повороте
            if distance > stop_distance {
                flat_forward(transform) * move_speed
            } else {
                Vec3::ZERO
            }
        }
        PursuitStyle::Standoff {
            min_distance,
            max_distance,
            ..
        } => {
            let toward = offset.normalize_or_zero();
            if distance > max_distance {
                toward * move_speed
            } else if distance < min_distance {
                -toward * move_speed
            } else {
                Vec3::ZERO
            }
        }
    }
}

/// Система: движение врагов
///
/// 1. Knockback (Freeze → обычное движение подавлено, Blend → складывается)
/// 2. Поворот к игроку с конечной скоростью
/// 3. Перемещение по PursuitStyle, с проверкой препятствия впереди
pub fn ai_pursuit_movement(
    mut ai_query: Query<
        (
            &mut Transform,
            &mut Velocity,
            &AIState,
            &AIConfig,
            &PlayerTarget,
            Option<&mut Knockback>,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    obstacles: Query<(&Transform, &Obstacle), Without<Enemy>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut velocity, state, config, target, knockback) in ai_query.iter_mut() {
        if let Some(mut knockback) = knockback {
            if knockback.is_active() {
                transform.translation += knockback.tick(delta);
                if knockback.policy == KnockbackPolicy::Freeze {
                    velocity.0 = Vec3::ZERO;
                    continue;
                }
            }
        }

        let (steer, advance) = match state {
            AIState::Pursuing => (true, true),
            AIState::Attacking | AIState::Cooldown { .. } => {
                (config.track_while_attacking, config.move_while_attacking)
            }
            AIState::Idle | AIState::Dead => (false, false),
        };

        let Some(player_position) = target.last_known_position.filter(|_| target.player.is_some()) else {
            velocity.0 = Vec3::ZERO;
            continue;
        };

        if steer {
            rotate_toward(&mut transform, player_position, config.turn_rate, delta);
        }

        let mut desired = if advance {
            pursuit_velocity(config.pursuit, &transform, player_position, config.move_speed)
        } else {
            Vec3::ZERO
        };

        if desired != Vec3::ZERO && config.obstacle_check_distance > 0.0 {
            let origin = transform.translation;
            let blocked = obstacles.iter().any(|(obstacle_transform, obstacle)| {
                ray_hits_box(
                    origin,
                    desired,
                    config.obstacle_check_distance,
                    obstacle_transform.translation,
                    obstacle.half_extents,
                )
                .is_some()
            });
            if blocked {
                desired = Vec3::ZERO;
            }
        }

        velocity.0 = match config.pursuit {
            PursuitStyle::Standoff { smoothing, .. } if smoothing > 0.0 => {
                velocity.0.lerp(desired, (delta / smoothing).min(1.0))
            }
            _ => desired,
        };

        transform.translation += velocity.0 * delta;
    }
}

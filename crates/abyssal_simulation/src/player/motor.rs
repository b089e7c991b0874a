//! Kinematic контроллер игрока
//!
//! Архитектура:
//! - Ground probe: короткий луч вниз против `Ground` поверхностей из whitelist
//! - Custom velocity integration (gravity + input), без физического движка
//! - Jump только с земли, вертикальная скорость обнуляется перед импульсом
//!
//! Детерминизм: fixed timestep (60Hz), порядок систем задаёт SimSet::Player.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{Ground, Player, Velocity};
use crate::config::PlayerConfig;
use crate::player::PlayerStats;
use crate::spatial::flat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MotorState {
    Grounded,
    #[default]
    Airborne,
    Hovering,
}

/// Kinematic контроллер игрока
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerMotor {
    /// Скорость ходьбы (m/s)
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_impulse: f32,
    /// Гравитация (m/s², отрицательная)
    pub gravity: f32,
    /// Длина ground probe под ногами
    pub ground_check_distance: f32,
    pub ground_tags: Vec<String>,
    pub state: MotorState,
}

impl PlayerMotor {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            run_speed: config.run_speed,
            jump_impulse: config.jump_impulse,
            gravity: config.gravity,
            ground_check_distance: config.ground_check_distance,
            ground_tags: config.ground_tags.clone(),
            state: MotorState::Airborne,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.state == MotorState::Grounded
    }

    pub fn accepts(&self, ground: &Ground) -> bool {
        self.ground_tags.iter().any(|tag| *tag == ground.tag)
    }
}

/// Входные данные игрока
///
/// Для headless тестов - mock input через этот компонент.
/// `jump` - одноразовый (сбрасывается после обработки), `hover`/`fire` - удерживаемые.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// Направление движения (x/z, нормализуется)
    pub move_direction: Vec3,
    /// Куда смотреть/стрелять (ноль = не менять facing)
    pub aim_direction: Vec3,
    pub run: bool,
    pub jump: bool,
    pub hover: bool,
    pub fire: bool,
}

/// Верх ближайшей подходящей поверхности в пределах probe (None = в воздухе)
pub fn probe_ground<'a, I>(position: Vec3, probe: f32, motor: &PlayerMotor, surfaces: I) -> Option<f32>
where
    I: IntoIterator<Item = (&'a Transform, &'a Ground)>,
{
    surfaces
        .into_iter()
        .filter(|(_, ground)| motor.accepts(ground))
        .filter(|(transform, ground)| {
            let offset = flat(position - transform.translation);
            offset.x.abs() <= ground.half_extents.x && offset.z.abs() <= ground.half_extents.y
        })
        .map(|(transform, _)| transform.translation.y)
        .filter(|top| {
            let gap = position.y - top;
            (-probe..=probe).contains(&gap)
        })
        .max_by(|a, b| a.total_cmp(b))
}

/// Система ground detection (каждый fixed тик)
///
/// Приземление только при падении или покое (vy <= 0), иначе прыжок
/// «прилипал» бы к земле в первый же тик.
pub fn ground_check(
    mut players: Query<(&mut Transform, &mut Velocity, &mut PlayerMotor), With<Player>>,
    surfaces: Query<(&Transform, &Ground), Without<Player>>,
) {
    for (mut transform, mut velocity, mut motor) in players.iter_mut() {
        if motor.state == MotorState::Hovering {
            continue;
        }

        let ground_top = probe_ground(transform.translation, motor.ground_check_distance, &motor, surfaces.iter());
        match ground_top {
            Some(top) if velocity.0.y <= 0.0 => {
                if motor.state != MotorState::Grounded {
                    crate::logger::log("Player: landed");
                }
                motor.state = MotorState::Grounded;
                transform.translation.y = top;
                velocity.0.y = 0.0;
            }
            Some(_) => {}
            None => {
                if motor.state == MotorState::Grounded {
                    motor.state = MotorState::Airborne;
                }
            }
        }
    }
}

/// Система движения от input: горизонталь, прыжок, гравитация, интеграция
pub fn player_locomotion(
    mut players: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut PlayerMotor,
            &mut PlayerInput,
            Option<&crate::player::Hover>,
        ),
        (With<Player>, Without<Dead>),
    >,
    stats: Res<PlayerStats>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut velocity, mut motor, mut input, hover) in players.iter_mut() {
        let speed = match (motor.state, hover) {
            (MotorState::Hovering, Some(hover)) => motor.walk_speed * hover.speed_multiplier,
            _ if input.run => motor.run_speed,
            _ => motor.walk_speed,
        } * stats.movement_speed_multiplier();

        let direction = flat(input.move_direction).normalize_or_zero();
        velocity.0.x = direction.x * speed;
        velocity.0.z = direction.z * speed;

        let aim = flat(input.aim_direction);
        if aim.length_squared() > 1e-6 {
            transform.look_to(aim, Vec3::Y);
        }

        if std::mem::take(&mut input.jump) && motor.state == MotorState::Grounded {
            // Обнуляем vy перед импульсом: без накопления прыжков
            velocity.0.y = 0.0;
            velocity.0.y += motor.jump_impulse;
            motor.state = MotorState::Airborne;
        }

        if motor.state == MotorState::Airborne {
            velocity.0.y += motor.gravity * delta;
        }

        transform.translation += velocity.0 * delta;
    }
}

//! Точки спавна комнаты и волны врагов
//!
//! Каждая точка принадлежит комнате и используется один раз. Волна берёт
//! случайную свободную точку на каждого врага; когда точки кончились,
//! остаток волны отбрасывается с fault'ом.

use bevy::prelude::*;
use rand::Rng;

use super::Room;
use crate::components::EnemyArchetype;
use crate::config::SimulationConfig;
use crate::error::{report_fault, SimError, SimFault};
use crate::logger;
use crate::DeterministicRng;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct SpawnPoint {
    pub room: Entity,
    pub occupied: bool,
}

impl SpawnPoint {
    pub fn new(room: Entity) -> Self {
        Self { room, occupied: false }
    }
}

/// Event: заселить комнату `count` врагами архетипа
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnWave {
    pub room: Entity,
    pub archetype: EnemyArchetype,
    pub count: u32,
}

/// Система: спавн волн по свободным точкам комнаты
pub fn spawn_waves(
    mut commands: Commands,
    mut waves: EventReader<SpawnWave>,
    rooms: Query<&Room>,
    mut points: Query<(Entity, &Transform, &mut SpawnPoint)>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut faults: EventWriter<SimFault>,
) {
    for wave in waves.read() {
        let Ok(room) = rooms.get(wave.room) else {
            continue;
        };

        // Порядок кандидатов фиксирован ради детерминизма
        let mut free: Vec<(Entity, Vec3)> = points
            .iter()
            .filter(|(_, _, point)| point.room == wave.room && !point.occupied)
            .map(|(entity, transform, _)| (entity, transform.translation))
            .collect();
        free.sort_by_key(|(entity, _)| *entity);

        for spawned in 0..wave.count {
            if free.is_empty() {
                let error = SimError::NoSpawnPointAvailable {
                    room: room.name.clone(),
                    archetype: wave.archetype.name(),
                };
                report_fault(&mut faults, Some(wave.room), error);
                break;
            }

            let index = rng.rng.gen_range(0..free.len());
            let (point, anchor) = free.swap_remove(index);
            if let Ok((_, _, mut spawn_point)) = points.get_mut(point) {
                spawn_point.occupied = true;
            }

            let position = anchor + scatter(&mut rng.rng, room.spawn_radius);
            let yaw = rng.rng.gen_range(0.0..std::f32::consts::TAU);
            let enemy = crate::spawn::spawn_archetype(&mut commands, &config, wave.archetype, position);
            commands
                .entity(enemy)
                .insert(Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)));

            logger::log(&format!(
                "Room `{}`: {} #{} at {:?}",
                room.name,
                wave.archetype.name(),
                spawned + 1,
                position
            ));
        }
    }
}

/// Случайный сдвиг по x/z внутри квадрата [-radius, radius]
fn scatter(rng: &mut impl Rng, radius: f32) -> Vec3 {
    if radius <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(rng.gen_range(-radius..=radius), 0.0, rng.gen_range(-radius..=radius))
}

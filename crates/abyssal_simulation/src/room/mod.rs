//! Room domain - roster врагов и награда за зачистку
//!
//! Комната собирает roster из живых врагов в своём радиусе (после задержки,
//! с повторами). Roster фиксирован после заполнения. Первый раз, когда живых
//! в roster не осталось, комната публикует RoomCleared и ставит сундук.

mod spawn_points;

pub use spawn_points::{spawn_waves, SpawnPoint, SpawnWave};

use bevy::prelude::*;

use crate::combat::{Dead, EntityDied};
use crate::components::{Enemy, Health, RewardChest};
use crate::config::RoomConfig;
use crate::error::{report_fault, SimError, SimFault};
use crate::logger;
use crate::SimSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum RoomStatus {
    /// Ждём заполнения roster
    Pending,
    Active,
    Cleared,
    /// Врагов так и не нашли
    Abandoned,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Room {
    pub name: String,
    pub radius: f32,
    pub roster: Vec<Entity>,
    pub status: RoomStatus,
    pub next_attempt_at: f32,
    pub attempts: u32,
    pub retry_interval: f32,
    pub max_attempts: u32,
    /// Смещение сундука от центра (None = награда не настроена)
    pub chest_offset: Option<Vec3>,
    /// Разброс врагов вокруг точки спавна
    pub spawn_radius: f32,
}

impl Room {
    pub fn new(name: impl Into<String>, config: &RoomConfig, now: f32) -> Self {
        Self {
            name: name.into(),
            radius: config.radius,
            roster: Vec::new(),
            status: RoomStatus::Pending,
            next_attempt_at: now + config.initial_delay,
            attempts: 0,
            retry_interval: config.retry_interval,
            max_attempts: config.max_attempts.max(1),
            chest_offset: config.chest_offset.map(Vec3::from_array),
            spawn_radius: config.spawn_radius,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.status == RoomStatus::Cleared
    }
}

/// Event: комната зачищена (ровно один раз на комнату)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RoomCleared {
    pub room: Entity,
    /// Где появился сундук (None = награда не настроена)
    pub chest_position: Option<Vec3>,
}

/// Система: заполнение roster (задержка + повторы)
pub fn populate_rooms(
    mut rooms: Query<(Entity, &Transform, &mut Room)>,
    enemies: Query<(Entity, &Transform, &Health), (With<Enemy>, Without<Dead>)>,
    mut faults: EventWriter<SimFault>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, mut room) in rooms.iter_mut() {
        if room.status != RoomStatus::Pending || now < room.next_attempt_at {
            continue;
        }
        room.attempts += 1;

        let center = transform.translation;
        let radius = room.radius;
        let roster: Vec<Entity> = enemies
            .iter()
            .filter(|(_, enemy_transform, health)| {
                health.is_alive() && enemy_transform.translation.distance(center) <= radius
            })
            .map(|(enemy, _, _)| enemy)
            .collect();

        if !roster.is_empty() {
            logger::log_info(&format!(
                "🚪 Room `{}` populated with {} enemies (attempt {})",
                room.name,
                roster.len(),
                room.attempts
            ));
            room.roster = roster;
            room.status = RoomStatus::Active;
            continue;
        }

        if room.attempts >= room.max_attempts {
            room.status = RoomStatus::Abandoned;
            let error = SimError::RoomPopulationTimedOut {
                room: room.name.clone(),
                attempts: room.attempts,
            };
            report_fault(&mut faults, Some(entity), error);
        } else {
            room.next_attempt_at = now + room.retry_interval;
        }
    }
}

/// Система: проверка зачистки по death notification
///
/// Пересчитываем живых только для комнат, чей roster содержит погибшего.
/// Отсутствующий entity (уже despawned) считается мёртвым.
pub fn track_room_clears(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut rooms: Query<(Entity, &Transform, &mut Room)>,
    health: Query<&Health>,
    mut cleared_events: EventWriter<RoomCleared>,
    mut faults: EventWriter<SimFault>,
) {
    for event in death_events.read() {
        for (entity, transform, mut room) in rooms.iter_mut() {
            if room.status != RoomStatus::Active || !room.roster.contains(&event.entity) {
                continue;
            }

            let alive = room
                .roster
                .iter()
                .filter(|member| health.get(**member).is_ok_and(|h| h.is_alive()))
                .count();
            if alive > 0 {
                logger::log(&format!("Room `{}`: {} enemies left", room.name, alive));
                continue;
            }

            room.status = RoomStatus::Cleared;
            let chest_position = match room.chest_offset {
                Some(offset) => {
                    let position = transform.translation + offset;
                    commands.spawn((RewardChest { room: entity }, Transform::from_translation(position)));
                    Some(position)
                }
                None => {
                    let error = SimError::MissingRewardPrefab {
                        room: room.name.clone(),
                    };
                    report_fault(&mut faults, Some(entity), error);
                    None
                }
            };

            logger::log_info(&format!("🏆 Room `{}` cleared", room.name));
            cleared_events.write(RoomCleared {
                room: entity,
                chest_position,
            });
        }
    }
}

/// Room Plugin
///
/// SimSet::Prepare - spawn_waves → populate_rooms
/// SimSet::Death - track_room_clears (после handle_deaths)
pub struct RoomPlugin;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_sim_sets(app);

        app.add_event::<RoomCleared>()
            .add_event::<SpawnWave>()
            .register_type::<Room>()
            .register_type::<SpawnPoint>();

        app.add_systems(
            FixedUpdate,
            (spawn_waves, populate_rooms).chain().in_set(SimSet::Prepare),
        );
        app.add_systems(
            FixedUpdate,
            track_room_clears
                .in_set(SimSet::Death)
                .after(crate::combat::damage::handle_deaths),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_starts_pending_with_delay() {
        let room = Room::new("Grotto", &RoomConfig::default(), 1.0);
        assert_eq!(room.status, RoomStatus::Pending);
        assert_eq!(room.next_attempt_at, 3.0);
        assert_eq!(room.chest_offset, Some(Vec3::ZERO));
        assert!(!room.is_cleared());
    }

    #[test]
    fn test_room_without_chest() {
        let config = RoomConfig {
            chest_offset: None,
            ..RoomConfig::default()
        };
        assert!(Room::new("Vault", &config, 0.0).chest_offset.is_none());
    }
}

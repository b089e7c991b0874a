//! Crab thief: Patrol → Chase → Flee → Hide (relic drop)
//!
//! Не боевой архетип: не получает урона, не входит в roster комнаты.
//! Раз в scan интервал проверяет, можно ли украсть (steal cooldown + у игрока
//! есть реликвии), догоняет игрока, крадёт случайную реликвию, убегает в
//! случайное укрытие и бросает её там как pickup.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::combat::CooldownGate;
use crate::components::{DroppedRelic, Player, RelicPouch};
use crate::config::ThiefConfig;
use crate::logger;
use crate::spatial::{flat, flat_forward, rotate_toward, within_reach};
use crate::DeterministicRng;

/// Скорость поворота вора (slerp-фактор в секунду)
const THIEF_TURN_RATE: f32 = 5.0;

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum ThiefState {
    Patrol { destination: Vec3 },
    Waiting { remaining: f32 },
    Chase,
    Flee { hideout: Vec3, relic: u32 },
}

#[derive(Component, Debug, Clone)]
#[require(Transform)]
pub struct CrabThief {
    pub config: ThiefConfig,
    /// Центры зон патрулирования (пусто = стоим на месте)
    pub patrol_areas: Vec<Vec3>,
    pub hideouts: Vec<Vec3>,
    pub scan: CooldownGate,
    pub steal: CooldownGate,
    pub retarget: CooldownGate,
}

impl CrabThief {
    /// Все gate'ы стартуют «только что сработавшими»: первый скан через scan_cooldown
    pub fn new(config: ThiefConfig, patrol_areas: Vec<Vec3>, hideouts: Vec<Vec3>, now: f32) -> Self {
        Self {
            scan: CooldownGate::triggered_at(config.scan_cooldown, now),
            steal: CooldownGate::triggered_at(config.steal_cooldown, now),
            retarget: CooldownGate::triggered_at(config.retarget_interval, now),
            config,
            patrol_areas,
            hideouts,
        }
    }

    pub fn patrol_point(&self, current: Vec3, rng: &mut ChaCha8Rng) -> Vec3 {
        if self.patrol_areas.is_empty() {
            return current;
        }
        let area = self.patrol_areas[rng.gen_range(0..self.patrol_areas.len())];
        let radius = self.config.patrol_radius.abs();
        area + Vec3::new(rng.gen_range(-radius..=radius), 0.0, rng.gen_range(-radius..=radius))
    }
}

/// Event: вор украл реликвию
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelicStolen {
    pub thief: Entity,
    pub relic: u32,
}

fn step_toward(transform: &mut Transform, target: Vec3, speed: f32, delta: f32) -> f32 {
    rotate_toward(transform, target, THIEF_TURN_RATE, delta);
    transform.translation += flat_forward(transform) * speed * delta;
    flat(target - transform.translation).length()
}

/// Система: FSM вора
pub fn crab_thief_behaviour(
    mut commands: Commands,
    mut thieves: Query<(Entity, &mut Transform, &mut CrabThief, &mut ThiefState), Without<Player>>,
    mut players: Query<(&Transform, Option<&mut RelicPouch>), With<Player>>,
    mut stolen_events: EventWriter<RelicStolen>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();
    let mut player = players.single_mut().ok();

    for (entity, mut transform, mut thief, mut state) in thieves.iter_mut() {
        let speed = thief.config.move_speed;
        let arrive = thief.config.arrive_distance;

        let next = match state.as_ref().clone() {
            ThiefState::Patrol { mut destination } => {
                if thief.scan.can_trigger(now) {
                    let carries_relics = player
                        .as_ref()
                        .and_then(|(_, pouch)| pouch.as_ref())
                        .is_some_and(|pouch| !pouch.relics.is_empty());
                    if thief.steal.can_trigger(now) && carries_relics {
                        logger::log(&format!("🦀 {:?} spotted loot, chasing player", entity));
                        *state = ThiefState::Chase;
                        continue;
                    }
                    // Неудачный скан: следующий через scan_reset_delay + scan_cooldown
                    let retry_at = now + thief.config.scan_reset_delay;
                    thief.scan.trigger(retry_at);
                }

                if thief.retarget.try_trigger(now) {
                    destination = thief.patrol_point(transform.translation, &mut rng.rng);
                }

                if step_toward(&mut transform, destination, speed, delta) <= arrive {
                    ThiefState::Waiting {
                        remaining: thief.config.wait_time,
                    }
                } else {
                    ThiefState::Patrol { destination }
                }
            }

            ThiefState::Waiting { remaining } => {
                let remaining = remaining - delta;
                if remaining > 0.0 {
                    ThiefState::Waiting { remaining }
                } else {
                    ThiefState::Patrol {
                        destination: thief.patrol_point(transform.translation, &mut rng.rng),
                    }
                }
            }

            ThiefState::Chase => {
                let Some((player_transform, pouch)) = player.as_mut() else {
                    thief.scan.trigger(now);
                    *state = ThiefState::Patrol {
                        destination: thief.patrol_point(transform.translation, &mut rng.rng),
                    };
                    continue;
                };

                let distance = step_toward(&mut transform, player_transform.translation, speed, delta);
                if distance > thief.config.steal_range {
                    continue;
                }

                let stolen = match pouch.as_mut() {
                    Some(pouch) if thief.steal.can_trigger(now) && !pouch.relics.is_empty() => {
                        let index = rng.rng.gen_range(0..pouch.relics.len());
                        Some(pouch.relics.remove(index))
                    }
                    _ => None,
                };

                match stolen {
                    Some(relic) => {
                        thief.steal.trigger(now);
                        stolen_events.write(RelicStolen { thief: entity, relic });
                        logger::log_info(&format!("🦀 {:?} stole relic {}", entity, relic));

                        if thief.hideouts.is_empty() {
                            // Укрытий нет: бросаем реликвию на месте
                            drop_relic(&mut commands, transform.translation, relic);
                            thief.scan.trigger(now);
                            ThiefState::Patrol {
                                destination: thief.patrol_point(transform.translation, &mut rng.rng),
                            }
                        } else {
                            let hideout = thief.hideouts[rng.rng.gen_range(0..thief.hideouts.len())];
                            ThiefState::Flee { hideout, relic }
                        }
                    }
                    None => {
                        thief.scan.trigger(now);
                        ThiefState::Patrol {
                            destination: thief.patrol_point(transform.translation, &mut rng.rng),
                        }
                    }
                }
            }

            ThiefState::Flee { hideout, relic } => {
                if step_toward(&mut transform, hideout, speed, delta) > arrive {
                    continue;
                }
                drop_relic(&mut commands, hideout, relic);
                thief.scan.trigger(now);
                ThiefState::Patrol {
                    destination: thief.patrol_point(transform.translation, &mut rng.rng),
                }
            }
        };

        if *state != next {
            *state = next;
        }
    }
}

fn drop_relic(commands: &mut Commands, position: Vec3, relic: u32) {
    commands.spawn((DroppedRelic { relic }, Transform::from_translation(position)));
    logger::log(&format!("🦀 relic {} hidden at {:?}", relic, position));
}

/// Система: подбор брошенных реликвий игроком
pub fn pick_up_relics(
    mut commands: Commands,
    relics: Query<(Entity, &Transform, &DroppedRelic)>,
    mut players: Query<(&Transform, &mut RelicPouch), With<Player>>,
) {
    const PICKUP_RADIUS: f32 = 1.0;

    for (player_transform, mut pouch) in players.iter_mut() {
        for (entity, transform, dropped) in relics.iter() {
            if within_reach(transform.translation, player_transform.translation, PICKUP_RADIUS) {
                pouch.relics.push(dropped.relic);
                commands.entity(entity).despawn();
            }
        }
    }
}

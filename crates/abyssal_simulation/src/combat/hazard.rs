//! Ground hazards (взрывы босса): telegraph → active → fading → expired
//!
//! Урон игроку - максимум один раз за hazard и только в активном окне.

use bevy::prelude::*;

use crate::combat::DamageRequest;
use crate::components::{CollisionRadius, Health, Player};
use crate::spatial::flat;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum HazardStage {
    /// Видимый warm-up, урона нет
    Telegraph { remaining: f32 },
    Active { remaining: f32 },
    /// Визуальный хвост после окна урона
    Fading { remaining: f32 },
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSpec {
    pub damage: u32,
    pub radius: f32,
    pub telegraph: f32,
    pub active: f32,
    pub lifetime: f32,
}

impl HazardSpec {
    pub fn from_config(config: &crate::config::ExplosionConfig) -> Self {
        Self {
            damage: config.damage,
            radius: config.radius,
            telegraph: config.telegraph,
            active: config.active,
            lifetime: config.lifetime,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GroundHazard {
    pub stage: HazardStage,
    pub damage: u32,
    pub radius: f32,
    pub source: Option<Entity>,
    pub hit_applied: bool,
    fade: f32,
    active: f32,
}

impl GroundHazard {
    pub fn new(spec: HazardSpec, source: Option<Entity>) -> Self {
        Self {
            stage: HazardStage::Telegraph {
                remaining: spec.telegraph,
            },
            damage: spec.damage,
            radius: spec.radius,
            source,
            hit_applied: false,
            fade: (spec.lifetime - spec.telegraph - spec.active).max(0.0),
            active: spec.active,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.stage, HazardStage::Expired)
    }

    /// Продвигает стадии; true если за этот тик hazard был в активном окне
    pub fn advance(&mut self, delta: f32) -> bool {
        let mut budget = delta;
        let mut touched_active = false;

        loop {
            match self.stage {
                HazardStage::Telegraph { remaining } => {
                    if remaining > budget {
                        self.stage = HazardStage::Telegraph { remaining: remaining - budget };
                        return touched_active;
                    }
                    budget -= remaining;
                    self.stage = HazardStage::Active { remaining: self.active };
                }
                HazardStage::Active { remaining } => {
                    touched_active = true;
                    if remaining > budget {
                        self.stage = HazardStage::Active { remaining: remaining - budget };
                        return touched_active;
                    }
                    budget -= remaining;
                    self.stage = HazardStage::Fading { remaining: self.fade };
                }
                HazardStage::Fading { remaining } => {
                    if remaining > budget {
                        self.stage = HazardStage::Fading { remaining: remaining - budget };
                        return touched_active;
                    }
                    self.stage = HazardStage::Expired;
                }
                HazardStage::Expired => return touched_active,
            }
        }
    }
}

/// Система: стадии hazard'ов + урон игроку в радиусе
pub fn tick_ground_hazards(
    mut commands: Commands,
    mut hazards: Query<(Entity, &mut GroundHazard, &Transform)>,
    players: Query<(Entity, &Transform, &CollisionRadius, &Health), With<Player>>,
    mut damage_events: EventWriter<DamageRequest>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut hazard, transform) in hazards.iter_mut() {
        let was_active = hazard.advance(delta);

        if was_active && !hazard.hit_applied {
            for (player, player_transform, body, health) in players.iter() {
                if health.is_dead() {
                    continue;
                }
                let offset = flat(player_transform.translation - transform.translation);
                if offset.length() <= hazard.radius + body.0 {
                    let mut request = DamageRequest::new(player, hazard.damage);
                    if let Some(source) = hazard.source {
                        request = request.from_source(source);
                    }
                    damage_events.write(request);
                    hazard.hit_applied = true;
                }
            }
        }

        if hazard.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}

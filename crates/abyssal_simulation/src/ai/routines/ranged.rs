//! Ranged routines: jellyfish laser volley, seahorse brood launch

use bevy::prelude::*;
use rand::Rng;
use std::any::Any;

use super::{AttackCommand, AttackContext, AttackProgress, AttackRoutine};
use crate::combat::{ProjectileFaction, ProjectileSpec};
use crate::config::{BroodConfig, JellyfishConfig};

/// Один веер лазеров в сторону игрока
#[derive(Debug, Clone)]
pub struct LaserVolley {
    pub laser: ProjectileSpec,
    pub per_shot: u32,
    pub spread_angle: f32,
    pub cooldown: f32,
    pending: bool,
}

impl LaserVolley {
    pub fn from_config(config: &JellyfishConfig) -> Self {
        Self {
            laser: ProjectileSpec::hostile_laser(&config.laser),
            per_shot: config.laser.per_shot,
            spread_angle: config.laser.spread_angle,
            cooldown: config.base.attack_cooldown,
            pending: false,
        }
    }
}

impl AttackRoutine for LaserVolley {
    fn name(&self) -> &'static str {
        "LaserVolley"
    }

    fn begin(&mut self) {
        self.pending = true;
    }

    fn is_running(&self) -> bool {
        self.pending
    }

    fn tick(&mut self, ctx: &mut AttackContext, _delta: f32) -> AttackProgress {
        if self.pending {
            self.pending = false;
            let origin = ctx.position;
            let base_direction = ctx.aim_direction();
            ctx.emit(AttackCommand::FireSpread {
                origin,
                base_direction,
                count: self.per_shot,
                spread_angle: self.spread_angle,
                spec: self.laser,
            });
        }
        AttackProgress::Finished
    }

    fn recovery(&self) -> f32 {
        self.cooldown
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Детёныши морского конька: count снарядов с паузой spacing
///
/// Направление каждого = на игрока + случайный горизонтальный jitter.
#[derive(Debug, Clone)]
pub struct BroodLaunch {
    pub baby: ProjectileSpec,
    pub count: u32,
    pub spacing: f32,
    pub jitter: f32,
    pub cooldown: f32,
    /// (до следующего запуска, индекс следующего детёныша)
    next_launch: Option<(f32, u32)>,
}

impl BroodLaunch {
    pub fn from_config(config: &BroodConfig, cooldown: f32) -> Self {
        Self {
            baby: ProjectileSpec {
                damage: config.damage,
                speed: config.speed,
                lifetime: config.lifetime,
                radius: config.radius,
                faction: ProjectileFaction::Hostile,
                knockback: None,
            },
            count: config.count,
            spacing: config.spacing,
            jitter: config.jitter.abs(),
            cooldown,
            next_launch: None,
        }
    }

    fn launch(&self, ctx: &mut AttackContext) {
        let jitter = self.jitter;
        let offset = Vec3::new(ctx.rng.gen_range(-jitter..=jitter), 0.0, ctx.rng.gen_range(-jitter..=jitter));
        let direction = (ctx.aim_direction() + offset).normalize_or_zero();
        let base_direction = if direction == Vec3::ZERO { ctx.forward } else { direction };
        let origin = ctx.position;
        ctx.emit(AttackCommand::FireSpread {
            origin,
            base_direction,
            count: 1,
            spread_angle: 0.0,
            spec: self.baby,
        });
    }
}

impl AttackRoutine for BroodLaunch {
    fn name(&self) -> &'static str {
        "BroodLaunch"
    }

    fn begin(&mut self) {
        self.next_launch = (self.count > 0).then_some((0.0, 0));
    }

    fn is_running(&self) -> bool {
        self.next_launch.is_some()
    }

    fn tick(&mut self, ctx: &mut AttackContext, delta: f32) -> AttackProgress {
        let mut budget = delta;

        while let Some((remaining, index)) = self.next_launch {
            if remaining > budget {
                self.next_launch = Some((remaining - budget, index));
                return AttackProgress::Running;
            }
            budget -= remaining;

            self.launch(ctx);
            self.next_launch = (index + 1 < self.count).then_some((self.spacing, index + 1));
        }

        AttackProgress::Finished
    }

    fn recovery(&self) -> f32 {
        self.cooldown
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

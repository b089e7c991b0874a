//! Cthulhu boss: reaction delay → laser bursts → ground explosions → recovery
//!
//! Последовательность строго линейная и не re-entrant. Между burst'ами и
//! взрывами босс продолжает поворачиваться к игроку (это делает movement система,
//! routine только отсчитывает время).

use bevy::prelude::*;
use rand::Rng;
use std::any::Any;

use super::{AttackCommand, AttackContext, AttackProgress, AttackRoutine};
use crate::combat::{HazardSpec, ProjectileSpec};
use crate::config::{BossConfig, PhaseModifiers};

/// Что произойдёт, когда истечёт ожидание
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrageStep {
    Burst(u32),
    Explosion(u32),
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarrageStage {
    Idle,
    Waiting { remaining: f32, next: BarrageStep },
}

#[derive(Debug, Clone)]
pub struct BossBarrage {
    pub laser: ProjectileSpec,
    pub lasers_per_shot: u32,
    pub spread_angle: f32,
    pub burst_count: u32,
    pub time_between_bursts: f32,
    pub laser_cooldown: f32,
    pub explosion: HazardSpec,
    pub explosions_per_attack: u32,
    pub explosion_spacing: f32,
    /// Взрывы ложатся в [-offset, offset] по x/z вокруг игрока
    pub explosion_offset: f32,
    pub explosion_cooldown: f32,
    pub reaction_delay: f32,
    pub inter_attack_delay: f32,
    pub stage: BarrageStage,
}

impl BossBarrage {
    pub fn from_config(config: &BossConfig) -> Self {
        Self {
            laser: ProjectileSpec::hostile_laser(&config.laser),
            lasers_per_shot: config.laser.per_shot,
            spread_angle: config.laser.spread_angle,
            burst_count: config.burst_count,
            time_between_bursts: config.time_between_bursts,
            laser_cooldown: config.laser_cooldown,
            explosion: HazardSpec::from_config(&config.explosion),
            explosions_per_attack: config.explosion.count,
            explosion_spacing: config.explosion.spacing,
            explosion_offset: config.explosion.offset_range.abs(),
            explosion_cooldown: config.explosion_cooldown,
            reaction_delay: config.reaction_delay,
            inter_attack_delay: config.inter_attack_delay,
            stage: BarrageStage::Idle,
        }
    }

    fn after_bursts(&self) -> BarrageStage {
        if self.explosions_per_attack > 0 {
            BarrageStage::Waiting {
                remaining: self.inter_attack_delay,
                next: BarrageStep::Explosion(0),
            }
        } else {
            BarrageStage::Waiting {
                remaining: 0.0,
                next: BarrageStep::Finish,
            }
        }
    }

    fn fire_burst(&self, ctx: &mut AttackContext) {
        let origin = ctx.position;
        let base_direction = ctx.aim_direction();
        ctx.emit(AttackCommand::FireSpread {
            origin,
            base_direction,
            count: self.lasers_per_shot,
            spread_angle: self.spread_angle,
            spec: self.laser,
        });
    }

    fn spawn_explosion(&self, ctx: &mut AttackContext) {
        let Some((_, player_position)) = ctx.target else {
            return;
        };
        let range = self.explosion_offset;
        let offset_x = ctx.rng.gen_range(-range..=range);
        let offset_z = ctx.rng.gen_range(-range..=range);
        ctx.emit(AttackCommand::SpawnHazard {
            position: player_position + Vec3::new(offset_x, 0.0, offset_z),
            spec: self.explosion,
        });
    }
}

impl AttackRoutine for BossBarrage {
    fn name(&self) -> &'static str {
        "BossBarrage"
    }

    fn begin(&mut self) {
        let next = if self.burst_count > 0 {
            BarrageStep::Burst(0)
        } else if self.explosions_per_attack > 0 {
            BarrageStep::Explosion(0)
        } else {
            BarrageStep::Finish
        };
        self.stage = BarrageStage::Waiting {
            remaining: self.reaction_delay,
            next,
        };
    }

    fn is_running(&self) -> bool {
        !matches!(self.stage, BarrageStage::Idle)
    }

    fn tick(&mut self, ctx: &mut AttackContext, delta: f32) -> AttackProgress {
        let mut budget = delta;

        loop {
            let BarrageStage::Waiting { remaining, next } = self.stage else {
                return AttackProgress::Finished;
            };

            if remaining > budget {
                self.stage = BarrageStage::Waiting {
                    remaining: remaining - budget,
                    next,
                };
                return AttackProgress::Running;
            }
            budget -= remaining;

            self.stage = match next {
                BarrageStep::Burst(index) => {
                    self.fire_burst(ctx);
                    if index + 1 < self.burst_count {
                        BarrageStage::Waiting {
                            remaining: self.time_between_bursts,
                            next: BarrageStep::Burst(index + 1),
                        }
                    } else {
                        self.after_bursts()
                    }
                }
                BarrageStep::Explosion(index) => {
                    self.spawn_explosion(ctx);
                    let next = if index + 1 < self.explosions_per_attack {
                        BarrageStep::Explosion(index + 1)
                    } else {
                        BarrageStep::Finish
                    };
                    BarrageStage::Waiting {
                        remaining: self.explosion_spacing,
                        next,
                    }
                }
                BarrageStep::Finish => {
                    self.stage = BarrageStage::Idle;
                    return AttackProgress::Finished;
                }
            };
        }
    }

    /// Среднее laser и explosion cooldown'ов (laser уже с учётом фазы)
    fn recovery(&self) -> f32 {
        (self.laser_cooldown + self.explosion_cooldown) / 2.0
    }

    fn escalate(&mut self, modifiers: &PhaseModifiers) {
        self.laser_cooldown *= modifiers.cooldown_scale;
        self.explosions_per_attack += modifiers.explosions_add;
        self.lasers_per_shot += modifiers.lasers_add;
        self.burst_count += modifiers.bursts_add;
        self.time_between_bursts *= modifiers.burst_interval_scale;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

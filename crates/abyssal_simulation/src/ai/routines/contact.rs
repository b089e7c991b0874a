//! Contact routines: slam/roll strike, mini slime self-destruct

use std::any::Any;

use super::{AttackCommand, AttackContext, AttackProgress, AttackRoutine};

/// Мгновенный контактный удар (JellySlime slam, Roller)
#[derive(Debug, Clone)]
pub struct ContactStrike {
    pub damage: u32,
    pub cooldown: f32,
    pending: bool,
}

impl ContactStrike {
    pub fn new(damage: u32, cooldown: f32) -> Self {
        Self {
            damage,
            cooldown,
            pending: false,
        }
    }
}

impl AttackRoutine for ContactStrike {
    fn name(&self) -> &'static str {
        "ContactStrike"
    }

    fn begin(&mut self) {
        self.pending = true;
    }

    fn is_running(&self) -> bool {
        self.pending
    }

    fn tick(&mut self, ctx: &mut AttackContext, _delta: f32) -> AttackProgress {
        if std::mem::take(&mut self.pending) {
            if let Some((target, _)) = ctx.target {
                ctx.emit(AttackCommand::Strike {
                    target,
                    damage: self.damage,
                });
            }
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

/// Mini slime: взрыв рядом с игроком, сам слайм погибает
#[derive(Debug, Clone)]
pub struct Detonate {
    pub damage: u32,
    pending: bool,
}

impl Detonate {
    pub fn new(damage: u32) -> Self {
        Self { damage, pending: false }
    }
}

impl AttackRoutine for Detonate {
    fn name(&self) -> &'static str {
        "Detonate"
    }

    fn begin(&mut self) {
        self.pending = true;
    }

    fn is_running(&self) -> bool {
        self.pending
    }

    fn tick(&mut self, ctx: &mut AttackContext, _delta: f32) -> AttackProgress {
        if std::mem::take(&mut self.pending) {
            if let Some((target, _)) = ctx.target {
                ctx.emit(AttackCommand::Detonate {
                    target,
                    damage: self.damage,
                });
            }
        }
        AttackProgress::Finished
    }

    fn recovery(&self) -> f32 {
        0.0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

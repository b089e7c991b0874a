//! Attack routines (archetype-specific attack sequences)
//!
//! FSM общий для всех врагов, атака подключается как strategy:
//! `AttackPattern(Box<dyn AttackRoutine>)`. Routine не трогает мир напрямую -
//! она пишет `AttackCommand`s в контекст, система их применяет.
//!
//! Многошаговые атаки = staged timers (ожидание = остаток секунд на стадии),
//! остаток dt переносится на следующую стадию внутри одного тика.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::any::Any;

use crate::combat::{HazardSpec, ProjectileSpec};
use crate::config::PhaseModifiers;

pub mod boss;
pub mod contact;
pub mod ranged;

pub use boss::{BarrageStage, BarrageStep, BossBarrage};
pub use contact::{ContactStrike, Detonate};
pub use ranged::{BroodLaunch, LaserVolley};

/// Результат тика routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackProgress {
    Running,
    Finished,
}

/// Действия, которые routine просит выполнить
#[derive(Debug, Clone, PartialEq)]
pub enum AttackCommand {
    /// Веер снарядов вокруг base_direction
    FireSpread {
        origin: Vec3,
        base_direction: Vec3,
        count: u32,
        spread_angle: f32,
        spec: ProjectileSpec,
    },
    SpawnHazard { position: Vec3, spec: HazardSpec },
    /// Прямой урон цели (контакт)
    Strike { target: Entity, damage: u32 },
    /// Урон цели + самоуничтожение атакующего
    Detonate { target: Entity, damage: u32 },
}

/// Снимок мира для одного тика routine
pub struct AttackContext<'a> {
    pub attacker: Entity,
    pub position: Vec3,
    pub forward: Vec3,
    /// Игрок и его позиция (None = цель потеряна)
    pub target: Option<(Entity, Vec3)>,
    pub rng: &'a mut ChaCha8Rng,
    pub commands: Vec<AttackCommand>,
}

impl<'a> AttackContext<'a> {
    pub fn new(
        attacker: Entity,
        position: Vec3,
        forward: Vec3,
        target: Option<(Entity, Vec3)>,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            attacker,
            position,
            forward,
            target,
            rng,
            commands: Vec::new(),
        }
    }

    /// Горизонтальное направление на цель (без цели - текущий facing)
    pub fn aim_direction(&self) -> Vec3 {
        self.target
            .map(|(_, position)| crate::spatial::flat(position - self.position).normalize_or_zero())
            .filter(|direction| *direction != Vec3::ZERO)
            .unwrap_or(self.forward)
    }

    pub fn emit(&mut self, command: AttackCommand) {
        self.commands.push(command);
    }
}

/// Атака конкретного архетипа
///
/// Инвариант: между `begin()` и `Finished` routine не перезапускается
/// (FSM стартует атаку только если `!is_running()`).
pub trait AttackRoutine: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Сбросить стадии и начать последовательность
    fn begin(&mut self);

    fn is_running(&self) -> bool;

    fn tick(&mut self, ctx: &mut AttackContext, delta: f32) -> AttackProgress;

    /// Длительность Cooldown состояния после атаки
    fn recovery(&self) -> f32;

    /// Эскалация фазы босса (обычные враги игнорируют)
    fn escalate(&mut self, _modifiers: &PhaseModifiers) {}

    fn as_any(&self) -> &dyn Any;
}

/// Подключённая атака врага
#[derive(Component)]
pub struct AttackPattern(pub Box<dyn AttackRoutine>);

impl AttackPattern {
    pub fn new(routine: impl AttackRoutine) -> Self {
        Self(Box::new(routine))
    }

    /// Доступ к конкретному типу routine (тесты, диагностика)
    pub fn downcast_ref<T: AttackRoutine>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl std::fmt::Debug for AttackPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttackPattern")
            .field("routine", &self.0.name())
            .field("running", &self.0.is_running())
            .finish()
    }
}

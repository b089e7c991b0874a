//! Damage contract, heal и обработка смерти
//!
//! Любой источник урона (снаряд, контакт, hazard, self-destruct) пишет
//! `DamageRequest`. Внутри одного тика: мутация Health → пересчёт фазы →
//! события наблюдателям, без батчинга между тиками.

use bevy::prelude::*;

use crate::combat::{BossPhase, Knockback, PhaseChanged};
use crate::components::Health;
use crate::components::DamageOutcome;
use crate::logger;

/// Event: нанести урон (TakeDamage(amount[, direction]))
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: u32,
    /// Направление удара (для knockback), в плоскости XZ
    pub direction: Option<Vec3>,
    /// Переопределение силы knockback (None = Knockback::strength цели)
    pub knockback: Option<f32>,
    pub source: Option<Entity>,
}

impl DamageRequest {
    pub fn new(target: Entity, amount: u32) -> Self {
        Self {
            target,
            amount,
            direction: None,
            knockback: None,
            source: None,
        }
    }

    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_knockback(mut self, strength: f32) -> Self {
        self.knockback = Some(strength);
        self
    }

    pub fn from_source(mut self, source: Entity) -> Self {
        self.source = Some(source);
        self
    }
}

/// Event: вылечить
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealRequest {
    pub target: Entity,
    pub amount: u32,
}

/// Event: урон реально прошёл
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
}

/// Event: Health изменился (UI, phase-check)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

/// Event: entity умер (ровно один раз за жизнь)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
#[derive(Component, Debug)]
pub struct Dead;

/// Задержка деспавна после смерти (нет компонента - труп остаётся)
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnDelay(pub f32);

/// Деспавн entity после указанного времени
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Система: применение DamageRequest
pub fn apply_damage(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(&mut Health, Option<&mut Knockback>, Option<&mut BossPhase>)>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut changed_events: EventWriter<HealthChanged>,
    mut phase_events: EventWriter<PhaseChanged>,
    mut died_events: EventWriter<EntityDied>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        let Ok((mut health, knockback, phase)) = targets.get_mut(request.target) else {
            continue;
        };

        let dealt = match health.take_damage(request.amount, now) {
            DamageOutcome::Ignored => continue,
            DamageOutcome::Damaged { dealt } | DamageOutcome::Killed { dealt } => dealt,
        };

        dealt_events.write(DamageDealt {
            attacker: request.source,
            target: request.target,
            damage: dealt,
        });
        changed_events.write(HealthChanged {
            entity: request.target,
            current: health.current,
            max: health.max,
        });

        if let Some(mut phase) = phase {
            if let Some(change) = phase.update(request.target, &health) {
                logger::log_info(&format!(
                    "🔥 {:?} phase {} → {} ({}/{} HP)",
                    request.target, change.from, change.to, health.current, health.max
                ));
                phase_events.write(change);
            }
        }

        if health.is_dead() {
            logger::log_info(&format!("💀 {:?} died (killer {:?})", request.target, request.source));
            died_events.write(EntityDied {
                entity: request.target,
                killer: request.source,
            });
            continue;
        }

        if let (Some(mut knockback), Some(direction)) = (knockback, request.direction) {
            let strength = request.knockback.unwrap_or(knockback.strength);
            knockback.apply_impulse(crate::spatial::flat(direction), strength);
        }
    }
}

/// Система: применение HealRequest
pub fn apply_heal(
    mut requests: EventReader<HealRequest>,
    mut targets: Query<(&mut Health, Option<&mut BossPhase>)>,
    mut changed_events: EventWriter<HealthChanged>,
    mut phase_events: EventWriter<PhaseChanged>,
) {
    for request in requests.read() {
        let Ok((mut health, phase)) = targets.get_mut(request.target) else {
            continue;
        };

        if health.heal(request.amount) == 0 {
            continue;
        }

        changed_events.write(HealthChanged {
            entity: request.target,
            current: health.current,
            max: health.max,
        });

        if let Some(mut phase) = phase {
            if let Some(change) = phase.update(request.target, &health) {
                phase_events.write(change);
            }
        }
    }
}

/// Система: маркер Dead + AIState::Dead + отложенный деспавн
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut actors: Query<(Option<&mut crate::ai::AIState>, Option<&DespawnDelay>)>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for event in death_events.read() {
        let Ok((state, delay)) = actors.get_mut(event.entity) else {
            continue;
        };

        if let Some(mut state) = state {
            *state = crate::ai::AIState::Dead;
        }

        let Ok(mut entity_commands) = commands.get_entity(event.entity) else {
            continue;
        };
        entity_commands.insert(Dead);
        if let Some(DespawnDelay(delay)) = delay {
            entity_commands.insert(DespawnAfter {
                despawn_time: now + delay,
            });
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter
///
/// Вместе с entity исчезает её AttackPattern - незавершённая атака отменяется.
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if now >= despawn_after.despawn_time {
            commands.entity(entity).despawn();
            logger::log(&format!("Despawned {:?}", entity));
        }
    }
}

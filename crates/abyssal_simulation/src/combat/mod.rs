//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, Knockback, BossPhase, cooldown gates
//! - Combat rules: damage contract, invincibility, death, split-on-death
//! - Снаряды и ground hazards (движение, lifetime, столкновения)
//! - Events: DamageRequest → DamageDealt/HealthChanged/PhaseChanged/EntityDied

use bevy::prelude::*;

use crate::SimSet;

pub mod cooldown;
pub mod damage;
pub mod hazard;
pub mod knockback;
pub mod phase;
pub mod projectile;
pub mod split;


pub use cooldown::CooldownGate;
pub use damage::{
    DamageDealt, DamageRequest, Dead, DespawnAfter, DespawnDelay, EntityDied, HealRequest, HealthChanged,
};
pub use hazard::{GroundHazard, HazardSpec, HazardStage};
pub use knockback::{Knockback, KnockbackPolicy};
pub use phase::{BossPhase, PhaseChanged};
pub use projectile::{
    spread_angles, spread_directions, Projectile, ProjectileFaction, ProjectileHit, ProjectileSpec,
};
pub use split::{SlimeSplit, SplitOnDeath};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. SimSet::Combat - снаряды, hazards, затем damage/heal (мутация + phase + события)
/// 2. SimSet::Death - Dead marker, split, деспавн
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_sim_sets(app);

        app.add_event::<DamageRequest>()
            .add_event::<HealRequest>()
            .add_event::<DamageDealt>()
            .add_event::<HealthChanged>()
            .add_event::<EntityDied>()
            .add_event::<PhaseChanged>()
            .add_event::<ProjectileHit>()
            .add_event::<SlimeSplit>();

        app.add_systems(
            FixedUpdate,
            (
                projectile::move_projectiles,
                projectile::resolve_projectile_hits,
                hazard::tick_ground_hazards,
                damage::apply_damage,
                damage::apply_heal,
            )
                .chain()
                .in_set(SimSet::Combat),
        );

        app.add_systems(
            FixedUpdate,
            (
                damage::handle_deaths,
                split::split_on_death,
                damage::despawn_after_timeout,
            )
                .chain()
                .in_set(SimSet::Death),
        );
    }
}

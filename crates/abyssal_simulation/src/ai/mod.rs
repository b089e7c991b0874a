//! AI decision-making module
//!
//! Общий pursuit FSM (Idle → Pursuing → Attacking → Cooldown) для всех
//! боевых архетипов + подключаемые attack routines. Краб-вор живёт на
//! собственном FSM (thief.rs).

use bevy::prelude::*;

use crate::SimSet;

pub mod components;
pub mod routines;
pub mod systems;
pub mod thief;

// Re-export основных типов
pub use components::{AIConfig, AIState, AttackCooldown, PlayerTarget, PursuitStyle};
pub use routines::{
    AttackCommand, AttackContext, AttackPattern, AttackProgress, AttackRoutine, BossBarrage, BroodLaunch,
    ContactStrike, Detonate, LaserVolley,
};
pub use systems::PhaseEscalation;
pub use thief::{CrabThief, RelicStolen, ThiefState};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. SimSet::Prepare - acquire_player_target
/// 2. SimSet::Ai - FSM transitions → movement → attack routines, вор
/// 3. SimSet::Reaction - эскалация фазы босса (после damage в SimSet::Combat)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_sim_sets(app);

        app.register_type::<AIState>()
            .register_type::<AIConfig>()
            .register_type::<PlayerTarget>()
            .add_event::<RelicStolen>();

        app.add_systems(FixedUpdate, systems::acquire_player_target.in_set(SimSet::Prepare));

        app.add_systems(
            FixedUpdate,
            (
                systems::ai_fsm_transitions,
                systems::ai_pursuit_movement,
                systems::run_attack_routines,
                thief::crab_thief_behaviour,
                thief::pick_up_relics,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimSet::Ai),
        );

        app.add_systems(FixedUpdate, systems::escalate_on_phase_change.in_set(SimSet::Reaction));
    }
}

//! FSM AI systems (player acquisition, state transitions).

use bevy::prelude::*;

use crate::ai::{AIConfig, AIState, AttackCooldown, AttackPattern, PlayerTarget};
use crate::combat::Dead;
use crate::components::{Enemy, Health, Player};
use crate::error::{report_fault, SimError, SimFault};
use crate::logger;
use crate::spatial::{flat_distance, nearest_within};

/// Система: поиск/обновление ссылки на игрока
///
/// Кэшированный игрок проверяется каждый тик (жив? существует?).
/// Если ссылки нет - поиск не чаще `search` интервала; о пропаже игрока
/// сообщаем один раз (SimFault), враг остаётся Idle.
pub fn acquire_player_target(
    mut seekers: Query<(Entity, &Transform, &mut PlayerTarget), Without<Dead>>,
    players: Query<(Entity, &Transform, &Health), With<Player>>,
    mut faults: EventWriter<SimFault>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, mut target) in seekers.iter_mut() {
        if let Some(player) = target.player {
            match players.get(player) {
                Ok((_, player_transform, health)) if health.is_alive() => {
                    target.last_known_position = Some(player_transform.translation);
                    continue;
                }
                _ => {
                    logger::log(&format!("AI: {:?} lost player {:?}", entity, player));
                    target.player = None;
                    target.last_known_position = None;
                }
            }
        }

        if !target.search.try_trigger(now) {
            continue;
        }

        let found = nearest_within(
            transform.translation,
            f32::INFINITY,
            players
                .iter()
                .filter(|(_, _, health)| health.is_alive())
                .map(|(player, player_transform, _)| (player, player_transform.translation)),
        );

        match found {
            Some((player, _)) => {
                target.player = Some(player);
                target.last_known_position = players.get(player).ok().map(|(_, t, _)| t.translation);
                target.reported_missing = false;
            }
            None if !target.reported_missing => {
                target.reported_missing = true;
                report_fault(&mut faults, Some(entity), SimError::PlayerNotFound);
            }
            None => {}
        }
    }
}

/// Система: AI FSM transitions
///
/// Idle → Pursuing (игрок в detection radius)
/// Pursuing → Attacking (в attack radius, gate открыт, атака не идёт)
/// Cooldown → Pursuing (по истечении recovery)
/// Attacking → Cooldown делает `run_attack_routines` по завершении routine.
pub fn ai_fsm_transitions(
    mut ai_query: Query<
        (
            Entity,
            &Transform,
            &mut AIState,
            &AIConfig,
            &PlayerTarget,
            &mut AttackCooldown,
            &mut AttackPattern,
            &Enemy,
        ),
        Without<Dead>,
    >,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (entity, transform, mut state, config, target, mut gate, mut pattern, enemy) in ai_query.iter_mut() {
        let distance = target
            .last_known_position
            .filter(|_| target.player.is_some())
            .map(|position| flat_distance(transform.translation, position));

        let new_state = match (state.as_ref(), distance) {
            (AIState::Dead, _) | (AIState::Attacking, _) => continue,

            (AIState::Idle, Some(distance)) if distance <= config.detection_radius => AIState::Pursuing,
            (AIState::Idle, _) => continue,

            (AIState::Pursuing, None) => AIState::Idle,
            (AIState::Pursuing, Some(distance)) => {
                if distance > config.attack_radius || !gate.0.can_trigger(now) || pattern.0.is_running() {
                    continue;
                }
                gate.0.trigger(now);
                pattern.0.begin();
                AIState::Attacking
            }

            (AIState::Cooldown { remaining }, distance) => {
                let remaining = remaining - delta;
                if remaining > 0.0 {
                    AIState::Cooldown { remaining }
                } else if distance.is_some() {
                    AIState::Pursuing
                } else {
                    AIState::Idle
                }
            }
        };

        if !matches!(new_state, AIState::Cooldown { .. }) {
            logger::log(&format!(
                "AI: {} {:?} {:?} → {:?}",
                enemy.archetype.name(),
                entity,
                state.as_ref(),
                new_state
            ));
        }
        *state = new_state;
    }
}

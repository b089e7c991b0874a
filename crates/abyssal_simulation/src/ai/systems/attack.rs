//! AI attack execution (routine ticking + command application).

use bevy::prelude::*;

use crate::ai::{AIState, AttackCommand, AttackContext, AttackPattern, AttackProgress, PlayerTarget};
use crate::combat::{spread_directions, DamageRequest, Dead, GroundHazard, Projectile};
use crate::spatial::{flat, flat_forward};
use crate::DeterministicRng;

/// Система: тик активных атак
///
/// Routine пишет команды, система превращает их в entities/события.
/// Finished → Cooldown на `recovery()` секунд.
pub fn run_attack_routines(
    mut commands: Commands,
    mut attackers: Query<(Entity, &Transform, &mut AIState, &mut AttackPattern, &PlayerTarget), Without<Dead>>,
    mut damage_events: EventWriter<DamageRequest>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, transform, mut state, mut pattern, target) in attackers.iter_mut() {
        if !matches!(*state, AIState::Attacking) {
            continue;
        }

        let player = target.player.zip(target.last_known_position);
        let mut ctx = AttackContext::new(
            entity,
            transform.translation,
            flat_forward(transform),
            player,
            &mut rng.rng,
        );
        let progress = pattern.0.tick(&mut ctx, delta);

        for command in ctx.commands {
            apply_attack_command(&mut commands, &mut damage_events, entity, transform.translation, player, command);
        }

        if progress == AttackProgress::Finished {
            let recovery = pattern.0.recovery();
            crate::logger::log(&format!(
                "AI: {:?} finished {} → Cooldown {:.2}s",
                entity,
                pattern.0.name(),
                recovery
            ));
            *state = AIState::Cooldown { remaining: recovery };
        }
    }
}

fn apply_attack_command(
    commands: &mut Commands,
    damage_events: &mut EventWriter<DamageRequest>,
    attacker: Entity,
    position: Vec3,
    player: Option<(Entity, Vec3)>,
    command: AttackCommand,
) {
    match command {
        AttackCommand::FireSpread {
            origin,
            base_direction,
            count,
            spread_angle,
            spec,
        } => {
            for direction in spread_directions(base_direction, count, spread_angle) {
                commands.spawn((
                    Projectile::new(spec, direction, Some(attacker)),
                    Transform::from_translation(origin),
                ));
            }
        }
        AttackCommand::SpawnHazard { position, spec } => {
            commands.spawn((GroundHazard::new(spec, Some(attacker)), Transform::from_translation(position)));
        }
        AttackCommand::Strike { target, damage } => {
            damage_events.write(strike_request(attacker, position, player, target, damage));
        }
        AttackCommand::Detonate { target, damage } => {
            damage_events.write(strike_request(attacker, position, player, target, damage));
            damage_events.write(DamageRequest::new(attacker, u32::MAX).from_source(attacker));
        }
    }
}

fn strike_request(
    attacker: Entity,
    position: Vec3,
    player: Option<(Entity, Vec3)>,
    target: Entity,
    damage: u32,
) -> DamageRequest {
    let request = DamageRequest::new(target, damage).from_source(attacker);
    match player {
        Some((entity, target_position)) if entity == target => {
            request.with_direction(flat(target_position - position).normalize_or_zero())
        }
        _ => request,
    }
}

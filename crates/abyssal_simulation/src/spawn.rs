//! Сборка entities: игрок, архетипы врагов, комнаты, геометрия
//!
//! Каждый архетип = общий pursuit FSM + attack routine + pursuit style
//! + knockback policy из конфига.

use bevy::prelude::*;

use crate::ai::{
    AIConfig, AIState, AttackCooldown, AttackPattern, AttackRoutine, BossBarrage, BroodLaunch, ContactStrike,
    CrabThief, Detonate, LaserVolley, PhaseEscalation, PlayerTarget, PursuitStyle, ThiefState,
};
use crate::combat::{BossPhase, CooldownGate, DespawnDelay, Knockback, SplitOnDeath};
use crate::components::{
    CollisionRadius, Enemy, EnemyArchetype, Ground, Health, Obstacle, Player, RelicPouch, Velocity,
};
use crate::config::{
    ArchetypeConfig, BossConfig, JellySlimeConfig, JellyfishConfig, PlayerConfig, RollerConfig, RoomConfig,
    SeahorseConfig, SimulationConfig, SplitConfig, ThiefConfig,
};
use crate::player::{Hover, HoverEnergy, PlayerGun, PlayerInput, PlayerMotor};
use crate::room::{Room, SpawnPoint};

pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Player,
            Health::new(config.max_health).with_invincibility(config.invincibility),
            Velocity::default(),
            CollisionRadius(config.body_radius),
            Transform::from_translation(position),
            PlayerMotor::from_config(config),
            PlayerInput::default(),
            HoverEnergy::from_config(&config.hover),
            Hover::from_config(&config.hover),
            PlayerGun::from_config(&config.gun),
            RelicPouch::default(),
        ))
        .id()
}

/// Общая часть всех боевых врагов
fn spawn_enemy(
    commands: &mut Commands,
    archetype: EnemyArchetype,
    base: &ArchetypeConfig,
    ai: AIConfig,
    routine: impl AttackRoutine,
    position: Vec3,
) -> Entity {
    let mut enemy = commands.spawn((
        Enemy { archetype },
        Health::new(base.max_health),
        CollisionRadius(base.body_radius),
        Transform::from_translation(position),
        AIState::default(),
        ai,
        PlayerTarget::new(base.player_search_interval),
        AttackCooldown(CooldownGate::new(base.attack_cooldown)),
        AttackPattern::new(routine),
        DespawnDelay(base.despawn_delay),
    ));
    if let Some(knockback) = &base.knockback {
        enemy.insert(Knockback::from_config(knockback));
    }
    crate::logger::log(&format!("Spawned {} at {:?}", archetype.name(), position));
    enemy.id()
}

pub fn spawn_cthulhu_boss(commands: &mut Commands, config: &BossConfig, position: Vec3) -> Entity {
    // Босс кайтит и во время атаки
    let ai = AIConfig::from_archetype(&config.base, config.pursuit_style()).moving_while_attacking();
    let boss = spawn_enemy(
        commands,
        EnemyArchetype::CthulhuBoss,
        &config.base,
        ai,
        BossBarrage::from_config(config),
        position,
    );
    commands.entity(boss).insert((
        BossPhase::new(config.phase2_threshold, config.phase3_threshold),
        PhaseEscalation::new(config.phase2, config.phase3),
    ));
    boss
}

pub fn spawn_jelly_slime(commands: &mut Commands, config: &JellySlimeConfig, position: Vec3) -> Entity {
    let ai = AIConfig::from_archetype(
        &config.base,
        PursuitStyle::Advance {
            stop_distance: config.base.attack_radius * 0.5,
        },
    );
    let slime = spawn_enemy(
        commands,
        EnemyArchetype::JellySlime,
        &config.base,
        ai,
        ContactStrike::new(config.slam_damage, config.base.attack_cooldown),
        position,
    );
    commands.entity(slime).insert(SplitOnDeath {
        split: config.split.clone(),
        child_base: config.base.clone(),
    });
    slime
}

/// Child JellySlime: быстрый, взрывается рядом с игроком
///
/// Детали поиска/knockback/despawn берутся из родительского архетипа.
pub fn spawn_mini_slime(
    commands: &mut Commands,
    position: Vec3,
    max_health: u32,
    split: &SplitConfig,
    parent: &ArchetypeConfig,
) -> Entity {
    let base = ArchetypeConfig {
        max_health,
        attack_radius: split.child_trigger_distance,
        move_speed: split.child_move_speed,
        turn_rate: split.child_turn_rate,
        attack_cooldown: 0.0,
        body_radius: parent.body_radius * 0.5,
        ..parent.clone()
    };
    let ai = AIConfig::from_archetype(
        &base,
        PursuitStyle::Advance {
            stop_distance: split.child_stop_distance,
        },
    );
    let child = spawn_enemy(
        commands,
        EnemyArchetype::MiniSlime,
        &base,
        ai,
        Detonate::new(split.child_explosion_damage),
        position,
    );
    // Ребёнок сразу агрессивен
    commands.entity(child).insert(AIState::Pursuing);
    child
}

pub fn spawn_jellyfish(commands: &mut Commands, config: &JellyfishConfig, position: Vec3) -> Entity {
    let ai = AIConfig::from_archetype(
        &config.base,
        PursuitStyle::Advance {
            stop_distance: config.stop_distance,
        },
    );
    spawn_enemy(
        commands,
        EnemyArchetype::Jellyfish,
        &config.base,
        ai,
        LaserVolley::from_config(config),
        position,
    )
}

pub fn spawn_seahorse(commands: &mut Commands, config: &SeahorseConfig, position: Vec3) -> Entity {
    let ai = AIConfig::from_archetype(
        &config.base,
        PursuitStyle::Advance {
            stop_distance: config.stop_distance,
        },
    );
    spawn_enemy(
        commands,
        EnemyArchetype::Seahorse,
        &config.base,
        ai,
        BroodLaunch::from_config(&config.brood, config.base.attack_cooldown),
        position,
    )
}

pub fn spawn_roller(commands: &mut Commands, config: &RollerConfig, position: Vec3) -> Entity {
    // Катится не останавливаясь, урон по касанию
    let ai = AIConfig::from_archetype(&config.base, PursuitStyle::Advance { stop_distance: 0.0 })
        .moving_while_attacking();
    spawn_enemy(
        commands,
        EnemyArchetype::Roller,
        &config.base,
        ai,
        ContactStrike::new(config.contact_damage, config.base.attack_cooldown),
        position,
    )
}

pub fn spawn_crab_thief(
    commands: &mut Commands,
    config: &ThiefConfig,
    position: Vec3,
    patrol_areas: Vec<Vec3>,
    hideouts: Vec<Vec3>,
    now: f32,
) -> Entity {
    commands
        .spawn((
            CrabThief::new(config.clone(), patrol_areas, hideouts, now),
            ThiefState::Patrol { destination: position },
            Transform::from_translation(position),
        ))
        .id()
}

/// Враг по архетипу с тюнингом из общего конфига (волны комнат)
pub fn spawn_archetype(
    commands: &mut Commands,
    config: &SimulationConfig,
    archetype: EnemyArchetype,
    position: Vec3,
) -> Entity {
    match archetype {
        EnemyArchetype::CthulhuBoss => spawn_cthulhu_boss(commands, &config.boss, position),
        EnemyArchetype::JellySlime => spawn_jelly_slime(commands, &config.jelly_slime, position),
        EnemyArchetype::MiniSlime => {
            let split = &config.jelly_slime.split;
            spawn_mini_slime(commands, position, split.child_max_health, split, &config.jelly_slime.base)
        }
        EnemyArchetype::Jellyfish => spawn_jellyfish(commands, &config.jellyfish, position),
        EnemyArchetype::Seahorse => spawn_seahorse(commands, &config.seahorse, position),
        EnemyArchetype::Roller => spawn_roller(commands, &config.roller, position),
    }
}

pub fn spawn_room(commands: &mut Commands, name: &str, center: Vec3, config: &RoomConfig, now: f32) -> Entity {
    commands
        .spawn((Room::new(name, config, now), Transform::from_translation(center)))
        .id()
}

pub fn spawn_spawn_point(commands: &mut Commands, room: Entity, position: Vec3) -> Entity {
    commands
        .spawn((SpawnPoint::new(room), Transform::from_translation(position)))
        .id()
}

pub fn spawn_obstacle(commands: &mut Commands, center: Vec3, half_extents: Vec3) -> Entity {
    commands
        .spawn((Obstacle { half_extents }, Transform::from_translation(center)))
        .id()
}

/// Поверхность: верх = center.y
pub fn spawn_ground(commands: &mut Commands, tag: &str, center: Vec3, half_extents: Vec2) -> Entity {
    commands
        .spawn((Ground::new(tag, half_extents), Transform::from_translation(center)))
        .id()
}

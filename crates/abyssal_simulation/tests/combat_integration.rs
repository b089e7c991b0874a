//! Integration tests: урон, снаряды, фазы босса, split, зачистка комнаты
//!
//! Полный App (все plugins), ручной fixed тик.

mod common;

use abyssal_simulation::ai::BossBarrage;
use abyssal_simulation::combat::{Projectile, ProjectileFaction, ProjectileHit, ProjectileSpec, SlimeSplit};
use abyssal_simulation::spatial::{flat, signed_angle_y};
use abyssal_simulation::{
    spawn, AIConfig, AttackPattern, DamageRequest, Dead, Enemy, EnemyArchetype, EntityDied, Health, PhaseChanged,
    RewardChest, Room, RoomCleared, SimError, SimFault, SpawnPoint, SpawnWave,
};
use abyssal_simulation::ai::PhaseEscalation;
use abyssal_simulation::room::RoomStatus;
use bevy::prelude::*;
use common::*;

#[test]
fn test_player_bullet_damages_enemy() {
    let mut app = app();
    let config = config(&app);
    spawn_floor(&mut app);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    let roller = spawn_with(&mut app, |commands| {
        spawn::spawn_roller(commands, &config.roller, Vec3::new(0.0, 0.0, -3.0))
    });

    // Один выстрел вперёд (-Z)
    app.world_mut()
        .get_mut::<abyssal_simulation::player::PlayerInput>(player)
        .unwrap()
        .fire = true;
    step(&mut app);
    app.world_mut()
        .get_mut::<abyssal_simulation::player::PlayerInput>(player)
        .unwrap()
        .fire = false;

    step_for(&mut app, 0.3);

    let health = app.world().get::<Health>(roller).unwrap();
    assert_eq!(health.current, 20, "пуля 10 урона должна попасть в roller");
    assert_eq!(count::<Projectile>(&mut app), 0, "пуля уничтожается при попадании");
}

#[test]
fn test_boss_fires_three_lasers_in_twenty_degree_fan() {
    let mut app = app();
    let config = config(&app);
    spawn_floor(&mut app);
    spawn_player_at(&mut app, Vec3::new(0.0, 0.0, -7.0));
    let boss = spawn_with(&mut app, |commands| {
        spawn::spawn_cthulhu_boss(commands, &config.boss, Vec3::ZERO)
    });

    let fired = step_until(&mut app, 1.0, |app| count::<Projectile>(app) >= 3);
    assert!(fired, "первый залп должен выйти после reaction delay");

    let base = flat(Vec3::NEG_Z);
    let mut angles: Vec<f32> = app
        .world_mut()
        .query::<&Projectile>()
        .iter(app.world())
        .filter(|projectile| projectile.source == Some(boss))
        .map(|projectile| {
            assert_eq!(projectile.faction, ProjectileFaction::Hostile);
            signed_angle_y(base, projectile.direction)
        })
        .collect();
    angles.sort_by(f32::total_cmp);

    assert_eq!(angles.len(), 3);
    assert!((angles[0] + 10.0).abs() < 0.5, "левый луч: {}", angles[0]);
    assert!(angles[1].abs() < 0.5, "центральный луч: {}", angles[1]);
    assert!((angles[2] - 10.0).abs() < 0.5, "правый луч: {}", angles[2]);
}

#[test]
fn test_boss_holds_fire_beyond_max_distance() {
    let mut app = app();
    let config = config(&app);
    spawn_floor(&mut app);
    spawn_player_at(&mut app, Vec3::new(0.0, 0.0, -14.0));
    let boss = spawn_with(&mut app, |commands| {
        spawn::spawn_cthulhu_boss(commands, &config.boss, Vec3::ZERO)
    });

    step_for(&mut app, 0.5);

    assert_eq!(count::<Projectile>(&mut app), 0, "залп только с 8 м и ближе");
    assert_eq!(*app.world().get::<abyssal_simulation::AIState>(boss).unwrap(), abyssal_simulation::AIState::Pursuing);
    // Босс сближается
    let z = app.world().get::<Transform>(boss).unwrap().translation.z;
    assert!(z < 0.0, "boss z = {}", z);
}

#[test]
fn test_boss_phase_jump_escalates_cumulatively() {
    let mut app = app();
    let config = config(&app);
    let boss = spawn_with(&mut app, |commands| {
        spawn::spawn_cthulhu_boss(commands, &config.boss, Vec3::ZERO)
    });

    // 1000 → 150 HP: сразу фаза 3
    app.world_mut().send_event(DamageRequest::new(boss, 850));
    step(&mut app);

    let changes = events::<PhaseChanged>(&app);
    assert_eq!(changes.len(), 1);
    assert_eq!((changes[0].from, changes[0].to), (1, 3));

    let escalation = app.world().get::<PhaseEscalation>(boss).unwrap();
    assert_eq!(escalation.applied_phase, 3);

    // Скорость: 2.0 × 1.2 × 1.4
    let ai = app.world().get::<AIConfig>(boss).unwrap();
    assert!((ai.move_speed - 3.36).abs() < 1e-4, "move_speed = {}", ai.move_speed);

    let pattern = app.world().get::<AttackPattern>(boss).unwrap();
    let barrage = pattern.downcast_ref::<BossBarrage>().unwrap();
    assert_eq!(barrage.lasers_per_shot, 6);
    assert_eq!(barrage.burst_count, 5);
    assert_eq!(barrage.explosions_per_attack, 6);
    assert!((barrage.laser_cooldown - 0.72).abs() < 1e-4);

    // Повторный урон в той же фазе эскалацию не повторяет
    app.world_mut().send_event(DamageRequest::new(boss, 10));
    step(&mut app);
    let pattern = app.world().get::<AttackPattern>(boss).unwrap();
    assert_eq!(pattern.downcast_ref::<BossBarrage>().unwrap().burst_count, 5);
}

#[test]
fn test_jelly_slime_splits_into_opposite_children() {
    let mut app = app();
    let config = config(&app);
    let center = Vec3::new(3.0, 0.0, 3.0);
    let slime = spawn_with(&mut app, |commands| {
        spawn::spawn_jelly_slime(commands, &config.jelly_slime, center)
    });

    app.world_mut().send_event(DamageRequest::new(slime, 100));
    step(&mut app);

    let splits = events::<SlimeSplit>(&app);
    assert_eq!(splits.len(), 1, "split ровно один раз");
    assert_eq!(splits[0].parent, slime);
    assert_eq!(splits[0].children.len(), 2);

    let offsets: Vec<Vec3> = splits[0]
        .children
        .iter()
        .map(|child| {
            let world = app.world();
            let enemy = world.get::<Enemy>(*child).unwrap();
            assert_eq!(enemy.archetype, EnemyArchetype::MiniSlime);

            let health = world.get::<Health>(*child).unwrap();
            assert_eq!(health.max, 5);
            assert!(health.max < config.jelly_slime.base.max_health);

            world.get::<Transform>(*child).unwrap().translation - center
        })
        .collect();

    for offset in &offsets {
        assert!((offset.length() - 1.0).abs() < 1e-3, "ring radius 1: {:?}", offset);
    }
    let dot = offsets[0].normalize().dot(offsets[1].normalize());
    assert!((dot + 1.0).abs() < 1e-3, "дети напротив друг друга");

    // Смерть ребёнка новый split не вызывает
    app.world_mut().send_event(DamageRequest::new(splits[0].children[0], 100));
    step(&mut app);
    assert_eq!(events::<SlimeSplit>(&app).len(), 1);
}

#[test]
fn test_mini_slime_detonates_next_to_player() {
    let mut app = app();
    let config = config(&app);
    spawn_floor(&mut app);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    let child = spawn_with(&mut app, |commands| {
        spawn::spawn_mini_slime(
            commands,
            Vec3::new(0.5, 0.0, 0.0),
            5,
            &config.jelly_slime.split,
            &config.jelly_slime.base,
        )
    });

    step(&mut app);

    let health = app.world().get::<Health>(player).unwrap();
    assert_eq!(health.current, 80, "взрыв child наносит 20 урона");
    assert!(app.world().get::<Dead>(child).is_some(), "child погибает при взрыве");
    assert!(events::<EntityDied>(&app).iter().any(|died| died.entity == child));
}

#[test]
fn test_room_clears_once_after_last_enemy() {
    let mut app = app();
    let config = config(&app);
    let room = spawn_with(&mut app, |commands| {
        spawn::spawn_room(commands, "Grotto", Vec3::ZERO, &config.room, 0.0)
    });
    let enemies: Vec<Entity> = [-4.0, 0.0, 4.0]
        .into_iter()
        .map(|x| {
            spawn_with(&mut app, |commands| {
                spawn::spawn_roller(commands, &config.roller, Vec3::new(x, 0.0, 6.0))
            })
        })
        .collect();

    // Roster собирается после initial delay
    step_for(&mut app, 2.5);
    {
        let room = app.world().get::<Room>(room).unwrap();
        assert_eq!(room.status, RoomStatus::Active);
        assert_eq!(room.roster.len(), 3);
    }

    for enemy in &enemies[..2] {
        app.world_mut().send_event(DamageRequest::new(*enemy, 100));
    }
    step_for(&mut app, 0.5);
    assert_eq!(event_count::<RoomCleared>(&app), 0, "живой враг ещё есть");
    assert_eq!(count::<RewardChest>(&mut app), 0);

    app.world_mut().send_event(DamageRequest::new(enemies[2], 100));
    step_for(&mut app, 1.0);

    let cleared = events::<RoomCleared>(&app);
    assert_eq!(cleared.len(), 1, "награда выдаётся ровно один раз");
    assert_eq!(cleared[0].room, room);
    assert_eq!(cleared[0].chest_position, Some(Vec3::ZERO));
    assert_eq!(count::<RewardChest>(&mut app), 1);
    assert!(app.world().get::<Room>(room).unwrap().is_cleared());
}

#[test]
fn test_room_without_enemies_times_out() {
    let mut app = app();
    let mut config = config(&app);
    config.room.max_attempts = 2;
    config.room.retry_interval = 1.0;
    let room = spawn_with(&mut app, |commands| {
        spawn::spawn_room(commands, "Empty", Vec3::ZERO, &config.room, 0.0)
    });

    step_for(&mut app, 4.0);

    let room = app.world().get::<Room>(room).unwrap();
    assert_eq!(room.status, RoomStatus::Abandoned);
    assert_eq!(room.attempts, 2);
    assert_eq!(event_count::<abyssal_simulation::SimFault>(&app), 1);
}

fn hostile_spec() -> ProjectileSpec {
    ProjectileSpec {
        damage: 10,
        speed: 10.0,
        lifetime: 2.0,
        radius: 0.2,
        faction: ProjectileFaction::Hostile,
        knockback: None,
    }
}

#[test]
fn test_hostile_laser_hits_hovering_player() {
    let mut app = app();
    spawn_floor(&mut app);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    start_hover(&mut app, player);

    // Лазер летит по земле (y = 0)
    spawn_projectile(&mut app, Vec3::new(0.0, 0.0, -5.0), Vec3::Z, hostile_spec());
    step_for(&mut app, 1.0);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, 90);
    assert_eq!(event_count::<ProjectileHit>(&app), 1);
    assert_eq!(count::<Projectile>(&mut app), 0);
}

#[test]
fn test_hovering_player_bullet_hits_ground_enemy() {
    let mut app = app();
    let config = config(&app);
    spawn_floor(&mut app);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    start_hover(&mut app, player);
    let roller = spawn_with(&mut app, |commands| {
        spawn::spawn_roller(commands, &config.roller, Vec3::new(0.0, 0.0, -4.0))
    });

    app.world_mut()
        .get_mut::<abyssal_simulation::player::PlayerInput>(player)
        .unwrap()
        .fire = true;
    step(&mut app);
    app.world_mut()
        .get_mut::<abyssal_simulation::player::PlayerInput>(player)
        .unwrap()
        .fire = false;
    step_for(&mut app, 0.3);

    assert_eq!(app.world().get::<Health>(roller).unwrap().current, 20);
}

#[test]
fn test_projectile_blocked_by_obstacle_deals_no_damage() {
    let mut app = app();
    spawn_floor(&mut app);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    spawn_with(&mut app, |commands| {
        spawn::spawn_obstacle(commands, Vec3::new(0.0, 0.0, -2.5), Vec3::new(2.0, 1.0, 0.25))
    });

    spawn_projectile(&mut app, Vec3::new(0.0, 0.0, -5.0), Vec3::Z, hostile_spec());
    step_for(&mut app, 1.0);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, 100);
    assert_eq!(event_count::<ProjectileHit>(&app), 0);
    assert_eq!(count::<Projectile>(&mut app), 0, "стена уничтожает снаряд");
}

#[test]
fn test_spawn_wave_uses_free_points_once() {
    let mut app = app();
    let config = config(&app);
    spawn_floor(&mut app);
    let room = spawn_with(&mut app, |commands| {
        spawn::spawn_room(commands, "Reef", Vec3::ZERO, &config.room, 0.0)
    });
    let anchors = [Vec3::new(-10.0, 0.0, 10.0), Vec3::new(10.0, 0.0, 10.0)];
    for anchor in anchors {
        spawn_with(&mut app, |commands| spawn::spawn_spawn_point(commands, room, anchor));
    }

    app.world_mut().send_event(SpawnWave {
        room,
        archetype: EnemyArchetype::Roller,
        count: 3,
    });
    step(&mut app);

    // Две точки → два врага, третий отбрасывается с fault'ом
    let positions: Vec<Vec3> = app
        .world_mut()
        .query::<(&Enemy, &Transform)>()
        .iter(app.world())
        .map(|(enemy, transform)| {
            assert_eq!(enemy.archetype, EnemyArchetype::Roller);
            transform.translation
        })
        .collect();
    assert_eq!(positions.len(), 2);
    for anchor in anchors {
        let near = positions
            .iter()
            .filter(|p| (p.x - anchor.x).abs() <= 2.0 && (p.z - anchor.z).abs() <= 2.0)
            .count();
        assert_eq!(near, 1, "один враг на точку {:?}", anchor);
    }

    let faults = app
        .world()
        .resource::<Events<SimFault>>()
        .iter_current_update_events()
        .filter(|fault| matches!(fault.error, SimError::NoSpawnPointAvailable { .. }))
        .count();
    assert_eq!(faults, 1);
    assert!(app
        .world_mut()
        .query::<&SpawnPoint>()
        .iter(app.world())
        .all(|point| point.occupied));

    // Волна попадает в roster комнаты
    step_for(&mut app, 2.5);
    let room = app.world().get::<Room>(room).unwrap();
    assert_eq!(room.status, RoomStatus::Active);
    assert_eq!(room.roster.len(), 2);
}

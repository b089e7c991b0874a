//! Тесты детерминизма
//!
//! Один и тот же seed + одна и та же сцена → байт-в-байт одинаковый мир.
//! RNG тратят босс (взрывы), морской конёк (jitter) и краб-вор.

mod common;

use abyssal_simulation::player::PlayerInput;
use abyssal_simulation::{create_headless_app, spawn, world_snapshot, Health, RelicPouch};
use bevy::prelude::*;
use common::*;

fn arena(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    let config = config(&app);

    spawn_floor(&mut app);
    spawn_with(&mut app, |commands| spawn::spawn_room(commands, "Arena", Vec3::ZERO, &config.room, 0.0));
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    app.world_mut().get_mut::<RelicPouch>(player).unwrap().relics = vec![1, 2, 3];

    spawn_with(&mut app, |commands| {
        spawn::spawn_cthulhu_boss(commands, &config.boss, Vec3::new(0.0, 0.0, -10.0))
    });
    spawn_with(&mut app, |commands| {
        spawn::spawn_seahorse(commands, &config.seahorse, Vec3::new(4.0, 0.0, 0.0))
    });
    spawn_with(&mut app, |commands| {
        spawn::spawn_jelly_slime(commands, &config.jelly_slime, Vec3::new(-2.5, 0.0, 0.0))
    });
    let mut thief = config.thief.clone();
    thief.scan_cooldown = 3.0;
    thief.steal_cooldown = 3.0;
    spawn_with(&mut app, |commands| {
        spawn::spawn_crab_thief(
            commands,
            &thief,
            Vec3::new(8.0, 0.0, 8.0),
            vec![Vec3::new(8.0, 0.0, 8.0)],
            vec![Vec3::new(-15.0, 0.0, 15.0)],
            0.0,
        )
    });

    // Игрок стоит и стреляет в сторону босса
    {
        let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
        input.fire = true;
        input.aim_direction = Vec3::NEG_Z;
    }

    app
}

fn run_simulation(seed: u64, seconds: f32) -> (Vec<u8>, Vec<u8>) {
    let mut app = arena(seed);
    step_for(&mut app, seconds);

    let world = app.world_mut();
    (world_snapshot::<Transform>(world), world_snapshot::<Health>(world))
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_simulation(SEED, 10.0);
    let second = run_simulation(SEED, 10.0);

    assert_eq!(first.0, second.0, "Transform снепшоты разошлись при seed {}", SEED);
    assert_eq!(first.1, second.1, "Health снепшоты разошлись при seed {}", SEED);
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let runs: Vec<_> = (0..3).map(|_| run_simulation(SEED, 5.0)).collect();
    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(runs[0], *run, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

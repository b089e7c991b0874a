//! Headless симуляция Abyssal
//!
//! Запускает демо-комнату без рендера: игрок, босс, слайм, медуза, морской
//! конёк, роллер, волна роллеров по точкам спавна и краб-вор. Первый аргумент - опциональный путь к JSON конфигу.

use std::time::Duration;

use abyssal_simulation::{
    create_headless_app_with_config, log_error, log_info, spawn, EnemyArchetype, EntityDied, RoomCleared,
    SimulationConfig, SpawnWave,
};
use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;

fn load_config() -> SimulationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimulationConfig::default();
    };
    match SimulationConfig::load(&path) {
        Ok(config) => config,
        Err(error) => {
            log_error(&format!("Config {} rejected ({}), using defaults", path, error));
            SimulationConfig::default()
        }
    }
}

fn spawn_demo_room(world: &mut World, config: &SimulationConfig) {
    let mut queue = CommandQueue::default();
    {
        let mut commands = Commands::new(&mut queue, world);
        spawn::spawn_ground(&mut commands, "Ground", Vec3::ZERO, Vec2::splat(30.0));
        spawn::spawn_obstacle(&mut commands, Vec3::new(6.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 3.0));

        let player = spawn::spawn_player(&mut commands, &config.player, Vec3::ZERO);
        commands.entity(player).insert(abyssal_simulation::RelicPouch { relics: vec![0, 3] });

        let room = spawn::spawn_room(&mut commands, "Abyssal Hall", Vec3::ZERO, &config.room, 0.0);
        for point in [Vec3::new(-8.0, 0.0, 8.0), Vec3::new(8.0, 0.0, 8.0)] {
            spawn::spawn_spawn_point(&mut commands, room, point);
        }
        commands.send_event(SpawnWave {
            room,
            archetype: EnemyArchetype::Roller,
            count: 2,
        });
        spawn::spawn_cthulhu_boss(&mut commands, &config.boss, Vec3::new(0.0, 0.0, -12.0));
        spawn::spawn_jelly_slime(&mut commands, &config.jelly_slime, Vec3::new(2.0, 0.0, 2.0));
        spawn::spawn_jellyfish(&mut commands, &config.jellyfish, Vec3::new(-5.0, 0.0, -3.0));
        spawn::spawn_seahorse(&mut commands, &config.seahorse, Vec3::new(4.0, 0.0, -4.0));
        spawn::spawn_roller(&mut commands, &config.roller, Vec3::new(-2.0, 0.0, 2.0));
        spawn::spawn_crab_thief(
            &mut commands,
            &config.thief,
            Vec3::new(10.0, 0.0, 10.0),
            vec![Vec3::new(10.0, 0.0, 10.0)],
            vec![Vec3::new(-20.0, 0.0, 20.0)],
            0.0,
        );
    }
    queue.apply(world);
}

fn main() {
    let config = load_config();
    let tick = Duration::from_secs_f64(1.0 / config.tick_hz.max(1.0));
    println!("Starting Abyssal headless simulation (seed: {})", config.seed);

    let mut app = create_headless_app_with_config(config.clone());
    spawn_demo_room(app.world_mut(), &config);

    // 60 секунд симуляции
    let ticks = (60.0 * config.tick_hz) as u32;
    for tick_index in 0..ticks {
        app.world_mut().resource_mut::<Time<Fixed>>().advance_by(tick);
        app.world_mut().run_schedule(FixedUpdate);

        if tick_index % 600 == 0 {
            let entity_count = app.world().entities().len();
            log_info(&format!("Tick {}: {} entities", tick_index, entity_count));
        }
    }

    let deaths = app.world().resource::<Events<EntityDied>>().iter_current_update_events().count();
    let cleared = app.world().resource::<Events<RoomCleared>>().iter_current_update_events().count();
    println!("Simulation complete! deaths: {}, rooms cleared: {}", deaths, cleared);
}

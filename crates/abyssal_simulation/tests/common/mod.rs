//! Общие хелперы интеграционных тестов: ручной fixed тик без wall clock

#![allow(dead_code)]

use std::time::Duration;

use abyssal_simulation::logger::{set_log_level, LogLevel};
use abyssal_simulation::{create_headless_app, spawn, SimulationConfig};
use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;

pub const DT: f32 = 1.0 / 60.0;

pub fn app() -> App {
    set_log_level(LogLevel::Warning);
    create_headless_app(42)
}

pub fn config(app: &App) -> SimulationConfig {
    app.world().resource::<SimulationConfig>().clone()
}

pub fn step(app: &mut App) {
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(DT));
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn step_for(app: &mut App, seconds: f32) {
    let ticks = (seconds / DT).round() as u32;
    for _ in 0..ticks {
        step(app);
    }
}

/// Тикаем, пока условие не выполнится (или не кончится лимит)
pub fn step_until(app: &mut App, max_seconds: f32, mut done: impl FnMut(&mut App) -> bool) -> bool {
    let ticks = (max_seconds / DT).round() as u32;
    for _ in 0..ticks {
        step(app);
        if done(app) {
            return true;
        }
    }
    false
}

pub fn spawn_with<F>(app: &mut App, build: F) -> Entity
where
    F: FnOnce(&mut Commands) -> Entity,
{
    let world = app.world_mut();
    let mut queue = CommandQueue::default();
    let entity = {
        let mut commands = Commands::new(&mut queue, world);
        build(&mut commands)
    };
    queue.apply(world);
    entity
}

/// Пол 100×100 с тегом Ground на y = 0
pub fn spawn_floor(app: &mut App) -> Entity {
    spawn_with(app, |commands| spawn::spawn_ground(commands, "Ground", Vec3::ZERO, Vec2::splat(50.0)))
}

pub fn spawn_player_at(app: &mut App, position: Vec3) -> Entity {
    let config = config(app);
    spawn_with(app, |commands| spawn::spawn_player(commands, &config.player, position))
}

pub fn events<T: Event + Clone>(app: &App) -> Vec<T> {
    app.world()
        .resource::<Events<T>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

pub fn event_count<T: Event>(app: &App) -> usize {
    app.world().resource::<Events<T>>().iter_current_update_events().count()
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}

/// Поднимает стоящего на полу игрока в hover (y ≈ 1.5)
pub fn start_hover(app: &mut App, player: Entity) {
    step(app);
    app.world_mut()
        .get_mut::<abyssal_simulation::player::PlayerInput>(player)
        .unwrap()
        .hover = true;
    let hovering = step_until(app, 0.5, |app| {
        app.world().get::<abyssal_simulation::player::PlayerMotor>(player).unwrap().state
            == abyssal_simulation::player::MotorState::Hovering
    });
    assert!(hovering, "игрок не поднялся в hover");
    let y = app.world().get::<Transform>(player).unwrap().translation.y;
    assert!(y > 1.0, "hover height: {}", y);
}

pub fn spawn_projectile(app: &mut App, position: Vec3, direction: Vec3, spec: abyssal_simulation::combat::ProjectileSpec) -> Entity {
    app.world_mut()
        .spawn((
            abyssal_simulation::combat::Projectile::new(spec, direction, None),
            Transform::from_translation(position),
        ))
        .id()
}

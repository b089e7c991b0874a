//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье и маркеры врагов (Health, Enemy, EnemyArchetype)
//! - movement: скорость и радиус тела (Velocity, CollisionRadius)
//! - world: статичная геометрия комнаты (Obstacle, Ground) и pickup'ы
//! - player: player control marker (Player)

pub mod actor;
pub mod movement;
pub mod player;
pub mod world;

pub use actor::*;
pub use movement::*;
pub use player::*;
pub use world::*;

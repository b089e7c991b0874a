//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// AI ищет цель через `With<Player>`; в сессии ровно один такой entity.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(crate::components::Health, crate::components::Velocity, crate::components::CollisionRadius)]
pub struct Player;

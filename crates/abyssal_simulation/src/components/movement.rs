//! Movement компоненты: скорость и радиус тела

use bevy::prelude::*;

/// Линейная скорость (м/с), интегрируется в Transform своими системами
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec3);

/// Радиус тела для overlap-проверок (снаряды, hazards, контакт)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CollisionRadius(pub f32);

impl Default for CollisionRadius {
    fn default() -> Self {
        Self(0.5)
    }
}

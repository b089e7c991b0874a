//! Статичная геометрия комнаты и pickup'ы

use bevy::prelude::*;

/// Стена/препятствие: axis-aligned box вокруг Transform.translation
///
/// Уничтожает снаряды, блокирует продвижение врагов с obstacle check.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Obstacle {
    pub half_extents: Vec3,
}

/// Поверхность, на которой можно стоять
///
/// Верх поверхности = Transform.translation.y, footprint = half_extents по x/z.
/// Ground probe игрока принимает только теги из whitelist.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Ground {
    pub tag: String,
    pub half_extents: Vec2,
}

impl Ground {
    pub fn new(tag: impl Into<String>, half_extents: Vec2) -> Self {
        Self {
            tag: tag.into(),
            half_extents,
        }
    }
}

/// Сундук награды, появляется при зачистке комнаты
#[derive(Component, Debug, Clone, Copy)]
pub struct RewardChest {
    pub room: Entity,
}

/// Реликвия, брошенная вором в укрытии (можно подобрать снова)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedRelic {
    pub relic: u32,
}

/// Реликвии, которые несёт игрок
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct RelicPouch {
    pub relics: Vec<u32>,
}

//! Split-on-death (JellySlime → mini slimes)

use bevy::prelude::*;

use crate::combat::EntityDied;
use crate::components::Health;
use crate::config::{ArchetypeConfig, SplitConfig};
use crate::logger;

#[derive(Component, Debug, Clone)]
pub struct SplitOnDeath {
    pub split: SplitConfig,
    /// Общие параметры child'ов (поиск игрока, knockback, despawn)
    pub child_base: ArchetypeConfig,
}

/// Event: entity распался на детей
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SlimeSplit {
    pub parent: Entity,
    pub children: Vec<Entity>,
}

/// Точки спавна: ровное кольцо вокруг центра (первая - строго по +Z)
pub fn split_ring_positions(center: Vec3, count: u32, radius: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let step = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|i| center + Quat::from_rotation_y(step * i as f32) * Vec3::Z * radius)
        .collect()
}

/// HP child'а: фиксированное значение, минимум 1, строго меньше родителя
pub fn child_max_health(parent_max: u32, configured: u32) -> u32 {
    configured.clamp(1, parent_max.saturating_sub(1).max(1))
}

/// Система: спавн детей по death notification
pub fn split_on_death(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    splitters: Query<(&SplitOnDeath, &Transform, &Health)>,
    mut split_events: EventWriter<SlimeSplit>,
) {
    for event in death_events.read() {
        let Ok((splitter, transform, health)) = splitters.get(event.entity) else {
            continue;
        };
        if !splitter.split.enabled || splitter.split.count == 0 {
            continue;
        }

        let child_health = child_max_health(health.max, splitter.split.child_max_health);
        let children: Vec<Entity> =
            split_ring_positions(transform.translation, splitter.split.count, splitter.split.ring_radius)
                .into_iter()
                .map(|position| {
                    crate::spawn::spawn_mini_slime(
                        &mut commands,
                        position,
                        child_health,
                        &splitter.split,
                        &splitter.child_base,
                    )
                })
                .collect();

        logger::log_info(&format!(
            "🔪 {:?} split into {} mini slimes ({} HP each)",
            event.entity,
            children.len(),
            child_health
        ));
        split_events.write(SlimeSplit {
            parent: event.entity,
            children,
        });
    }
}

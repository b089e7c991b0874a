//! Фазы босса: производная от процента HP
//!
//! Фаза только растёт. Лечение пересчитывает фазу, но не откатывает её.

use bevy::prelude::*;

use crate::components::Health;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BossPhase {
    pub phase: u8,
    pub phase2_threshold: f32,
    pub phase3_threshold: f32,
}

/// Event: фаза босса сменилась (from < to, может перепрыгнуть через фазу)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChanged {
    pub entity: Entity,
    pub from: u8,
    pub to: u8,
}

impl Default for BossPhase {
    fn default() -> Self {
        Self::new(0.5, 0.2)
    }
}

impl BossPhase {
    pub const MAX_PHASE: u8 = 3;

    pub fn new(phase2_threshold: f32, phase3_threshold: f32) -> Self {
        Self {
            phase: 1,
            phase2_threshold,
            phase3_threshold,
        }
    }

    pub fn phase_for(&self, health_fraction: f32) -> u8 {
        if health_fraction <= self.phase3_threshold {
            Self::MAX_PHASE
        } else if health_fraction <= self.phase2_threshold {
            2
        } else {
            1
        }
    }

    /// Пересчёт после мутации Health; Some только при повышении фазы
    pub fn update(&mut self, entity: Entity, health: &Health) -> Option<PhaseChanged> {
        let computed = self.phase_for(health.fraction());
        if computed <= self.phase {
            return None;
        }

        let change = PhaseChanged {
            entity,
            from: self.phase,
            to: computed,
        };
        self.phase = computed;
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> Entity {
        Entity::from_raw(7)
    }

    #[test]
    fn test_phase_for_thresholds() {
        let phase = BossPhase::new(0.5, 0.2);
        assert_eq!(phase.phase_for(1.0), 1);
        assert_eq!(phase.phase_for(0.51), 1);
        assert_eq!(phase.phase_for(0.5), 2);
        assert_eq!(phase.phase_for(0.21), 2);
        assert_eq!(phase.phase_for(0.2), 3);
        assert_eq!(phase.phase_for(0.0), 3);
    }

    #[test]
    fn test_single_crossing_fires_once() {
        let mut phase = BossPhase::new(0.5, 0.2);
        let mut health = Health::new(1000);

        health.take_damage(501, 0.0);
        let change = phase.update(entity(), &health);
        assert_eq!(change, Some(PhaseChanged { entity: entity(), from: 1, to: 2 }));

        // Ещё урон в пределах фазы 2 - без уведомления
        health.take_damage(10, 0.0);
        assert_eq!(phase.update(entity(), &health), None);
        assert_eq!(phase.phase, 2);
    }

    #[test]
    fn test_double_crossing_resolves_to_phase_three() {
        let mut phase = BossPhase::new(0.5, 0.2);
        let mut health = Health::new(1000);

        health.take_damage(850, 0.0);
        let change = phase.update(entity(), &health);
        assert_eq!(change, Some(PhaseChanged { entity: entity(), from: 1, to: 3 }));
    }

    #[test]
    fn test_heal_never_regresses_phase() {
        let mut phase = BossPhase::new(0.5, 0.2);
        let mut health = Health::new(1000);

        health.take_damage(600, 0.0);
        phase.update(entity(), &health);
        assert_eq!(phase.phase, 2);

        health.heal(1000);
        assert_eq!(phase.update(entity(), &health), None);
        assert_eq!(phase.phase, 2);
    }

    #[test]
    fn test_phase_sequence_is_monotonic() {
        let mut phase = BossPhase::new(0.5, 0.2);
        let mut health = Health::new(1000);
        let mut seen = vec![phase.phase];

        while health.is_alive() {
            health.take_damage(37, 0.0);
            phase.update(entity(), &health);
            seen.push(phase.phase);
        }

        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen.contains(&2));
        assert_eq!(*seen.last().unwrap(), 3);
    }
}

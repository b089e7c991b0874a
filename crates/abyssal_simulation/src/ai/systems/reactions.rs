//! AI reaction systems (boss phase escalation).

use bevy::prelude::*;

use crate::ai::{AIConfig, AttackCooldown, AttackPattern};
use crate::combat::PhaseChanged;
use crate::config::PhaseModifiers;
use crate::logger;

/// Модификаторы эскалации по фазам (индекс 0 = переход в фазу 2)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PhaseEscalation {
    pub steps: Vec<PhaseModifiers>,
    /// Последняя применённая фаза
    pub applied_phase: u8,
}

impl PhaseEscalation {
    pub fn new(phase2: PhaseModifiers, phase3: PhaseModifiers) -> Self {
        Self {
            steps: vec![phase2, phase3],
            applied_phase: 1,
        }
    }

    /// Шаги, которые ещё не применены на пути к `phase` (по порядку)
    pub fn pending_steps(&mut self, phase: u8) -> Vec<(u8, PhaseModifiers)> {
        let mut pending = Vec::new();
        while self.applied_phase < phase {
            let next = self.applied_phase + 1;
            if let Some(step) = self.steps.get(usize::from(next) - 2) {
                pending.push((next, *step));
            }
            self.applied_phase = next;
        }
        pending
    }
}

/// System: эскалация атак босса по PhaseChanged
///
/// Каждый шаг применяется ровно один раз. Переход 1 → 3 одним ударом
/// применяет шаг фазы 2, затем шаг фазы 3.
pub fn escalate_on_phase_change(
    mut phase_events: EventReader<PhaseChanged>,
    mut bosses: Query<(
        &mut PhaseEscalation,
        &mut AttackPattern,
        &mut AIConfig,
        Option<&mut AttackCooldown>,
    )>,
) {
    for event in phase_events.read() {
        let Ok((mut escalation, mut pattern, mut config, mut gate)) = bosses.get_mut(event.entity) else {
            continue;
        };

        for (phase, modifiers) in escalation.pending_steps(event.to) {
            pattern.0.escalate(&modifiers);
            config.move_speed *= modifiers.move_speed_scale;
            if let Some(gate) = gate.as_mut() {
                gate.0.duration *= modifiers.cooldown_scale;
            }
            logger::log_info(&format!(
                "⚡ {:?} escalated to phase {} (move speed {:.2})",
                event.entity, phase, config.move_speed
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BossConfig;

    #[test]
    fn test_pending_steps_once_each() {
        let boss = BossConfig::default();
        let mut escalation = PhaseEscalation::new(boss.phase2, boss.phase3);

        let steps = escalation.pending_steps(3);
        assert_eq!(steps.iter().map(|(p, _)| *p).collect::<Vec<_>>(), vec![2, 3]);

        // Повтор - ничего
        assert!(escalation.pending_steps(3).is_empty());
        assert!(escalation.pending_steps(2).is_empty());
    }
}

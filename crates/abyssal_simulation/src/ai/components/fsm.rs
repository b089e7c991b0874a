//! FSM AI components (state machine, config, cached player target).

use bevy::prelude::*;

use crate::combat::CooldownGate;
use crate::config::ArchetypeConfig;

/// AI FSM состояния (общая форма для всех архетипов)
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Ждём игрока в detection radius
    #[default]
    Idle,

    /// Поворот к игроку + движение вперёд
    Pursuing,

    /// Идёт attack sequence (AttackPattern), не re-entrant
    Attacking,

    /// Пауза после атаки
    Cooldown {
        /// Сколько осталось (секунды)
        remaining: f32,
    },

    /// HP == 0, AI отключен
    Dead,
}

impl AIState {
    pub fn is_dead(&self) -> bool {
        matches!(self, AIState::Dead)
    }
}

/// Стиль движения в Pursuing
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum PursuitStyle {
    /// Идём в текущем facing, пока дальше stop_distance (изогнутая траектория)
    Advance { stop_distance: f32 },
    /// Держим дистанцию [min, max]: ближе - отходим, дальше - подходим
    Standoff {
        min_distance: f32,
        max_distance: f32,
        /// Время сглаживания скорости (0 = мгновенно)
        smoothing: f32,
    },
}

/// Параметры AI
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AIConfig {
    pub detection_radius: f32,
    pub attack_radius: f32,
    pub move_speed: f32,
    /// Скорость поворота (slerp-фактор в секунду)
    pub turn_rate: f32,
    pub pursuit: PursuitStyle,
    /// Дистанция проверки препятствия перед движением (0 = не проверяем)
    pub obstacle_check_distance: f32,
    /// Продолжать поворачиваться к игроку во время атаки и cooldown
    pub track_while_attacking: bool,
    /// Продолжать движение во время атаки и cooldown
    pub move_while_attacking: bool,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            detection_radius: 3.0,
            attack_radius: 1.2,
            move_speed: 2.0,
            turn_rate: 5.0,
            pursuit: PursuitStyle::Advance { stop_distance: 0.8 },
            obstacle_check_distance: 0.0,
            track_while_attacking: true,
            move_while_attacking: false,
        }
    }
}

impl AIConfig {
    pub fn from_archetype(base: &ArchetypeConfig, pursuit: PursuitStyle) -> Self {
        Self {
            detection_radius: base.detection_radius,
            attack_radius: base.attack_radius,
            move_speed: base.move_speed,
            turn_rate: base.turn_rate,
            pursuit,
            obstacle_check_distance: base.obstacle_check_distance,
            ..Self::default()
        }
    }

    pub fn moving_while_attacking(mut self) -> Self {
        self.move_while_attacking = true;
        self
    }
}

/// Кэш ссылки на игрока (поиск повторяется не чаще search интервала)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerTarget {
    pub player: Option<Entity>,
    /// Позиция игрока на этом тике (или последняя известная)
    pub last_known_position: Option<Vec3>,
    pub search: CooldownGate,
    /// Уже сообщили о пропаже игрока (не спамим fault каждый интервал)
    pub reported_missing: bool,
}

impl PlayerTarget {
    pub fn new(search_interval: f32) -> Self {
        Self {
            search: CooldownGate::new(search_interval),
            ..Self::default()
        }
    }
}

/// Gate между стартами атак
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AttackCooldown(pub CooldownGate);

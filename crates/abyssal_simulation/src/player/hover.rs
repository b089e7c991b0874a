//! Hover: парение на энергии
//!
//! Энергия - ограниченный ресурс [0, max]: тратится пока hover активен,
//! восстанавливается пока нет. За один тик - либо drain, либо regen.
//! Активация только с земли и при energy > threshold; на 0 hover выключается.

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{Player, Velocity};
use crate::config::HoverConfig;
use crate::logger;
use crate::player::{MotorState, PlayerInput, PlayerMotor};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HoverEnergy {
    pub current: f32,
    pub max: f32,
    /// Расход в секунду
    pub drain_rate: f32,
    /// Восстановление в секунду
    pub regen_rate: f32,
    pub activation_threshold: f32,
}

impl HoverEnergy {
    pub fn from_config(config: &HoverConfig) -> Self {
        let max = config.max_energy.max(0.0);
        Self {
            current: max,
            max,
            drain_rate: config.drain_rate,
            regen_rate: config.regen_rate,
            activation_threshold: config.activation_threshold,
        }
    }

    pub fn can_activate(&self) -> bool {
        self.current > self.activation_threshold
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn drain(&mut self, delta: f32) {
        self.current = (self.current - self.drain_rate * delta).max(0.0);
    }

    pub fn regen(&mut self, delta: f32) {
        self.current = (self.current + self.regen_rate * delta).min(self.max);
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }
}

/// Параметры парения + состояние пружины
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hover {
    /// Подскок при активации
    pub height: f32,
    pub bob_amplitude: f32,
    /// Частота покачивания (Гц)
    pub bob_frequency: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    /// Множитель горизонтальной скорости относительно ходьбы
    pub speed_multiplier: f32,
    /// Высота, вокруг которой качаемся
    pub anchor_height: f32,
    pub elapsed: f32,
}

impl Hover {
    pub fn from_config(config: &HoverConfig) -> Self {
        Self {
            height: config.height,
            bob_amplitude: config.bob_amplitude,
            bob_frequency: config.bob_frequency,
            spring_stiffness: config.spring_stiffness,
            spring_damping: config.spring_damping,
            speed_multiplier: config.speed_multiplier,
            anchor_height: 0.0,
            elapsed: 0.0,
        }
    }

    /// Целевая высота с синусоидальным покачиванием
    pub fn target_height(&self) -> f32 {
        self.anchor_height
            + self.bob_amplitude * (std::f32::consts::TAU * self.bob_frequency * self.elapsed).sin()
    }

    /// Пружина к целевой высоте (ускорение по y)
    pub fn spring_acceleration(&self, height: f32, vertical_velocity: f32) -> f32 {
        self.spring_stiffness * (self.target_height() - height) - self.spring_damping * vertical_velocity
    }
}

/// Event: hover включён/выключен
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverToggled {
    pub entity: Entity,
    pub active: bool,
}

/// Система: энергия + активация/деактивация + пружина
pub fn update_hover(
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut Velocity,
            &mut PlayerMotor,
            &PlayerInput,
            &mut HoverEnergy,
            &mut Hover,
        ),
        (With<Player>, Without<Dead>),
    >,
    mut toggled_events: EventWriter<HoverToggled>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut velocity, mut motor, input, mut energy, mut hover) in players.iter_mut() {
        if motor.state == MotorState::Hovering {
            let released = !input.hover;
            if !released {
                energy.drain(delta);
            }

            if released || energy.is_depleted() {
                // Гравитация снова действует, ground check решит Grounded/Airborne
                motor.state = MotorState::Airborne;
                toggled_events.write(HoverToggled { entity, active: false });
                logger::log(&format!("Player: hover off (energy {:.1})", energy.current));
                continue;
            }

            hover.elapsed += delta;
            let acceleration = hover.spring_acceleration(transform.translation.y, velocity.0.y);
            velocity.0.y += acceleration * delta;
            continue;
        }

        energy.regen(delta);

        if input.hover && motor.state == MotorState::Grounded && energy.can_activate() {
            transform.translation.y += hover.height;
            hover.anchor_height = transform.translation.y;
            hover.elapsed = 0.0;
            velocity.0.y = 0.0;
            motor.state = MotorState::Hovering;
            toggled_events.write(HoverToggled { entity, active: true });
            logger::log(&format!("Player: hover on (energy {:.1})", energy.current));
        }
    }
}

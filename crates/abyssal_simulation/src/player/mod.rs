//! Player domain - движение, hover, оружие, бонусы наград
//!
//! Содержит:
//! - PlayerMotor + PlayerInput (ground probe, walk/run/jump, gravity)
//! - Hover + HoverEnergy (парение на ограниченной энергии)
//! - PlayerGun (пули, масштабируются PlayerStats)
//! - PlayerStats + ApplyReward (аддитивные бонусы за сессию)

use bevy::prelude::*;

use crate::SimSet;

pub mod hover;
pub mod motor;
pub mod stats;
pub mod weapon;

pub use hover::{Hover, HoverEnergy, HoverToggled};
pub use motor::{MotorState, PlayerInput, PlayerMotor};
pub use stats::{ApplyReward, PlayerStats, RewardItem, RewardKind};
pub use weapon::{PlayerGun, ShotFired};

/// Player Plugin
///
/// Порядок выполнения (SimSet::Player, до AI):
/// 1. ground_check - Grounded/Airborne по probe
/// 2. update_hover - энергия, активация, пружина
/// 3. player_locomotion - input → velocity → position
/// 4. fire_player_gun - пули
///
/// Награды применяются в SimSet::Reaction.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_sim_sets(app);

        app.init_resource::<PlayerStats>()
            .add_event::<ApplyReward>()
            .add_event::<HoverToggled>()
            .add_event::<ShotFired>()
            .register_type::<PlayerMotor>()
            .register_type::<PlayerInput>()
            .register_type::<HoverEnergy>();

        app.add_systems(
            FixedUpdate,
            (
                motor::ground_check,
                hover::update_hover,
                motor::player_locomotion,
                weapon::fire_player_gun,
            )
                .chain()
                .in_set(SimSet::Player),
        );

        app.add_systems(FixedUpdate, stats::apply_rewards.in_set(SimSet::Reaction));
    }
}

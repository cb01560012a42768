pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{CharacterController, ControlRotation, Player, Velocity};

use crate::game_state::AppState;
use systems::{
    apply_gravity, apply_velocity, jump_input, log_sprint_transitions, movement_input,
    update_body_yaw,
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                movement_input,
                jump_input,
                apply_gravity,
                apply_velocity,
                update_body_yaw,
                log_sprint_transitions,
            )
                .chain()
                .run_if(in_state(AppState::InGame)),
        );
    }
}

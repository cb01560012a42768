pub mod systems;

use bevy::prelude::*;

pub use systems::FollowCamera;

use crate::game_state::AppState;
use systems::{
    disable_control, enable_control, follow_camera, gamepad_look, grab_cursor, mouse_look,
    release_cursor, toggle_pause,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::InGame), (grab_cursor, enable_control))
            .add_systems(OnEnter(AppState::Paused), (release_cursor, disable_control))
            .add_systems(Update, toggle_pause)
            .add_systems(
                Update,
                (mouse_look, gamepad_look, follow_camera)
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

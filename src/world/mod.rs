pub mod setup;

use bevy::prelude::*;

use setup::setup_world;

// Arena dimensions
pub const ARENA_WIDTH: f32 = 24.0;
pub const ARENA_DEPTH: f32 = 24.0;
pub const WALL_HEIGHT: f32 = 3.0;
pub const WALL_THICKNESS: f32 = 0.3;

// Arena bounds for collision (slightly less than actual size to account for walls)
pub const ARENA_HALF_WIDTH: f32 = 11.7;
pub const ARENA_HALF_DEPTH: f32 = 11.7;

pub const GROUND_LEVEL: f32 = 0.0;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_world);
    }
}

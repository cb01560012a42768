// Plugin crate for the character controller; the binary is a thin demo host.
pub mod camera;
pub mod game_state;
pub mod player;
pub mod settings;
pub mod world;

pub use camera::{CameraPlugin, FollowCamera};
pub use game_state::AppState;
pub use player::{CharacterController, ControlRotation, Player, PlayerPlugin, Velocity};
pub use settings::Settings;
pub use world::WorldPlugin;

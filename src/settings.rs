use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunable controller settings, loaded from a JSON file next to the binary.
#[derive(Resource, Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub controls: ControlSettings,
    pub movement: MovementSettings,
    pub camera: CameraSettings,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct ControlSettings {
    /// Gamepad turn rate in degrees per second at full stick deflection.
    pub turn_rate: f32,
    /// Gamepad look-up rate in degrees per second at full stick deflection.
    pub look_up_rate: f32,
    /// Mouse sensitivity in radians per count.
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    /// Stick deflections below this magnitude are ignored.
    pub gamepad_deadzone: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            turn_rate: 45.0,
            look_up_rate: 45.0,
            mouse_sensitivity: 0.003,
            invert_y: false,
            gamepad_deadzone: 0.12,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct MovementSettings {
    /// Ground speed in meters per second.
    pub walk_speed: f32,
    /// Upward velocity applied when a jump starts.
    pub jump_velocity: f32,
    /// Steering authority while airborne, 0.0..=1.0.
    pub air_control: f32,
    pub gravity: f32,
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    /// Turn the body toward the velocity direction instead of slaving it to
    /// the control yaw.
    pub orient_to_movement: bool,
    /// Body turn rate in degrees per second when orienting to movement.
    pub orient_rate: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            jump_velocity: 6.0,
            air_control: 0.2,
            gravity: 9.8,
            capsule_radius: 0.42,
            capsule_half_height: 0.96,
            orient_to_movement: false,
            orient_rate: 540.0,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct CameraSettings {
    /// Distance from the pivot to the camera along the negated look direction.
    pub boom_length: f32,
    /// Pivot height above the player origin.
    pub boom_height: f32,
    /// Pitch limit in radians, just under a quarter turn.
    pub pitch_limit: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            boom_length: 3.0,
            boom_height: 0.6,
            pitch_limit: 1.5,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or malformed. Unknown or absent fields keep their defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_controller_constants() {
        let settings = Settings::default();
        assert_eq!(settings.controls.turn_rate, 45.0);
        assert_eq!(settings.controls.look_up_rate, 45.0);
        assert_eq!(settings.movement.walk_speed, 6.0);
        assert_eq!(settings.movement.jump_velocity, 6.0);
        assert_eq!(settings.movement.air_control, 0.2);
        assert_eq!(settings.movement.orient_rate, 540.0);
        assert!(!settings.movement.orient_to_movement);
        assert_eq!(settings.camera.boom_length, 3.0);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"movement":{"walk_speed":8.5}}"#).unwrap();
        assert_eq!(settings.movement.walk_speed, 8.5);
        assert_eq!(settings.movement.jump_velocity, 6.0);
        assert_eq!(settings.controls.turn_rate, 45.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load_or_default("does-not-exist.json");
        assert_eq!(settings.movement.walk_speed, 6.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("strafe-settings-malformed.json");
        fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.controls.mouse_sensitivity, 0.003);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.controls.invert_y = true;
        settings.camera.boom_length = 4.5;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back.controls.invert_y);
        assert_eq!(back.camera.boom_length, 4.5);
    }
}

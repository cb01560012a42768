use bevy::prelude::*;

use crate::settings::ControlSettings;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Velocity component for physics-based movement.
#[derive(Component, Default)]
pub struct Velocity(pub Vec3);

/// The logical player viewpoint: yaw and pitch of the control rotation.
///
/// Look input accumulates here; the body and the follow camera read from it.
#[derive(Component)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for ControlRotation {
    fn default() -> Self {
        Self {
            yaw: std::f32::consts::PI, // Start facing -Z direction
            pitch: 0.0,
        }
    }
}

/// Input-facing state of the character controller.
#[derive(Component)]
pub struct CharacterController {
    /// Gates whether controller input currently affects the character.
    pub control_enabled: bool,
    /// Whether a jump was explicitly initiated by input. Distinct from the
    /// physical airborne state.
    jump_initiated: bool,
    /// Gamepad turn rate in degrees per second.
    pub turn_rate: f32,
    /// Gamepad look-up rate in degrees per second.
    pub look_up_rate: f32,
}

impl Default for CharacterController {
    fn default() -> Self {
        Self {
            control_enabled: true,
            jump_initiated: false,
            turn_rate: 45.0,
            look_up_rate: 45.0,
        }
    }
}

impl CharacterController {
    pub fn from_settings(controls: &ControlSettings) -> Self {
        Self {
            turn_rate: controls.turn_rate,
            look_up_rate: controls.look_up_rate,
            ..default()
        }
    }

    /// Marks a jump as explicitly initiated. The jump press handler is wired
    /// directly to this, bypassing [`set_jumping`](Self::set_jumping).
    pub fn begin_jump(&mut self) {
        self.jump_initiated = true;
    }

    /// Clears the initiated-jump flag when the jump input is released.
    pub fn end_jump(&mut self) {
        self.jump_initiated = false;
    }

    /// Guarded setter: mutates only on change and reports whether a jump
    /// should fire, which is only the false-to-true transition.
    pub fn set_jumping(&mut self, new_jumping: bool) -> bool {
        if new_jumping == self.jump_initiated {
            return false;
        }
        self.jump_initiated = new_jumping;
        new_jumping
    }

    /// Whether a jump was explicitly initiated by input.
    pub fn is_initiated_jump(&self) -> bool {
        self.jump_initiated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_setter_fires_only_on_rising_edge() {
        let mut controller = CharacterController::default();
        assert!(controller.set_jumping(true));
        assert!(controller.is_initiated_jump());
        // Already jumping: no change, no trigger.
        assert!(!controller.set_jumping(true));
        // Falling edge clears the flag but never triggers a jump.
        assert!(!controller.set_jumping(false));
        assert!(!controller.is_initiated_jump());
    }

    #[test]
    fn wired_handlers_track_the_flag() {
        let mut controller = CharacterController::default();
        controller.begin_jump();
        assert!(controller.is_initiated_jump());
        controller.end_jump();
        assert!(!controller.is_initiated_jump());
        // begin_jump is not edge-guarded; calling it twice stays initiated.
        controller.begin_jump();
        controller.begin_jump();
        assert!(controller.is_initiated_jump());
    }

    #[test]
    fn rates_come_from_settings() {
        let controls = ControlSettings {
            turn_rate: 90.0,
            look_up_rate: 30.0,
            ..Default::default()
        };
        let controller = CharacterController::from_settings(&controls);
        assert_eq!(controller.turn_rate, 90.0);
        assert_eq!(controller.look_up_rate, 30.0);
        assert!(controller.control_enabled);
        assert!(!controller.is_initiated_jump());
    }
}

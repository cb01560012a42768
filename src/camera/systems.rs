use bevy::{input::mouse::MouseMotion, prelude::*, window::CursorGrabMode};

use crate::game_state::AppState;
use crate::player::{CharacterController, ControlRotation, Player};
use crate::settings::Settings;

/// Marker for the follow camera entity driven by the control rotation.
#[derive(Component)]
pub struct FollowCamera;

/// Delta for a rate device: the analog value scaled by a degrees-per-second
/// rate and the frame delta.
pub fn rate_delta(value: f32, rate_deg_per_sec: f32, dt: f32) -> f32 {
    value * rate_deg_per_sec.to_radians() * dt
}

/// Delta for an absolute device: the raw count scaled by sensitivity only.
/// The frame delta does not participate.
pub fn mouse_delta(count: f32, sensitivity: f32) -> f32 {
    count * sensitivity
}

/// Forward raw mouse deltas into the control rotation.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    settings: Res<Settings>,
    windows: Query<&Window>,
    mut query: Query<&mut ControlRotation, With<Player>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    // Only process mouse look when the cursor is grabbed.
    if window.cursor_options.grab_mode == CursorGrabMode::None {
        mouse_motion.clear();
        return;
    }

    let Ok(mut control) = query.get_single_mut() else {
        return;
    };

    let pitch_sign = if settings.controls.invert_y { 1.0 } else { -1.0 };
    for event in mouse_motion.read() {
        control.yaw -= mouse_delta(event.delta.x, settings.controls.mouse_sensitivity);
        control.pitch += pitch_sign * mouse_delta(event.delta.y, settings.controls.mouse_sensitivity);
    }

    // Clamp pitch to prevent flipping
    let limit = settings.camera.pitch_limit;
    control.pitch = control.pitch.clamp(-limit, limit);
}

/// Forward right-stick deflection into the control rotation, scaled by the
/// controller's turn/look rates and the frame delta.
pub fn gamepad_look(
    time: Res<Time>,
    gamepads: Query<&Gamepad>,
    settings: Res<Settings>,
    mut query: Query<(&CharacterController, &mut ControlRotation), With<Player>>,
) {
    let Ok((controller, mut control)) = query.get_single_mut() else {
        return;
    };
    if !controller.control_enabled {
        return;
    }

    let mut turn_value = 0.0;
    let mut look_value = 0.0;
    for gamepad in gamepads.iter() {
        if let Some(x) = gamepad.get(GamepadAxis::RightStickX) {
            if x.abs() > settings.controls.gamepad_deadzone {
                turn_value += x;
            }
        }
        if let Some(y) = gamepad.get(GamepadAxis::RightStickY) {
            if y.abs() > settings.controls.gamepad_deadzone {
                look_value += y;
            }
        }
    }
    if turn_value == 0.0 && look_value == 0.0 {
        return;
    }

    let dt = time.delta_secs();
    control.yaw -= rate_delta(turn_value, controller.turn_rate, dt);
    let pitch_sign = if settings.controls.invert_y { -1.0 } else { 1.0 };
    control.pitch += pitch_sign * rate_delta(look_value, controller.look_up_rate, dt);

    let limit = settings.camera.pitch_limit;
    control.pitch = control.pitch.clamp(-limit, limit);
}

/// Place the camera a boom length behind the pivot along the negated look
/// direction, rotating with the control rotation.
pub fn follow_camera(
    settings: Res<Settings>,
    players: Query<(&Transform, &ControlRotation), (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<&mut Transform, With<FollowCamera>>,
) {
    let Ok((player, control)) = players.get_single() else {
        return;
    };
    let Ok(mut camera) = cameras.get_single_mut() else {
        return;
    };

    let rotation = Quat::from_euler(EulerRot::YXZ, control.yaw, control.pitch, 0.0);
    let look = rotation * Vec3::NEG_Z;
    let pivot = player.translation + Vec3::Y * settings.camera.boom_height;
    camera.translation = pivot - look * settings.camera.boom_length;
    camera.rotation = rotation;
}

pub fn grab_cursor(mut windows: Query<&mut Window>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Confined;
    window.cursor_options.visible = false;
}

pub fn release_cursor(mut windows: Query<&mut Window>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::None;
    window.cursor_options.visible = true;
}

pub fn toggle_pause(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        match state.get() {
            AppState::InGame => next_state.set(AppState::Paused),
            AppState::Paused => next_state.set(AppState::InGame),
        }
    }
}

pub fn enable_control(mut query: Query<&mut CharacterController, With<Player>>) {
    for mut controller in query.iter_mut() {
        controller.control_enabled = true;
    }
}

pub fn disable_control(mut query: Query<&mut CharacterController, With<Player>>) {
    for mut controller in query.iter_mut() {
        controller.control_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn rate_delta_scales_with_frame_time() {
        let base = rate_delta(1.0, 45.0, 0.016);
        let double = rate_delta(1.0, 45.0, 0.032);
        assert!((double - 2.0 * base).abs() < 1e-7);
        // Full deflection for one second covers the whole rate.
        assert!((rate_delta(1.0, 45.0, 1.0) - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn rate_delta_scales_with_input_magnitude() {
        let half = rate_delta(0.5, 45.0, 0.016);
        let full = rate_delta(1.0, 45.0, 0.016);
        assert!((full - 2.0 * half).abs() < 1e-7);
    }

    #[test]
    fn mouse_delta_ignores_frame_time() {
        // Same count, same delta, regardless of how long the frame took.
        assert_eq!(mouse_delta(10.0, 0.003), 0.03);
        assert_eq!(mouse_delta(-4.0, 0.003), -0.012);
    }
}

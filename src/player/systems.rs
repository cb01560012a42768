use bevy::prelude::*;

use super::components::{CharacterController, ControlRotation, Player, Velocity};
use crate::settings::Settings;
use crate::world::{ARENA_HALF_DEPTH, ARENA_HALF_WIDTH, GROUND_LEVEL};

/// Planar velocity alignment above which the character counts as sprinting.
const SPRINT_ALIGNMENT: f32 = 0.8;

/// Horizontal-plane movement basis for a control yaw: pitch and roll are
/// zeroed, leaving unit forward/right axes on the XZ plane.
pub fn yaw_basis(yaw: f32) -> (Vec3, Vec3) {
    let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
    (forward, right)
}

/// Wrap an angle to the (-PI, PI] range.
pub fn wrap_angle(mut angle: f32) -> f32 {
    while angle > std::f32::consts::PI {
        angle -= std::f32::consts::TAU;
    }
    while angle <= -std::f32::consts::PI {
        angle += std::f32::consts::TAU;
    }
    angle
}

/// Blend the horizontal velocity toward the wish velocity. Steering has full
/// authority on the ground and only `air_control` authority while airborne.
pub fn steer(current: Vec3, wish: Vec3, grounded: bool, air_control: f32) -> Vec3 {
    let authority = if grounded {
        1.0
    } else {
        air_control.clamp(0.0, 1.0)
    };
    current.lerp(wish, authority)
}

/// One step of body yaw: slaved to the control yaw, or turned toward the
/// velocity direction at `orient_rate_deg` per second when orienting to
/// movement.
pub fn face_step(
    body_yaw: f32,
    control_yaw: f32,
    velocity: Vec3,
    orient_to_movement: bool,
    orient_rate_deg: f32,
    dt: f32,
) -> f32 {
    if !orient_to_movement {
        return control_yaw;
    }
    let planar = Vec3::new(velocity.x, 0.0, velocity.z);
    if planar.length_squared() < 1e-4 {
        return body_yaw;
    }
    let target = (-planar.x).atan2(-planar.z);
    let diff = wrap_angle(target - body_yaw);
    let step = (orient_rate_deg.to_radians() * dt).min(diff.abs());
    wrap_angle(body_yaw + diff.signum() * step)
}

/// Aim rotation expressed in body-local space: yaw offset wrapped to ±PI and
/// pitch, for an animation or HUD layer in a consuming game.
pub fn aim_offsets(body_yaw: f32, control_yaw: f32, control_pitch: f32) -> Vec2 {
    Vec2::new(wrap_angle(control_yaw - body_yaw), control_pitch)
}

/// Whether the planar velocity is non-zero and aligned with the body forward
/// direction.
pub fn is_sprinting(velocity: Vec3, body_yaw: f32) -> bool {
    let planar = Vec3::new(velocity.x, 0.0, velocity.z);
    let Some(dir) = planar.try_normalize() else {
        return false;
    };
    let (forward, _) = yaw_basis(body_yaw);
    dir.dot(forward) > SPRINT_ALIGNMENT
}

pub fn is_grounded(translation: Vec3, capsule_half_height: f32) -> bool {
    translation.y <= GROUND_LEVEL + capsule_half_height + 0.01
}

/// Map forward/right input onto the horizontal plane of the control yaw and
/// hand the wish velocity to the movement integration.
pub fn movement_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    settings: Res<Settings>,
    mut query: Query<
        (
            &Transform,
            &ControlRotation,
            &CharacterController,
            &mut Velocity,
        ),
        With<Player>,
    >,
) {
    // No associated control rotation means no movement.
    let Ok((transform, control, controller, mut velocity)) = query.get_single_mut() else {
        return;
    };

    let mut forward_value = 0.0;
    let mut right_value = 0.0;

    if keyboard_input.pressed(KeyCode::KeyW) {
        forward_value += 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyS) {
        forward_value -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyD) {
        right_value += 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyA) {
        right_value -= 1.0;
    }

    for gamepad in gamepads.iter() {
        if let Some(y) = gamepad.get(GamepadAxis::LeftStickY) {
            if y.abs() > settings.controls.gamepad_deadzone {
                forward_value += y;
            }
        }
        if let Some(x) = gamepad.get(GamepadAxis::LeftStickX) {
            if x.abs() > settings.controls.gamepad_deadzone {
                right_value += x;
            }
        }
    }

    // Normalize diagonal movement
    let input = Vec2::new(right_value, forward_value).clamp_length_max(1.0);

    let wish = if controller.control_enabled && input != Vec2::ZERO {
        let (forward, right) = yaw_basis(control.yaw);
        (forward * input.y + right * input.x) * settings.movement.walk_speed
    } else {
        Vec3::ZERO
    };

    let grounded = is_grounded(transform.translation, settings.movement.capsule_half_height);
    let steered = steer(
        Vec3::new(velocity.0.x, 0.0, velocity.0.z),
        wish,
        grounded,
        settings.movement.air_control,
    );
    velocity.0.x = steered.x;
    velocity.0.z = steered.z;
}

/// Jump press marks the jump as initiated and fires it when grounded; the
/// release clears the flag. Both are wired directly, bypassing the guarded
/// setter on the controller.
pub fn jump_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    settings: Res<Settings>,
    mut query: Query<(&Transform, &mut CharacterController, &mut Velocity), With<Player>>,
) {
    let Ok((transform, mut controller, mut velocity)) = query.get_single_mut() else {
        return;
    };

    let pressed = keyboard_input.just_pressed(KeyCode::Space)
        || gamepads.iter().any(|g| g.just_pressed(GamepadButton::South));
    let released = keyboard_input.just_released(KeyCode::Space)
        || gamepads.iter().any(|g| g.just_released(GamepadButton::South));

    if pressed {
        controller.begin_jump();
        // The jump itself only fires from the ground.
        if is_grounded(transform.translation, settings.movement.capsule_half_height) {
            velocity.0.y = settings.movement.jump_velocity;
        }
    }
    if released {
        controller.end_jump();
    }
}

pub fn apply_gravity(
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&Transform, &mut Velocity), With<Player>>,
) {
    let Ok((transform, mut velocity)) = query.get_single_mut() else {
        return;
    };

    if !is_grounded(transform.translation, settings.movement.capsule_half_height) {
        velocity.0.y -= settings.movement.gravity * time.delta_secs();
    }
}

pub fn apply_velocity(
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&mut Transform, &mut Velocity), With<Player>>,
) {
    let Ok((mut transform, mut velocity)) = query.get_single_mut() else {
        return;
    };

    transform.translation += velocity.0 * time.delta_secs();

    // Ground collision
    let floor = GROUND_LEVEL + settings.movement.capsule_half_height;
    if transform.translation.y < floor {
        transform.translation.y = floor;
        velocity.0.y = 0.0;
    }

    // Wall collisions (keep the capsule inside the arena)
    let x_bound = ARENA_HALF_WIDTH - settings.movement.capsule_radius;
    let z_bound = ARENA_HALF_DEPTH - settings.movement.capsule_radius;
    transform.translation.x = transform.translation.x.clamp(-x_bound, x_bound);
    transform.translation.z = transform.translation.z.clamp(-z_bound, z_bound);
}

/// Keep the body yaw in step with the control rotation (or the velocity
/// direction when orienting to movement).
pub fn update_body_yaw(
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&mut Transform, &ControlRotation, &Velocity), With<Player>>,
) {
    let Ok((mut transform, control, velocity)) = query.get_single_mut() else {
        return;
    };

    let (body_yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
    let yaw = face_step(
        body_yaw,
        control.yaw,
        velocity.0,
        settings.movement.orient_to_movement,
        settings.movement.orient_rate,
        time.delta_secs(),
    );
    transform.rotation = Quat::from_rotation_y(yaw);
}

/// Emit a debug line whenever the sprint-alignment state flips.
pub fn log_sprint_transitions(
    mut last: Local<Option<bool>>,
    query: Query<(&Transform, &Velocity), With<Player>>,
) {
    let Ok((transform, velocity)) = query.get_single() else {
        return;
    };

    let (body_yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
    let sprinting = is_sprinting(velocity.0, body_yaw);
    if *last != Some(sprinting) {
        if last.is_some() {
            debug!("sprint alignment: {}", sprinting);
        }
        *last = Some(sprinting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn yaw_basis_projects_unit_axes() {
        let (forward, right) = yaw_basis(0.0);
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
        assert!((right - Vec3::X).length() < 1e-6);

        // Quarter turn left: forward swings to -X.
        let (forward, right) = yaw_basis(FRAC_PI_2);
        assert!((forward - Vec3::NEG_X).length() < 1e-6);
        assert!((right - Vec3::NEG_Z).length() < 1e-6);

        // Pitch/roll never leak into the basis.
        assert_eq!(forward.y, 0.0);
        assert_eq!(right.y, 0.0);
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert!((wrap_angle(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!((wrap_angle(-3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(wrap_angle(0.5), 0.5);
    }

    #[test]
    fn steering_has_full_authority_on_the_ground() {
        let wish = Vec3::new(6.0, 0.0, 0.0);
        let steered = steer(Vec3::ZERO, wish, true, 0.2);
        assert!((steered - wish).length() < 1e-6);
    }

    #[test]
    fn steering_is_reduced_while_airborne() {
        let wish = Vec3::new(6.0, 0.0, 0.0);
        let steered = steer(Vec3::ZERO, wish, false, 0.2);
        assert!((steered.x - 1.2).abs() < 1e-6);
        // Existing momentum is mostly kept.
        let steered = steer(Vec3::new(6.0, 0.0, 0.0), Vec3::ZERO, false, 0.2);
        assert!((steered.x - 4.8).abs() < 1e-6);
    }

    #[test]
    fn body_yaw_is_slaved_to_control_yaw_by_default() {
        let yaw = face_step(0.0, 1.2, Vec3::ZERO, false, 540.0, 0.016);
        assert_eq!(yaw, 1.2);
    }

    #[test]
    fn orient_to_movement_turns_toward_velocity() {
        // Moving along -X; target yaw is a quarter turn left of -Z.
        let velocity = Vec3::new(-1.0, 0.0, 0.0);
        let dt = 0.01;
        let yaw = face_step(0.0, 0.0, velocity, true, 540.0, dt);
        let expected_step = 540.0_f32.to_radians() * dt;
        assert!((yaw - expected_step).abs() < 1e-5);

        // A long step snaps to the target without overshooting.
        let yaw = face_step(0.0, 0.0, velocity, true, 540.0, 1.0);
        assert!((yaw - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn orient_to_movement_holds_yaw_when_stationary() {
        let yaw = face_step(0.7, 0.0, Vec3::ZERO, true, 540.0, 0.016);
        assert_eq!(yaw, 0.7);
    }

    #[test]
    fn aim_offsets_wrap_across_the_seam() {
        let offsets = aim_offsets(PI - 0.1, -(PI - 0.1), 0.3);
        assert!((offsets.x - 0.2).abs() < 1e-5);
        assert_eq!(offsets.y, 0.3);
    }

    #[test]
    fn sprinting_requires_forward_aligned_velocity() {
        // Facing -Z (yaw 0): forward velocity counts, lateral does not.
        assert!(is_sprinting(Vec3::new(0.0, 0.0, -5.0), 0.0));
        assert!(!is_sprinting(Vec3::new(5.0, 0.0, 0.0), 0.0));
        assert!(!is_sprinting(Vec3::ZERO, 0.0));
        // Vertical motion alone is not sprinting.
        assert!(!is_sprinting(Vec3::new(0.0, 6.0, 0.0), 0.0));
    }

    #[test]
    fn grounded_check_uses_capsule_half_height() {
        assert!(is_grounded(Vec3::new(0.0, 0.96, 0.0), 0.96));
        assert!(!is_grounded(Vec3::new(0.0, 1.5, 0.0), 0.96));
    }
}

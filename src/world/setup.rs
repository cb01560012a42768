use bevy::prelude::*;

use crate::camera::FollowCamera;
use crate::player::{CharacterController, ControlRotation, Player, Velocity};
use crate::settings::Settings;

use super::{ARENA_DEPTH, ARENA_WIDTH, WALL_HEIGHT, WALL_THICKNESS};

pub fn setup_world(
    mut commands: Commands,
    settings: Res<Settings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Materials
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.4, 0.3),
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.75, 0.72, 0.68),
        ..default()
    });
    let obstacle_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.45, 0.6),
        ..default()
    });
    let body_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.4, 0.7),
        ..default()
    });

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ARENA_WIDTH, ARENA_DEPTH))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Perimeter walls
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ARENA_WIDTH, WALL_HEIGHT, WALL_THICKNESS))),
        MeshMaterial3d(wall_material.clone()),
        Transform::from_xyz(0.0, WALL_HEIGHT / 2.0, -ARENA_DEPTH / 2.0),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ARENA_WIDTH, WALL_HEIGHT, WALL_THICKNESS))),
        MeshMaterial3d(wall_material.clone()),
        Transform::from_xyz(0.0, WALL_HEIGHT / 2.0, ARENA_DEPTH / 2.0),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_DEPTH))),
        MeshMaterial3d(wall_material.clone()),
        Transform::from_xyz(-ARENA_WIDTH / 2.0, WALL_HEIGHT / 2.0, 0.0),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_DEPTH))),
        MeshMaterial3d(wall_material),
        Transform::from_xyz(ARENA_WIDTH / 2.0, WALL_HEIGHT / 2.0, 0.0),
    ));

    // A few obstacles to strafe around
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(2.0, 1.2, 2.0))),
        MeshMaterial3d(obstacle_material.clone()),
        Transform::from_xyz(-4.0, 0.6, -3.0),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 2.2, 1.0))),
        MeshMaterial3d(obstacle_material.clone()),
        Transform::from_xyz(3.5, 1.1, 2.0),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(3.0, 0.5, 1.5))),
        MeshMaterial3d(obstacle_material),
        Transform::from_xyz(5.0, 0.25, -5.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Player body: a capsule sized from the controller settings
    let radius = settings.movement.capsule_radius;
    let half_height = settings.movement.capsule_half_height;
    commands.spawn((
        Player,
        CharacterController::from_settings(&settings.controls),
        ControlRotation::default(),
        Velocity::default(),
        Mesh3d(meshes.add(Capsule3d::new(radius, 2.0 * (half_height - radius)))),
        MeshMaterial3d(body_material),
        Transform::from_xyz(0.0, half_height, 6.0),
    ));

    // Follow camera; the boom systems place it every frame
    commands.spawn((
        FollowCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.0, 10.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
    ));
}

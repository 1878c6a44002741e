//! World setup systems for camera, lighting, ground and the stats panel

use bevy::prelude::*;

use super::components::{Ground, MainCamera, SimWorldResource, StatsText};

/// System to setup the world environment (ground, lighting, camera)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
) {
    let config = &sim_world.0.config;
    let extent_x = config.grid_width as f32 * config.tile_size;
    let extent_z = config.grid_height as f32 * config.tile_size;
    let camera_height = extent_x.max(extent_z) * 1.2;

    // Spawn a 3D camera with top-down view
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, camera_height, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    // Spawn a directional light
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Spawn a ground plane slightly larger than the grid
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(extent_x + 4.0, extent_z + 4.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));
}

/// System to setup the economy stats panel in the top-left corner
pub fn setup_stats_ui(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Stock: 0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.8, 0.2)),
                StatsText::Stock,
            ));
            parent.spawn((
                Text::new("Delivered: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.3, 0.9, 0.3)),
                StatsText::Delivered,
            ));
            parent.spawn((
                Text::new("Vehicles: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                StatsText::Vehicles,
            ));
            parent.spawn((
                Text::new("Unreachable: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.5, 0.5)),
                StatsText::Unreachable,
            ));
        });
}

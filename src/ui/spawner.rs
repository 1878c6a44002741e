//! Systems for spawning visual entities from simulation state

use bevy::prelude::*;

use super::components::{
    ConsumerLink, EntityMappings, ProducerLink, SimSynced, SimWorldResource, StockIndicator,
};
use crate::simulation::{ConsumerId, ProducerId, SimConfig, SimWorld, TileCoord, TileKind};

const TILE_HEIGHT: f32 = 0.1;
const ROAD_HEIGHT: f32 = 0.14;
const PRODUCER_SIZE: f32 = 0.8;
const CONSUMER_SIZE: f32 = 0.7;

/// System to create initial visual entities from simulation state
pub fn spawn_initial_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
) {
    let world = &sim_world.0;

    spawn_tiles(&mut commands, &mut meshes, &mut materials, world);
    spawn_producers(
        &mut commands,
        &mut meshes,
        &mut materials,
        world,
        &mut mappings,
    );
    spawn_consumers(
        &mut commands,
        &mut meshes,
        &mut materials,
        world,
        &mut mappings,
    );
}

/// Spawn flat slabs for every carved and road tile
fn spawn_tiles(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    world: &SimWorld,
) {
    let config = &world.config;

    // tile geometry never changes after generation, so meshes and materials
    // are shared across all slabs
    let carved_mesh = meshes.add(Cuboid::new(config.tile_size, TILE_HEIGHT, config.tile_size));
    let road_mesh = meshes.add(Cuboid::new(
        config.tile_size * 0.9,
        ROAD_HEIGHT,
        config.tile_size * 0.9,
    ));
    let carved_material = materials.add(Color::srgb(0.45, 0.42, 0.38));
    let road_material = materials.add(Color::srgb(0.75, 0.65, 0.35));

    for y in 0..world.grid.height() {
        for x in 0..world.grid.width() {
            let coord = TileCoord::new(x, y);
            let (mesh, material, height) = match world.grid.get(coord) {
                Some(TileKind::Blocked) => {
                    (carved_mesh.clone(), carved_material.clone(), TILE_HEIGHT)
                }
                Some(TileKind::Road) => (road_mesh.clone(), road_material.clone(), ROAD_HEIGHT),
                // buildings get their own visuals; empty tiles stay bare ground
                _ => continue,
            };

            let (world_x, world_z) = config.to_world(coord);
            commands.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(Vec3::new(world_x, height / 2.0, world_z)),
            ));
        }
    }
}

fn spawn_producers(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    world: &SimWorld,
    mappings: &mut ResMut<EntityMappings>,
) {
    for (index, producer) in world.producers.iter().enumerate() {
        spawn_producer_visual(
            commands,
            meshes,
            materials,
            &world.config,
            ProducerId(index),
            producer.coord,
            mappings,
        );
    }
}

/// Spawn a single producer visual with its stock indicator
fn spawn_producer_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    config: &SimConfig,
    id: ProducerId,
    coord: TileCoord,
    mappings: &mut ResMut<EntityMappings>,
) {
    let producer_color = Color::srgb(0.4, 0.5, 0.8);
    let (world_x, world_z) = config.to_world(coord);

    let entity = commands
        .spawn((
            SimSynced,
            ProducerLink(id),
            Mesh3d(meshes.add(Cuboid::new(PRODUCER_SIZE, PRODUCER_SIZE, PRODUCER_SIZE))),
            MeshMaterial3d(materials.add(producer_color)),
            Transform::from_translation(Vec3::new(world_x, PRODUCER_SIZE / 2.0, world_z)),
        ))
        .id();
    mappings.producers.insert(id, entity);

    // Add stock indicator
    let indicator = commands
        .spawn((
            StockIndicator,
            Mesh3d(meshes.add(Sphere::new(0.22))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.3, 0.3))),
            Transform::from_translation(Vec3::new(0.0, PRODUCER_SIZE + 0.4, 0.0)),
        ))
        .id();
    commands.entity(entity).add_child(indicator);
}

fn spawn_consumers(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    world: &SimWorld,
    mappings: &mut ResMut<EntityMappings>,
) {
    for (index, consumer) in world.consumers.iter().enumerate() {
        spawn_consumer_visual(
            commands,
            meshes,
            materials,
            &world.config,
            ConsumerId(index),
            consumer.coord,
            mappings,
        );
    }
}

/// Spawn a single consumer visual with its stock indicator
fn spawn_consumer_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    config: &SimConfig,
    id: ConsumerId,
    coord: TileCoord,
    mappings: &mut ResMut<EntityMappings>,
) {
    let consumer_color = Color::srgb(0.8, 0.4, 0.6);
    let (world_x, world_z) = config.to_world(coord);

    let entity = commands
        .spawn((
            SimSynced,
            ConsumerLink(id),
            Mesh3d(meshes.add(Cuboid::new(CONSUMER_SIZE, CONSUMER_SIZE, CONSUMER_SIZE))),
            MeshMaterial3d(materials.add(consumer_color)),
            Transform::from_translation(Vec3::new(world_x, CONSUMER_SIZE / 2.0, world_z)),
        ))
        .id();
    mappings.consumers.insert(id, entity);

    // Add stock indicator
    let indicator = commands
        .spawn((
            StockIndicator,
            Mesh3d(meshes.add(Sphere::new(0.2))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.3, 0.3))),
            Transform::from_translation(Vec3::new(0.0, CONSUMER_SIZE + 0.4, 0.0)),
        ))
        .id();
    commands.entity(entity).add_child(indicator);
}

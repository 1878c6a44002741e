//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    ConsumerLink, EntityMappings, ProducerLink, SimSynced, SimWorldResource, StatsText,
    StockIndicator, VehicleLink,
};
use crate::simulation::VehicleId;

/// System to run simulation tick
pub fn tick_simulation(time: Res<Time>, mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick(time.delta_secs());
}

/// System to sync vehicle visuals from simulation state
///
/// Vehicles snap tile to tile in the core; the transform interpolates
/// between the departed and current tile over the movement interval.
pub fn sync_vehicles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(Entity, &VehicleLink, &mut Transform)>,
) {
    let world = &sim_world.0;
    const VEHICLE_WIDTH: f32 = 0.3;
    const VEHICLE_HEIGHT: f32 = 0.35;

    // Update existing vehicles and track which ones still exist
    let mut existing_vehicle_ids: std::collections::HashSet<VehicleId> =
        std::collections::HashSet::new();

    for (entity, link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = world.vehicles.iter().find(|vehicle| vehicle.id == link.0) {
            existing_vehicle_ids.insert(link.0);

            let (from_x, from_z) = world.config.to_world(vehicle.prev_coord);
            let (to_x, to_z) = world.config.to_world(vehicle.coord);
            let progress = ((world.time - vehicle.time_last_moved)
                / world.config.movement_interval)
                .clamp(0.0, 1.0);

            let from = Vec3::new(from_x, VEHICLE_HEIGHT, from_z);
            let to = Vec3::new(to_x, VEHICLE_HEIGHT, to_z);
            transform.translation = from.lerp(to, progress);
        } else {
            // Vehicle no longer exists in simulation, despawn
            commands.entity(entity).despawn();
            mappings.vehicles.remove(&link.0);
        }
    }

    // Spawn new vehicles
    for vehicle in &world.vehicles {
        if !existing_vehicle_ids.contains(&vehicle.id) {
            let (world_x, world_z) = world.config.to_world(vehicle.coord);
            let entity = commands
                .spawn((
                    SimSynced,
                    VehicleLink(vehicle.id),
                    Mesh3d(meshes.add(Cuboid::new(
                        VEHICLE_WIDTH,
                        VEHICLE_WIDTH * 0.7,
                        VEHICLE_WIDTH * 1.5,
                    ))),
                    MeshMaterial3d(materials.add(Color::srgb(0.8, 0.2, 0.2))),
                    Transform::from_translation(Vec3::new(world_x, VEHICLE_HEIGHT, world_z)),
                ))
                .id();
            mappings.vehicles.insert(vehicle.id, entity);
        }
    }
}

/// System to update producer stock indicators
pub fn update_producer_indicators(
    sim_world: Res<SimWorldResource>,
    producer_query: Query<(&ProducerLink, &Children)>,
    mut indicator_query: Query<&mut MeshMaterial3d<StandardMaterial>, With<StockIndicator>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (link, children) in producer_query.iter() {
        if let Some(producer) = sim_world.0.producers.get(link.0 .0) {
            for child in children.iter() {
                if let Ok(material_handle) = indicator_query.get_mut(child) {
                    if let Some(material) = materials.get_mut(&material_handle.0) {
                        // Gold when stock is waiting, dark gray when empty
                        if producer.available_products > 0 {
                            material.base_color = Color::srgb(1.0, 0.8, 0.0);
                        } else {
                            material.base_color = Color::srgb(0.3, 0.3, 0.3);
                        }
                    }
                }
            }
        }
    }
}

/// System to update consumer stock indicators
pub fn update_consumer_indicators(
    sim_world: Res<SimWorldResource>,
    consumer_query: Query<(&ConsumerLink, &Children)>,
    mut indicator_query: Query<&mut MeshMaterial3d<StandardMaterial>, With<StockIndicator>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (link, children) in consumer_query.iter() {
        if let Some(consumer) = sim_world.0.consumers.get(link.0 .0) {
            for child in children.iter() {
                if let Ok(material_handle) = indicator_query.get_mut(child) {
                    if let Some(material) = materials.get_mut(&material_handle.0) {
                        // Red when cut off from every producer, green once
                        // something was delivered, dark gray otherwise
                        if consumer.producer.is_none() {
                            material.base_color = Color::srgb(1.0, 0.2, 0.2);
                        } else if consumer.available_products > 0 {
                            material.base_color = Color::srgb(0.0, 1.0, 0.0);
                        } else {
                            material.base_color = Color::srgb(0.3, 0.3, 0.3);
                        }
                    }
                }
            }
        }
    }
}

/// System to update the economy stats text in the UI panel
pub fn update_stats_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&StatsText, &mut Text)>,
) {
    let summary = sim_world.0.economy_summary();

    for (stat, mut text) in text_query.iter_mut() {
        match stat {
            StatsText::Stock => {
                **text = format!("Stock: {}", summary.available_products);
            }
            StatsText::Delivered => {
                **text = format!("Delivered: {}", summary.delivered_products);
            }
            StatsText::Vehicles => {
                **text = format!("Vehicles: {}", summary.vehicles_en_route);
            }
            StatsText::Unreachable => {
                **text = format!("Unreachable: {}", summary.unassociated_consumers);
            }
        }
    }
}

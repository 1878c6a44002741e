//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{ConsumerId, ProducerId, SimWorld, VehicleId};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        let mut world = SimWorld::create_test_world();
        world.establish_associations();
        Self(world)
    }
}

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Resource to control camera movement settings
#[derive(Resource)]
pub struct CameraSettings {
    pub movement_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 20.0,
            zoom_speed: 15.0,
        }
    }
}

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// Links a Bevy entity to a simulation producer
#[derive(Component)]
pub struct ProducerLink(pub ProducerId);

/// Links a Bevy entity to a simulation consumer
#[derive(Component)]
pub struct ConsumerLink(pub ConsumerId);

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Component to mark the visual stock indicator entity above a building
#[derive(Component)]
pub struct StockIndicator;

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub producers: HashMap<ProducerId, Entity>,
    pub consumers: HashMap<ConsumerId, Entity>,
    pub vehicles: HashMap<VehicleId, Entity>,
}

/// Marker for economy stats UI text elements
#[derive(Component)]
pub enum StatsText {
    /// Unclaimed stock sitting at producers
    Stock,
    /// Units delivered to consumers
    Delivered,
    /// Vehicles on the road
    Vehicles,
    /// Consumers with no reachable producer
    Unreachable,
}

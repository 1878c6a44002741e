//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimWorld` and renders it using Bevy's 3D graphics.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, SimWorldResource};

use components::CameraSettings;
use input::{handle_camera_movement, handle_input};
use spawner::spawn_initial_visuals;
use sync::{
    sync_vehicles, tick_simulation, update_consumer_indicators, update_producer_indicators,
    update_stats_text,
};
use world::{setup_stats_ui, setup_world};

/// Plugin to register all UI systems
pub struct FreightSimUIPlugin;

impl Plugin for FreightSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<EntityMappings>()
            .init_resource::<CameraSettings>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_initial_visuals.after(setup_world),
                    setup_stats_ui,
                ),
            )
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    sync_vehicles,
                    update_producer_indicators,
                    update_consumer_indicators,
                    update_stats_text,
                    handle_input,
                    handle_camera_movement,
                ),
            );
    }
}

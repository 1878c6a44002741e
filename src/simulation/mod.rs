//! Standalone freight simulation module
//!
//! This module contains all the core logistics simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod associations;
mod building;
mod config;
mod events;
mod generator;
mod grid;
mod pathfinding;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use building::{Consumer, ConsumerSlot, Producer};
#[allow(unused_imports)]
pub use config::SimConfig;
#[allow(unused_imports)]
pub use events::SimEvent;
#[allow(unused_imports)]
pub use generator::Generation;
#[allow(unused_imports)]
pub use grid::Grid;
#[allow(unused_imports)]
pub use pathfinding::{octile_distance, Pathfinder};
#[allow(unused_imports)]
pub use types::{
    BuildingKind, BuildingPlacement, ConsumerId, Direction, ProducerId, TileCoord, TileKind,
    VehicleId, DIAGONAL_MOVE_COST, STRAIGHT_MOVE_COST,
};
#[allow(unused_imports)]
pub use vehicle::{Vehicle, VehicleStep};
pub use world::{EconomySummary, SimWorld};

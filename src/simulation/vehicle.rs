//! Vehicle movement logic
//!
//! Standalone implementation that doesn't depend on Bevy. A vehicle walks
//! its consumer's stored path to the producer, turns around and walks back.

use super::types::{BuildingKind, ConsumerId, ProducerId, TileCoord, VehicleId};

/// Result of a vehicle update, telling the world what to settle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStep {
    /// Movement interval not yet elapsed
    Waiting,
    /// Advanced one tile along the path
    Moved,
    /// Reached the producer end; stock counters need settling
    ReachedProducer,
    /// Back at the consumer; the delivery is complete
    ReachedConsumer,
}

/// A vehicle carrying one claimed unit along a consumer's path
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub consumer: ConsumerId,
    pub producer: ProducerId,
    /// Which end of the path the vehicle is heading for
    pub target: BuildingKind,
    /// Current position within the owning consumer's path
    pub path_index: usize,
    /// Tile departed on the last step, kept for host-side interpolation
    pub prev_coord: TileCoord,
    pub coord: TileCoord,
    pub time_last_moved: f32,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        consumer: ConsumerId,
        producer: ProducerId,
        start: TileCoord,
        time: f32,
    ) -> Self {
        Self {
            id,
            consumer,
            producer,
            target: BuildingKind::Producer,
            path_index: 0,
            prev_coord: start,
            coord: start,
            time_last_moved: time,
        }
    }

    /// Advance along the path if the movement interval has elapsed
    ///
    /// `path` is the owning consumer's stored path; index 0 is the consumer
    /// tile and the last index is the producer tile. Arrivals cost one
    /// interval like a regular step.
    pub fn update(&mut self, time: f32, movement_interval: f32, path: &[TileCoord]) -> VehicleStep {
        if time < self.time_last_moved + movement_interval {
            return VehicleStep::Waiting;
        }

        let step = match self.target {
            BuildingKind::Producer => {
                let next = self.path_index + 1;
                if next < path.len() {
                    self.move_to(path[next], next);
                    VehicleStep::Moved
                } else {
                    self.prev_coord = self.coord;
                    self.target = BuildingKind::Consumer;
                    VehicleStep::ReachedProducer
                }
            }
            BuildingKind::Consumer => {
                if self.path_index > 0 {
                    let next = self.path_index - 1;
                    self.move_to(path[next], next);
                    VehicleStep::Moved
                } else {
                    self.prev_coord = self.coord;
                    VehicleStep::ReachedConsumer
                }
            }
        };

        self.time_last_moved = time;
        step
    }

    fn move_to(&mut self, coord: TileCoord, index: usize) {
        self.prev_coord = self.coord;
        self.coord = coord;
        self.path_index = index;
    }
}

//! Main simulation world that ties everything together
//!
//! This is the entry point for running the freight simulation
//! without any Bevy dependencies.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::associations;
use super::building::{Consumer, Producer};
use super::config::SimConfig;
use super::events::SimEvent;
use super::generator::{self, Generation};
use super::grid::Grid;
use super::types::{
    BuildingKind, BuildingPlacement, ConsumerId, ProducerId, TileCoord, TileKind, VehicleId,
};
use super::vehicle::{Vehicle, VehicleStep};

/// Aggregate stock counters for summaries and host status displays
#[derive(Debug, Clone, Default)]
pub struct EconomySummary {
    /// Unclaimed units sitting at producers
    pub available_products: u32,
    /// Units delivered to consumers
    pub delivered_products: u32,
    pub vehicles_en_route: usize,
    /// Consumers with no reachable producer
    pub unassociated_consumers: usize,
}

/// The main simulation world
pub struct SimWorld {
    pub config: SimConfig,

    /// The tile grid, including painted roads
    pub grid: Grid,

    /// All producers; ids are indices into this arena
    pub producers: Vec<Producer>,

    /// All consumers; ids are indices into this arena
    pub consumers: Vec<Consumer>,

    /// Live vehicles in spawn order
    pub vehicles: Vec<Vehicle>,

    /// Next vehicle id to assign; never reused
    next_vehicle_id: usize,

    /// Simulation time
    pub time: f32,
}

impl SimWorld {
    /// Generate a world from the configuration using a thread-local RNG
    pub fn generate(config: SimConfig) -> Result<Self> {
        let generation = generator::generate(&config, &mut rand::rng())?;
        Self::from_generation(config, generation)
    }

    /// Generate a world with a seeded RNG for reproducible runs
    pub fn generate_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let generation = generator::generate(&config, &mut rng)?;
        Self::from_generation(config, generation)
    }

    fn from_generation(config: SimConfig, generation: Generation) -> Result<Self> {
        Self::from_parts(config, generation.grid, generation.placements)
    }

    /// Build a world from an existing grid and building placements
    ///
    /// Building tiles are written into the grid here, so hand-built grids
    /// only need their carved layout. Placements outside the grid are a
    /// configuration error.
    pub fn from_parts(
        config: SimConfig,
        mut grid: Grid,
        placements: Vec<BuildingPlacement>,
    ) -> Result<Self> {
        let mut producers = Vec::new();
        let mut consumers = Vec::new();

        for placement in placements {
            if !grid.in_bounds(placement.coord) {
                bail!(
                    "{:?} placement at ({}, {}) is outside the {}x{} grid",
                    placement.kind,
                    placement.coord.x,
                    placement.coord.y,
                    grid.width(),
                    grid.height()
                );
            }

            match placement.kind {
                BuildingKind::Producer => {
                    grid.set(placement.coord, TileKind::Producer);
                    producers.push(Producer::new(placement.coord, config.production_interval));
                }
                BuildingKind::Consumer => {
                    grid.set(placement.coord, TileKind::Consumer);
                    consumers.push(Consumer::new(placement.coord));
                }
            }
        }

        Ok(Self {
            config,
            grid,
            producers,
            consumers,
            vehicles: Vec::new(),
            next_vehicle_id: 0,
            time: 0.0,
        })
    }

    /// Create a small fully-carved test world with one producer and one
    /// consumer on opposite corners of the open field
    pub fn create_test_world() -> Self {
        let config = SimConfig {
            grid_width: 10,
            grid_height: 10,
            producer_count: 1,
            consumer_count: 1,
            ..SimConfig::default()
        };

        let mut grid = Grid::new(config.grid_width, config.grid_height);
        for y in 0..config.grid_height {
            for x in 0..config.grid_width {
                grid.set(TileCoord::new(x, y), TileKind::Blocked);
            }
        }

        let placements = vec![
            BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(2, 2)),
            BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(7, 7)),
        ];

        Self::from_parts(config, grid, placements).expect("test world placements are in bounds")
    }

    /// Run the association pass linking every consumer to a producer
    ///
    /// Meant to run once, after generation and before ticking.
    pub fn establish_associations(&mut self) -> Vec<SimEvent> {
        associations::establish(&mut self.grid, &mut self.producers, &mut self.consumers)
    }

    /// Main simulation tick: producers, then dispatch, then vehicles
    ///
    /// Passes always run in arena order, so a given world and tick sequence
    /// produces the same events every time.
    pub fn tick(&mut self, delta_secs: f32) -> Vec<SimEvent> {
        self.time += delta_secs;

        let mut events = Vec::new();
        self.update_producers(&mut events);
        self.dispatch_vehicles(&mut events);
        self.update_vehicles(&mut events);
        events
    }

    /// Let every producer emit and allocate units
    fn update_producers(&mut self, events: &mut Vec<SimEvent>) {
        let time = self.time;

        for (index, producer) in self.producers.iter_mut().enumerate() {
            if producer.update(time) {
                events.push(SimEvent::ProducerStockChanged {
                    producer: ProducerId(index),
                    available: producer.available_products,
                });
            }
        }
    }

    /// Spawn a vehicle for every consumer whose slot holds an unclaimed unit
    fn dispatch_vehicles(&mut self, events: &mut Vec<SimEvent>) {
        let time = self.time;

        for index in 0..self.consumers.len() {
            let consumer = &self.consumers[index];
            let Some(producer_id) = consumer.producer else {
                continue;
            };

            let consumer_id = ConsumerId(index);
            let coord = consumer.coord;
            let slot_index = consumer.slot_index;

            let producer = &mut self.producers[producer_id.0];
            let slot = &mut producer.slots[slot_index];
            debug_assert!(slot.consumer == consumer_id, "slot ring out of sync");

            if slot.available_products > slot.reserved_products {
                slot.reserved_products += 1;

                let id = VehicleId(self.next_vehicle_id);
                self.next_vehicle_id += 1;
                self.vehicles
                    .push(Vehicle::new(id, consumer_id, producer_id, coord, time));

                events.push(SimEvent::VehicleSpawned {
                    vehicle: id,
                    consumer: consumer_id,
                    producer: producer_id,
                    coord,
                });
            }
        }
    }

    /// Advance every vehicle and settle arrivals
    fn update_vehicles(&mut self, events: &mut Vec<SimEvent>) {
        let time = self.time;
        let movement_interval = self.config.movement_interval;
        let mut completed: Vec<VehicleId> = Vec::new();

        for vehicle in &mut self.vehicles {
            let path = self.consumers[vehicle.consumer.0].path.as_slice();

            match vehicle.update(time, movement_interval, path) {
                VehicleStep::Waiting => {}
                VehicleStep::Moved => {
                    events.push(SimEvent::VehicleMoved {
                        vehicle: vehicle.id,
                        coord: vehicle.coord,
                    });
                }
                VehicleStep::ReachedProducer => {
                    // the claimed unit leaves the producer with the vehicle
                    let producer = &mut self.producers[vehicle.producer.0];
                    producer.available_products = producer.available_products.saturating_sub(1);

                    let slot = producer.slot_for_mut(vehicle.consumer);
                    debug_assert!(slot.is_some(), "arrived vehicle has no slot on its producer");
                    if let Some(slot) = slot {
                        debug_assert!(slot.reserved_products > 0);
                        slot.available_products = slot.available_products.saturating_sub(1);
                        slot.reserved_products = slot.reserved_products.saturating_sub(1);
                    }

                    events.push(SimEvent::VehicleArrived {
                        vehicle: vehicle.id,
                        at: BuildingKind::Producer,
                    });
                    events.push(SimEvent::ProducerStockChanged {
                        producer: vehicle.producer,
                        available: producer.available_products,
                    });
                }
                VehicleStep::ReachedConsumer => {
                    let consumer = &mut self.consumers[vehicle.consumer.0];
                    consumer.available_products += 1;

                    events.push(SimEvent::VehicleArrived {
                        vehicle: vehicle.id,
                        at: BuildingKind::Consumer,
                    });
                    events.push(SimEvent::ConsumerStockChanged {
                        consumer: vehicle.consumer,
                        available: consumer.available_products,
                    });
                    completed.push(vehicle.id);
                }
            }
        }

        self.vehicles
            .retain(|vehicle| !completed.contains(&vehicle.id));
    }

    /// Aggregate stock counters across the whole economy
    pub fn economy_summary(&self) -> EconomySummary {
        EconomySummary {
            available_products: self
                .producers
                .iter()
                .map(|producer| producer.available_products)
                .sum(),
            delivered_products: self
                .consumers
                .iter()
                .map(|consumer| consumer.available_products)
                .sum(),
            vehicles_en_route: self.vehicles.len(),
            unassociated_consumers: self
                .consumers
                .iter()
                .filter(|consumer| consumer.producer.is_none())
                .count(),
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Freight Simulation Summary ===");
        println!("Time: {:.2}s", self.time);
        println!(
            "Grid: {}x{} ({} carved, {} road)",
            self.grid.width(),
            self.grid.height(),
            self.grid.count(TileKind::Blocked),
            self.grid.count(TileKind::Road)
        );
        println!(
            "Producers: {}, Consumers: {}, Vehicles: {}",
            self.producers.len(),
            self.consumers.len(),
            self.vehicles.len()
        );
        println!();

        println!("--- Producers ---");
        for (index, producer) in self.producers.iter().enumerate() {
            println!(
                "  Producer {}: at ({}, {}), stock={}, consumers={}",
                index,
                producer.coord.x,
                producer.coord.y,
                producer.available_products,
                producer.slots.len()
            );
        }

        println!("--- Consumers ---");
        for (index, consumer) in self.consumers.iter().enumerate() {
            match consumer.producer {
                Some(producer_id) => println!(
                    "  Consumer {}: at ({}, {}), delivered={}, producer={}, path_len={}",
                    index,
                    consumer.coord.x,
                    consumer.coord.y,
                    consumer.available_products,
                    producer_id.0,
                    consumer.path.len()
                ),
                None => println!(
                    "  Consumer {}: at ({}, {}), delivered={}, no producer reachable",
                    index, consumer.coord.x, consumer.coord.y, consumer.available_products
                ),
            }
        }

        if !self.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in &self.vehicles {
                println!(
                    "  Vehicle {}: at ({}, {}), target={:?}, path_index={}",
                    vehicle.id.0,
                    vehicle.coord.x,
                    vehicle.coord.y,
                    vehicle.target,
                    vehicle.path_index
                );
            }
        }

        let summary = self.economy_summary();
        println!("--- Economy ---");
        println!("  Stock at producers: {}", summary.available_products);
        println!("  Delivered: {}", summary.delivered_products);
        println!("  Vehicles en route: {}", summary.vehicles_en_route);
        println!(
            "  Unreachable consumers: {}",
            summary.unassociated_consumers
        );
    }

    /// Draw a visual map of the world in the terminal
    pub fn draw_map(&self) {
        println!("\n=== World Map ===");
        println!("Legend: P=Producer, C=Consumer, #=Carved, +=Road, .=Empty, V=Vehicle");
        println!();

        for y in 0..self.grid.height() {
            let mut line = String::with_capacity(self.grid.width() as usize);
            for x in 0..self.grid.width() {
                let coord = TileCoord::new(x, y);
                let kind = self.grid.get(coord);
                let base = kind.map(|k| k.glyph()).unwrap_or(' ');

                // vehicles cover roads and carved tiles, never buildings
                let is_building = matches!(
                    kind,
                    Some(TileKind::Producer) | Some(TileKind::Consumer)
                );
                let has_vehicle = self.vehicles.iter().any(|vehicle| vehicle.coord == coord);

                line.push(if has_vehicle && !is_building { 'V' } else { base });
            }
            println!("{}", line);
        }
        println!();
    }
}

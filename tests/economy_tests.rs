//! Economy simulation validation tests
//!
//! Tick deltas here are exact binary fractions, so every timestamp
//! comparison in these tests is exact

use freight_sim::simulation::{
    BuildingKind, BuildingPlacement, ConsumerId, ConsumerSlot, Grid, Producer, ProducerId,
    SimConfig, SimEvent, SimWorld, TileCoord, TileKind, Vehicle, VehicleId, VehicleStep,
};

/// A grid with every tile carved
fn open_grid(width: i32, height: i32) -> Grid {
    let mut grid = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            grid.set(TileCoord::new(x, y), TileKind::Blocked);
        }
    }
    grid
}

fn open_world(width: i32, height: i32, placements: Vec<BuildingPlacement>) -> SimWorld {
    let config = SimConfig {
        grid_width: width,
        grid_height: height,
        ..SimConfig::default()
    };
    SimWorld::from_parts(config, open_grid(width, height), placements).unwrap()
}

#[test]
fn test_producer_waits_out_its_interval() {
    let mut producer = Producer::new(TileCoord::new(0, 0), 1.0);

    assert!(!producer.update(0.5));
    assert!(producer.update(1.0));
    assert!(!producer.update(1.5));
    assert!(producer.update(2.0));

    assert_eq!(producer.available_products, 2);
    // nothing allocated without slots
    assert!(producer.last_recipient_slot.is_none());
}

#[test]
fn test_producer_emits_one_unit_after_a_long_gap() {
    let mut producer = Producer::new(TileCoord::new(0, 0), 1.0);

    // ten intervals pass unseen; a single tick still emits a single unit
    assert!(producer.update(10.0));
    assert_eq!(producer.available_products, 1);

    // the timer snaps to the tick time rather than stepping one interval
    assert!(!producer.update(10.5));
    assert!(producer.update(11.0));
    assert_eq!(producer.available_products, 2);
}

#[test]
fn test_production_allocates_round_robin_from_slot_zero() {
    let mut producer = Producer::new(TileCoord::new(0, 0), 1.0);
    producer.slots.push(ConsumerSlot::new(ConsumerId(0)));
    producer.slots.push(ConsumerSlot::new(ConsumerId(1)));
    producer.slots.push(ConsumerSlot::new(ConsumerId(2)));

    let mut allocations = Vec::new();
    for step in 1..=7 {
        assert!(producer.update(step as f32));
        allocations.push(producer.last_recipient_slot.unwrap());
    }

    assert_eq!(allocations, vec![0, 1, 2, 0, 1, 2, 0]);
    assert_eq!(producer.available_products, 7);
    assert_eq!(producer.slots[0].available_products, 3);
    assert_eq!(producer.slots[1].available_products, 2);
    assert_eq!(producer.slots[2].available_products, 2);
}

#[test]
fn test_vehicle_steps_out_and_back() {
    let path = vec![
        TileCoord::new(0, 0),
        TileCoord::new(1, 0),
        TileCoord::new(2, 0),
    ];
    let mut vehicle = Vehicle::new(
        VehicleId(0),
        ConsumerId(0),
        ProducerId(0),
        path[0],
        0.0,
    );

    assert_eq!(vehicle.update(0.4, 0.5, &path), VehicleStep::Waiting);
    assert_eq!(vehicle.update(0.5, 0.5, &path), VehicleStep::Moved);
    assert_eq!(vehicle.coord, TileCoord::new(1, 0));
    assert_eq!(vehicle.prev_coord, TileCoord::new(0, 0));

    assert_eq!(vehicle.update(1.0, 0.5, &path), VehicleStep::Moved);
    assert_eq!(vehicle.update(1.5, 0.5, &path), VehicleStep::ReachedProducer);
    assert_eq!(vehicle.target, BuildingKind::Consumer);
    assert_eq!(vehicle.coord, TileCoord::new(2, 0));

    assert_eq!(vehicle.update(2.0, 0.5, &path), VehicleStep::Moved);
    assert_eq!(vehicle.update(2.5, 0.5, &path), VehicleStep::Moved);
    assert_eq!(vehicle.coord, TileCoord::new(0, 0));
    assert_eq!(vehicle.update(3.0, 0.5, &path), VehicleStep::ReachedConsumer);
}

#[test]
fn test_producer_without_consumers_accumulates() {
    let placements = vec![BuildingPlacement::new(
        BuildingKind::Producer,
        TileCoord::new(2, 2),
    )];
    let mut world = open_world(6, 6, placements);
    world.establish_associations();

    for _ in 0..10 {
        world.tick(1.0);
    }

    assert_eq!(world.producers[0].available_products, 10);
    assert!(world.vehicles.is_empty());
}

#[test]
fn test_zero_producers_never_dispatches() {
    let placements = vec![BuildingPlacement::new(
        BuildingKind::Consumer,
        TileCoord::new(3, 3),
    )];
    let mut world = open_world(6, 6, placements);

    let events = world.establish_associations();
    assert!(events
        .iter()
        .any(|event| matches!(event, SimEvent::ConsumerUnreachable { .. })));

    for _ in 0..20 {
        world.tick(0.5);
    }

    assert!(world.vehicles.is_empty());
    assert!(world.consumers[0].path.is_empty());
    assert_eq!(world.consumers[0].available_products, 0);
}

#[test]
fn test_dispatch_bounded_by_unreserved_stock() {
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(0, 0)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(4, 4)),
    ];
    let mut world = open_world(5, 5, placements);
    world.establish_associations();

    // one unit lands per tick, so exactly one vehicle can claim it
    for expected in 1..=3u32 {
        let events = world.tick(1.0);
        let spawned = events
            .iter()
            .filter(|event| matches!(event, SimEvent::VehicleSpawned { .. }))
            .count();
        assert_eq!(spawned, 1);
        assert_eq!(world.producers[0].slots[0].reserved_products, expected);
    }

    assert_eq!(world.vehicles.len(), 3);
}

#[test]
fn test_reservations_never_exceed_available() {
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(0, 0)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(2, 0)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(0, 2)),
    ];
    let mut world = open_world(8, 8, placements);
    world.establish_associations();

    for _ in 0..200 {
        world.tick(0.25);
        for producer in &world.producers {
            for slot in &producer.slots {
                assert!(slot.reserved_products <= slot.available_products);
            }
        }
    }

    let delivered: u32 = world
        .consumers
        .iter()
        .map(|consumer| consumer.available_products)
        .sum();
    assert!(delivered > 0);
}

#[test]
fn test_single_delivery_full_cycle() {
    // long production interval keeps a single injected unit in play
    let config = SimConfig {
        grid_width: 10,
        grid_height: 10,
        production_interval: 100.0,
        movement_interval: 0.5,
        ..SimConfig::default()
    };
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(2, 2)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(7, 7)),
    ];
    let mut world = SimWorld::from_parts(config, open_grid(10, 10), placements).unwrap();
    world.establish_associations();

    assert_eq!(world.consumers[0].path.len(), 6);

    world.producers[0].available_products = 1;
    world.producers[0].slots[0].available_products = 1;

    // the dispatch check claims the unit and spawns a vehicle at the consumer
    let events = world.tick(0.5);
    assert!(events
        .iter()
        .any(|event| matches!(event, SimEvent::VehicleSpawned { .. })));
    assert_eq!(world.vehicles.len(), 1);
    assert_eq!(world.vehicles[0].coord, TileCoord::new(7, 7));
    assert_eq!(world.vehicles[0].target, BuildingKind::Producer);
    assert_eq!(world.producers[0].slots[0].reserved_products, 1);

    // one path step per movement interval toward the producer
    for _ in 0..5 {
        world.tick(0.5);
    }
    assert_eq!(world.vehicles[0].path_index, 5);
    assert_eq!(world.vehicles[0].coord, TileCoord::new(2, 2));
    assert_eq!(world.vehicles[0].target, BuildingKind::Producer);

    // arrival settles the stock counters and turns the vehicle around
    let events = world.tick(0.5);
    assert!(events.iter().any(|event| matches!(
        event,
        SimEvent::VehicleArrived {
            at: BuildingKind::Producer,
            ..
        }
    )));
    assert_eq!(world.producers[0].available_products, 0);
    assert_eq!(world.producers[0].slots[0].available_products, 0);
    assert_eq!(world.producers[0].slots[0].reserved_products, 0);
    assert_eq!(world.vehicles.len(), 1);
    assert_eq!(world.vehicles[0].target, BuildingKind::Consumer);

    // back down the same path
    for _ in 0..5 {
        world.tick(0.5);
    }
    assert_eq!(world.vehicles[0].path_index, 0);
    assert_eq!(world.vehicles[0].coord, TileCoord::new(7, 7));

    // final arrival delivers the unit and destroys the vehicle
    let events = world.tick(0.5);
    assert!(events.iter().any(|event| matches!(
        event,
        SimEvent::VehicleArrived {
            at: BuildingKind::Consumer,
            ..
        }
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        SimEvent::ConsumerStockChanged { available: 1, .. }
    )));
    assert!(world.vehicles.is_empty());
    assert_eq!(world.consumers[0].available_products, 1);
}

#[test]
fn test_default_scenario_delivers() {
    let mut world = SimWorld::create_test_world();
    world.establish_associations();

    let mut ticks = 0;
    while world.consumers[0].available_products == 0 && ticks < 100 {
        world.tick(0.5);
        ticks += 1;
    }

    assert!(ticks < 100, "no delivery completed in 50 simulated seconds");
    assert!(world.consumers[0].available_products >= 1);
}

#[test]
#[should_panic(expected = "no slot on its producer")]
fn test_arrival_without_a_registered_slot_panics() {
    let mut world = SimWorld::create_test_world();
    world.establish_associations();

    // the consumer keeps its path but the producer has no slot for it
    world.producers[0].slots.clear();
    world.consumers[0].producer = None;

    let start = world.consumers[0].path[0];
    world.vehicles.push(Vehicle::new(
        VehicleId(0),
        ConsumerId(0),
        ProducerId(0),
        start,
        0.0,
    ));

    for _ in 0..10 {
        world.tick(0.5);
    }
}

#[test]
fn test_consumer_arena_matches_events() {
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(0, 0)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(2, 0)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(0, 2)),
    ];
    let mut world = open_world(6, 6, placements);
    let events = world.establish_associations();

    let associated: Vec<ConsumerId> = events
        .iter()
        .filter_map(|event| match event {
            SimEvent::AssociationEstablished { consumer, .. } => Some(*consumer),
            _ => None,
        })
        .collect();
    assert_eq!(associated, vec![ConsumerId(0), ConsumerId(1)]);

    for (index, consumer) in world.consumers.iter().enumerate() {
        assert_eq!(consumer.producer, Some(ProducerId(0)));
        assert_eq!(consumer.slot_index, index);
    }
}

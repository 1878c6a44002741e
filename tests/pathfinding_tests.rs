//! Pathfinding and association validation tests
//!
//! Grids here are built by hand so every expected cost is exact

use freight_sim::simulation::{
    octile_distance, BuildingKind, BuildingPlacement, ConsumerId, Grid, Pathfinder, ProducerId,
    SimConfig, SimEvent, SimWorld, TileCoord, TileKind,
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
fn test_octile_distance_axis_and_diagonal() {
    let origin = TileCoord::new(3, 3);

    assert_eq!(octile_distance(origin, origin), 0);
    assert_eq!(octile_distance(origin, TileCoord::new(4, 3)), 10);
    assert_eq!(octile_distance(origin, TileCoord::new(3, 2)), 10);
    assert_eq!(octile_distance(origin, TileCoord::new(4, 4)), 14);
    assert_eq!(octile_distance(origin, TileCoord::new(2, 2)), 14);

    // 5 diagonal moves plus 2 straight ones
    assert_eq!(
        octile_distance(TileCoord::new(0, 0), TileCoord::new(7, 5)),
        5 * 14 + 2 * 10
    );
}

#[test]
fn test_adjacent_tiles_cost_one_move() {
    let grid = open_grid(5, 5);
    let mut pathfinder = Pathfinder::new();

    let (cost, path) = pathfinder
        .find_path(&grid, TileCoord::new(1, 1), TileCoord::new(2, 1))
        .unwrap();
    assert_eq!(cost, 10);
    assert_eq!(path, vec![TileCoord::new(1, 1), TileCoord::new(2, 1)]);

    let (cost, path) = pathfinder
        .find_path(&grid, TileCoord::new(1, 1), TileCoord::new(2, 2))
        .unwrap();
    assert_eq!(cost, 14);
    assert_eq!(path, vec![TileCoord::new(1, 1), TileCoord::new(2, 2)]);
}

#[test]
fn test_open_field_path_is_optimal_and_contiguous() {
    let grid = open_grid(10, 10);
    let mut pathfinder = Pathfinder::new();
    let start = TileCoord::new(2, 2);
    let end = TileCoord::new(7, 7);

    let (cost, path) = pathfinder.find_path(&grid, start, end).unwrap();

    assert_eq!(cost, octile_distance(start, end));
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    assert_eq!(path.len(), 6);

    // every step moves to a neighbouring tile
    for pair in path.windows(2) {
        let dx = (pair[1].x - pair[0].x).abs();
        let dy = (pair[1].y - pair[0].y).abs();
        assert!(dx <= 1 && dy <= 1 && dx + dy > 0);
    }
}

#[test]
fn test_path_detours_around_uncarved_tiles() {
    let mut grid = open_grid(5, 5);
    // empty wall at x=2 with a single gap on the bottom row
    for y in 0..4 {
        grid.set(TileCoord::new(2, y), TileKind::Empty);
    }

    let start = TileCoord::new(0, 2);
    let end = TileCoord::new(4, 2);
    let mut pathfinder = Pathfinder::new();

    let (cost, path) = pathfinder.find_path(&grid, start, end).unwrap();

    assert!(cost > octile_distance(start, end));
    for tile in &path {
        assert_ne!(grid.get(*tile), Some(TileKind::Empty));
    }
    assert!(path.contains(&TileCoord::new(2, 4)));
}

#[test]
fn test_no_path_through_a_full_moat() {
    let mut grid = open_grid(5, 5);
    for y in 0..5 {
        grid.set(TileCoord::new(2, y), TileKind::Empty);
    }

    let mut pathfinder = Pathfinder::new();
    let result = pathfinder.find_path(&grid, TileCoord::new(0, 2), TileCoord::new(4, 2));
    assert!(result.is_none());
}

#[test]
fn test_association_picks_nearest_producer() {
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(0, 0)),
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(9, 9)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(7, 7)),
    ];
    let mut world = open_world(10, 10, placements);
    world.establish_associations();

    assert_eq!(world.consumers[0].producer, Some(ProducerId(1)));
    assert!(world.producers[0].slots.is_empty());
    assert_eq!(world.producers[1].slots.len(), 1);
    assert_eq!(world.producers[1].slots[0].consumer, ConsumerId(0));
}

#[test]
fn test_stored_path_runs_consumer_to_producer() {
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(2, 2)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(7, 7)),
    ];
    let mut world = open_world(10, 10, placements);
    world.establish_associations();

    let path = &world.consumers[0].path;
    assert_eq!(path.first(), Some(&TileCoord::new(7, 7)));
    assert_eq!(path.last(), Some(&TileCoord::new(2, 2)));
}

#[test]
fn test_intermediate_path_tiles_become_roads() {
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(2, 2)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(7, 7)),
    ];
    let mut world = open_world(10, 10, placements);
    world.establish_associations();

    let path = world.consumers[0].path.clone();
    assert!(path.len() > 2);

    // endpoints keep their building tiles, everything between is road
    assert_eq!(world.grid.get(path[0]), Some(TileKind::Consumer));
    assert_eq!(world.grid.get(path[path.len() - 1]), Some(TileKind::Producer));
    for tile in &path[1..path.len() - 1] {
        assert_eq!(world.grid.get(*tile), Some(TileKind::Road));
    }
    assert_eq!(world.grid.count(TileKind::Road), path.len() - 2);
}

#[test]
fn test_slots_register_in_consumer_order() {
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(0, 0)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(3, 0)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(0, 3)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(5, 5)),
    ];
    let mut world = open_world(8, 8, placements);
    world.establish_associations();

    let slots = &world.producers[0].slots;
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].consumer, ConsumerId(0));
    assert_eq!(slots[1].consumer, ConsumerId(1));
    assert_eq!(slots[2].consumer, ConsumerId(2));

    assert_eq!(world.consumers[0].slot_index, 0);
    assert_eq!(world.consumers[1].slot_index, 1);
    assert_eq!(world.consumers[2].slot_index, 2);
}

#[test]
fn test_unreachable_consumer_stays_unassociated() {
    let mut grid = open_grid(7, 7);
    for y in 0..7 {
        grid.set(TileCoord::new(3, y), TileKind::Empty);
    }

    let config = SimConfig {
        grid_width: 7,
        grid_height: 7,
        ..SimConfig::default()
    };
    let placements = vec![
        BuildingPlacement::new(BuildingKind::Producer, TileCoord::new(0, 3)),
        BuildingPlacement::new(BuildingKind::Consumer, TileCoord::new(6, 3)),
    ];
    let mut world = SimWorld::from_parts(config, grid, placements).unwrap();

    let events = world.establish_associations();
    assert!(events
        .iter()
        .any(|event| matches!(event, SimEvent::ConsumerUnreachable { .. })));

    assert!(world.consumers[0].producer.is_none());
    assert!(world.consumers[0].path.is_empty());
    assert!(world.producers[0].slots.is_empty());

    // an unassociated consumer never dispatches anything
    for _ in 0..40 {
        world.tick(0.5);
    }
    assert!(world.vehicles.is_empty());
    assert_eq!(world.consumers[0].available_products, 0);
}

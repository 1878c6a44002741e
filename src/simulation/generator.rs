//! Procedural grid generation
//!
//! A bounded random walk carves Blocked tiles over an Empty field, then
//! producer and consumer buildings are placed by rejection sampling on or
//! next to the carved tiles. Both phases have explicit bounds so no
//! configuration can hang generation.

use anyhow::{bail, Result};
use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use super::config::SimConfig;
use super::grid::Grid;
use super::types::{BuildingKind, BuildingPlacement, Direction, TileCoord, TileKind};

/// Placement attempts allowed per building, as a multiple of the grid area
const PLACEMENT_ATTEMPT_FACTOR: usize = 100;

/// Output of world generation
#[derive(Debug, Clone)]
pub struct Generation {
    pub grid: Grid,
    /// Building placements in placement order, producers first
    pub placements: Vec<BuildingPlacement>,
}

/// Carve a grid and place buildings per the configuration
pub fn generate<R: Rng>(config: &SimConfig, rng: &mut R) -> Result<Generation> {
    if config.grid_width < 2 || config.grid_height < 2 {
        bail!(
            "grid must be at least 2x2, got {}x{}",
            config.grid_width,
            config.grid_height
        );
    }

    let mut grid = Grid::new(config.grid_width, config.grid_height);
    walk_map(config, &mut grid, rng);

    let mut placements = Vec::with_capacity(config.producer_count + config.consumer_count);
    place_tiles(
        BuildingKind::Producer,
        config.producer_count,
        &mut grid,
        &mut placements,
        rng,
    )?;
    place_tiles(
        BuildingKind::Consumer,
        config.consumer_count,
        &mut grid,
        &mut placements,
        rng,
    )?;

    Ok(Generation { grid, placements })
}

/// Carve Blocked tiles with a bounded random walk
///
/// The walk spends a step budget drawn from `[min(width, height), area)`,
/// then keeps going until the Empty fraction drops below the configured
/// maximum. The move limit caps the total either way; hitting it is a
/// warning, not an error, and the carved grid is used as-is.
fn walk_map<R: Rng>(config: &SimConfig, grid: &mut Grid, rng: &mut R) {
    let area = grid.area();
    let min_axis = config.grid_width.min(config.grid_height) as usize;

    let step_count = if min_axis >= area {
        area
    } else {
        rng.random_range(min_axis..area)
    };

    let mut position = random_point(grid, rng);
    let mut direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
    let mut force_change_direction = false;

    let mut remaining_steps = step_count;
    let mut empty_tiles = area;
    let max_empty_tiles = (config.max_empty_factor * area as f32) as usize;
    let move_limit = (config.move_limit_factor * area as f32) as usize;
    let mut total_moves: usize = 0;

    loop {
        if total_moves >= move_limit {
            warn!(
                "carving walk hit the move limit ({}) with {} empty tiles left (target {})",
                move_limit, empty_tiles, max_empty_tiles
            );
            break;
        }

        // step budget spent and enough of the field carved
        if remaining_steps == 0 && empty_tiles <= max_empty_tiles {
            break;
        }

        total_moves += 1;

        if grid.get(position) == Some(TileKind::Empty) {
            grid.set(position, TileKind::Blocked);
            empty_tiles -= 1;
        }

        let change_direction = force_change_direction || rng.random_bool(0.5);
        if change_direction {
            if let Some(viable) = random_viable_direction(grid, position, rng) {
                direction = viable;
            }
            force_change_direction = false;
        }

        let next = position.step(direction);
        if !grid.in_bounds(next) {
            // bumped the edge; retry without consuming step budget
            force_change_direction = true;
            continue;
        }

        position = next;
        remaining_steps = remaining_steps.saturating_sub(1);
    }

    debug!(
        "carving walk finished after {} moves, {} of {} tiles left empty",
        total_moves, empty_tiles, area
    );
}

fn random_point<R: Rng>(grid: &Grid, rng: &mut R) -> TileCoord {
    TileCoord::new(
        rng.random_range(0..grid.width()),
        rng.random_range(0..grid.height()),
    )
}

/// Pick uniformly among directions whose next step stays in bounds
fn random_viable_direction<R: Rng>(
    grid: &Grid,
    position: TileCoord,
    rng: &mut R,
) -> Option<Direction> {
    let viable: Vec<Direction> = Direction::ALL
        .iter()
        .copied()
        .filter(|direction| grid.in_bounds(position.step(*direction)))
        .collect();
    viable.choose(rng).copied()
}

/// Place buildings of one kind by bounded rejection sampling
fn place_tiles<R: Rng>(
    kind: BuildingKind,
    count: usize,
    grid: &mut Grid,
    placements: &mut Vec<BuildingPlacement>,
    rng: &mut R,
) -> Result<()> {
    let tile_kind = match kind {
        BuildingKind::Producer => TileKind::Producer,
        BuildingKind::Consumer => TileKind::Consumer,
    };

    for placed in 0..count {
        let max_attempts = PLACEMENT_ATTEMPT_FACTOR * grid.area();
        let mut accepted = false;

        for _ in 0..max_attempts {
            let candidate = random_point(grid, rng);
            if !placeable(grid, candidate) {
                continue;
            }

            grid.set(candidate, tile_kind);
            placements.push(BuildingPlacement::new(kind, candidate));
            accepted = true;
            break;
        }

        if !accepted {
            bail!(
                "could not place {:?} {}/{} after {} attempts; not enough carved tiles",
                kind,
                placed + 1,
                count,
                max_attempts
            );
        }
    }

    Ok(())
}

/// Whether a building may go on this tile
///
/// Accepted tiles are carved, or orthogonally adjacent to a carved tile so
/// placement stays near the corridor network. Tiles already holding a
/// building are never overwritten.
fn placeable(grid: &Grid, coord: TileCoord) -> bool {
    match grid.get(coord) {
        Some(TileKind::Producer) | Some(TileKind::Consumer) => false,
        Some(TileKind::Blocked) => true,
        _ => Direction::ALL
            .iter()
            .any(|direction| grid.get(coord.step(*direction)) == Some(TileKind::Blocked)),
    }
}

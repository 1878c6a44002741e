//! A* pathfinding over the tile grid
//!
//! Classic open/closed list A* with octile costs over the 8-neighborhood.
//! Node storage lives in reusable scratch buffers that are reinitialized at
//! the start of every search, so nothing carries over between searches.

use super::grid::Grid;
use super::types::{TileCoord, DIAGONAL_MOVE_COST, STRAIGHT_MOVE_COST};

/// Sentinel g-cost for tiles the search has not reached
const UNREACHED: u32 = u32::MAX;

const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Octile distance between two tiles: diagonal moves cost 14, straight 10
pub fn octile_distance(a: TileCoord, b: TileCoord) -> u32 {
    let dx = (b.x - a.x).unsigned_abs();
    let dy = (b.y - a.y).unsigned_abs();
    DIAGONAL_MOVE_COST * dx.min(dy) + STRAIGHT_MOVE_COST * dx.abs_diff(dy)
}

/// Per-tile search state
#[derive(Debug, Clone)]
struct PathNode {
    coord: TileCoord,
    g_cost: u32,
    h_cost: u32,
    f_cost: u32,
    walkable: bool,
    previous: Option<usize>,
}

impl PathNode {
    fn update_f_cost(&mut self) {
        // saturating keeps unreached nodes pinned at the ceiling
        self.f_cost = self.g_cost.saturating_add(self.h_cost);
    }
}

/// Reusable A* search over a grid
pub struct Pathfinder {
    nodes: Vec<PathNode>,
    open: Vec<usize>,
    closed: Vec<bool>,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            open: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// Find the cheapest path between two tiles
    ///
    /// Carved and road tiles are walkable; the start and end tiles are
    /// treated as walkable regardless of kind so searches can begin and end
    /// on buildings. Returns the total cost and the tiles from `start` to
    /// `end` inclusive, or None when no path exists.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        start: TileCoord,
        end: TileCoord,
    ) -> Option<(u32, Vec<TileCoord>)> {
        self.reset(grid, end);

        let start_index = grid.index_of(start);
        let end_index = grid.index_of(end);

        self.nodes[start_index].g_cost = 0;
        self.nodes[start_index].walkable = true;
        self.nodes[start_index].update_f_cost();
        self.nodes[end_index].walkable = true;

        self.open.push(start_index);

        while !self.open.is_empty() {
            let open_position = self.lowest_f_cost_open_position();
            let current_index = self.open[open_position];

            if current_index == end_index {
                break;
            }

            self.open.swap_remove(open_position);
            self.closed[current_index] = true;

            let current_coord = self.nodes[current_index].coord;
            let current_g = self.nodes[current_index].g_cost;

            for (dx, dy) in NEIGHBOUR_OFFSETS {
                let neighbour_coord = current_coord.offset(dx, dy);
                if !grid.in_bounds(neighbour_coord) {
                    continue;
                }

                let neighbour_index = grid.index_of(neighbour_coord);
                if self.closed[neighbour_index] {
                    continue;
                }

                let neighbour = &mut self.nodes[neighbour_index];
                if !neighbour.walkable {
                    continue;
                }

                let candidate_g = current_g + octile_distance(current_coord, neighbour_coord);
                if candidate_g < neighbour.g_cost {
                    neighbour.previous = Some(current_index);
                    neighbour.g_cost = candidate_g;
                    neighbour.update_f_cost();

                    if !self.open.contains(&neighbour_index) {
                        self.open.push(neighbour_index);
                    }
                }
            }
        }

        if self.nodes[end_index].g_cost == UNREACHED {
            return None;
        }

        Some((self.nodes[end_index].g_cost, self.build_path(end_index)))
    }

    fn reset(&mut self, grid: &Grid, end: TileCoord) {
        self.nodes.clear();
        self.nodes.reserve(grid.area());

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let coord = TileCoord::new(x, y);
                let mut node = PathNode {
                    coord,
                    g_cost: UNREACHED,
                    h_cost: octile_distance(coord, end),
                    f_cost: 0,
                    walkable: grid.get(coord).is_some_and(|kind| kind.is_walkable()),
                    previous: None,
                };
                node.update_f_cost();
                self.nodes.push(node);
            }
        }

        self.open.clear();
        self.closed.clear();
        self.closed.resize(grid.area(), false);
    }

    /// Index into `open` of the node with the lowest f-cost
    ///
    /// Strictly-lower comparison, so ties keep the earliest entry.
    fn lowest_f_cost_open_position(&self) -> usize {
        let mut best_position = 0;
        let mut best_cost = self.nodes[self.open[0]].f_cost;

        for (position, &index) in self.open.iter().enumerate().skip(1) {
            let cost = self.nodes[index].f_cost;
            if cost < best_cost {
                best_cost = cost;
                best_position = position;
            }
        }

        best_position
    }

    /// Walk the previous links back from the end, then flip so the result
    /// runs start to end
    fn build_path(&self, end_index: usize) -> Vec<TileCoord> {
        let mut tiles = Vec::new();
        let mut current = Some(end_index);

        while let Some(index) = current {
            tiles.push(self.nodes[index].coord);
            current = self.nodes[index].previous;
        }

        tiles.reverse();
        tiles
    }
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new()
    }
}

//! Simulation configuration

use super::types::TileCoord;

/// Tuning options for world generation and the economy
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Grid width in tiles
    pub grid_width: i32,
    /// Grid height in tiles
    pub grid_height: i32,
    /// Edge length of one tile in world units (only affects the
    /// tile-to-world conversion used by hosts to place visuals)
    pub tile_size: f32,
    /// Fraction of the grid allowed to remain Empty when the carving
    /// walk stops
    pub max_empty_factor: f32,
    /// Multiple of the grid area after which the carving walk gives up
    pub move_limit_factor: f32,
    /// Number of producer buildings to place
    pub producer_count: usize,
    /// Number of consumer buildings to place
    pub consumer_count: usize,
    /// Seconds between units emitted by a producer
    pub production_interval: f32,
    /// Seconds a vehicle takes to advance one path tile
    pub movement_interval: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 32,
            tile_size: 1.0,
            max_empty_factor: 0.35,
            move_limit_factor: 10.0,
            producer_count: 3,
            consumer_count: 6,
            production_interval: 1.0,
            movement_interval: 0.5,
        }
    }
}

impl SimConfig {
    pub fn area(&self) -> usize {
        (self.grid_width as usize) * (self.grid_height as usize)
    }

    /// Convert a tile coordinate to a world-space position, centering the
    /// grid on the origin. Pure function for hosts; the core never uses it.
    pub fn to_world(&self, coord: TileCoord) -> (f32, f32) {
        let x = (coord.x as f32 - self.grid_width as f32 / 2.0 + 0.5) * self.tile_size;
        let y = (coord.y as f32 - self.grid_height as f32 / 2.0 + 0.5) * self.tile_size;
        (x, y)
    }
}

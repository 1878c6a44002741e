//! Dense tile grid storage
//!
//! Row-major, fixed size after construction. The generator owns the grid
//! while carving; afterwards the only mutation is road painting during
//! association.

use super::types::{TileCoord, TileKind};

/// A rectangular grid of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Create a grid with every tile Empty
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            tiles: vec![TileKind::Empty; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Flat index of an in-bounds coordinate
    pub fn index_of(&self, coord: TileCoord) -> usize {
        debug_assert!(self.in_bounds(coord));
        (coord.y * self.width + coord.x) as usize
    }

    pub fn get(&self, coord: TileCoord) -> Option<TileKind> {
        if self.in_bounds(coord) {
            Some(self.tiles[self.index_of(coord)])
        } else {
            None
        }
    }

    pub fn set(&mut self, coord: TileCoord, kind: TileKind) {
        let index = self.index_of(coord);
        self.tiles[index] = kind;
    }

    /// Number of tiles holding the given kind
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }
}

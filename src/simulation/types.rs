//! Core types for the freight simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A tile coordinate on the grid
/// Valid coordinates satisfy `0 <= x < width` and `0 <= y < height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one tile away in the given axis direction
    pub fn step(&self, direction: Direction) -> TileCoord {
        let (dx, dy) = direction.offset();
        TileCoord::new(self.x + dx, self.y + dy)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> TileCoord {
        TileCoord::new(self.x + dx, self.y + dy)
    }
}

/// The four axis directions used by the carving walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Tile-space offset of one step in this direction
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// What a single grid cell holds
///
/// Kinds are mutually exclusive. Blocked means carved by the walk; carved
/// ground is the substrate roads and buildings sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    Blocked,
    Road,
    Producer,
    Consumer,
}

impl TileKind {
    /// Whether vehicles can traverse this tile kind
    /// Building tiles are not walkable; searches force their own endpoints
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileKind::Blocked | TileKind::Road)
    }

    /// Single character used by the terminal map
    pub fn glyph(&self) -> char {
        match self {
            TileKind::Empty => '.',
            TileKind::Blocked => '#',
            TileKind::Road => '+',
            TileKind::Producer => 'P',
            TileKind::Consumer => 'C',
        }
    }
}

/// A wrapper type for producer IDs
/// Producers live in an arena; the ID is the arena index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProducerId(pub usize);

/// A wrapper type for consumer IDs
/// Consumers live in an arena; the ID is the arena index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsumerId(pub usize);

/// A wrapper type for vehicle IDs
/// Vehicles come and go, so this is a monotonic counter, not an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// The two building kinds; doubles as a vehicle's current target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingKind {
    Producer,
    Consumer,
}

/// A building placed by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingPlacement {
    pub kind: BuildingKind,
    pub coord: TileCoord,
}

impl BuildingPlacement {
    pub fn new(kind: BuildingKind, coord: TileCoord) -> Self {
        Self { kind, coord }
    }
}

/// Cost of moving one tile along an axis
pub const STRAIGHT_MOVE_COST: u32 = 10;

/// Cost of moving one tile diagonally
pub const DIAGONAL_MOVE_COST: u32 = 14;

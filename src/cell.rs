use serde::{Deserialize, Serialize};

/// Cardinal movement directions.
///
/// The enumeration order (down, up, left, right) is the fixed order used
/// everywhere: action decoding, neighbor expansion in pathfinding, and
/// visibility rays. Down is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid delta for one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Wall-flag bit for this direction (see `Cell`)
    pub fn bit(self) -> u8 {
        match self {
            Direction::Down => 1,
            Direction::Up => 2,
            Direction::Left => 4,
            Direction::Right => 8,
        }
    }

    /// Decode an external action index (0=down, 1=up, 2=left, 3=right).
    /// The mapping is fixed, not configurable.
    pub fn from_action(action: u8) -> Option<Direction> {
        match action {
            0 => Some(Direction::Down),
            1 => Some(Direction::Up),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }
}

const ALL_WALLS: u8 = 0b1111;

/// A single grid unit. Walls are stored as a bitmask (one bit per
/// direction, `Direction::bit`). Cells start fully sealed; the only
/// mutation path is `Maze::connect`, which clears the shared wall on both
/// sides in one operation so the two adjacent cells never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: u8,
}

impl Cell {
    /// A cell with all four walls standing
    pub fn sealed() -> Self {
        Cell { walls: ALL_WALLS }
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls & dir.bit() != 0
    }

    pub(crate) fn clear_wall(&mut self, dir: Direction) {
        self.walls &= !dir.bit();
    }

    /// Raw wall bitmask (bit 0 = down, 1 = up, 2 = left, 3 = right)
    pub fn wall_bits(&self) -> u8 {
        self.walls
    }

    pub fn is_sealed(&self) -> bool {
        self.walls == ALL_WALLS
    }

    /// Legal movement directions out of this cell, in the fixed
    /// enumeration order. Bounds are the maze's concern, not the cell's.
    pub fn open_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|d| !self.has_wall(*d))
            .collect()
    }
}
